//! Tunable thresholds for the heading-inference pipeline.
//!
//! Every field defaults to the constant of the same name, so a TOML file only
//! needs to mention the values it overrides:
//!
//! ```toml
//! min_score = 18.0
//! top_n = 50
//! ```

use serde::{Deserialize, Serialize};

use crate::Error;

/// Minimum similarity ratio (exclusive) for a span to match a candidate.
pub const SIMILARITY_THRESHOLD: f64 = 0.75;

/// Slack applied to every edge of a block box for the `in_box` check.
pub const BOX_TOLERANCE: f64 = 2.0;

/// Lines at or above this many characters are never lexical candidates.
pub const MAX_CANDIDATE_CHARS: usize = 150;

/// A repeated text must appear on strictly more pages than this.
pub const MIN_REPEAT_PAGES: usize = 2;

/// Fraction of the document's pages a repeated text must cover.
pub const COVERAGE_RATIO: f64 = 0.8;

/// Maximum standard deviation of a repeated text's center coordinates.
pub const POSITION_TOLERANCE: f64 = 10.0;

/// Maximum gap between a run's bottom edge and the next span's top edge.
pub const VERTICAL_GAP: f64 = 10.0;

/// Maximum font-size difference for spans merged into one heading.
pub const SIZE_TOLERANCE: f64 = 0.5;

/// Spans scoring below this are dropped before tagging.
pub const MIN_SCORE: f64 = 20.0;

/// Number of highest-scoring spans kept before deduplication.
pub const TOP_N: usize = 30;

pub const BOLD_WEIGHT: u16 = 700;
pub const REGULAR_WEIGHT: u16 = 400;

/// Score bonus for spans contained in their block's box.
pub const BOX_BONUS: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub similarity_threshold: f64,
    pub box_tolerance: f64,
    pub max_candidate_chars: usize,
    pub min_repeat_pages: usize,
    pub coverage_ratio: f64,
    pub position_tolerance: f64,
    pub vertical_gap: f64,
    pub size_tolerance: f64,
    pub min_score: f64,
    /// `0` disables the cap.
    pub top_n: usize,
    pub bold_weight: u16,
    pub regular_weight: u16,
    pub box_bonus: f64,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SIMILARITY_THRESHOLD,
            box_tolerance: BOX_TOLERANCE,
            max_candidate_chars: MAX_CANDIDATE_CHARS,
            min_repeat_pages: MIN_REPEAT_PAGES,
            coverage_ratio: COVERAGE_RATIO,
            position_tolerance: POSITION_TOLERANCE,
            vertical_gap: VERTICAL_GAP,
            size_tolerance: SIZE_TOLERANCE,
            min_score: MIN_SCORE,
            top_n: TOP_N,
            bold_weight: BOLD_WEIGHT,
            regular_weight: REGULAR_WEIGHT,
            box_bonus: BOX_BONUS,
        }
    }
}

impl OutlineConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let cfg = OutlineConfig::default();
        assert_eq!(cfg.similarity_threshold, 0.75);
        assert_eq!(cfg.box_tolerance, 2.0);
        assert_eq!(cfg.min_score, 20.0);
        assert_eq!(cfg.top_n, 30);
        assert_eq!(cfg.coverage_ratio, 0.8);
        assert_eq!(cfg.vertical_gap, 10.0);
        assert_eq!(cfg.size_tolerance, 0.5);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let cfg = OutlineConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, OutlineConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let cfg = OutlineConfig::from_toml_str("min_score = 15.5\ntop_n = 0\n").unwrap();
        assert_eq!(cfg.min_score, 15.5);
        assert_eq!(cfg.top_n, 0);
        assert_eq!(cfg.similarity_threshold, SIMILARITY_THRESHOLD);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = OutlineConfig::from_toml_str("min_score = \"high\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
