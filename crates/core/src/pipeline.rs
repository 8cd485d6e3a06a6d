//! End-to-end heading inference for one document.
//!
//! ```text
//! page text ──> candidates ──┐
//! page layout ───────────────┴─> match ─> remove repeated ─> merge ─> rank/tag ─> outline
//! ```

use std::collections::BTreeSet;

use crate::candidates::{CandidateDetector, CandidateSet};
use crate::config::OutlineConfig;
use crate::entity::EntityRecognizer;
use crate::layout::DocumentSource;
use crate::matcher::match_spans;
use crate::merge::merge_adjacent;
use crate::noise::remove_repeated_text;
use crate::outline::{build_outline, reading_order, Outline};
use crate::rank::rank_and_tag;
use crate::types::{ScoredSpan, Span};

/// Everything one run produced, from candidates to the final outline.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub total_pages: usize,
    pub candidates: CandidateSet,
    /// Every matched span before repeated-text removal.
    pub matches: Vec<Span>,
    pub blacklist: BTreeSet<String>,
    /// Tagged headings in reading order.
    pub tagged: Vec<ScoredSpan>,
    pub outline: Outline,
}

/// Holds the configuration and the entity recognizer, both reused across
/// documents. Each call to [`OutlineExtractor::extract`] is independent.
pub struct OutlineExtractor {
    config: OutlineConfig,
    recognizer: Box<dyn EntityRecognizer>,
}

impl OutlineExtractor {
    pub fn new(config: OutlineConfig, recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self { config, recognizer }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    pub fn extract(&self, source: &dyn DocumentSource) -> Extraction {
        let texts = source.page_texts();
        let total_pages = texts.len();

        let detector =
            CandidateDetector::new(self.recognizer.as_ref(), self.config.max_candidate_chars);
        let candidates = detector.detect_document(&texts);
        log::debug!(
            "{} candidates across {} pages",
            candidates.len(),
            total_pages
        );

        let layouts = source.page_layouts();
        let matches = match_spans(&layouts, &candidates, &self.config);
        log::debug!("{} spans matched a candidate", matches.len());

        let (filtered, blacklist) =
            remove_repeated_text(matches.clone(), total_pages, &self.config);
        let merged = merge_adjacent(filtered, &self.config);
        log::debug!("{} spans after merging wrapped headings", merged.len());

        let ranked = rank_and_tag(merged, &self.config);
        log::debug!("{} headings tagged", ranked.len());

        let tagged = reading_order(ranked);
        let outline = build_outline(tagged.clone());

        Extraction {
            total_pages,
            candidates,
            matches,
            blacklist,
            tagged,
            outline,
        }
    }
}
