//! Importance scoring and rank tagging.

use std::collections::HashSet;

use crate::config::OutlineConfig;
use crate::text::normalize_text;
use crate::types::{ScoredSpan, Span, Tag};

/// `font_size + font_weight / 100 + box bonus`.
pub fn importance_score(span: &Span, config: &OutlineConfig) -> f64 {
    let bonus = if span.in_box { config.box_bonus } else { 0.0 };
    span.font_size + f64::from(span.font_weight) / 100.0 + bonus
}

/// Assign tags to a score-descending sequence.
///
/// Each distinct score gets the next tag in order of first appearance, so the
/// top score is always `H1` and equal scores always share a tag.
pub fn assign_tags(scored: &[(Span, f64)]) -> Vec<Tag> {
    let mut seen: Vec<f64> = Vec::new();
    scored
        .iter()
        .map(|(_, score)| {
            let index = match seen.iter().position(|s| s == score) {
                Some(i) => i,
                None => {
                    seen.push(*score);
                    seen.len() - 1
                }
            };
            Tag::from_index(index)
        })
        .collect()
}

/// Score, filter, cap, deduplicate and tag the merged spans.
///
/// The returned sequence is ordered by descending score.
pub fn rank_and_tag(spans: Vec<Span>, config: &OutlineConfig) -> Vec<ScoredSpan> {
    let mut scored: Vec<(Span, f64)> = spans
        .into_iter()
        .map(|s| {
            let score = importance_score(&s, config);
            (s, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.retain(|(_, score)| *score >= config.min_score);
    if config.top_n > 0 {
        scored.truncate(config.top_n);
    }

    let mut seen: HashSet<(String, usize)> = HashSet::new();
    scored.retain(|(span, _)| seen.insert((normalize_text(&span.text), span.page)));

    let tags = assign_tags(&scored);
    scored
        .into_iter()
        .zip(tags)
        .map(|((span, importance_score), tag)| ScoredSpan {
            span,
            importance_score,
            tag,
        })
        .collect()
}
