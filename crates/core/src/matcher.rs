//! Grounds heading candidates in the page geometry.

use crate::candidates::CandidateSet;
use crate::config::OutlineConfig;
use crate::layout::{LayoutBlock, LayoutSpan, PageLayout};
use crate::text::fuzzy_match;
use crate::types::Span;

/// Round to two decimals.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Weight derived from the font name.
pub fn font_weight(font: &str, config: &OutlineConfig) -> u16 {
    if font.to_lowercase().contains("bold") {
        config.bold_weight
    } else {
        config.regular_weight
    }
}

fn to_span(
    page: usize,
    text: &str,
    span: &LayoutSpan,
    block: &LayoutBlock,
    config: &OutlineConfig,
) -> Span {
    Span {
        page,
        text: text.to_string(),
        font_size: round2(span.size),
        font_weight: font_weight(&span.font, config),
        font_color: span.color,
        font_family: span.font.clone(),
        bbox: span.bbox,
        in_box: span.bbox.is_inside(&block.bbox, config.box_tolerance),
    }
}

/// Find every layout span whose text fuzzily matches some candidate.
///
/// Candidates are tried in set order and the first hit wins, so each layout
/// span yields at most one [`Span`]. Output follows page, block, line and
/// span order.
pub fn match_spans(
    pages: &[PageLayout],
    candidates: &CandidateSet,
    config: &OutlineConfig,
) -> Vec<Span> {
    let mut matched = Vec::new();

    for page in pages {
        for block in page.blocks.iter().filter(|b| !b.lines.is_empty()) {
            for span in block.lines.iter().flat_map(|l| l.spans.iter()) {
                let text = span.text.trim();
                if text.is_empty() {
                    continue;
                }
                let hit = candidates
                    .iter()
                    .any(|c| fuzzy_match(text, c, config.similarity_threshold));
                if hit {
                    matched.push(to_span(page.number, text, span, block, config));
                }
            }
        }
    }

    matched
}
