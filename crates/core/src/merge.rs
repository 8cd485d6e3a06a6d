//! Reassembly of headings that wrap over several lines.

use std::collections::BTreeMap;

use crate::config::OutlineConfig;
use crate::types::Span;

/// Merge vertically adjacent spans of similar size into single headings.
///
/// Works page by page (pages ascending). Spans are ordered by their top edge
/// and a run keeps absorbing the next span while it starts within
/// `vertical_gap` of the run's current bottom edge and its font size is
/// within `size_tolerance` of the run's first span. The merged span keeps
/// every attribute of the first span except the text, which is the
/// space-joined run, and the bottom edge, which moves to the last absorbed
/// span's bottom.
pub fn merge_adjacent(spans: Vec<Span>, config: &OutlineConfig) -> Vec<Span> {
    let mut by_page: BTreeMap<usize, Vec<Span>> = BTreeMap::new();
    for span in spans {
        by_page.entry(span.page).or_default().push(span);
    }

    let mut merged = Vec::new();
    for (_, mut page_spans) in by_page {
        page_spans.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0));
        merged.extend(merge_page(page_spans, config));
    }
    merged
}

fn merge_page(sorted: Vec<Span>, config: &OutlineConfig) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(sorted.len());
    let mut iter = sorted.into_iter().peekable();

    while let Some(mut current) = iter.next() {
        let base_size = current.font_size;
        let mut texts = vec![std::mem::take(&mut current.text)];

        while let Some(next) = iter.peek() {
            let gap = next.bbox.y0 - current.bbox.y1;
            let size_diff = (next.font_size - base_size).abs();
            if gap > config.vertical_gap || size_diff > config.size_tolerance {
                break;
            }
            if let Some(next) = iter.next() {
                current.bbox.y1 = next.bbox.y1;
                texts.push(next.text);
            }
        }

        current.text = texts.join(" ").trim().to_string();
        out.push(current);
    }

    out
}
