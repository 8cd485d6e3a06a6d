//! Header/footer suppression.
//!
//! Text that shows up on most pages at the same screen position is layout
//! furniture (running headers, footers, watermarks), not a heading.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::OutlineConfig;
use crate::text::normalize_text;
use crate::types::Span;

/// Population standard deviation. `0.0` for an empty slice.
fn pstdev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}

#[derive(Default)]
struct Occurrences {
    pages: BTreeSet<usize>,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

/// Normalized texts that repeat at a stable position across the document.
pub fn find_repeated_text(
    spans: &[Span],
    total_pages: usize,
    config: &OutlineConfig,
) -> BTreeSet<String> {
    let mut groups: BTreeMap<String, Occurrences> = BTreeMap::new();
    for span in spans {
        let (cx, cy) = span.bbox.center();
        let entry = groups.entry(normalize_text(&span.text)).or_default();
        entry.pages.insert(span.page);
        entry.xs.push(cx);
        entry.ys.push(cy);
    }

    groups
        .into_iter()
        .filter(|(_, occ)| {
            let page_count = occ.pages.len();
            page_count > config.min_repeat_pages
                && total_pages > 0
                && page_count as f64 / total_pages as f64 >= config.coverage_ratio
                && pstdev(&occ.xs) < config.position_tolerance
                && pstdev(&occ.ys) < config.position_tolerance
        })
        .map(|(text, _)| text)
        .collect()
}

/// Drop every span whose normalized text is in `blacklist`.
pub fn remove_blacklisted(spans: Vec<Span>, blacklist: &BTreeSet<String>) -> Vec<Span> {
    if blacklist.is_empty() {
        return spans;
    }
    spans
        .into_iter()
        .filter(|s| !blacklist.contains(&normalize_text(&s.text)))
        .collect()
}

/// Detect repeated text and remove it. Returns the surviving spans together
/// with the blacklist that was applied.
pub fn remove_repeated_text(
    spans: Vec<Span>,
    total_pages: usize,
    config: &OutlineConfig,
) -> (Vec<Span>, BTreeSet<String>) {
    let blacklist = find_repeated_text(&spans, total_pages, config);
    for text in &blacklist {
        log::info!("removed repeated text in same position across pages: {}", text);
    }
    (remove_blacklisted(spans, &blacklist), blacklist)
}
