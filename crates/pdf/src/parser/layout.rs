//! Line and block grouping, and conversion to the page layout model.
//!
//! # Pipeline
//!
//! ```text
//! TextSpan[] ─> TextLine[] ─> TextBlock[] ─> PageLayout
//!    group_spans_into_lines
//!                  group_lines_into_blocks
//!                                 to_page_layout (top-down boxes)
//! ```
//!
//! Everything here is a pure transformation of already-extracted spans; the
//! content-stream walk lives in [`super::content`].

use std::cmp::Ordering;

use pdfoutline_core::{BBox, LayoutBlock, LayoutLine, LayoutSpan, PageLayout};

use super::backend::{PdfBackend, DEFAULT_PAGE_BOX};
use super::content::{extract_page_spans, TextSpan};
use crate::text::clean_span_text;
use crate::PdfError;

/// A horizontal line of text assembled from spans that share a baseline.
#[derive(Debug, Clone, Default)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
    /// Baseline of the first span (user space).
    pub y: f32,
    /// Left edge of the first span.
    pub x: f32,
    pub font_size: f32,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}

/// Two spans whose baselines differ by at most this share a line.
const Y_TOLERANCE: f32 = 1.0;

/// Gap (points) below which two same-font spans are glued without a space.
const MIN_WORD_GAP: f32 = 1.5;

/// A baseline gap larger than this multiple of the font size starts a block.
const BLOCK_GAP_FACTOR: f32 = 1.4;

/// A left-edge move larger than this multiple of the font size starts a block.
const BLOCK_INDENT_FACTOR: f32 = 3.0;

/// Spans whose sizes differ by less than this count as the same font size.
const SIZE_EPSILON: f32 = 0.5;

/// Glyph box extents relative to the baseline, as fractions of the size.
const ASCENT_RATIO: f64 = 0.8;
const DESCENT_RATIO: f64 = 0.2;

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Group spans into lines, top of the page first.
///
/// Spans whose baselines are within [`Y_TOLERANCE`] of the line's first
/// span join that line; each line is then ordered left to right.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    spans.retain(|s| !s.text.trim().is_empty());
    if spans.is_empty() {
        return Vec::new();
    }

    spans.sort_by(|a, b| cmp_f32(b.y, a.y).then(cmp_f32(a.x, b.x)));

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y = spans[0].y;

    for span in spans {
        if (span.y - current_y).abs() > Y_TOLERANCE && !current.is_empty() {
            lines.push(assemble_line(std::mem::take(&mut current)));
            current_y = span.y;
        }
        current.push(span);
    }
    if !current.is_empty() {
        lines.push(assemble_line(current));
    }

    lines
}

/// Build one line from spans known to share a baseline.
///
/// Neighbouring spans in the same font are concatenated, with a space when
/// the gap between them is wide enough to be a word break. Font changes keep
/// their own span, so a bold lead-in stays separate from regular text.
fn assemble_line(mut spans: Vec<TextSpan>) -> TextLine {
    spans.sort_by(|a, b| cmp_f32(a.x, b.x));

    let mut merged: Vec<TextSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(prev) = merged.last_mut() {
            let gap = span.x - (prev.x + prev.width);
            let same_font = prev.font_name == span.font_name
                && (prev.font_size - span.font_size).abs() < SIZE_EPSILON
                && prev.color == span.color;

            if same_font && gap > -prev.font_size && gap < prev.font_size * 2.0 {
                if gap >= MIN_WORD_GAP && !prev.text.ends_with(' ') && !span.text.starts_with(' ')
                {
                    prev.text.push(' ');
                }
                prev.text.push_str(&span.text);
                prev.width = (span.x + span.width) - prev.x;
                continue;
            }
        }
        merged.push(span);
    }

    for span in &mut merged {
        span.text = clean_span_text(&span.text);
    }
    merged.retain(|s| !s.text.is_empty());

    let y = merged.first().map(|s| s.y).unwrap_or(0.0);
    let x = merged.first().map(|s| s.x).unwrap_or(0.0);
    let font_size = merged
        .iter()
        .map(|s| s.font_size)
        .fold(0.0_f32, f32::max);

    TextLine {
        spans: merged,
        y,
        x,
        font_size,
    }
}

/// Group consecutive lines into blocks.
///
/// A new block starts when the baseline gap to the previous line exceeds
/// [`BLOCK_GAP_FACTOR`] times that line's font size, or when the left edge
/// moves by more than [`BLOCK_INDENT_FACTOR`] times it.
pub fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if line.spans.is_empty() {
            continue;
        }
        let breaks = current.last().is_some_and(|prev| {
            let size = prev.font_size.max(line.font_size).max(1.0);
            let gap = (prev.y - line.y).abs();
            let indent = (prev.x - line.x).abs();
            gap > size * BLOCK_GAP_FACTOR || indent > size * BLOCK_INDENT_FACTOR
        });
        if breaks {
            blocks.push(TextBlock {
                lines: std::mem::take(&mut current),
            });
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(TextBlock { lines: current });
    }

    blocks
}

/// Top-down box for a span, measured down from the MediaBox top edge
/// `page_top` (user space).
fn span_bbox(span: &TextSpan, page_top: f64) -> BBox {
    let size = f64::from(span.font_size);
    let baseline = f64::from(span.y);
    let x0 = f64::from(span.x);
    BBox::new(
        x0,
        page_top - (baseline + ASCENT_RATIO * size),
        x0 + f64::from(span.width.max(0.0)),
        page_top - (baseline - DESCENT_RATIO * size),
    )
}

fn union_all(boxes: impl Iterator<Item = BBox>) -> BBox {
    boxes.reduce(|a, b| a.union(&b)).unwrap_or_default()
}

/// Convert grouped blocks into the layout model with top-down coordinates.
/// `page_top` is the user-space y of the MediaBox top edge.
pub fn to_page_layout(number: usize, blocks: &[TextBlock], page_top: f64) -> PageLayout {
    let blocks = blocks
        .iter()
        .map(|block| {
            let lines: Vec<LayoutLine> = block
                .lines
                .iter()
                .map(|line| {
                    let spans: Vec<LayoutSpan> = line
                        .spans
                        .iter()
                        .map(|s| LayoutSpan {
                            text: s.text.clone(),
                            bbox: span_bbox(s, page_top),
                            font: s.font_name.clone(),
                            size: f64::from(s.font_size),
                            color: s.color,
                        })
                        .collect();
                    LayoutLine {
                        bbox: union_all(spans.iter().map(|s| s.bbox)),
                        spans,
                    }
                })
                .collect();
            LayoutBlock {
                bbox: union_all(lines.iter().map(|l| l.bbox)),
                lines,
            }
        })
        .collect();

    PageLayout { number, blocks }
}

/// Plain text of a page: every line, in block order, joined by newlines.
pub fn page_text(blocks: &[TextBlock]) -> String {
    blocks
        .iter()
        .flat_map(|b| b.lines.iter())
        .map(TextLine::text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One page after analysis.
#[derive(Debug, Clone)]
pub struct AnalyzedPage {
    pub text: String,
    pub layout: PageLayout,
}

/// Run extraction and grouping over every page of the document.
pub fn analyze(backend: &dyn PdfBackend) -> Result<Vec<AnalyzedPage>, PdfError> {
    let page_map = backend.pages();
    let mut pages = Vec::with_capacity(page_map.len());

    for (&number, &page_id) in &page_map {
        let page_box = backend.page_box(page_id).unwrap_or_else(|e| {
            log::warn!("page {}: {}; assuming US Letter", number, e);
            DEFAULT_PAGE_BOX
        });
        let spans = extract_page_spans(backend, page_id)?;
        let span_count = spans.len();
        let lines = group_spans_into_lines(spans);
        let blocks = group_lines_into_blocks(lines);
        log::debug!(
            "page {}: {} spans, {} blocks",
            number,
            span_count,
            blocks.len()
        );

        pages.push(AnalyzedPage {
            text: page_text(&blocks),
            layout: to_page_layout(number as usize, &blocks, f64::from(page_box.top())),
        });
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32, size: f32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            x,
            y,
            width: text.chars().count() as f32 * size * 0.5,
            font_size: size,
            font_name: "Helvetica".to_string(),
            color: 0,
        }
    }

    fn bold(text: &str, x: f32, y: f32, size: f32) -> TextSpan {
        TextSpan {
            font_name: "Helvetica-Bold".to_string(),
            ..span(text, x, y, size)
        }
    }

    #[test]
    fn test_group_spans_same_baseline() {
        let lines = group_spans_into_lines(vec![
            span("world", 100.0, 700.0, 12.0),
            span("Hello", 50.0, 700.3, 12.0),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 1);
        assert_eq!(lines[0].spans[0].text, "Hello world");
    }

    #[test]
    fn test_group_spans_top_line_first() {
        let lines = group_spans_into_lines(vec![
            span("second", 50.0, 680.0, 12.0),
            span("first", 50.0, 700.0, 12.0),
        ]);
        let texts: Vec<_> = lines.iter().map(TextLine::text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_font_change_keeps_separate_spans() {
        let lines = group_spans_into_lines(vec![
            bold("Note:", 50.0, 700.0, 12.0),
            span("read this", 84.0, 700.0, 12.0),
        ]);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].text(), "Note: read this");
    }

    #[test]
    fn test_adjacent_fragments_glued_without_space() {
        let lines = group_spans_into_lines(vec![
            span("Intro", 50.0, 700.0, 10.0),
            span("duction", 75.0, 700.0, 10.0),
        ]);
        assert_eq!(lines[0].spans[0].text, "Introduction");
    }

    #[test]
    fn test_whitespace_only_spans_dropped() {
        let lines = group_spans_into_lines(vec![span("   ", 50.0, 700.0, 12.0)]);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_blocks_split_on_gap_and_indent() {
        let lines = group_spans_into_lines(vec![
            span("Paragraph one", 72.0, 700.0, 10.0),
            span("continues here", 72.0, 688.0, 10.0),
            span("After a gap", 72.0, 640.0, 10.0),
            span("Far right", 300.0, 628.0, 10.0),
        ]);
        let blocks = group_lines_into_blocks(lines);
        let sizes: Vec<usize> = blocks.iter().map(|b| b.lines.len()).collect();
        assert_eq!(sizes, vec![2, 1, 1]);
    }

    #[test]
    fn test_page_layout_top_down_boxes() {
        let lines = group_spans_into_lines(vec![span("Title", 72.0, 692.0, 20.0)]);
        let blocks = group_lines_into_blocks(lines);
        let layout = to_page_layout(3, &blocks, 792.0);

        assert_eq!(layout.number, 3);
        let s = &layout.blocks[0].lines[0].spans[0];
        assert_eq!(s.bbox.x0, 72.0);
        assert_eq!(s.bbox.x1, 122.0);
        assert!((s.bbox.y0 - 84.0).abs() < 1e-9);
        assert!((s.bbox.y1 - 104.0).abs() < 1e-9);
        assert_eq!(layout.blocks[0].bbox, s.bbox);
    }

    #[test]
    fn test_page_text_joins_lines() {
        let lines = group_spans_into_lines(vec![
            span("HEADING", 72.0, 700.0, 16.0),
            span("Body text.", 72.0, 600.0, 10.0),
        ]);
        let blocks = group_lines_into_blocks(lines);
        assert_eq!(page_text(&blocks), "HEADING\nBody text.");
    }

    #[test]
    fn test_span_text_is_cleaned() {
        let lines = group_spans_into_lines(vec![span("\u{FB01}nal\u{FFFD}", 72.0, 700.0, 12.0)]);
        assert_eq!(lines[0].spans[0].text, "final");
    }
}
