//! Layout input model handed to the pipeline by a rendering backend.
//!
//! Coordinates are top-down page units: `y` grows towards the bottom of the
//! page, so `y0` is a box's top edge and `y1` its bottom edge.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box `(x0, y0, x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        BBox { x0, y0, x1, y1 }
    }

    /// Center point `(cx, cy)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Returns `true` when all four corners of `self` lie within `outer`
    /// expanded by `tolerance` on every edge. Bounds are inclusive.
    pub fn is_inside(&self, outer: &BBox, tolerance: f64) -> bool {
        let x_range = (outer.x0 - tolerance)..=(outer.x1 + tolerance);
        let y_range = (outer.y0 - tolerance)..=(outer.y1 + tolerance);
        x_range.contains(&self.x0)
            && x_range.contains(&self.x1)
            && y_range.contains(&self.y0)
            && y_range.contains(&self.y1)
    }
}

/// A run of text drawn with a single font, size and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpan {
    pub text: String,
    pub bbox: BBox,
    /// Font family / base-font name as reported by the backend.
    pub font: String,
    pub size: f64,
    /// Packed sRGB fill color, `0xRRGGBB`.
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    pub bbox: BBox,
    pub spans: Vec<LayoutSpan>,
}

/// A layout container of one or more lines. Its box is the containment
/// reference for the spans it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub bbox: BBox,
    pub lines: Vec<LayoutLine>,
}

/// The block tree of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// 1-based page number.
    pub number: usize,
    pub blocks: Vec<LayoutBlock>,
}

/// Anything that can hand the pipeline a document's text and geometry.
///
/// Both views must describe the same pages in the same order.
pub trait DocumentSource {
    /// Plain text of every page, in page order.
    fn page_texts(&self) -> Vec<String>;

    /// Block tree of every page, in page order.
    fn page_layouts(&self) -> Vec<PageLayout>;
}
