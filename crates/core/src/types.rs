use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::layout::BBox;

/// A layout span that matched a heading candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub page: usize,
    pub text: String,
    /// Rounded to two decimals.
    pub font_size: f64,
    pub font_weight: u16,
    pub font_color: u32,
    pub font_family: String,
    #[serde(rename = "coordinates")]
    pub bbox: BBox,
    pub in_box: bool,
}

/// Rank label: `H1` is the most prominent score in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(usize);

impl Tag {
    /// Tag for the `index`-th distinct score (0-based).
    pub fn from_index(index: usize) -> Self {
        Tag(index + 1)
    }

    pub fn rank(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A [`Span`] after scoring and rank tagging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSpan {
    #[serde(flatten)]
    pub span: Span,
    pub importance_score: f64,
    pub tag: Tag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display() {
        assert_eq!(Tag::from_index(0).to_string(), "H1");
        assert_eq!(Tag::from_index(4).to_string(), "H5");
        assert_eq!(Tag::from_index(2).rank(), 3);
    }

    #[test]
    fn test_span_serializes_coordinates() {
        let span = Span {
            page: 1,
            text: "Overview".to_string(),
            font_size: 14.0,
            font_weight: 700,
            font_color: 0,
            font_family: "Helvetica-Bold".to_string(),
            bbox: BBox::new(1.0, 2.0, 3.0, 4.0),
            in_box: true,
        };
        let json = serde_json::to_value(&span).unwrap();
        assert_eq!(json["coordinates"]["y1"], 4.0);
        assert_eq!(json["font_family"], "Helvetica-Bold");
    }

    #[test]
    fn test_scored_span_serializes_tag_as_string() {
        let scored = ScoredSpan {
            span: Span {
                page: 2,
                text: "Scope".to_string(),
                font_size: 12.0,
                font_weight: 400,
                font_color: 0,
                font_family: "Times".to_string(),
                bbox: BBox::default(),
                in_box: false,
            },
            importance_score: 16.0,
            tag: Tag::from_index(1),
        };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["tag"], "H2");
        assert_eq!(json["page"], 2);
    }
}
