//! Final outline assembly.

use serde::{Deserialize, Serialize};

use crate::types::ScoredSpan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: String,
    pub text: String,
    pub page: usize,
}

/// Document title plus ranked headings in reading order.
///
/// An outline built from no headings has neither field and serializes as
/// `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Vec<OutlineEntry>>,
}

impl Outline {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.outline.is_none()
    }

    /// Headings below the title; empty for an empty outline.
    pub fn entries(&self) -> &[OutlineEntry] {
        self.outline.as_deref().unwrap_or_default()
    }
}

/// Stable re-sort into reading order: page, then top edge.
pub fn reading_order(mut tagged: Vec<ScoredSpan>) -> Vec<ScoredSpan> {
    tagged.sort_by(|a, b| {
        a.span
            .page
            .cmp(&b.span.page)
            .then(a.span.bbox.y0.total_cmp(&b.span.bbox.y0))
    });
    tagged
}

/// Build the outline from tagged spans. The first span in reading order is
/// the title; every other span becomes an entry.
pub fn build_outline(tagged: Vec<ScoredSpan>) -> Outline {
    let mut ordered = reading_order(tagged).into_iter();
    let Some(first) = ordered.next() else {
        return Outline::empty();
    };

    let entries = ordered
        .map(|s| OutlineEntry {
            level: s.tag.to_string().to_uppercase(),
            text: s.span.text.trim().to_string(),
            page: s.span.page,
        })
        .collect();

    Outline {
        title: Some(first.span.text.trim().to_string()),
        outline: Some(entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BBox;
    use crate::types::{Span, Tag};

    fn scored(text: &str, page: usize, y0: f64, tag: usize) -> ScoredSpan {
        ScoredSpan {
            span: Span {
                page,
                text: text.to_string(),
                font_size: 14.0,
                font_weight: 700,
                font_color: 0,
                font_family: "Helvetica-Bold".to_string(),
                bbox: BBox::new(72.0, y0, 300.0, y0 + 14.0),
                in_box: true,
            },
            importance_score: 30.0 - tag as f64,
            tag: Tag::from_index(tag),
        }
    }

    #[test]
    fn test_empty_outline_serializes_as_empty_object() {
        let outline = build_outline(vec![]);
        assert!(outline.is_empty());
        assert!(outline.entries().is_empty());
        assert_eq!(serde_json::to_string(&outline).unwrap(), "{}");
    }

    #[test]
    fn test_title_only() {
        let outline = build_outline(vec![scored(" INTRODUCTION ", 1, 80.0, 0)]);
        assert_eq!(outline.title.as_deref(), Some("INTRODUCTION"));
        assert!(outline.entries().is_empty());
        assert_eq!(
            serde_json::to_string(&outline).unwrap(),
            r#"{"title":"INTRODUCTION","outline":[]}"#
        );
    }

    #[test]
    fn test_reading_order_differs_from_score_order() {
        let tagged = vec![
            scored("Big Chapter", 2, 100.0, 0),
            scored("Document Title", 1, 50.0, 1),
            scored("Section", 1, 300.0, 2),
            scored("Another", 2, 40.0, 2),
        ];
        let outline = build_outline(tagged);
        assert_eq!(outline.title.as_deref(), Some("Document Title"));
        let got: Vec<_> = outline
            .entries()
            .iter()
            .map(|e| (e.level.as_str(), e.text.as_str(), e.page))
            .collect();
        assert_eq!(
            got,
            vec![
                ("H3", "Section", 1),
                ("H3", "Another", 2),
                ("H1", "Big Chapter", 2),
            ]
        );
    }

    #[test]
    fn test_reading_order_stable_on_ties() {
        let tagged = vec![
            scored("Left", 1, 100.0, 0),
            scored("Right", 1, 100.0, 1),
            scored("Earlier", 1, 20.0, 2),
        ];
        let ordered = reading_order(tagged);
        let texts: Vec<_> = ordered.iter().map(|s| s.span.text.as_str()).collect();
        assert_eq!(texts, vec!["Earlier", "Left", "Right"]);
    }

    #[test]
    fn test_roundtrip_empty_object() {
        let outline: Outline = serde_json::from_str("{}").unwrap();
        assert!(outline.is_empty());
    }
}
