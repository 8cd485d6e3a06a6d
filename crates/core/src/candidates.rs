//! Heading candidate detection over raw page text.

use indexmap::IndexSet;

use crate::entity::EntityRecognizer;
use crate::text::{is_heading_like, split_lines};

/// Ordered set of candidate strings. Iteration follows first insertion.
pub type CandidateSet = IndexSet<String>;

/// Proposes heading-like strings from plain page text.
///
/// Two rules feed the result: a lexical rule applied to every trimmed line,
/// and the injected entity recognizer run over the whole page.
pub struct CandidateDetector<'a> {
    recognizer: &'a dyn EntityRecognizer,
    max_chars: usize,
}

impl<'a> CandidateDetector<'a> {
    pub fn new(recognizer: &'a dyn EntityRecognizer, max_chars: usize) -> Self {
        Self {
            recognizer,
            max_chars,
        }
    }

    /// Candidates found on a single page.
    pub fn detect_page(&self, text: &str) -> CandidateSet {
        let lines: Vec<&str> = split_lines(text)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let mut candidates: CandidateSet = lines
            .iter()
            .filter(|l| is_heading_like(l, self.max_chars))
            .map(|l| l.to_string())
            .collect();

        for entity in self.recognizer.recognize(&lines.join("\n")) {
            if !entity.label.is_heading_category() || candidates.contains(&entity.text) {
                continue;
            }
            let trimmed = entity.text.trim();
            if !trimmed.is_empty() {
                candidates.insert(trimmed.to_string());
            }
        }

        candidates
    }

    /// Union of the candidates of every page, in page order.
    pub fn detect_document(&self, pages: &[String]) -> CandidateSet {
        let mut all = CandidateSet::new();
        for text in pages {
            all.extend(self.detect_page(text));
        }
        all
    }
}
