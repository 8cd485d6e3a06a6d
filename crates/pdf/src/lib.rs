//! PDF layout extraction for pdfoutline.
//!
//! Turns a PDF into per-page plain text and a block → line → span tree with
//! font attributes and top-down bounding boxes. [`ParsedDocument`] implements
//! [`pdfoutline_core::DocumentSource`] so it can be handed straight to the
//! outline extractor.

use std::path::Path;

use thiserror::Error;

use pdfoutline_core::{DocumentSource, PageLayout};

use parser::backend::{LopdfBackend, PdfBackend};
use parser::layout::AnalyzedPage;

pub mod parser;
pub mod text;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A PDF whose pages have been interpreted and grouped.
///
/// All work happens at construction; the [`DocumentSource`] methods only
/// hand out copies.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pages: Vec<AnalyzedPage>,
}

impl ParsedDocument {
    /// Parse PDF bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let backend = LopdfBackend::load_bytes(bytes)?;
        Self::from_backend(&backend)
    }

    /// Read and parse a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    pub fn from_backend(backend: &dyn PdfBackend) -> Result<Self, PdfError> {
        let pages = parser::layout::analyze(backend)?;
        log::debug!("parsed {} pages", pages.len());
        Ok(Self { pages })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl DocumentSource for ParsedDocument {
    fn page_texts(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.text.clone()).collect()
    }

    fn page_layouts(&self) -> Vec<PageLayout> {
        self.pages.iter().map(|p| p.layout.clone()).collect()
    }
}
