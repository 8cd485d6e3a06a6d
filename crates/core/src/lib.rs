//! Core library for pdfoutline
//!
//! This crate implements the **Functional Core** of pdfoutline: it infers a
//! document outline (a title plus ranked headings with page numbers) from a
//! document's plain text and its span geometry. It performs no I/O; the
//! rendering backend (`pdf_layout`) and the CLI shell (`pdfoutline`) live in
//! their own crates.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Candidate detection over page text | [`candidates`] |
//! | Fuzzy matching of candidates to layout spans | [`matcher`] |
//! | Header/footer suppression | [`noise`] |
//! | Reassembly of wrapped headings | [`merge`] |
//! | Importance scoring and rank tagging | [`rank`] |
//! | Title and outline assembly | [`outline`] |
//!
//! [`pipeline::OutlineExtractor`] chains the stages for one document.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use pdfoutline_core::{NoEntities, OutlineConfig, OutlineExtractor};
//!
//! let extractor = OutlineExtractor::new(OutlineConfig::default(), Box::new(NoEntities));
//! let extraction = extractor.extract(&document);
//! println!("{}", serde_json::to_string_pretty(&extraction.outline)?);
//! ```

pub mod candidates;
pub mod config;
pub mod entity;
mod error;
pub mod layout;
pub mod matcher;
pub mod merge;
pub mod noise;
pub mod outline;
pub mod pipeline;
pub mod rank;
pub mod text;
pub mod types;

pub use config::OutlineConfig;
pub use entity::{Entity, EntityLabel, EntityRecognizer, Gazetteer, NoEntities};
pub use error::Error;
pub use layout::{BBox, DocumentSource, LayoutBlock, LayoutLine, LayoutSpan, PageLayout};
pub use outline::{Outline, OutlineEntry};
pub use pipeline::{Extraction, OutlineExtractor};
pub use types::{ScoredSpan, Span, Tag};
