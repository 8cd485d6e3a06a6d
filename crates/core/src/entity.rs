//! Entity-recognition seam used by the candidate detector.
//!
//! The pipeline only consumes entities in the [`EntityLabel::is_heading_category`]
//! set. Any model can be plugged in by implementing [`EntityRecognizer`]; the
//! crate ships a no-op recognizer and a lexicon-driven [`Gazetteer`].

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::Deserialize;

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Organization,
    Event,
    Law,
    WorkOfArt,
    Other(String),
}

impl EntityLabel {
    /// Categories whose surface text is proposed as a heading candidate.
    pub fn is_heading_category(&self) -> bool {
        !matches!(self, EntityLabel::Other(_))
    }
}

impl From<&str> for EntityLabel {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "ORG" | "ORGANIZATION" => EntityLabel::Organization,
            "EVENT" => EntityLabel::Event,
            "LAW" => EntityLabel::Law,
            "WORK_OF_ART" => EntityLabel::WorkOfArt,
            _ => EntityLabel::Other(s.to_string()),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Organization => write!(f, "ORGANIZATION"),
            EntityLabel::Event => write!(f, "EVENT"),
            EntityLabel::Law => write!(f, "LAW"),
            EntityLabel::WorkOfArt => write!(f, "WORK_OF_ART"),
            EntityLabel::Other(label) => write!(f, "{}", label),
        }
    }
}

/// A labelled surface span found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// A stateless entity tagger. Loaded once, shared across documents.
pub trait EntityRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// Recognizer that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntities;

impl EntityRecognizer for NoEntities {
    fn recognize(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }
}

#[derive(Debug, Deserialize)]
struct GazetteerFile {
    #[serde(default)]
    entities: BTreeMap<String, Vec<String>>,
}

/// `\b` next to a word character, `\B` next to punctuation, so a term such
/// as "Acme Inc." still matches before a space or the end of the text.
fn edge_boundary(edge: Option<char>) -> &'static str {
    match edge {
        Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
        _ => r"\B",
    }
}

/// Lexicon recognizer: reports every whole-word occurrence of a known term.
///
/// ```toml
/// [entities]
/// ORGANIZATION = ["United Nations", "ACME Corp"]
/// LAW = ["General Data Protection Regulation"]
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    terms: Vec<(Regex, EntityLabel)>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface term under a label.
    pub fn add_term(&mut self, term: &str, label: EntityLabel) -> Result<(), Error> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }
        let pattern = format!(
            "{}{}{}",
            edge_boundary(term.chars().next()),
            regex::escape(term),
            edge_boundary(term.chars().next_back())
        );
        let re = Regex::new(&pattern).map_err(|source| Error::Pattern {
            term: term.to_string(),
            source,
        })?;
        self.terms.push((re, label));
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        let file: GazetteerFile = toml::from_str(s)?;
        let mut gazetteer = Self::new();
        for (label, terms) in &file.entities {
            let label = EntityLabel::from(label.as_str());
            for term in terms {
                gazetteer.add_term(term, label.clone())?;
            }
        }
        Ok(gazetteer)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl EntityRecognizer for Gazetteer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut found: Vec<(usize, Entity)> = Vec::new();
        for (re, label) in &self.terms {
            for m in re.find_iter(text) {
                found.push((
                    m.start(),
                    Entity {
                        text: m.as_str().to_string(),
                        label: label.clone(),
                    },
                ));
            }
        }
        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, e)| e).collect()
    }
}
