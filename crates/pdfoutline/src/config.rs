use std::path::Path;

use pdfoutline_core::{EntityRecognizer, Gazetteer, NoEntities, OutlineConfig, OutlineExtractor};

use crate::prelude::*;

/// Thresholds from `path`, or the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<OutlineConfig> {
    let Some(path) = path else {
        return Ok(OutlineConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("cannot read config {}", path.display()))?;
    let config = OutlineConfig::from_toml_str(&raw)
        .wrap_err_with(|| f!("invalid config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Gazetteer from `path`; without one, no entity candidates are added.
pub fn load_recognizer(path: Option<&Path>) -> Result<Box<dyn EntityRecognizer>> {
    let Some(path) = path else {
        return Ok(Box::new(NoEntities));
    };
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("cannot read entities {}", path.display()))?;
    let gazetteer = Gazetteer::from_toml_str(&raw)
        .wrap_err_with(|| f!("invalid entities {}", path.display()))?;
    log::debug!("loaded {} entity terms from {}", gazetteer.len(), path.display());
    Ok(Box::new(gazetteer))
}

pub fn build_extractor(global: &crate::Global) -> Result<OutlineExtractor> {
    let config = load_config(global.config.as_deref())?;
    let recognizer = load_recognizer(global.entities.as_deref())?;
    Ok(OutlineExtractor::new(config, recognizer))
}
