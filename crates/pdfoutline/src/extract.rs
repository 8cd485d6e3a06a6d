use std::path::{Path, PathBuf};

use pdf_layout::ParsedDocument;
use pdfoutline_core::{Extraction, OutlineExtractor};

use crate::prelude::{println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "extract")]
#[command(about = "Extract the outline of a single PDF")]
pub struct App {
    /// Path to the PDF file
    pub path: PathBuf,

    /// Output file path (if omitted, nothing is written)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the outline as JSON instead of a report
    #[arg(long)]
    pub json: bool,

    /// Also dump every matched span, before filtering, to this file
    #[arg(long, env = "PDFOUTLINE_DEBUG_FILE")]
    pub debug_file: Option<PathBuf>,
}

/// Parse one PDF and run the outline pipeline over it. When `debug_file` is
/// given, the pre-filter match list is written there.
pub fn process_file(
    path: &Path,
    extractor: &OutlineExtractor,
    debug_file: Option<&Path>,
) -> Result<Extraction> {
    let doc =
        ParsedDocument::open(path).wrap_err_with(|| f!("cannot parse {}", path.display()))?;
    let extraction = extractor.extract(&doc);
    log::debug!(
        "{}: {} pages, {} matches, {} headings",
        path.display(),
        extraction.total_pages,
        extraction.matches.len(),
        extraction.tagged.len()
    );

    if let Some(debug_file) = debug_file {
        crate::report::write_json(debug_file, &extraction.matches)?;
    }

    Ok(extraction)
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let extractor = crate::config::build_extractor(&global)?;
    let extraction = process_file(&app.path, &extractor, app.debug_file.as_deref())?;

    if let Some(output) = &app.output {
        crate::report::write_json(output, &extraction.outline)?;
        crate::report::print_saved(&extraction.outline, output);
    }

    if app.json {
        println!("{}", serde_json::to_string_pretty(&extraction.outline)?);
    } else {
        crate::report::print_report(&extraction);
    }

    Ok(())
}
