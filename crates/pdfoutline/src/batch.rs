use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "batch")]
#[command(about = "Process every PDF in a directory")]
pub struct App {
    /// Directory scanned for `.pdf` files
    #[arg(long, env = "PDFOUTLINE_INPUT_DIR", default_value = "/app/input")]
    pub input_dir: PathBuf,

    /// Directory receiving one `<name>.json` per input
    #[arg(long, env = "PDFOUTLINE_OUTPUT_DIR", default_value = "/app/output")]
    pub output_dir: PathBuf,

    /// Dump of the pre-filter match list, overwritten for every document
    #[arg(long, env = "PDFOUTLINE_DEBUG_FILE", default_value = "debug_all_matches.json")]
    pub debug_file: PathBuf,
}

/// Processed and failed document counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub failed: usize,
}

/// PDF files directly inside `dir`, sorted by file name. The extension
/// match ignores case.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()).into());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .wrap_err_with(|| f!("cannot list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// `<output_dir>/<stem>.json` for an input file.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Run every PDF through the pipeline. A failing document is reported and
/// skipped; only problems with the directories themselves abort the batch.
pub fn process_dir(app: &App, global: &crate::Global) -> Result<Summary> {
    let files = list_pdfs(&app.input_dir)?;
    std::fs::create_dir_all(&app.output_dir)
        .wrap_err_with(|| f!("cannot create {}", app.output_dir.display()))?;
    let extractor = crate::config::build_extractor(global)?;

    let mut summary = Summary::default();
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{} {}", "Processing:".cyan(), name);

        let result = crate::extract::process_file(path, &extractor, Some(&app.debug_file))
            .and_then(|extraction| {
                let out = output_path(&app.output_dir, path);
                crate::report::write_json(&out, &extraction.outline)?;
                Ok((extraction, out))
            });

        match result {
            Ok((extraction, out)) => {
                crate::report::print_saved(&extraction.outline, &out);
                summary.processed += 1;
            }
            Err(err) => {
                log::error!("failed to process {}: {:#}", name, err);
                eprintln!("{} {}: {}", "Failed to process".red(), name, err);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let summary = process_dir(&app, &global)?;
    println!(
        "{}",
        f!(
            "{} processed, {} failed",
            summary.processed, summary.failed
        )
        .bold()
    );
    Ok(())
}
