use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use pdfoutline_core::{Extraction, Outline};

use crate::prelude::{println, *};

/// Serialize `value` as two-space indented JSON and write it in one go.
/// Non-ASCII text is written as-is.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).wrap_err_with(|| f!("cannot write {}", path.display()))
}

/// Human-readable summary of one extraction.
pub fn render_report(extraction: &Extraction) -> String {
    let mut out = String::new();

    if !extraction.blacklist.is_empty() {
        out.push_str(&f!("{}\n", "Removed repeated text:".bold().yellow()));
        for text in &extraction.blacklist {
            out.push_str(&f!("  {}\n", text.dimmed()));
        }
        out.push('\n');
    }

    let outline = &extraction.outline;
    match &outline.title {
        Some(title) => out.push_str(&f!("{} {}\n", "Title:".bold().cyan(), title.bold())),
        None => out.push_str(&f!("{}\n", "No headings found".yellow())),
    }

    if !outline.entries().is_empty() {
        out.push_str(&f!("\n{}\n", "Most Important Titles:".bold().cyan()));
        for entry in outline.entries() {
            out.push_str(&f!(
                "{} | Page {} | {}\n",
                entry.level.green(),
                entry.page,
                entry.text
            ));
        }
    }

    out
}

pub fn print_report(extraction: &Extraction) {
    anstream::print!("{}", render_report(extraction));
}

pub fn print_saved(outline: &Outline, path: &Path) {
    println!(
        "{}",
        f!(
            "Saved {} headings to {}",
            outline.entries().len() + usize::from(outline.title.is_some()),
            path.display()
        )
        .green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfoutline_core::OutlineEntry;

    fn extraction(outline: Outline, blacklist: &[&str]) -> Extraction {
        Extraction {
            total_pages: 2,
            candidates: Default::default(),
            matches: vec![],
            blacklist: blacklist.iter().map(|s| s.to_string()).collect(),
            tagged: vec![],
            outline,
        }
    }

    #[test]
    fn test_write_json_keeps_unicode_and_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let outline = Outline {
            title: Some("Résumé".to_string()),
            outline: Some(vec![]),
        };
        write_json(&path, &outline).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"title\": \"Résumé\",\n  \"outline\": []\n}");
    }

    #[test]
    fn test_write_json_empty_outline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        write_json(&path, &Outline::empty()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_json_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        assert!(write_json(&path, &Outline::empty()).is_err());
    }

    #[test]
    fn test_report_lists_levels_and_removed_text() {
        colored::control::set_override(false);
        let outline = Outline {
            title: Some("ANNUAL REPORT".to_string()),
            outline: Some(vec![OutlineEntry {
                level: "H2".to_string(),
                text: "FINANCIAL RESULTS".to_string(),
                page: 2,
            }]),
        };
        let report = render_report(&extraction(outline, &["confidential draft"]));

        assert!(report.contains("Removed repeated text:\n  confidential draft\n"));
        assert!(report.contains("Title: ANNUAL REPORT\n"));
        assert!(report.contains("H2 | Page 2 | FINANCIAL RESULTS\n"));
    }

    #[test]
    fn test_report_without_headings() {
        colored::control::set_override(false);
        let report = render_report(&extraction(Outline::empty(), &[]));
        assert_eq!(report, "No headings found\n");
    }
}
