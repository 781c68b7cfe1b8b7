//! File validation and input discovery
//!
//! This module checks input paths before they are read and expands
//! directories into the statute pages they contain.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use super::error::DocumentError;

const HTML_EXTENSIONS: [&str; 2] = ["htm", "html"];

fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HTML_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Validates that the file looks like a saved statute page
pub(crate) fn validate_html_file(file_path: &Path) -> Result<(), DocumentError> {
    if !has_html_extension(file_path) {
        let extension = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_string();
        return Err(DocumentError::UnsupportedFormat { extension });
    }

    if !file_path.is_file() {
        return Err(DocumentError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", file_path.display()),
        )));
    }

    Ok(())
}

/// Expand the given inputs into the list of pages to process.
///
/// Files are kept as given; directories contribute their `.htm`/`.html`
/// entries (not recursive), sorted by name.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && has_html_extension(path))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    if files.is_empty() {
        bail!("No .htm or .html files found in the given inputs");
    }

    Ok(files)
}
