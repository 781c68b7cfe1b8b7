//! Error types for document loading
//!
//! The classification engine itself never fails; these cover the collaborators
//! around it (file access, markup parsing, locating the content root).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    /// The markup has no element carrying the statute text
    #[error("no content root found (expected an element with id=\"{id}\")")]
    NoContentRoot { id: String },

    #[error("unsupported file format: expected .htm or .html, got .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("failed to parse markup: {0}")]
    Markup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    /// Whether a batch should skip this document and carry on
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            DocumentError::NoContentRoot { .. } | DocumentError::UnsupportedFormat { .. }
        )
    }
}
