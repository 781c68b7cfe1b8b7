//! Statute document model and normalization
//!
//! This module turns statute HTML into a typed sequence of content nodes:
//! blocks are extracted from the page, classified one at a time, and routed
//! through list and heading state into the final document.

pub mod builder;
pub mod error;
pub mod extract;
pub(crate) mod io;
pub(crate) mod loader;
pub mod metadata;
pub mod models;
pub mod parsing;
pub mod query;

// Re-export models and the main entry points
pub use builder::{BuildStats, DocumentBuilder};
pub use error::DocumentError;
pub use io::collect_inputs;
pub use loader::{load_document, parse_html, read_document};
pub use models::*;
pub use query::*;
