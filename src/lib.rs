//! lawdoc: statute HTML to a normalized document model
//!
//! This library turns statute pages (as saved from the official legislation
//! portal) into an ordered sequence of typed content nodes: headings with
//! nesting levels, articles, paragraphs, list groups, amendment notes,
//! references to other acts and tables.

pub mod config;
pub mod document;
pub mod export;

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Full document as JSON
    #[default]
    Json,
    /// Heading and article outline as indented text
    Outline,
}

// Re-export commonly used types
pub use config::Config;
pub use document::parsing::Classifier;
pub use document::{ContentNode, DocumentError, LawDocument};
