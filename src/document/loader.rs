//! Document loading and orchestration
//!
//! This module contains `load_document()` and `parse_html()`, which take a
//! statute page from file or markup through block extraction, title metadata
//! and the classification pass into a finished `LawDocument`.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use super::builder::DocumentBuilder;
use super::error::DocumentError;
use super::extract::extract_blocks;
use super::io::validate_html_file;
use super::metadata::parse_title;
use super::models::*;
use super::parsing::classify::Classifier;

/// Load and normalize one statute page from disk
///
/// This function:
/// 1. Validates the input path
/// 2. Reads the page
/// 3. Extracts blocks from the content root and metadata from the title
/// 4. Runs the classification pass
///
/// A page without a content root fails with `DocumentError::NoContentRoot`
/// inside the returned error so batch callers can skip it.
pub async fn load_document(
    file_path: &Path,
    classifier: &Classifier,
    options: &LoadOptions,
) -> Result<LawDocument> {
    validate_html_file(file_path)?;

    let html = tokio::fs::read_to_string(file_path)
        .await
        .map_err(DocumentError::from)?;
    document_from_page(file_path, &html, classifier, options)
}

/// Blocking counterpart of `load_document` for callers on a blocking thread
pub fn read_document(
    file_path: &Path,
    classifier: &Classifier,
    options: &LoadOptions,
) -> Result<LawDocument> {
    validate_html_file(file_path)?;

    let html = std::fs::read_to_string(file_path).map_err(DocumentError::from)?;
    document_from_page(file_path, &html, classifier, options)
}

fn document_from_page(
    file_path: &Path,
    html: &str,
    classifier: &Classifier,
    options: &LoadOptions,
) -> Result<LawDocument> {
    debug!(path = %file_path.display(), bytes = html.len(), "read page");

    let mut document = parse_html(html, classifier, options)?;

    if document.title.is_empty() {
        document.title = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled Document")
            .to_string();
    }
    document.source = Some(file_path.display().to_string());

    Ok(document)
}

/// Normalize statute markup that is already in memory
pub fn parse_html(
    html: &str,
    classifier: &Classifier,
    options: &LoadOptions,
) -> Result<LawDocument, DocumentError> {
    let extracted = extract_blocks(html, &options.content_root_id)?;

    let title = extracted.title.unwrap_or_default();
    let metadata = parse_title(&title);

    let (content, stats) = DocumentBuilder::new(classifier)
        .nest_lettered_lists(options.nest_lettered_lists)
        .build_with_stats(extracted.blocks);

    info!(
        title = %title,
        blocks = stats.blocks,
        discarded = stats.discarded,
        list_candidates = stats.list_candidates,
        nodes = stats.nodes,
        "normalized document"
    );

    Ok(LawDocument {
        title,
        law_number: metadata.act_number,
        law_date: metadata.act_date,
        source: None,
        content,
    })
}
