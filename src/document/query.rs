//! Document search and navigation operations
//!
//! This module provides read-only querying operations on normalized documents:
//! full-text search, outline generation and citation listing.

use super::models::*;

pub fn search_document(document: &LawDocument, query: &str) -> Vec<SearchResult> {
    let mut results = Vec::new();
    if query.trim().is_empty() {
        return results;
    }
    let query_lower = query.to_lowercase();

    let mut push_match = |element_index: usize, text: &str| {
        let text_lower = text.to_lowercase();
        if let Some(start_pos) = text_lower.find(&query_lower) {
            results.push(SearchResult {
                element_index,
                text: text.to_string(),
                start_pos,
                end_pos: start_pos + query_lower.len(),
            });
        }
    };

    for (element_index, node) in document.content.iter().enumerate() {
        match node {
            ContentNode::List(group) => {
                // Search in list items, nested ones included
                for item in &group.items {
                    push_match(element_index, item);
                }
                for sub in &group.sub_groups {
                    for item in &sub.items {
                        push_match(element_index, item);
                    }
                }
            }
            ContentNode::Table { rows } => {
                for cell in rows.iter().flatten() {
                    push_match(element_index, cell);
                }
            }
            other => {
                if let Some(text) = other.text() {
                    push_match(element_index, text);
                }
            }
        }
    }

    results
}

/// Headings plus articles, each article one level below the heading it sits under
pub fn generate_outline(document: &LawDocument) -> Vec<OutlineItem> {
    let mut outline = Vec::new();
    let mut current_level = 0u8;

    for (index, node) in document.content.iter().enumerate() {
        match node {
            ContentNode::Heading { level, text } => {
                current_level = *level;
                outline.push(OutlineItem {
                    title: text.clone(),
                    level: *level,
                    element_index: index,
                });
            }
            ContentNode::Article { text } => outline.push(OutlineItem {
                title: text.clone(),
                level: current_level.saturating_add(1),
                element_index: index,
            }),
            _ => {}
        }
    }

    outline
}

/// Every reference node, in document order
pub fn collect_citations(document: &LawDocument) -> Vec<CitationLink> {
    document
        .content
        .iter()
        .enumerate()
        .filter_map(|(element_index, node)| match node {
            ContentNode::Reference {
                act_number,
                act_date,
                url,
                ..
            } => Some(CitationLink {
                element_index,
                law_number: act_number.clone(),
                law_date: act_date.clone(),
                url: url.clone(),
            }),
            _ => None,
        })
        .collect()
}
