//! Core data structures for document representation
//!
//! This module defines the input blocks consumed by the classification engine
//! and the public types used to represent a normalized statute document.

use serde::{Deserialize, Serialize};

// Type aliases for convenience
pub type TableRows = Vec<Vec<String>>;

/// Options for turning a page into a document
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Id of the element holding the statute text
    pub content_root_id: String,
    pub nest_lettered_lists: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            content_root_id: "article".to_string(),
            nest_lettered_lists: false,
        }
    }
}

/// Kind of source element a block was extracted from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockTag {
    #[default]
    Paragraph,
    Heading,
    ListContainer,
    ListItem,
    InlineSpan,
    Table,
    Other,
}

/// One text-bearing unit of source markup, in document order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Block {
    pub tag: BlockTag,
    /// Unordered style-class tokens carried from the markup
    pub style_hints: Vec<String>,
    /// Flattened, whitespace-normalized text
    pub text: String,
    pub has_link: bool,
    pub link_target: Option<String>,
    pub has_emphasis: bool,
    /// Cell text for table blocks, empty otherwise
    pub cells: TableRows,
}

impl Block {
    pub fn new(tag: BlockTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockTag::Paragraph, text)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.style_hints.push(hint.into());
        self
    }

    pub fn with_link(mut self, target: impl Into<String>) -> Self {
        self.has_link = true;
        self.link_target = Some(target.into());
        self
    }

    pub fn with_emphasis(mut self) -> Self {
        self.has_emphasis = true;
        self
    }

    pub fn with_cells(mut self, cells: TableRows) -> Self {
        self.cells = cells;
        self
    }

    pub fn has_hint(&self, hint: &str) -> bool {
        self.style_hints.iter().any(|h| h == hint)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListOrdering {
    Ordered,
    Unordered,
}

/// A nested run of items attached to one item of the parent group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubGroup {
    /// Index of the parent item this group hangs off
    pub item: usize,
    pub list_type: ListOrdering,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListGroup {
    pub list_type: ListOrdering,
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_groups: Vec<SubGroup>,
}

impl ListGroup {
    /// Total items including those in sub-groups
    pub fn item_count(&self) -> usize {
        self.items.len() + self.sub_groups.iter().map(|g| g.items.len()).sum::<usize>()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    Heading {
        level: u8,
        text: String,
    },
    Article {
        text: String,
    },
    Paragraph {
        text: String,
    },
    List(ListGroup),
    Amendment {
        text: String,
    },
    Reference {
        #[serde(rename = "law_number", default, skip_serializing_if = "Option::is_none")]
        act_number: Option<String>,
        #[serde(rename = "law_date", default, skip_serializing_if = "Option::is_none")]
        act_date: Option<String>,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    Table {
        rows: TableRows,
    },
}

impl ContentNode {
    /// Flat text of the node, used by search and outline queries
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentNode::Heading { text, .. }
            | ContentNode::Article { text }
            | ContentNode::Paragraph { text }
            | ContentNode::Amendment { text }
            | ContentNode::Reference { text, .. } => Some(text),
            ContentNode::List(_) | ContentNode::Table { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LawDocument {
    pub title: String,
    pub law_number: Option<String>,
    pub law_date: Option<String>,
    pub source: Option<String>,
    pub content: Vec<ContentNode>,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub element_index: usize,
    pub text: String,
    pub start_pos: usize,
    pub end_pos: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineItem {
    pub title: String,
    pub level: u8,
    pub element_index: usize,
}

/// A reference node pulled out for citation-graph consumers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitationLink {
    pub element_index: usize,
    pub law_number: Option<String>,
    pub law_date: Option<String>,
    pub url: Option<String>,
}
