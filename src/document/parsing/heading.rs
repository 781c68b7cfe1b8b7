//! Heading detection and hierarchy tracking
//!
//! This module recognizes heading lexemes ("Розділ", "Глава", roman numerals)
//! and assigns nesting levels from a stack of currently open headings.

use once_cell::sync::Lazy;
use regex::Regex;

/// The lexical marker style a heading opens with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingMarker {
    /// "Розділ I", "Section 2"
    Section,
    /// "Глава 3", "Chapter 3"
    Chapter,
    /// "II. Загальні положення"
    Roman,
    /// "1.", "2.1 Назва"
    Numbered,
    /// No marker at all
    Plain,
}

static SECTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:Розділ|РОЗДІЛ|Section|SECTION|Part|PART)\s+(?:[IVXLCІХ]+|\d+)(?:[.\s]|$)")
        .unwrap()
});

static CHAPTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:Глава|ГЛАВА|Chapter|CHAPTER)\s+\d+(?:[-.\s]|$)").unwrap()
});

static ROMAN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[IVXLCІХ]+\.\s+\S").unwrap());

static NUMBERED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)*\.?\s+\S").unwrap());

/// Marker for text that opens with a recognized heading lexeme.
///
/// Only section, chapter and roman-numeral markers count here; plain numbering
/// is too easily confused with list enumerators to mark a heading on its own.
pub(crate) fn heading_lexeme(text: &str) -> Option<HeadingMarker> {
    let text = text.trim();

    if SECTION_PATTERN.is_match(text) {
        Some(HeadingMarker::Section)
    } else if CHAPTER_PATTERN.is_match(text) {
        Some(HeadingMarker::Chapter)
    } else if ROMAN_PATTERN.is_match(text) {
        Some(HeadingMarker::Roman)
    } else {
        None
    }
}

/// Marker for a block already known to be a heading
pub(crate) fn heading_marker(text: &str) -> HeadingMarker {
    heading_lexeme(text).unwrap_or_else(|| {
        if NUMBERED_PATTERN.is_match(text.trim()) {
            HeadingMarker::Numbered
        } else {
            HeadingMarker::Plain
        }
    })
}

#[derive(Debug, Clone)]
struct OpenHeading {
    marker: HeadingMarker,
    label: String,
}

/// Stack of currently open headings, one entry per nesting level
#[derive(Debug, Default)]
pub(crate) struct HeadingTracker {
    stack: Vec<OpenHeading>,
}

impl HeadingTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Labels of the open headings, outermost first
    pub(crate) fn path(&self) -> Vec<&str> {
        self.stack.iter().map(|open| open.label.as_str()).collect()
    }

    /// Assign a level to a new heading and make it the innermost open heading
    pub(crate) fn assign_level(&mut self, marker: HeadingMarker, text: &str) -> u8 {
        let level = self.level_for(marker);

        // Close everything at or below the new heading's depth
        self.stack.truncate(level - 1);
        self.stack.push(OpenHeading {
            marker,
            label: text.to_string(),
        });

        u8::try_from(level).unwrap_or(u8::MAX)
    }

    fn level_for(&self, marker: HeadingMarker) -> usize {
        match marker {
            HeadingMarker::Section => 1,
            HeadingMarker::Chapter => {
                // A chapter nests under a section-like entry, never under another chapter
                match self.stack.first() {
                    Some(top) if top.marker != HeadingMarker::Chapter => 2,
                    _ => 1,
                }
            }
            _ => self
                .stack
                .iter()
                .position(|open| open.marker == marker)
                .map(|index| index + 1)
                .unwrap_or(self.stack.len() + 1),
        }
    }
}
