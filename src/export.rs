//! Export of normalized documents
//!
//! JSON is the main output; the outline view is a quick way to eyeball the
//! heading structure a page produced.

use anyhow::Result;
use std::fmt::Write;

use crate::document::{generate_outline, LawDocument};

pub fn export_to_json(document: &LawDocument, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

pub fn export_to_outline(document: &LawDocument) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "{}", document.title)?;
    if let (Some(number), Some(date)) = (&document.law_number, &document.law_date) {
        writeln!(output, "№ {number} від {date}")?;
    }
    output.push('\n');

    for item in generate_outline(document) {
        let indent = "  ".repeat(item.level.saturating_sub(1) as usize);
        writeln!(output, "{indent}{}", item.title)?;
    }

    Ok(output)
}
