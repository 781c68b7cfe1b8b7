//! Citation extraction from reference and amendment text
//!
//! A citation is the `№ <number> від <DD.MM.YYYY>` signature that identifies
//! another legal act. Extraction is a pure function of the text: every call
//! returns its own values and nothing is carried between calls.

use once_cell::sync::Lazy;
use regex::Regex;

/// Act number and date found in a block, plus the block's link if it had one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedReference {
    pub act_number: String,
    pub act_date: String,
    pub url: Option<String>,
}

// Number tokens look like "2344-III", "1961-IV", "586-VI", "93/96-ВР"
static CITATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"№\s*([\p{L}\p{N}]+(?:[-/][\p{L}\p{N}]+)*)\s+від\s+(\d{2}\.\d{2}\.\d{4})").unwrap()
});

static AMENDMENT_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:згідно\s+(?:із|з)\s+Закон|змінено\s+Закон|доповнено\s+Закон|виключено\s+Закон|у\s+редакції\s+Закон)",
    )
    .unwrap()
});

/// Find the first citation in `text`.
///
/// Only the first match is used when a text cites several acts. `link_target`
/// is attached as the url of a successful match.
pub fn extract_reference(text: &str, link_target: Option<&str>) -> Option<ExtractedReference> {
    let captures = CITATION_PATTERN.captures(text)?;
    let act_number = captures.get(1)?.as_str().to_string();
    let act_date = captures.get(2)?.as_str().to_string();

    Some(ExtractedReference {
        act_number,
        act_date,
        url: link_target.map(str::to_string),
    })
}

/// Whether the text carries one of the "amended / excluded / added / revised by act" phrases
pub(crate) fn has_amendment_marker(text: &str) -> bool {
    AMENDMENT_MARKERS.is_match(text)
}
