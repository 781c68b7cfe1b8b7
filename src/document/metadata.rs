//! Top-level act metadata from the page title
//!
//! Titles look like `Про автомобільний транспорт - Закон № 2344-III від 05.04.2001 - d81073-20241115`.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMetadata {
    pub act_number: Option<String>,
    pub act_date: Option<String>,
}

static TITLE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"№\s*([0-9A-Za-zА-Яа-яІіЇїЄє/-]+)").unwrap());

static TITLE_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"від\s*(\d{2}\.\d{2}\.\d{4})").unwrap());

pub fn parse_title(title: &str) -> TitleMetadata {
    if let Some((_, law_info)) = title.split_once(" - Закон № ") {
        if let Some((number, date)) = law_info.split_once(" від ") {
            // Drop the revision suffix (" - d81073-20241115")
            let date = date.split(" - ").next().unwrap_or(date).trim();
            let number = number.trim();
            if !number.is_empty() && !date.is_empty() {
                return TitleMetadata {
                    act_number: Some(number.to_string()),
                    act_date: Some(date.to_string()),
                };
            }
        }
    }

    TitleMetadata {
        act_number: TITLE_NUMBER
            .captures(title)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
        act_date: TITLE_DATE
            .captures(title)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
    }
}
