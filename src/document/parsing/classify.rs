//! Block classification
//!
//! Decides which semantic category a block belongs to. Rules are tried in a
//! fixed order and the first match wins; a block nothing else claims is a
//! paragraph. Classification reads the block and a snapshot of the builder's
//! context and never mutates either.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::models::*;
use super::heading::{heading_lexeme, heading_marker, HeadingMarker};
use super::list::Enumerator;
use super::reference::{extract_reference, has_amendment_marker};

static ARTICLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:Стаття|СТАТТЯ|Article)\s+\d+(?:[-–]\d+)?(?:[.\s]|$)").unwrap()
});

static NUMERIC_ENUMERATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]").unwrap());

static LETTER_ENUMERATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Ll}\)").unwrap());

/// What the classifier can see of the builder's state
///
/// The built-in rules only read `previous_ends_with_colon`. The open list and
/// heading depth are there for custom `ListItemPolicy` implementations, e.g. one
/// that lets unnumbered text continue a list that is already open.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifierContext {
    /// Ordering of the list currently open, if any
    pub open_list: Option<ListOrdering>,
    /// Number of headings currently open
    pub heading_depth: usize,
    /// The previous non-empty block ended with a colon
    pub previous_ends_with_colon: bool,
}

/// Category decided for one block
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Discard,
    Heading {
        marker: HeadingMarker,
    },
    Article,
    Amendment,
    Reference {
        act_number: Option<String>,
        act_date: Option<String>,
        url: Option<String>,
    },
    ListCandidate {
        ordering: ListOrdering,
        enumerator: Option<Enumerator>,
    },
    Table,
    Paragraph,
}

/// Leading enumerator of a list item text
pub fn leading_enumerator(text: &str) -> Option<Enumerator> {
    let text = text.trim_start();
    if NUMERIC_ENUMERATOR.is_match(text) {
        Some(Enumerator::Numeric)
    } else if LETTER_ENUMERATOR.is_match(text) {
        Some(Enumerator::Letter)
    } else {
        None
    }
}

/// Decides whether a block is a list item and which ordering it carries.
///
/// The cues that mark a list item disagree across source documents, so the
/// precedence between them lives behind this trait and can be swapped.
pub trait ListItemPolicy: std::fmt::Debug + Send + Sync {
    fn detect(
        &self,
        block: &Block,
        context: &ClassifierContext,
    ) -> Option<(ListOrdering, Option<Enumerator>)>;
}

/// Structural tag, then style hint, then leading enumerator, then a preceding colon
#[derive(Debug, Clone)]
pub struct DefaultListPolicy {
    pub list_item_hints: Vec<String>,
    pub colon_starts_list: bool,
}

impl Default for DefaultListPolicy {
    fn default() -> Self {
        Self {
            list_item_hints: vec!["rvps2".to_string()],
            colon_starts_list: true,
        }
    }
}

impl ListItemPolicy for DefaultListPolicy {
    fn detect(
        &self,
        block: &Block,
        context: &ClassifierContext,
    ) -> Option<(ListOrdering, Option<Enumerator>)> {
        let enumerator = leading_enumerator(&block.text);

        let structural = matches!(block.tag, BlockTag::ListItem | BlockTag::ListContainer);
        let hinted = self.list_item_hints.iter().any(|hint| block.has_hint(hint));
        let after_colon = self.colon_starts_list && context.previous_ends_with_colon;

        if !(structural || hinted || enumerator.is_some() || after_colon) {
            return None;
        }

        let ordering = match enumerator {
            Some(Enumerator::Numeric) => ListOrdering::Ordered,
            // Items of an <ol> without a typed number are still ordered
            None if structural && block.has_hint("ol") => ListOrdering::Ordered,
            _ => ListOrdering::Unordered,
        };

        Some((ordering, enumerator))
    }
}

/// Knobs that tune classification without replacing the list policy
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    /// Style hints that make a block heading-like
    pub heading_hints: Vec<String>,
    /// Only treat a link-bearing block as a reference when it carries a citation
    pub strict_links: bool,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            heading_hints: vec!["rvts15".to_string()],
            strict_links: false,
        }
    }
}

#[derive(Debug)]
pub struct Classifier {
    options: ClassifierOptions,
    list_policy: Box<dyn ListItemPolicy>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierOptions::default(), DefaultListPolicy::default())
    }
}

impl Classifier {
    pub fn new(options: ClassifierOptions, list_policy: impl ListItemPolicy + 'static) -> Self {
        Self {
            options,
            list_policy: Box::new(list_policy),
        }
    }

    pub fn classify(&self, block: &Block, context: &ClassifierContext) -> Classification {
        let text = block.text.trim();

        if text.is_empty() {
            return Classification::Discard;
        }

        if block.tag == BlockTag::Table {
            return if block.cells.is_empty() {
                Classification::Discard
            } else {
                Classification::Table
            };
        }

        let lexeme = heading_lexeme(text);
        if lexeme.is_some() || self.is_heading_like(block) {
            return Classification::Heading {
                marker: lexeme.unwrap_or_else(|| heading_marker(text)),
            };
        }

        if ARTICLE_PATTERN.is_match(text) {
            return Classification::Article;
        }

        if block.has_emphasis && has_amendment_marker(text) {
            return match extract_reference(text, block.link_target.as_deref()) {
                Some(found) => Classification::Reference {
                    act_number: Some(found.act_number),
                    act_date: Some(found.act_date),
                    url: found.url,
                },
                None => Classification::Amendment,
            };
        }

        if block.has_link {
            match extract_reference(text, block.link_target.as_deref()) {
                Some(found) => {
                    return Classification::Reference {
                        act_number: Some(found.act_number),
                        act_date: Some(found.act_date),
                        url: found.url,
                    };
                }
                None if !self.options.strict_links => {
                    return Classification::Reference {
                        act_number: None,
                        act_date: None,
                        url: block.link_target.clone(),
                    };
                }
                None => {}
            }
        }

        if let Some((ordering, enumerator)) = self.list_policy.detect(block, context) {
            return Classification::ListCandidate {
                ordering,
                enumerator,
            };
        }

        Classification::Paragraph
    }

    fn is_heading_like(&self, block: &Block) -> bool {
        block.tag == BlockTag::Heading
            || self
                .options
                .heading_hints
                .iter()
                .any(|hint| block.has_hint(hint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(block: &Block) -> Classification {
        Classifier::default().classify(block, &ClassifierContext::default())
    }

    #[test]
    fn test_empty_text_is_discarded() {
        assert_eq!(classify(&Block::paragraph("   ")), Classification::Discard);
        assert_eq!(classify(&Block::paragraph("")), Classification::Discard);
    }

    #[test]
    fn test_heading_by_lexeme_and_by_tag() {
        assert_eq!(
            classify(&Block::paragraph("Розділ II. ДЕРЖАВНЕ РЕГУЛЮВАННЯ")),
            Classification::Heading {
                marker: HeadingMarker::Section
            }
        );
        assert_eq!(
            classify(&Block::new(BlockTag::Heading, "Загальні положення")),
            Classification::Heading {
                marker: HeadingMarker::Plain
            }
        );
        assert_eq!(
            classify(&Block::paragraph("ПРИКІНЦЕВІ ПОЛОЖЕННЯ").with_hint("rvts15")),
            Classification::Heading {
                marker: HeadingMarker::Plain
            }
        );
    }

    #[test]
    fn test_heading_wins_over_article() {
        let block = Block::new(BlockTag::Heading, "Стаття 1. Визначення");
        assert!(matches!(classify(&block), Classification::Heading { .. }));
    }

    #[test]
    fn test_article() {
        assert_eq!(
            classify(&Block::paragraph("Стаття 1. Визначення термінів")),
            Classification::Article
        );
        assert_eq!(
            classify(&Block::paragraph("Стаття 12-1. Спеціальні вимоги")),
            Classification::Article
        );
        assert_eq!(
            classify(&Block::paragraph("Статтею 5 визначено")),
            Classification::Paragraph
        );
    }

    #[test]
    fn test_amendment_with_citation_becomes_reference() {
        let block = Block::paragraph(
            "(зі змінами, внесеними згідно із Законом № 123-IX від 01.01.2020)",
        )
        .with_emphasis();
        assert_eq!(
            classify(&block),
            Classification::Reference {
                act_number: Some("123-IX".to_string()),
                act_date: Some("01.01.2020".to_string()),
                url: None,
            }
        );
    }

    #[test]
    fn test_amendment_without_citation() {
        let block = Block::paragraph("{Статтю виключено згідно із Законом}").with_emphasis();
        assert_eq!(classify(&block), Classification::Amendment);
    }

    #[test]
    fn test_amendment_marker_needs_emphasis() {
        let block = Block::paragraph("Пункт змінено Законом у минулому році");
        assert_eq!(classify(&block), Classification::Paragraph);
    }

    #[test]
    fn test_link_always_reference_when_permissive() {
        let block = Block::paragraph("Закон України про дорожній рух").with_link("/laws/show/3353-12");
        assert_eq!(
            classify(&block),
            Classification::Reference {
                act_number: None,
                act_date: None,
                url: Some("/laws/show/3353-12".to_string()),
            }
        );
    }

    #[test]
    fn test_strict_links_fall_through() {
        let classifier = Classifier::new(
            ClassifierOptions {
                strict_links: true,
                ..Default::default()
            },
            DefaultListPolicy::default(),
        );
        let block = Block::paragraph("Закон України про дорожній рух").with_link("/laws/show/3353-12");
        assert_eq!(
            classifier.classify(&block, &ClassifierContext::default()),
            Classification::Paragraph
        );

        let cited = Block::paragraph("Закон № 3353-XII від 30.06.1993").with_link("/laws/show/3353-12");
        assert!(matches!(
            classifier.classify(&cited, &ClassifierContext::default()),
            Classification::Reference { act_number: Some(_), .. }
        ));
    }

    #[test]
    fn test_list_candidates() {
        assert_eq!(
            classify(&Block::paragraph("1) перше")),
            Classification::ListCandidate {
                ordering: ListOrdering::Ordered,
                enumerator: Some(Enumerator::Numeric),
            }
        );
        assert_eq!(
            classify(&Block::paragraph("2. друге")),
            Classification::ListCandidate {
                ordering: ListOrdering::Ordered,
                enumerator: Some(Enumerator::Numeric),
            }
        );
        assert_eq!(
            classify(&Block::paragraph("а) перше")),
            Classification::ListCandidate {
                ordering: ListOrdering::Unordered,
                enumerator: Some(Enumerator::Letter),
            }
        );
        assert_eq!(
            classify(&Block::paragraph("будь-який текст").with_hint("rvps2")),
            Classification::ListCandidate {
                ordering: ListOrdering::Unordered,
                enumerator: None,
            }
        );
        assert_eq!(
            classify(&Block::new(BlockTag::ListItem, "пункт").with_hint("ol")),
            Classification::ListCandidate {
                ordering: ListOrdering::Ordered,
                enumerator: None,
            }
        );
    }

    #[test]
    fn test_colon_signals_unordered_list() {
        let context = ClassifierContext {
            previous_ends_with_colon: true,
            ..Default::default()
        };
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify(&Block::paragraph("перелік без номера"), &context),
            Classification::ListCandidate {
                ordering: ListOrdering::Unordered,
                enumerator: None,
            }
        );

        let no_colon_policy = Classifier::new(
            ClassifierOptions::default(),
            DefaultListPolicy {
                colon_starts_list: false,
                ..Default::default()
            },
        );
        assert_eq!(
            no_colon_policy.classify(&Block::paragraph("перелік без номера"), &context),
            Classification::Paragraph
        );
    }

    #[test]
    fn test_tables() {
        let table = Block::new(BlockTag::Table, "a b")
            .with_cells(vec![vec!["a".to_string(), "b".to_string()]]);
        assert_eq!(classify(&table), Classification::Table);
        assert_eq!(
            classify(&Block::new(BlockTag::Table, "a b")),
            Classification::Discard
        );
    }

    #[test]
    fn test_plain_text_is_paragraph() {
        assert_eq!(
            classify(&Block::paragraph("Звичайний текст")),
            Classification::Paragraph
        );
    }

    #[test]
    fn test_classification_is_repeatable() {
        let classifier = Classifier::default();
        let context = ClassifierContext {
            open_list: Some(ListOrdering::Ordered),
            heading_depth: 2,
            previous_ends_with_colon: false,
        };
        let block = Block::paragraph("(у редакції Закону № 1-IX від 02.02.2020)")
            .with_emphasis()
            .with_link("/laws/show/1-20");
        assert_eq!(
            classifier.classify(&block, &context),
            classifier.classify(&block, &context)
        );
    }

    #[test]
    fn test_amendment_beats_link_without_citation() {
        let block = Block::paragraph("{Статтю виключено згідно із Законом}")
            .with_emphasis()
            .with_link("/laws/show/1");
        assert_eq!(classify(&block), Classification::Amendment);
    }

    #[test]
    fn test_amendment_with_link_and_citation_keeps_url() {
        let block = Block::paragraph("(у редакції Закону № 1-IX від 02.02.2020)")
            .with_emphasis()
            .with_link("/laws/show/1-20");
        assert_eq!(
            classify(&block),
            Classification::Reference {
                act_number: Some("1-IX".to_string()),
                act_date: Some("02.02.2020".to_string()),
                url: Some("/laws/show/1-20".to_string()),
            }
        );
    }

    #[derive(Debug)]
    struct NeverList;

    impl ListItemPolicy for NeverList {
        fn detect(&self, _: &Block, _: &ClassifierContext) -> Option<(ListOrdering, Option<Enumerator>)> {
            None
        }
    }

    #[test]
    fn test_list_policy_is_replaceable() {
        let classifier = Classifier::new(ClassifierOptions::default(), NeverList);
        assert_eq!(
            classifier.classify(&Block::paragraph("1) перше"), &ClassifierContext::default()),
            Classification::Paragraph
        );
    }
}
