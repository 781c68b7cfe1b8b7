//! Classification engine parts
//!
//! This module contains the per-block classifier and the stateful pieces the
//! document builder routes classified blocks through.

pub mod classify;
pub(crate) mod heading;
pub(crate) mod list;
pub mod reference;

pub use classify::{
    Classification, Classifier, ClassifierContext, ClassifierOptions, DefaultListPolicy,
    ListItemPolicy,
};
pub use heading::HeadingMarker;
pub use list::Enumerator;
pub use reference::{extract_reference, ExtractedReference};
