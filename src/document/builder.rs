//! Single forward pass from blocks to content nodes
//!
//! The builder owns the per-document engine state: the list accumulator,
//! the heading stack and whether the previous block ended with a colon.
//! A fresh state is created for every document and dropped when it is done.

use tracing::debug;

use super::models::*;
use super::parsing::classify::{Classification, Classifier, ClassifierContext};
use super::parsing::heading::HeadingTracker;
use super::parsing::list::ListAccumulator;

#[derive(Debug)]
struct EngineContext {
    lists: ListAccumulator,
    headings: HeadingTracker,
    previous_ends_with_colon: bool,
}

impl EngineContext {
    fn new(nest_lettered: bool) -> Self {
        Self {
            lists: ListAccumulator::new(nest_lettered),
            headings: HeadingTracker::new(),
            previous_ends_with_colon: false,
        }
    }

    fn snapshot(&self) -> ClassifierContext {
        ClassifierContext {
            open_list: self.lists.open_ordering(),
            heading_depth: self.headings.depth(),
            previous_ends_with_colon: self.previous_ends_with_colon,
        }
    }
}

/// Counts gathered during one pass, logged once per document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub blocks: usize,
    pub discarded: usize,
    pub list_candidates: usize,
    pub nodes: usize,
}

pub struct DocumentBuilder<'a> {
    classifier: &'a Classifier,
    nest_lettered: bool,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(classifier: &'a Classifier) -> Self {
        Self {
            classifier,
            nest_lettered: false,
        }
    }

    /// Attach lettered items to the preceding numbered item instead of closing the list
    pub fn nest_lettered_lists(mut self, enabled: bool) -> Self {
        self.nest_lettered = enabled;
        self
    }

    pub fn build<I>(&self, blocks: I) -> Vec<ContentNode>
    where
        I: IntoIterator<Item = Block>,
    {
        self.build_with_stats(blocks).0
    }

    /// Run the pass and report what it saw
    pub fn build_with_stats<I>(&self, blocks: I) -> (Vec<ContentNode>, BuildStats)
    where
        I: IntoIterator<Item = Block>,
    {
        let mut context = EngineContext::new(self.nest_lettered);
        let mut content = Vec::new();
        let mut stats = BuildStats::default();

        for block in blocks {
            stats.blocks += 1;
            let classification = self.classifier.classify(&block, &context.snapshot());
            debug!(tag = ?block.tag, ?classification, "classified block");

            if classification == Classification::Discard {
                stats.discarded += 1;
                continue;
            }

            context.previous_ends_with_colon = block.text.trim_end().ends_with(':');
            let Block { text, cells, .. } = block;
            let text = text.trim().to_string();

            if let Classification::ListCandidate {
                ordering,
                enumerator,
            } = classification
            {
                stats.list_candidates += 1;
                if let Some(finished) = context.lists.push(ordering, enumerator, text) {
                    content.push(finished);
                }
                continue;
            }

            // Any other block closes the open list before it is placed
            if let Some(finished) = context.lists.close() {
                content.push(finished);
            }

            let node = match classification {
                Classification::Heading { marker } => {
                    let level = context.headings.assign_level(marker, &text);
                    debug!(level, path = ?context.headings.path(), "heading");
                    ContentNode::Heading { level, text }
                }
                Classification::Article => ContentNode::Article { text },
                Classification::Amendment => ContentNode::Amendment { text },
                Classification::Reference {
                    act_number,
                    act_date,
                    url,
                } => ContentNode::Reference {
                    act_number,
                    act_date,
                    text,
                    url,
                },
                Classification::Table => ContentNode::Table { rows: cells },
                Classification::Paragraph => ContentNode::Paragraph { text },
                Classification::Discard | Classification::ListCandidate { .. } => continue,
            };
            content.push(node);
        }

        // A stream ending mid-list still emits its last group
        if let Some(finished) = context.lists.close() {
            content.push(finished);
        }

        stats.nodes = content.len();
        (content, stats)
    }
}
