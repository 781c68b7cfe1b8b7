//! List accumulation
//!
//! Contiguous list candidates of the same ordering are coalesced into a single
//! `ListGroup`. A group is only handed out at the moment it closes: when the
//! ordering changes, when a non-list block arrives, or at the end of the stream.

use std::mem;

use super::super::models::*;

/// Leading token that enumerates a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enumerator {
    /// "1)", "12."
    Numeric,
    /// "а)", "b)"
    Letter,
}

#[derive(Debug)]
struct OpenList {
    group: ListGroup,
    /// Lettered run hanging off the group's last item
    nested: Option<SubGroup>,
}

impl OpenList {
    fn new(ordering: ListOrdering, text: String) -> Self {
        Self {
            group: ListGroup {
                list_type: ordering,
                items: vec![text],
                sub_groups: Vec::new(),
            },
            nested: None,
        }
    }

    fn finish(mut self) -> ContentNode {
        if let Some(nested) = self.nested.take() {
            self.group.sub_groups.push(nested);
        }
        ContentNode::List(self.group)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListAccumulator {
    open: Option<OpenList>,
    nest_lettered: bool,
}

impl ListAccumulator {
    pub(crate) fn new(nest_lettered: bool) -> Self {
        Self {
            open: None,
            nest_lettered,
        }
    }

    /// Ordering of the list currently being accumulated, if any
    pub(crate) fn open_ordering(&self) -> Option<ListOrdering> {
        self.open.as_ref().map(|open| open.group.list_type)
    }

    /// Feed one list candidate. Returns the previous group if the candidate closed it.
    pub(crate) fn push(
        &mut self,
        ordering: ListOrdering,
        enumerator: Option<Enumerator>,
        text: String,
    ) -> Option<ContentNode> {
        let Some(open) = self.open.as_mut() else {
            self.open = Some(OpenList::new(ordering, text));
            return None;
        };

        if open.group.list_type == ordering {
            if let Some(nested) = open.nested.take() {
                open.group.sub_groups.push(nested);
            }
            open.group.items.push(text);
            return None;
        }

        let nests_under_item = self.nest_lettered
            && open.group.list_type == ListOrdering::Ordered
            && enumerator == Some(Enumerator::Letter);

        if nests_under_item {
            let parent = open.group.items.len() - 1;
            open.nested
                .get_or_insert_with(|| SubGroup {
                    item: parent,
                    list_type: ordering,
                    items: Vec::new(),
                })
                .items
                .push(text);
            return None;
        }

        // Ordering changed: the previous list is finished
        let finished = mem::replace(open, OpenList::new(ordering, text));
        Some(finished.finish())
    }

    /// Close the open list, if any, and hand it out
    pub(crate) fn close(&mut self) -> Option<ContentNode> {
        self.open.take().map(OpenList::finish)
    }
}
