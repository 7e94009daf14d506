//! Accumulated operation result

use serde::{Deserialize, Serialize};

use super::page::PageItem;

/// The caller-visible concatenation of all pages' items, in arrival order.
///
/// Owned exclusively by the driving operation while it runs; it grows
/// monotonically until the operation terminates. Order across pages is
/// significant; within-page order is service-defined and preserved as
/// received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccumulatedResult {
    items: Vec<PageItem>,
    rounds: u32,
}

impl AccumulatedResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn extend(&mut self, items: Vec<PageItem>) {
        self.items.extend(items);
    }

    pub(crate) fn set_rounds(&mut self, rounds: u32) {
        self.rounds = rounds;
    }

    /// All accumulated items, in arrival order
    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PageItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of round-trips the operation performed
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

impl IntoIterator for AccumulatedResult {
    type Item = PageItem;
    type IntoIter = std::vec::IntoIter<PageItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
