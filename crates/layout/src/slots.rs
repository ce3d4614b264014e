//! Sparse slot storage.

use cardgrid_traits::ImageReference;
use cardgrid_types::{SLOTS_PER_PAGE, SlotIndex};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Occupied slots only, ordered by global index.
///
/// Iteration order is document order, which is also the order the exporter
/// walks pages. Empty slots are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotMap {
    entries: BTreeMap<SlotIndex, ImageReference>,
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `reference` at `index`, returning whatever was there before.
    pub fn assign(&mut self, index: SlotIndex, reference: ImageReference) -> Option<ImageReference> {
        self.entries.insert(index, reference)
    }

    /// Empties `index`. Clearing an empty slot is a no-op.
    pub fn clear(&mut self, index: SlotIndex) -> Option<ImageReference> {
        self.entries.remove(&index)
    }

    pub fn get(&self, index: SlotIndex) -> Option<&ImageReference> {
        self.entries.get(&index)
    }

    pub fn is_occupied(&self, index: SlotIndex) -> bool {
        self.entries.contains_key(&index)
    }

    /// First unoccupied slot of `page`, scanning positions in ascending order.
    pub fn find_next_free(&self, page: usize) -> Option<SlotIndex> {
        (0..SLOTS_PER_PAGE)
            .filter_map(|position| SlotIndex::from_page_position(page, position))
            .find(|index| !self.entries.contains_key(index))
    }

    pub fn max_occupied_index(&self) -> Option<SlotIndex> {
        self.entries.last_key_value().map(|(index, _)| *index)
    }

    /// Page of the highest occupied slot; `None` when nothing is placed.
    pub fn max_occupied_page(&self) -> Option<usize> {
        self.max_occupied_index().map(SlotIndex::page)
    }

    /// Exchanges the contents of `a` and `b`.
    ///
    /// Both values are taken out before either is written back, so an empty
    /// side simply moves the other side's image across.
    pub fn swap(&mut self, a: SlotIndex, b: SlotIndex) {
        if a == b {
            return;
        }
        let from_a = self.entries.remove(&a);
        let from_b = self.entries.remove(&b);
        if let Some(reference) = from_b {
            self.entries.insert(a, reference);
        }
        if let Some(reference) = from_a {
            self.entries.insert(b, reference);
        }
    }

    /// Duplicates the reference at `src` into `dst`.
    ///
    /// Returns the reference `dst` held before, if it was overwritten.
    pub fn copy(&mut self, src: SlotIndex, dst: SlotIndex) -> Option<ImageReference> {
        if src == dst {
            return None;
        }
        let reference = self.entries.get(&src)?.clone();
        self.entries.insert(dst, reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SlotIndex, ImageReference> {
        self.entries.iter()
    }

    /// The nine cells of `page` in position order, occupied or not.
    pub fn page_slots(&self, page: usize) -> [Option<&ImageReference>; SLOTS_PER_PAGE] {
        std::array::from_fn(|position| {
            SlotIndex::from_page_position(page, position).and_then(|index| self.entries.get(&index))
        })
    }

    /// Occupied slots of `page`, in position order.
    pub fn occupied_on_page(&self, page: usize) -> impl Iterator<Item = (SlotIndex, &ImageReference)> {
        let start = SlotIndex::first_on_page(page);
        let end = SlotIndex::first_on_page(page.saturating_add(1));
        self.entries
            .range(start..end)
            .map(|(index, reference)| (*index, reference))
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a SlotMap {
    type Item = (&'a SlotIndex, &'a ImageReference);
    type IntoIter = btree_map::Iter<'a, SlotIndex, ImageReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(SlotIndex, ImageReference)> for SlotMap {
    fn from_iter<I: IntoIterator<Item = (SlotIndex, ImageReference)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
