//! The authoritative layout state: slots, page cursor and configuration.

use crate::LayoutError;
use crate::cursor::PageCursor;
use crate::slots::SlotMap;
use cardgrid_traits::ImageReference;
use cardgrid_types::{LayoutConfig, SLOTS_PER_PAGE, SlotIndex};
use log::debug;

/// One editing session over the card grid.
///
/// Every mutation goes through `&mut self`. Callers that share a session
/// between threads wrap it in a lock; export works from a [`LayoutSnapshot`]
/// so it never holds that lock for long.
#[derive(Debug, Clone, Default)]
pub struct LayoutSession {
    slots: SlotMap,
    cursor: PageCursor,
    config: LayoutConfig,
}

impl LayoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Mutable access to the layout parameters. Geometry is recomputed on
    /// demand, so edits take effect on the next preview or export.
    pub fn config_mut(&mut self) -> &mut LayoutConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        debug!("Layout config changed: {:?}", config);
        self.config = config;
    }

    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn get(&self, index: SlotIndex) -> Option<&ImageReference> {
        self.slots.get(index)
    }

    pub fn find_next_free(&self, page: usize) -> Option<SlotIndex> {
        self.slots.find_next_free(page)
    }

    pub fn max_occupied_page(&self) -> Option<usize> {
        self.slots.max_occupied_page()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Places `reference` at a global index, replacing any previous image.
    pub fn assign(&mut self, index: SlotIndex, reference: ImageReference) -> Option<ImageReference> {
        debug!("Assigning {} to slot {}", reference, index);
        let previous = self.slots.assign(index, reference);
        self.cursor.extend_to(index.page());
        previous
    }

    pub fn clear(&mut self, index: SlotIndex) -> Option<ImageReference> {
        let removed = self.slots.clear(index);
        if removed.is_some() {
            debug!("Cleared slot {}", index);
        }
        removed
    }

    /// Empties every slot. The page cursor is left where it is.
    pub fn clear_all(&mut self) {
        debug!("Clearing {} placed images", self.slots.len());
        self.slots.clear_all();
    }

    /// Places `reference` in the first free slot of the current page.
    ///
    /// When the current page is full a new page is appended after the
    /// highest page reached and the image goes into its first slot. That
    /// page lies above every occupied slot, so it is always empty and at
    /// most one page is created per call.
    pub fn auto_place(&mut self, reference: ImageReference) -> SlotIndex {
        let mut page = self.cursor.current_page();
        let index = loop {
            if let Some(index) = self.slots.find_next_free(page) {
                break index;
            }
            let next = self.cursor.push_page();
            if next == page {
                // The page counter saturated; reuse the first slot of the last page rather than spin.
                break SlotIndex::first_on_page(page);
            }
            debug!("Page {} is full, continuing on new page {}", page, next);
            page = next;
        };
        self.assign(index, reference);
        index
    }

    /// Auto-places every reference in iteration order.
    pub fn auto_place_all<I>(&mut self, references: I) -> Vec<SlotIndex>
    where
        I: IntoIterator<Item = ImageReference>,
    {
        references
            .into_iter()
            .map(|reference| self.auto_place(reference))
            .collect()
    }

    fn index_on_current_page(&self, position: usize) -> Result<SlotIndex, LayoutError> {
        if position >= SLOTS_PER_PAGE {
            return Err(LayoutError::PositionOutOfRange(position));
        }
        let page = self.cursor.current_page();
        SlotIndex::from_page_position(page, position).ok_or(LayoutError::SlotOverflow { page, position })
    }

    /// Places `reference` at `position` (`0..9`) on the current page.
    pub fn place_at(&mut self, position: usize, reference: ImageReference) -> Result<SlotIndex, LayoutError> {
        let index = self.index_on_current_page(position)?;
        self.assign(index, reference);
        Ok(index)
    }

    /// Empties `position` (`0..9`) on the current page.
    pub fn remove_at(&mut self, position: usize) -> Result<Option<ImageReference>, LayoutError> {
        let index = self.index_on_current_page(position)?;
        Ok(self.clear(index))
    }

    /// Exchanges two slots.
    ///
    /// Pages are never created by a swap, so both slots must lie on pages
    /// already reached. Otherwise an image could land on a page the cursor
    /// cannot navigate to.
    pub fn swap(&mut self, a: SlotIndex, b: SlotIndex) -> Result<(), LayoutError> {
        let max_page_reached = self.cursor.max_page_reached();
        if let Some(index) = [a, b].into_iter().find(|index| index.page() > max_page_reached) {
            return Err(LayoutError::PageNotReached { index, max_page_reached });
        }
        debug!("Swapping slot {} with slot {}", a, b);
        self.slots.swap(a, b);
        Ok(())
    }

    /// Swaps two positions on the current page.
    pub fn swap_in_page(&mut self, a: usize, b: usize) -> Result<(), LayoutError> {
        let a = self.index_on_current_page(a)?;
        let b = self.index_on_current_page(b)?;
        self.swap(a, b)
    }

    /// Pastes the image of `src` into `dst`. No-op when `src` is empty.
    pub fn copy(&mut self, src: SlotIndex, dst: SlotIndex) -> Option<ImageReference> {
        if src == dst || !self.slots.is_occupied(src) {
            return None;
        }
        debug!("Copying slot {} into slot {}", src, dst);
        let previous = self.slots.copy(src, dst);
        self.cursor.extend_to(dst.page());
        previous
    }

    /// The nine cells of the current page.
    pub fn current_page_slots(&self) -> [Option<&ImageReference>; SLOTS_PER_PAGE] {
        self.slots.page_slots(self.cursor.current_page())
    }

    pub fn current_page(&self) -> usize {
        self.cursor.current_page()
    }

    pub fn max_page_reached(&self) -> usize {
        self.cursor.max_page_reached()
    }

    /// Appends an empty page and moves onto it.
    pub fn add_new_page(&mut self) -> usize {
        let page = self.cursor.push_page();
        debug!("Added page {}", page);
        page
    }

    /// Moves `delta` pages forwards or backwards. Returns false, without
    /// moving, when the target falls outside `0..=max_page_reached`.
    pub fn change_page(&mut self, delta: isize) -> bool {
        self.cursor.step(delta)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.cursor.go_to(page)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor.can_go_forward()
    }

    /// An owned copy of the slots and configuration for export.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            slots: self.slots.clone(),
            config: self.config,
        }
    }
}

/// The layout frozen at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    slots: SlotMap,
    config: LayoutConfig,
}

impl LayoutSnapshot {
    pub fn new(config: LayoutConfig, slots: SlotMap) -> Self {
        Self { slots, config }
    }

    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pages needed to print every occupied slot; zero when empty.
    pub fn page_count(&self) -> usize {
        self.slots.max_occupied_page().map_or(0, |page| page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(n: usize) -> ImageReference {
        ImageReference::path(format!("card_{n}.png"))
    }

    #[test]
    fn test_auto_place_ten_images() {
        let mut session = LayoutSession::new();
        let placed = session.auto_place_all((0..10).map(img));
        let raw: Vec<usize> = placed.iter().map(|index| index.get()).collect();
        assert_eq!(raw, (0..10).collect::<Vec<_>>());
        assert_eq!(session.max_page_reached(), 1);
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.get(SlotIndex::new(9)), Some(&img(9)));
    }

    #[test]
    fn test_auto_place_fills_gaps_on_current_page() {
        let mut session = LayoutSession::new();
        session.assign(SlotIndex::new(0), img(0));
        session.assign(SlotIndex::new(2), img(2));
        assert_eq!(session.auto_place(img(1)), SlotIndex::new(1));
        assert_eq!(session.auto_place(img(3)), SlotIndex::new(3));
    }

    #[test]
    fn test_auto_place_n_images_page_count() {
        for n in [1, 9, 18, 19, 40] {
            let mut session = LayoutSession::new();
            session.auto_place_all((0..n).map(img));
            assert_eq!(session.max_page_reached(), (n - 1) / 9);
            assert_eq!(session.len(), n);
        }
    }

    #[test]
    fn test_auto_place_full_page_jumps_past_max() {
        let mut session = LayoutSession::new();
        session.auto_place_all((0..9).map(img));
        // Reach page 2 without filling page 1
        session.assign(SlotIndex::new(20), img(20));
        assert_eq!(session.current_page(), 0);
        assert_eq!(session.auto_place(img(99)), SlotIndex::new(27));
        assert_eq!(session.current_page(), 3);
    }

    #[test]
    fn test_assign_extends_max_page() {
        let mut session = LayoutSession::new();
        session.assign(SlotIndex::new(13), img(13));
        assert_eq!(session.max_page_reached(), 1);
        assert_eq!(session.current_page(), 0);
        assert_eq!(session.max_occupied_page(), Some(1));
        assert!(session.can_go_forward());
    }

    #[test]
    fn test_place_and_remove_are_page_relative() {
        let mut session = LayoutSession::new();
        session.add_new_page();
        let index = session.place_at(4, img(1)).unwrap();
        assert_eq!(index, SlotIndex::new(13));
        assert_eq!(session.current_page_slots()[4], Some(&img(1)));
        assert_eq!(session.remove_at(4).unwrap(), Some(img(1)));
        assert_eq!(session.remove_at(4).unwrap(), None);
    }

    #[test]
    fn test_place_out_of_range_position() {
        let mut session = LayoutSession::new();
        assert_eq!(session.place_at(9, img(0)), Err(LayoutError::PositionOutOfRange(9)));
        assert_eq!(session.remove_at(12), Err(LayoutError::PositionOutOfRange(12)));
        assert!(session.is_empty());
    }

    #[test]
    fn test_swap_does_not_change_max_page() {
        let mut session = LayoutSession::new();
        session.assign(SlotIndex::new(2), img(2));
        session.swap(SlotIndex::new(2), SlotIndex::new(5)).unwrap();
        assert_eq!(session.get(SlotIndex::new(2)), None);
        assert_eq!(session.get(SlotIndex::new(5)), Some(&img(2)));
        assert_eq!(session.max_page_reached(), 0);
    }

    #[test]
    fn test_swap_onto_unreached_page_is_rejected() {
        let mut session = LayoutSession::new();
        session.assign(SlotIndex::new(0), img(0));

        assert_eq!(
            session.swap(SlotIndex::new(0), SlotIndex::new(100)),
            Err(LayoutError::PageNotReached {
                index: SlotIndex::new(100),
                max_page_reached: 0,
            })
        );
        assert_eq!(
            session.swap(SlotIndex::new(20), SlotIndex::new(0)),
            Err(LayoutError::PageNotReached {
                index: SlotIndex::new(20),
                max_page_reached: 0,
            })
        );
        assert_eq!(session.get(SlotIndex::new(0)), Some(&img(0)));
        assert_eq!(session.max_occupied_page(), Some(0));
        assert_eq!(session.max_page_reached(), 0);
    }

    #[test]
    fn test_swap_across_reached_pages() {
        let mut session = LayoutSession::new();
        session.assign(SlotIndex::new(0), img(0));
        session.add_new_page();
        session.swap(SlotIndex::new(0), SlotIndex::new(17)).unwrap();
        assert_eq!(session.get(SlotIndex::new(17)), Some(&img(0)));
        assert!(session.max_occupied_page() <= Some(session.max_page_reached()));
    }

    #[test]
    fn test_swap_in_page() {
        let mut session = LayoutSession::new();
        session.add_new_page();
        session.place_at(0, img(0)).unwrap();
        session.place_at(8, img(8)).unwrap();
        session.swap_in_page(0, 8).unwrap();
        assert_eq!(session.get(SlotIndex::new(9)), Some(&img(8)));
        assert_eq!(session.get(SlotIndex::new(17)), Some(&img(0)));
        assert!(session.swap_in_page(0, 9).is_err());
    }

    #[test]
    fn test_copy_pastes_without_moving() {
        let mut session = LayoutSession::new();
        session.assign(SlotIndex::new(0), img(0));
        assert_eq!(session.copy(SlotIndex::new(0), SlotIndex::new(10)), None);
        assert_eq!(session.get(SlotIndex::new(0)), Some(&img(0)));
        assert_eq!(session.get(SlotIndex::new(10)), Some(&img(0)));
        assert_eq!(session.max_page_reached(), 1);
        assert_eq!(session.copy(SlotIndex::new(3), SlotIndex::new(0)), None);
        assert_eq!(session.get(SlotIndex::new(0)), Some(&img(0)));
    }

    #[test]
    fn test_navigation_bounds() {
        let mut session = LayoutSession::new();
        assert!(!session.change_page(-1));
        assert!(!session.change_page(1));
        session.add_new_page();
        session.add_new_page();
        assert_eq!(session.current_page(), 2);
        assert!(session.change_page(-2));
        assert!(!session.can_go_back());
        assert!(!session.go_to_page(3));
        assert_eq!(session.current_page(), 0);
    }

    #[test]
    fn test_clear_all_keeps_cursor() {
        let mut session = LayoutSession::new();
        session.auto_place_all((0..12).map(img));
        session.clear_all();
        assert!(session.is_empty());
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.max_page_reached(), 1);
        assert_eq!(session.auto_place(img(0)), SlotIndex::new(9));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut session = LayoutSession::new();
        session.assign(SlotIndex::new(13), img(13));
        let snapshot = session.snapshot();
        session.clear(SlotIndex::new(13));
        session.config_mut().gap = 10.0;

        assert_eq!(snapshot.page_count(), 2);
        assert_eq!(snapshot.slots().get(SlotIndex::new(13)), Some(&img(13)));
        assert_eq!(snapshot.config().gap, 4.0);
        assert_eq!(session.snapshot().page_count(), 0);
    }
}
