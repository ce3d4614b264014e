//! Newtype wrapper for global slot indices.
//!
//! A slot index identifies one grid cell across the whole, unbounded sequence
//! of pages. Pages are never stored: they are derived from the index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of grid columns on every page.
pub const GRID_COLUMNS: usize = 3;

/// Number of grid rows on every page.
pub const GRID_ROWS: usize = 3;

/// Number of slots on every page.
pub const SLOTS_PER_PAGE: usize = GRID_COLUMNS * GRID_ROWS;

/// A global slot index in document order (row-major within each page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotIndex(usize);

impl SlotIndex {
    /// Creates a slot index from its raw global value.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Builds the global index of `position` on `page`.
    ///
    /// Returns `None` if `position` is not a valid position-in-page (`0..9`)
    /// or the result would overflow.
    pub fn from_page_position(page: usize, position: usize) -> Option<Self> {
        if position >= SLOTS_PER_PAGE {
            return None;
        }
        page.checked_mul(SLOTS_PER_PAGE)
            .and_then(|base| base.checked_add(position))
            .map(Self)
    }

    /// The first slot of `page`.
    pub fn first_on_page(page: usize) -> Self {
        Self(page.saturating_mul(SLOTS_PER_PAGE))
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// The page this slot belongs to.
    pub const fn page(self) -> usize {
        self.0 / SLOTS_PER_PAGE
    }

    /// Position within the page, `0..9`.
    pub const fn position(self) -> usize {
        self.0 % SLOTS_PER_PAGE
    }

    pub const fn row(self) -> usize {
        self.position() / GRID_COLUMNS
    }

    pub const fn column(self) -> usize {
        self.position() % GRID_COLUMNS
    }
}

impl From<usize> for SlotIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<SlotIndex> for usize {
    fn from(index: SlotIndex) -> Self {
        index.0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} (page {}, slot {})", self.0, self.page() + 1, self.position() + 1)
    }
}
