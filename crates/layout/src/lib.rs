use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Position {0} is outside the page grid (expected 0..9).")]
    PositionOutOfRange(usize),
    #[error("Page {page} has no slot at position {position}.")]
    SlotOverflow { page: usize, position: usize },
    #[error("Slot {index} is on a page beyond the last page reached ({max_page_reached}).")]
    PageNotReached { index: SlotIndex, max_page_reached: usize },
}

pub mod cursor;
pub mod geometry;
pub mod session;
pub mod slots;

pub use self::cursor::PageCursor;
pub use self::geometry::{PreviewLayout, ViewportFit, fit_to_viewport, slot_origin, slot_rect};
pub use self::session::{LayoutSession, LayoutSnapshot};
pub use self::slots::SlotMap;

// Re-export the model types so callers need a single dependency
pub use cardgrid_traits::ImageReference;
pub use cardgrid_types::{LayoutConfig, Point, Rect, SLOTS_PER_PAGE, Size, SlotIndex};
