pub mod color;
pub mod config;
pub mod geometry;
pub mod slot;

pub use color::Color;
pub use config::{CardPreset, LayoutConfig, PaperSize};
pub use geometry::{Point, Rect, Size};
pub use slot::{SlotIndex, GRID_COLUMNS, GRID_ROWS, SLOTS_PER_PAGE};

/// Millimeters in one inch; the basis of every mm to pixel/point conversion.
pub const MM_PER_INCH: f32 = 25.4;
