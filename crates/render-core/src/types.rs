use cardgrid_raster::PrintRaster;
use cardgrid_types::{Color, Rect, Size, SlotIndex};
use std::sync::Arc;

/// Stroke drawn around every cell so the sheet can be cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    pub width_mm: f32,
    pub color: Color,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            width_mm: 0.1,
            color: Color::gray(200),
        }
    }
}

/// One grid cell, already positioned on the paper.
#[derive(Debug, Clone)]
pub struct PrintCell {
    pub slot: SlotIndex,
    /// Cell rectangle in millimeters, top-left origin.
    pub rect: Rect,
    /// The rasterized card, or `None` for an empty or skipped cell.
    pub raster: Option<Arc<PrintRaster>>,
}

/// A fully resolved sheet: paper size, outline style and its cells.
#[derive(Debug, Clone)]
pub struct PrintPage {
    /// Zero-based page number.
    pub index: usize,
    pub size_mm: Size,
    pub outline: OutlineStyle,
    pub cells: Vec<PrintCell>,
}

impl PrintPage {
    pub fn image_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.raster.is_some()).count()
    }
}
