use cardgrid_types::MM_PER_INCH;

/// Resolution used when nothing else is configured.
pub const DEFAULT_DPI: f32 = 300.0;

/// Largest side, in pixels, a single card raster may have.
pub const MAX_TARGET_SIDE_PX: u32 = 20_000;

/// Physical card size plus the resolution it is printed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintTarget {
    pub width_mm: f32,
    pub height_mm: f32,
    pub dpi: f32,
}

impl PrintTarget {
    pub fn new(width_mm: f32, height_mm: f32, dpi: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            dpi,
        }
    }

    /// `round(mm / 25.4 * dpi)` per side.
    ///
    /// Negative and NaN results collapse to zero.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            mm_to_px(self.width_mm, self.dpi),
            mm_to_px(self.height_mm, self.dpi),
        )
    }
}

fn mm_to_px(mm: f32, dpi: f32) -> u32 {
    let px = (f64::from(mm) / f64::from(MM_PER_INCH) * f64::from(dpi)).round();
    // `as` saturates: NaN and negatives become 0, huge values u32::MAX
    px as u32
}
