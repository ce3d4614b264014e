use cardgrid_raster::{DEFAULT_DPI, RasterEncoding};
use cardgrid_render_core::OutlineStyle;

/// Output settings that do not belong to the layout itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportConfig {
    /// Resolution card images are resampled to.
    pub dpi: f32,
    /// How resampled pixels are embedded.
    pub encoding: RasterEncoding,
    /// Cut outline drawn around every cell.
    pub outline: OutlineStyle,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            encoding: RasterEncoding::default(),
            outline: OutlineStyle::default(),
        }
    }
}
