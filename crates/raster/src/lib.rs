//! Print rasterization for card images.
//!
//! Source images arrive in whatever resolution the user happened to have.
//! Before they go into a document they are decoded, flattened onto white,
//! resampled to the exact pixel size the card occupies at the print DPI and
//! re-encoded in a form the PDF writer can embed directly.

mod rasterize;
mod rasterizer;
mod target;

pub use rasterize::{PrintRaster, RasterEncoding, rasterize_for_print};
pub use rasterizer::{Rasterizer, SUPPORTED_EXTENSIONS, is_supported_image};
pub use target::{DEFAULT_DPI, MAX_TARGET_SIDE_PX, PrintTarget};

use cardgrid_traits::ResourceError;
use thiserror::Error;

/// Why a single card could not be rasterized.
///
/// Every variant is local to one slot: the exporter logs it and moves on.
#[derive(Error, Debug, Clone)]
pub enum RasterError {
    #[error("Image source '{reference}' is unavailable: {source}")]
    SourceUnavailable {
        reference: String,
        #[source]
        source: ResourceError,
    },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Target size {width_px}x{height_px} px has no area")]
    DegenerateTarget { width_px: u32, height_px: u32 },

    #[error("Target size {width_px}x{height_px} px exceeds the {max} px side limit")]
    TargetTooLarge { width_px: u32, height_px: u32, max: u32 },

    #[error("Failed to encode raster: {0}")]
    Encode(String),
}

impl From<image::ImageError> for RasterError {
    fn from(err: image::ImageError) -> Self {
        RasterError::Decode(err.to_string())
    }
}
