//! PDF renderer for card sheets using lopdf.
//!
//! The document is assembled as an in-memory lopdf object graph, one page
//! per sheet, and serialized when the renderer finishes. Card images are
//! embedded as image XObjects and shared between every cell that shows the
//! same raster.

mod helpers;
mod renderer;

pub use helpers::{image_xobject, outline_operations, place_image_operations};
pub use renderer::LopdfRenderer;
