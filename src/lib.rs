//! cardgrid: lay out card images on a 3x3 grid per sheet and export the
//! arrangement as a print-accurate, multi-page PDF.
//!
//! The editing model lives in [`cardgrid_layout`]; this crate ties it to the
//! rasterizer and the PDF backend and adds JSON session files.

pub mod error;
pub mod pipeline;
pub mod session_file;

pub use error::{ExportError, SessionError};
pub use pipeline::{ExportConfig, ExportReport, ExportedDocument, ExporterBuilder, PrintExporter, SkippedSlot};
pub use session_file::SessionFile;

// Re-export the layout model so callers need a single dependency
pub use cardgrid_layout::{
    LayoutError, LayoutSession, LayoutSnapshot, PreviewLayout, SlotMap, ViewportFit, fit_to_viewport, slot_origin,
    slot_rect,
};
pub use cardgrid_raster::{DEFAULT_DPI, RasterEncoding, RasterError, is_supported_image};
pub use cardgrid_render_core::OutlineStyle;
pub use cardgrid_traits::{ImageReference, InMemoryResourceProvider, ResourceProvider};
pub use cardgrid_resource::FilesystemResourceProvider;
pub use cardgrid_types::{CardPreset, LayoutConfig, PaperSize, SLOTS_PER_PAGE, SlotIndex};
