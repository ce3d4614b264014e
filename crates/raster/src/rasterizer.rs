use crate::{DEFAULT_DPI, PrintRaster, PrintTarget, RasterEncoding, RasterError, rasterize_for_print};
use cardgrid_traits::{ImageReference, ResourceProvider};
use std::path::Path;
use std::sync::Arc;

/// File extensions accepted as card images, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// True if `path` has one of the [`SUPPORTED_EXTENSIONS`], ignoring case.
pub fn is_supported_image(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Resolves image references through a provider and rasterizes them at a
/// fixed DPI and encoding.
///
/// Cheap to clone; the provider is shared.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    provider: Arc<dyn ResourceProvider>,
    dpi: f32,
    encoding: RasterEncoding,
}

impl Rasterizer {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            dpi: DEFAULT_DPI,
            encoding: RasterEncoding::default(),
        }
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_encoding(mut self, encoding: RasterEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn encoding(&self) -> RasterEncoding {
        self.encoding
    }

    pub fn rasterize(
        &self,
        reference: &ImageReference,
        width_mm: f32,
        height_mm: f32,
    ) -> Result<PrintRaster, RasterError> {
        let bytes = self
            .provider
            .load(reference)
            .map_err(|source| RasterError::SourceUnavailable {
                reference: reference.display_name().into_owned(),
                source,
            })?;
        let target = PrintTarget::new(width_mm, height_mm, self.dpi);
        rasterize_for_print(&bytes, &target, self.encoding)
    }
}
