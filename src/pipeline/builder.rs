use super::config::ExportConfig;
use super::export::PrintExporter;
use cardgrid_executor::ExecutorImpl;
use cardgrid_raster::{RasterEncoding, Rasterizer};
use cardgrid_render_core::OutlineStyle;
use cardgrid_resource::FilesystemResourceProvider;
use cardgrid_traits::{Executor, ResourceProvider};
use std::sync::Arc;

/// A builder for creating a `PrintExporter`.
#[derive(Default)]
pub struct ExporterBuilder {
    config: ExportConfig,
    provider: Option<Arc<dyn ResourceProvider>>,
    executor: Option<ExecutorImpl>,
}

impl ExporterBuilder {
    /// Creates a builder with 300 DPI lossless output, reading images from
    /// the filesystem and rasterizing on the default executor.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn with_encoding(mut self, encoding: RasterEncoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    pub fn with_outline(mut self, outline: OutlineStyle) -> Self {
        self.config.outline = outline;
        self
    }

    /// Sets where image references are resolved.
    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Selects the executor that rasterizes card images.
    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn build(self) -> PrintExporter {
        let provider = self
            .provider
            .unwrap_or_else(|| Arc::new(FilesystemResourceProvider::new()));
        let executor = self.executor.unwrap_or_default();
        log::debug!(
            "Building exporter: {} dpi, {:?}, provider {}, executor {}",
            self.config.dpi,
            self.config.encoding,
            provider.name(),
            executor.name()
        );
        let rasterizer = Rasterizer::new(provider)
            .with_dpi(self.config.dpi)
            .with_encoding(self.config.encoding);
        PrintExporter::new(self.config, rasterizer, executor)
    }
}
