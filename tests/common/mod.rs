pub mod fixtures;
pub mod pdf_assertions;

use cardgrid::{ExportedDocument, ExporterBuilder, LayoutSession, PrintExporter, ResourceProvider};
use cardgrid_executor::ExecutorImpl;
use lopdf::Document as LopdfDocument;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Resolution used by the integration tests; low enough to keep rasters tiny.
pub const TEST_DPI: f32 = 24.0;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
    pub export: ExportedDocument,
}

impl GeneratedPdf {
    pub fn from_export(export: ExportedDocument) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&export.bytes)?;
        Ok(Self {
            bytes: export.bytes.clone(),
            doc,
            export,
        })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// A sequential exporter at [`TEST_DPI`] reading from `provider`.
pub fn test_exporter(provider: Arc<dyn ResourceProvider>) -> PrintExporter {
    ExporterBuilder::new()
        .with_dpi(TEST_DPI)
        .with_resource_provider(provider)
        .with_executor(ExecutorImpl::sequential())
        .build()
}

/// Exports `session` and parses the result back.
pub fn export_session(
    session: &LayoutSession,
    provider: Arc<dyn ResourceProvider>,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let export = test_exporter(provider).export(&session.snapshot())?;
    GeneratedPdf::from_export(export)
}
