//! The print export pipeline: snapshot in, PDF out.

mod builder;
mod config;
mod export;

pub use builder::ExporterBuilder;
pub use config::ExportConfig;
pub use export::{ExportReport, ExportedDocument, PrintExporter, SkippedSlot};
