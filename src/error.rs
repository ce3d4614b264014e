use cardgrid_render_core::RenderError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an export. Per-slot image problems never end up here;
/// they are reported as skipped slots instead.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: the layout has no placed images")]
    EmptyLayout,

    #[error("Failed to write output to {target}: {source}")]
    OutputWriteFailure {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Rendering failed: {0}")]
    Render(RenderError),
}

impl ExportError {
    pub(crate) fn from_render(err: RenderError, target: impl Into<String>) -> Self {
        match err {
            RenderError::Io(source) => ExportError::OutputWriteFailure {
                target: target.into(),
                source,
            },
            other => ExportError::Render(other),
        }
    }
}

/// Errors reading or writing a session file.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid session file: {0}")]
    Json(#[from] serde_json::Error),
}
