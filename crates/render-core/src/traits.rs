use crate::error::RenderError;
use crate::types::PrintPage;
use std::io::Write;

/// A trait for document renderers, abstracting the document-writing primitives.
///
/// The export pipeline calls `begin_document` once, `render_page` once per
/// sheet in page order, and `finish` last.
pub trait DocumentRenderer<W: Write + Send> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError>;

    fn render_page(&mut self, page: &PrintPage) -> Result<(), RenderError>;

    /// Number of pages rendered so far.
    fn page_count(&self) -> usize;

    /// Serializes the document into the writer and hands the writer back.
    fn finish(self: Box<Self>) -> Result<W, RenderError>;
}
