use super::config::ExportConfig;
use crate::error::ExportError;
use cardgrid_executor::ExecutorImpl;
use cardgrid_layout::{LayoutSnapshot, slot_rect};
use cardgrid_raster::{PrintRaster, RasterError, Rasterizer};
use cardgrid_render_core::{DocumentRenderer, PrintCell, PrintPage};
use cardgrid_render_lopdf::LopdfRenderer;
use cardgrid_traits::{Executor, ImageReference};
use cardgrid_types::{SLOTS_PER_PAGE, SlotIndex};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tempfile::NamedTempFile;

/// A slot whose image could not be placed in the document.
#[derive(Debug, Clone)]
pub struct SkippedSlot {
    pub slot: SlotIndex,
    pub reference: ImageReference,
    pub reason: RasterError,
}

/// What an export wrote, without the document bytes.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub page_count: usize,
    /// Slots whose image was drawn, in document order.
    pub placed: Vec<SlotIndex>,
    /// Occupied slots drawn as an empty outline instead.
    pub skipped: Vec<SkippedSlot>,
}

/// A complete in-memory PDF plus its report.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub placed: Vec<SlotIndex>,
    pub skipped: Vec<SkippedSlot>,
}

type RasterResult = Result<Arc<PrintRaster>, RasterError>;

/// Turns layout snapshots into print-ready PDF documents.
///
/// Export never touches the live session: it works on an owned
/// [`LayoutSnapshot`], so the caller may keep editing while it runs.
pub struct PrintExporter {
    config: ExportConfig,
    rasterizer: Rasterizer,
    executor: ExecutorImpl,
}

impl PrintExporter {
    pub(super) fn new(config: ExportConfig, rasterizer: Rasterizer, executor: ExecutorImpl) -> Self {
        Self {
            config,
            rasterizer,
            executor,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Renders the snapshot into an in-memory PDF.
    pub fn export(&self, snapshot: &LayoutSnapshot) -> Result<ExportedDocument, ExportError> {
        let (bytes, report) = self.render_into(snapshot, Vec::new(), "memory buffer")?;
        Ok(ExportedDocument {
            bytes,
            page_count: report.page_count,
            placed: report.placed,
            skipped: report.skipped,
        })
    }

    /// Renders the snapshot into `writer`.
    pub fn export_to_writer<W: Write + Send>(
        &self,
        snapshot: &LayoutSnapshot,
        writer: W,
    ) -> Result<ExportReport, ExportError> {
        self.render_into(snapshot, writer, "writer").map(|(_, report)| report)
    }

    /// Renders the snapshot into a file at `path`.
    ///
    /// The document is staged in a temporary file next to `path` and only
    /// renamed into place once it is complete, so a failed export never
    /// leaves a truncated PDF behind. An empty layout is rejected before
    /// anything touches the disk.
    pub fn export_to_file<P: AsRef<Path>>(
        &self,
        snapshot: &LayoutSnapshot,
        path: P,
    ) -> Result<ExportReport, ExportError> {
        let path = path.as_ref();
        if snapshot.is_empty() {
            return Err(ExportError::EmptyLayout);
        }
        let target = path.display().to_string();
        let write_failure = |source: std::io::Error| ExportError::OutputWriteFailure {
            target: target.clone(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = NamedTempFile::new_in(dir).map_err(write_failure)?;
        let (writer, report) = self.render_into(snapshot, BufWriter::new(staging), &target)?;
        let staging = writer.into_inner().map_err(|e| write_failure(e.into_error()))?;
        staging.persist(path).map_err(|e| write_failure(e.error))?;
        debug!("Moved finished document into {}", target);
        Ok(report)
    }

    fn render_into<W: Write + Send>(
        &self,
        snapshot: &LayoutSnapshot,
        writer: W,
        target: &str,
    ) -> Result<(W, ExportReport), ExportError> {
        if snapshot.is_empty() {
            return Err(ExportError::EmptyLayout);
        }

        let start = Instant::now();
        let layout = snapshot.config();
        let page_count = snapshot.page_count();
        info!(
            "Exporting {} images on {} pages at {} dpi to {}",
            snapshot.slots().len(),
            page_count,
            self.config.dpi,
            target
        );

        let rasters = self.rasterize_all(snapshot);

        let mut renderer = Box::new(LopdfRenderer::<W>::new());
        renderer
            .begin_document(writer)
            .map_err(|e| ExportError::from_render(e, target))?;

        let mut report = ExportReport {
            page_count,
            ..Default::default()
        };

        for page in 0..page_count {
            let mut cells = Vec::with_capacity(SLOTS_PER_PAGE);
            for position in 0..SLOTS_PER_PAGE {
                let Some(slot) = SlotIndex::from_page_position(page, position) else {
                    continue;
                };
                let raster = match snapshot.slots().get(slot) {
                    None => None,
                    Some(reference) => match rasters.get(reference) {
                        Some(Ok(raster)) => {
                            report.placed.push(slot);
                            Some(Arc::clone(raster))
                        }
                        Some(Err(reason)) => {
                            warn!("Skipping slot {}: {}", slot, reason);
                            report.skipped.push(SkippedSlot {
                                slot,
                                reference: reference.clone(),
                                reason: reason.clone(),
                            });
                            None
                        }
                        None => None,
                    },
                };
                cells.push(PrintCell {
                    slot,
                    rect: slot_rect(position, layout),
                    raster,
                });
            }

            let print_page = PrintPage {
                index: page,
                size_mm: layout.paper_size(),
                outline: self.config.outline,
                cells,
            };
            renderer
                .render_page(&print_page)
                .map_err(|e| ExportError::from_render(e, target))?;
        }

        let writer = renderer
            .finish()
            .map_err(|e| ExportError::from_render(e, target))?;

        info!(
            "Export finished in {:.2?}: {} pages, {} placed, {} skipped",
            start.elapsed(),
            report.page_count,
            report.placed.len(),
            report.skipped.len()
        );
        Ok((writer, report))
    }

    /// Rasterizes every distinct reference once, on the configured executor.
    fn rasterize_all(&self, snapshot: &LayoutSnapshot) -> HashMap<ImageReference, RasterResult> {
        let mut seen = HashSet::new();
        let unique: Vec<ImageReference> = snapshot
            .slots()
            .iter()
            .filter(|(_, reference)| seen.insert(*reference))
            .map(|(_, reference)| reference.clone())
            .collect();

        let layout = snapshot.config();
        let (width_mm, height_mm) = (layout.card_width, layout.card_height);
        debug!(
            "Rasterizing {} distinct images at {}x{} mm on {}",
            unique.len(),
            width_mm,
            height_mm,
            self.executor.name()
        );

        let rasterizer = self.rasterizer.clone();
        let results = self.executor.execute_all(unique.clone(), move |reference| {
            rasterizer
                .rasterize(&reference, width_mm, height_mm)
                .map(Arc::new)
        });

        unique.into_iter().zip(results).collect()
    }
}
