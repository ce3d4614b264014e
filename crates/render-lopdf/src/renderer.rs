use crate::helpers;
use cardgrid_raster::PrintRaster;
use cardgrid_render_core::utils::mm_to_pt;
use cardgrid_render_core::{DocumentRenderer, PrintPage, RenderError};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

const PDF_VERSION: &str = "1.7";
const PRODUCER: &str = concat!("cardgrid ", env!("CARGO_PKG_VERSION"));

/// An in-memory PDF renderer using the `lopdf` library.
/// It builds the document's object graph and then writes it to the output stream.
pub struct LopdfRenderer<W: Write + Send> {
    writer: Option<W>,
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    /// Image XObjects already embedded, keyed by raster address. The Arc is
    /// held so the address cannot be reused by a later raster.
    images: HashMap<usize, (Arc<PrintRaster>, ObjectId)>,
}

impl<W: Write + Send> LopdfRenderer<W> {
    pub fn new() -> Self {
        let mut document = Document::with_version(PDF_VERSION);
        let pages_id = document.new_object_id();
        Self {
            writer: None,
            document,
            pages_id,
            page_ids: Vec::new(),
            images: HashMap::new(),
        }
    }

    /// Number of distinct images embedded so far.
    pub fn embedded_image_count(&self) -> usize {
        self.images.len()
    }

    fn image_id(&mut self, raster: &Arc<PrintRaster>) -> ObjectId {
        let key = Arc::as_ptr(raster) as usize;
        if let Some((_, id)) = self.images.get(&key) {
            return *id;
        }
        let id = self.document.add_object(helpers::image_xobject(raster));
        self.images.insert(key, (Arc::clone(raster), id));
        id
    }
}

impl<W: Write + Send> Default for LopdfRenderer<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> DocumentRenderer<W> for LopdfRenderer<W> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError> {
        if self.writer.is_some() {
            return Err(RenderError::Other("Document already started".into()));
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        let catalog_id = self.document.add_object(catalog_dict);
        self.document.trailer.set("Root", catalog_id);

        let info_id = self.document.add_object(dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        });
        self.document.trailer.set("Info", info_id);

        self.writer = Some(writer);
        Ok(())
    }

    fn render_page(&mut self, page: &PrintPage) -> Result<(), RenderError> {
        if self.writer.is_none() {
            return Err(RenderError::Other("Document not started".into()));
        }

        let page_height = page.size_mm.height;
        let mut operations = Vec::new();
        let mut xobjects = Dictionary::new();

        for cell in &page.cells {
            if let Some(raster) = &cell.raster {
                let image_id = self.image_id(raster);
                let name = format!("Im{}", cell.slot.get());
                xobjects.set(name.as_bytes(), image_id);
                operations.extend(helpers::place_image_operations(&name, cell.rect, page_height));
            }
            operations.extend(helpers::outline_operations(cell.rect, page_height, &page.outline));
        }

        let content = Content { operations };
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let mut resources = Dictionary::new();
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                mm_to_pt(page.size_mm.width).into(),
                mm_to_pt(page_height).into(),
            ],
            "Contents" => content_id,
            "Resources" => resources,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);

        log::debug!(
            "Rendered page {} with {} of {} cells filled",
            page.index + 1,
            page.image_count(),
            page.cells.len()
        );
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn finish(self: Box<Self>) -> Result<W, RenderError> {
        let mut renderer = *self;
        let mut writer = renderer
            .writer
            .take()
            .ok_or_else(|| RenderError::Other("Document not started or already finished".into()))?;

        if let Some(Object::Dictionary(pages_dict)) = renderer.document.objects.get_mut(&renderer.pages_id) {
            let kids: Vec<Object> = renderer.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", renderer.page_ids.len() as i64);
        }

        renderer.document.save_to(&mut writer)?;
        writer.flush()?;
        Ok(writer)
    }
}
