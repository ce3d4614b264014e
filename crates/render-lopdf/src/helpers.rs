use cardgrid_raster::{PrintRaster, RasterEncoding};
use cardgrid_render_core::OutlineStyle;
use cardgrid_render_core::utils::{mm_to_pt, pdf_rect};
use cardgrid_types::Rect;
use lopdf::content::Operation;
use lopdf::{Object, Stream, dictionary};

/// Builds the image XObject stream for a raster.
///
/// The pixel data is embedded as-is: Flate rasters are already zlib
/// streams of RGB triples and JPEG rasters are complete DCT streams.
pub fn image_xobject(raster: &PrintRaster) -> Stream {
    let filter = match raster.encoding {
        RasterEncoding::Flate => "FlateDecode",
        RasterEncoding::Jpeg { .. } => "DCTDecode",
    };
    let mut stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => raster.width_px as i64,
            "Height" => raster.height_px as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => filter,
        },
        raster.data.clone(),
    );
    // Already encoded; a document-wide compress pass must not touch it.
    stream.allows_compression = false;
    stream
}

/// Draws the XObject `name` stretched over `rect` (millimeters, top-left origin).
pub fn place_image_operations(name: &str, rect: Rect, page_height_mm: f32) -> Vec<Operation> {
    let [x, y, w, h] = pdf_rect(rect, page_height_mm);
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![w.into(), 0.0f32.into(), 0.0f32.into(), h.into(), x.into(), y.into()],
        ),
        Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        Operation::new("Q", vec![]),
    ]
}

/// Strokes the cut outline around `rect`.
pub fn outline_operations(rect: Rect, page_height_mm: f32, style: &OutlineStyle) -> Vec<Operation> {
    let [x, y, w, h] = pdf_rect(rect, page_height_mm);
    let [r, g, b] = style.color.to_unit_rgb();
    vec![
        Operation::new("q", vec![]),
        Operation::new("w", vec![mm_to_pt(style.width_mm).into()]),
        Operation::new("RG", vec![r.into(), g.into(), b.into()]),
        Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
        Operation::new("S", vec![]),
        Operation::new("Q", vec![]),
    ]
}
