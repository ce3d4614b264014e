use cardgrid_types::{MM_PER_INCH, Rect};

/// PostScript points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert millimeters to PDF points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// A top-left-origin millimeter rect as `[x, y, width, height]` in PDF
/// points with the origin at the bottom-left of a page `page_height_mm` tall.
pub fn pdf_rect(rect: Rect, page_height_mm: f32) -> [f32; 4] {
    [
        mm_to_pt(rect.x),
        mm_to_pt(flip_y(rect.y + rect.height, page_height_mm)),
        mm_to_pt(rect.width),
        mm_to_pt(rect.height),
    ]
}
