#![allow(dead_code)]

use lopdf::Document as LopdfDocument;
use lopdf::{Dictionary, ObjectId};

pub const PT_PER_MM: f32 = 72.0 / 25.4;

fn page_id(doc: &LopdfDocument, page_num: u32) -> ObjectId {
    *doc.get_pages()
        .get(&page_num)
        .unwrap_or_else(|| panic!("PDF has no page {}", page_num))
}

fn page_dict(doc: &LopdfDocument, page_num: u32) -> &Dictionary {
    doc.get_dictionary(page_id(doc, page_num))
        .expect("page is a dictionary")
}

/// `[x0, y0, x1, y1]` of a page's MediaBox, in points.
pub fn media_box(doc: &LopdfDocument, page_num: u32) -> [f32; 4] {
    let values = page_dict(doc, page_num)
        .get(b"MediaBox")
        .and_then(|obj| obj.as_array())
        .expect("page has a MediaBox");
    let mut out = [0.0; 4];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = value.as_float().expect("numeric MediaBox entry");
    }
    out
}

/// Names of the image XObjects a page references, sorted.
pub fn image_names(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    let resources = match page_dict(doc, page_num).get(b"Resources") {
        Ok(obj) => match obj.as_reference() {
            Ok(id) => doc.get_dictionary(id).expect("resources dictionary"),
            Err(_) => obj.as_dict().expect("resources dictionary"),
        },
        Err(_) => return Vec::new(),
    };
    let mut names: Vec<String> = match resources.get(b"XObject").and_then(|obj| obj.as_dict()) {
        Ok(xobjects) => xobjects
            .iter()
            .map(|(name, _)| String::from_utf8_lossy(name).into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

/// Every `cm` matrix applied right before a `Do`, as `[x, y, width, height]` in points.
pub fn image_placements(doc: &LopdfDocument, page_num: u32) -> Vec<[f32; 4]> {
    let content = doc
        .get_and_decode_page_content(page_id(doc, page_num))
        .expect("decodable page content");
    let mut placements = Vec::new();
    let mut last_cm: Option<[f32; 4]> = None;
    for op in &content.operations {
        match op.operator.as_str() {
            "cm" => {
                let n: Vec<f32> = op.operands.iter().map(|o| o.as_float().unwrap_or(0.0)).collect();
                last_cm = Some([n[4], n[5], n[0], n[3]]);
            }
            "Do" => {
                if let Some(cm) = last_cm.take() {
                    placements.push(cm);
                }
            }
            _ => {}
        }
    }
    placements
}

/// Every `re` operand set on a page, as `[x, y, width, height]` in points.
pub fn outline_rects(doc: &LopdfDocument, page_num: u32) -> Vec<[f32; 4]> {
    let content = doc
        .get_and_decode_page_content(page_id(doc, page_num))
        .expect("decodable page content");
    content
        .operations
        .iter()
        .filter(|op| op.operator == "re")
        .map(|op| {
            let n: Vec<f32> = op.operands.iter().map(|o| o.as_float().unwrap_or(0.0)).collect();
            [n[0], n[1], n[2], n[3]]
        })
        .collect()
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert a page's size in millimeters
#[macro_export]
macro_rules! assert_pdf_page_size_mm {
    ($pdf:expr, $page:expr, $width:expr, $height:expr) => {
        let mb = $crate::common::pdf_assertions::media_box(&$pdf.doc, $page);
        let pt = $crate::common::pdf_assertions::PT_PER_MM;
        assert!(
            $crate::common::pdf_assertions::approx_eq(mb[2] - mb[0], $width * pt)
                && $crate::common::pdf_assertions::approx_eq(mb[3] - mb[1], $height * pt),
            "Expected page {} to be {}x{} mm, MediaBox was {:?}",
            $page,
            $width,
            $height,
            mb
        );
    };
}

/// Assert how many images a page draws
#[macro_export]
macro_rules! assert_pdf_image_count {
    ($pdf:expr, $page:expr, $count:expr) => {
        let placements = $crate::common::pdf_assertions::image_placements(&$pdf.doc, $page);
        assert_eq!(
            placements.len(),
            $count,
            "Expected {} images on page {}, found {:?}",
            $count,
            $page,
            placements
        );
    };
}
