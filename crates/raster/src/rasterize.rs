use crate::{MAX_TARGET_SIDE_PX, PrintTarget, RasterError};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};
use std::io::Write;

/// How the resampled pixels are packed for embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterEncoding {
    /// Raw 8-bit RGB compressed with zlib. Lossless.
    #[default]
    Flate,
    /// Baseline JPEG at the given quality (1-100).
    Jpeg { quality: u8 },
}

impl RasterEncoding {
    /// JPEG at the highest quality setting.
    pub fn jpeg() -> Self {
        RasterEncoding::Jpeg { quality: 100 }
    }
}

/// A card image resampled to its print size.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintRaster {
    pub width_px: u32,
    pub height_px: u32,
    pub encoding: RasterEncoding,
    /// Encoded pixel data: a zlib stream of RGB triples, or a complete JPEG file.
    pub data: Vec<u8>,
}

/// Decodes `bytes`, flattens any alpha onto white, resamples to the target's
/// exact pixel size with a Lanczos filter and encodes the result.
pub fn rasterize_for_print(
    bytes: &[u8],
    target: &PrintTarget,
    encoding: RasterEncoding,
) -> Result<PrintRaster, RasterError> {
    let (width_px, height_px) = target.pixel_size();
    if width_px == 0 || height_px == 0 {
        return Err(RasterError::DegenerateTarget { width_px, height_px });
    }
    if width_px > MAX_TARGET_SIDE_PX || height_px > MAX_TARGET_SIDE_PX {
        return Err(RasterError::TargetTooLarge {
            width_px,
            height_px,
            max: MAX_TARGET_SIDE_PX,
        });
    }

    let decoded = image::load_from_memory(bytes)?;
    log::debug!(
        "Resampling {}x{} source to {}x{} px",
        decoded.width(),
        decoded.height(),
        width_px,
        height_px
    );

    let flattened = flatten_onto_white(&decoded.to_rgba8());
    let resized = if flattened.dimensions() == (width_px, height_px) {
        flattened
    } else {
        imageops::resize(&flattened, width_px, height_px, FilterType::Lanczos3)
    };

    let data = match encoding {
        RasterEncoding::Flate => deflate(resized.as_raw())?,
        RasterEncoding::Jpeg { quality } => encode_jpeg(&resized, quality)?,
    };

    Ok(PrintRaster {
        width_px,
        height_px,
        encoding,
        data,
    })
}

/// Composites every pixel over an opaque white background.
fn flatten_onto_white(source: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(source.width(), source.height(), |x, y| {
        let [r, g, b, a] = source.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

fn deflate(raw: &[u8]) -> Result<Vec<u8>, RasterError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(raw)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    encoder.finish().map_err(|e| RasterError::Encode(e.to_string()))
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, RasterError> {
    let mut buffer = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        encoder
            .encode_image(image)
            .map_err(|e| RasterError::Encode(e.to_string()))?;
    }
    Ok(buffer)
}
