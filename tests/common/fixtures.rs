use cardgrid::InMemoryResourceProvider;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encodes a solid-color image in the given format.
pub fn image_bytes(width: u32, height: u32, color: [u8; 4], format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)));
    let image = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    };
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode fixture image");
    bytes
}

pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    image_bytes(width, height, color, ImageFormat::Png)
}

/// A distinct color per card so rasters never collapse into one.
pub fn card_color(n: usize) -> [u8; 4] {
    [(n * 37 % 256) as u8, (n * 91 % 256) as u8, (n * 53 % 256) as u8, 255]
}

/// Writes `count` small PNG cards named `card_<n>.png` into `dir`.
#[allow(dead_code)]
pub fn write_cards(dir: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|n| {
            let path = dir.join(format!("card_{n}.png"));
            std::fs::write(&path, png_bytes(12, 16, card_color(n))).expect("write fixture card");
            path
        })
        .collect()
}

/// An in-memory provider holding `cards/card_<n>.png` for every `n` in `0..count`.
#[allow(dead_code)]
pub fn provider_with_cards(count: usize) -> InMemoryResourceProvider {
    let provider = InMemoryResourceProvider::new();
    for n in 0..count {
        provider
            .add(card_path(n), png_bytes(12, 16, card_color(n)))
            .expect("add fixture card");
    }
    provider
}

pub fn card_path(n: usize) -> PathBuf {
    PathBuf::from(format!("cards/card_{n}.png"))
}
