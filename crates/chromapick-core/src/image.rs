//! Palette extraction from uploaded images.

use crate::color::{ColorValue, Rgb};
use crate::error::{PickerError, PickerResult};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;

/// An image handed to the picker by its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Image file on disk.
    Path(PathBuf),
    /// Encoded image bytes already in memory.
    Bytes(Vec<u8>),
}

impl ImageRef {
    /// Load the encoded bytes.
    pub fn read(&self) -> PickerResult<Vec<u8>> {
        match self {
            ImageRef::Path(path) => Ok(std::fs::read(path)?),
            ImageRef::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Extracts an ordered palette (most prominent first) from an image.
pub trait ImageExtractor {
    fn extract(&self, image: &ImageRef, max_colors: usize) -> PickerResult<Vec<String>>;
}

/// PNG palette extractor.
///
/// Pixels are bucketed on a 5-bit-per-channel grid; buckets are ranked by
/// pixel count and each contributes the average color of its pixels. Mostly
/// transparent pixels are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngPaletteExtractor;

/// Pixels with alpha below this are skipped.
const MIN_ALPHA: u8 = 125;

#[derive(Default)]
struct Bucket {
    count: u64,
    r: u64,
    g: u64,
    b: u64,
}

impl PngPaletteExtractor {
    /// Decode to 8-bit RGBA pixels.
    fn decode(bytes: &[u8]) -> PickerResult<Vec<[u8; 4]>> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let data = &buf[..info.buffer_size()];

        let pixels = match info.color_type {
            png::ColorType::Rgba => data
                .chunks_exact(4)
                .map(|p| [p[0], p[1], p[2], p[3]])
                .collect(),
            png::ColorType::Rgb => data.chunks_exact(3).map(|p| [p[0], p[1], p[2], 255]).collect(),
            png::ColorType::GrayscaleAlpha => data
                .chunks_exact(2)
                .map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => data.iter().map(|&v| [v, v, v, 255]).collect(),
            other => {
                return Err(PickerError::UnsupportedImage(format!(
                    "color type {other:?} after expansion"
                )));
            }
        };
        Ok(pixels)
    }

    /// Rank pixels into at most `max_colors` hex colors.
    pub fn palette(pixels: &[[u8; 4]], max_colors: usize) -> Vec<String> {
        let mut buckets: HashMap<(u8, u8, u8), Bucket> = HashMap::new();
        for &[r, g, b, a] in pixels {
            if a < MIN_ALPHA {
                continue;
            }
            let bucket = buckets.entry((r >> 3, g >> 3, b >> 3)).or_default();
            bucket.count += 1;
            bucket.r += r as u64;
            bucket.g += g as u64;
            bucket.b += b as u64;
        }

        let mut ranked: Vec<_> = buckets.into_iter().collect();
        ranked.sort_by(|(ka, a), (kb, b)| b.count.cmp(&a.count).then(ka.cmp(kb)));

        ranked
            .into_iter()
            .take(max_colors)
            .map(|(_, bucket)| {
                let n = bucket.count as f64;
                ColorValue::from_rgb(
                    Rgb::new(bucket.r as f64 / n, bucket.g as f64 / n, bucket.b as f64 / n),
                    1.0,
                )
                .to_hex_string()
            })
            .collect()
    }
}

impl ImageExtractor for PngPaletteExtractor {
    fn extract(&self, image: &ImageRef, max_colors: usize) -> PickerResult<Vec<String>> {
        let bytes = image.read()?;
        let pixels = Self::decode(&bytes)?;
        let palette = Self::palette(&pixels, max_colors);
        log::debug!(
            "Extracted {} colors from {} pixels",
            palette.len(),
            pixels.len()
        );
        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_rgb(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, width, height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(pixels).unwrap();
        }
        data
    }

    #[test]
    fn test_extracts_dominant_colors_in_order() {
        // 3 red pixels, 1 blue pixel.
        let pixels = [255, 0, 0, 255, 0, 0, 255, 0, 0, 0, 0, 255];
        let png_data = encode_rgb(2, 2, &pixels);

        let palette = PngPaletteExtractor
            .extract(&ImageRef::Bytes(png_data), 64)
            .unwrap();
        assert_eq!(palette, vec!["#ff0000", "#0000ff"]);
    }

    #[test]
    fn test_max_colors_limits_palette() {
        let pixels = [255, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255];
        let png_data = encode_rgb(2, 2, &pixels);

        let palette = PngPaletteExtractor
            .extract(&ImageRef::Bytes(png_data), 1)
            .unwrap();
        assert_eq!(palette, vec!["#ff0000"]);
    }

    #[test]
    fn test_palette_skips_transparent_pixels() {
        let pixels = [[10, 20, 30, 0], [200, 100, 50, 255]];
        assert_eq!(PngPaletteExtractor::palette(&pixels, 8), vec!["#c86432"]);
    }

    #[test]
    fn test_palette_averages_bucket() {
        let pixels = [[16, 16, 16, 255], [18, 18, 18, 255]];
        assert_eq!(PngPaletteExtractor::palette(&pixels, 8), vec!["#111111"]);
    }

    #[test]
    fn test_invalid_bytes_fail() {
        let result = PngPaletteExtractor.extract(&ImageRef::Bytes(vec![1, 2, 3]), 8);
        assert!(matches!(result, Err(PickerError::ImageDecode(_))));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = PngPaletteExtractor.extract(
            &ImageRef::Path(PathBuf::from("/definitely/not/here.png")),
            8,
        );
        assert!(matches!(result, Err(PickerError::Io(_))));
    }

    #[test]
    fn test_reads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swatch.png");
        std::fs::write(&path, encode_rgb(1, 1, &[8, 141, 165])).unwrap();

        let palette = PngPaletteExtractor.extract(&ImageRef::Path(path), 4).unwrap();
        assert_eq!(palette, vec!["#088da5"]);
    }
}
