//! Reading and writing the canvas as standard raster files.
//!
//! The output format is picked from the file extension, falling back to PNG.
//! ICO output always carries 16x16, 32x32 and 48x48 entries, each a
//! nearest-neighbour resample of the canvas.

use std::fs;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{CanvasError, CanvasResult};

/// Square sizes written into an ICO file
pub const ICO_SIZES: [u32; 3] = [16, 32, 48];

/// JPEG quality used on save
pub const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Gif,
    Ico,
}

impl SaveFormat {
    /// Pick the format from the extension of `path`. Unknown or missing
    /// extensions save as PNG.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .and_then(|ext| Self::from_extension(&ext))
            .unwrap_or_default()
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.') {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            "gif" => Some(SaveFormat::Gif),
            "ico" => Some(SaveFormat::Ico),
            _ => None,
        }
    }
}

/// Decode any supported format and normalize it to RGBA8
pub fn decode(bytes: &[u8]) -> CanvasResult<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(CanvasError::Decode)?;
    log::debug!("Decoded image: {}x{}", img.width(), img.height());
    Ok(img.to_rgba8())
}

pub fn load_image(path: &Path) -> CanvasResult<RgbaImage> {
    let bytes = fs::read(path)?;
    log::info!("Loading image from {} ({} bytes)", path.display(), bytes.len());
    decode(&bytes)
}

/// Encode the canvas into the bytes of a file of the given format
pub fn encode(image: &RgbaImage, format: SaveFormat) -> CanvasResult<Vec<u8>> {
    let mut buf = Vec::new();
    let (width, height) = image.dimensions();

    match format {
        SaveFormat::Png => PngEncoder::new(&mut buf)
            .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(CanvasError::Encode)?,
        SaveFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(CanvasError::Encode)?
        }
        SaveFormat::Bmp => BmpEncoder::new(&mut buf)
            .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(CanvasError::Encode)?,
        SaveFormat::Gif => {
            // The encoder writes the trailer when dropped
            let mut encoder = GifEncoder::new(&mut buf);
            encoder
                .encode(image.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(CanvasError::Encode)?;
        }
        SaveFormat::Ico => encode_ico(image, &mut buf)?,
    }

    Ok(buf)
}

fn encode_ico(image: &RgbaImage, buf: &mut Vec<u8>) -> CanvasResult<()> {
    let resized: Vec<RgbaImage> = ICO_SIZES
        .iter()
        .map(|&size| imageops::resize(image, size, size, FilterType::Nearest))
        .collect();

    let frames = resized
        .iter()
        .map(|icon| {
            IcoFrame::as_png(
                icon.as_raw(),
                icon.width(),
                icon.height(),
                ExtendedColorType::Rgba8,
            )
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(CanvasError::Encode)?;

    IcoEncoder::new(buf)
        .encode_images(&frames)
        .map_err(CanvasError::Encode)
}

/// Write the canvas to `path`, choosing the format from its extension
pub fn save_image(image: &RgbaImage, path: &Path) -> CanvasResult<SaveFormat> {
    let format = SaveFormat::from_path(path);
    let bytes = encode(image, format)?;
    fs::write(path, &bytes)?;
    log::info!(
        "Saved {}x{} image to {} as {:?} ({} bytes)",
        image.width(),
        image.height(),
        path.display(),
        format,
        bytes.len()
    );
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn format_follows_extension() {
        assert_eq!(SaveFormat::from_path(Path::new("a.png")), SaveFormat::Png);
        assert_eq!(SaveFormat::from_path(Path::new("a.JPG")), SaveFormat::Jpeg);
        assert_eq!(SaveFormat::from_path(Path::new("a.jpeg")), SaveFormat::Jpeg);
        assert_eq!(SaveFormat::from_path(Path::new("dir/a.Bmp")), SaveFormat::Bmp);
        assert_eq!(SaveFormat::from_path(Path::new("a.gif")), SaveFormat::Gif);
        assert_eq!(SaveFormat::from_path(Path::new("a.ico")), SaveFormat::Ico);
    }

    #[test]
    fn unknown_extension_defaults_to_png() {
        assert_eq!(SaveFormat::from_path(Path::new("a.tiff")), SaveFormat::Png);
        assert_eq!(SaveFormat::from_path(Path::new("noext")), SaveFormat::Png);
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CanvasError::Decode(_)));
    }

    #[test]
    fn png_round_trip_keeps_alpha() {
        let image = RgbaImage::from_fn(4, 3, |x, y| Rgba([x as u8 * 60, y as u8 * 80, 7, (x * y * 20) as u8]));
        let bytes = encode(&image, SaveFormat::Png).unwrap();
        assert_eq!(decode(&bytes).unwrap(), image);
    }

    #[test]
    fn jpeg_drops_alpha() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 0]));
        let decoded = decode(&encode(&image, SaveFormat::Jpeg).unwrap()).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert!(decoded.pixels().all(|p| p[3] == 255));
    }
}
