//! The live pixel buffer and every edit that can be applied to it.
//!
//! The canvas is always RGBA8. Loading normalizes any decoded image to that
//! layout, and the eraser writes fully transparent pixels.

use image::{imageops, Rgba, RgbaImage};

use crate::color::Color;
use crate::error::{CanvasError, CanvasResult};
use crate::file_handler;
use crate::tool::{StrokeOutcome, ToolKind, ToolState};

/// Size of the canvas created at startup and by "New"
pub const DEFAULT_SIZE: u32 = 16;

/// Sigma of the Gaussian used by [`Canvas::blur`]
pub const BLUR_SIGMA: f32 = 1.0;

/// Pixel written by the eraser
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            image: RgbaImage::from_pixel(DEFAULT_SIZE, DEFAULT_SIZE, TRANSPARENT),
        }
    }
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn create(width: u32, height: u32, background: Rgba<u8>) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, background),
        })
    }

    /// Decode PNG/JPEG/BMP/GIF/ICO bytes into a new canvas
    pub fn load_from(bytes: &[u8]) -> CanvasResult<Self> {
        let image = file_handler::decode(bytes)?;
        Ok(Self { image })
    }

    /// Wrap an already decoded image. Empty images are rejected.
    pub fn from_image(image: RgbaImage) -> CanvasResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self { image })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The live buffer
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row major
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Swap in a whole new buffer (undo/redo restore)
    pub fn replace(&mut self, image: RgbaImage) {
        self.image = image;
    }

    /// The pixel at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba<u8>> {
        let (x, y) = self.to_index(x, y)?;
        Some(*self.image.get_pixel(x, y))
    }

    /// Write a single pixel, ignoring coordinates outside the canvas
    pub fn put_pixel(&mut self, x: i64, y: i64, pixel: Rgba<u8>) -> bool {
        match self.to_index(x, y) {
            Some((x, y)) => {
                self.image.put_pixel(x, y, pixel);
                true
            }
            None => false,
        }
    }

    fn to_index(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            None
        } else {
            Some((x as u32, y as u32))
        }
    }

    /// Apply the tool described by `state` at `(x, y)`
    pub fn apply_tool(&mut self, state: &ToolState, x: i64, y: i64) -> CanvasResult<StrokeOutcome> {
        self.apply_stroke(state.tool, x, y, state.brush_size(), state.color)
    }

    /// Apply one stamp of `tool` centered on `(x, y)`.
    ///
    /// Brush and eraser cover the square `[x - size/2, x + size/2]` on both
    /// axes, clipped to the canvas. A center outside the canvas does nothing.
    /// The picker returns the RGB of the pixel under the center and fails when
    /// that pixel does not exist.
    pub fn apply_stroke(
        &mut self,
        tool: ToolKind,
        x: i64,
        y: i64,
        size: u32,
        color: Color,
    ) -> CanvasResult<StrokeOutcome> {
        match tool {
            ToolKind::Brush => Ok(self.stamp(x, y, size, color.to_rgba())),
            ToolKind::Eraser => Ok(self.stamp(x, y, size, TRANSPARENT)),
            ToolKind::Picker => {
                let pixel = self.pixel(x, y).ok_or(CanvasError::OutOfBounds {
                    x,
                    y,
                    width: self.width(),
                    height: self.height(),
                })?;
                Ok(StrokeOutcome::Picked(Color::from_rgba(pixel)))
            }
        }
    }

    fn stamp(&mut self, x: i64, y: i64, size: u32, pixel: Rgba<u8>) -> StrokeOutcome {
        if self.to_index(x, y).is_none() {
            return StrokeOutcome::Painted { touched: 0 };
        }

        let half = (size.max(1) / 2) as i64;
        let x0 = (x - half).max(0) as u32;
        let y0 = (y - half).max(0) as u32;
        let x1 = (x + half).min(self.width() as i64 - 1) as u32;
        let y1 = (y + half).min(self.height() as i64 - 1) as u32;

        for py in y0..=y1 {
            for px in x0..=x1 {
                self.image.put_pixel(px, py, pixel);
            }
        }

        let touched = ((x1 - x0 + 1) * (y1 - y0 + 1)) as usize;
        log::debug!("Stamped {} pixels around ({}, {})", touched, x, y);
        StrokeOutcome::Painted { touched }
    }

    pub fn flip_horizontal(&mut self) {
        self.image = imageops::flip_horizontal(&self.image);
    }

    pub fn flip_vertical(&mut self) {
        self.image = imageops::flip_vertical(&self.image);
    }

    /// Rotate a quarter turn clockwise. A WxH canvas becomes HxW.
    pub fn rotate_90_clockwise(&mut self) {
        self.image = imageops::rotate90(&self.image);
    }

    /// Gaussian blur with a fixed [`BLUR_SIGMA`]
    pub fn blur(&mut self) {
        self.image = imageops::blur(&self.image, BLUR_SIGMA);
    }

    /// Give every pixel the hue of `target`, keeping saturation, value and alpha
    pub fn remap_hue(&mut self, target: Color) {
        let hue = target.hue();
        for pixel in self.image.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let (_, s, v) = Color::rgb(r, g, b).to_hsv();
            let remapped = Color::from_hsv(hue, s, v);
            *pixel = Rgba([remapped.r, remapped.g, remapped.b, a]);
        }
    }
}
