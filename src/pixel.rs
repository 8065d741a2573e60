//! Pixel and image data passed between sampling, layout and styling.

use crate::{PixtextError, Result};
use serde::{Deserialize, Serialize};

/// A single RGB sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composites an RGBA sample over opaque black.
    pub fn over_black(r: u8, g: u8, b: u8, a: u8) -> Self {
        let blend = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        Self { r: blend(r), g: blend(g), b: blend(b) }
    }

    /// Component-wise `255 - c`.
    pub const fn inverted(self) -> Self {
        Self { r: 255 - self.r, g: 255 - self.g, b: 255 - self.b }
    }
}

impl From<image::Rgb<u8>> for Pixel {
    fn from(p: image::Rgb<u8>) -> Self {
        let [r, g, b] = p.0;
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of grid cells, `width * height`.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Row-major pixels plus the grid they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub pixels: Vec<Pixel>,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    pub fn new(pixels: Vec<Pixel>, width: u32, height: u32) -> Result<Self> {
        let expected = ImageSize::new(width, height).cell_count();
        if pixels.len() != expected {
            return Err(PixtextError::PixelCountMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { pixels, width, height })
    }

    /// All-black `width x width` stand-in used before a real image is available.
    pub fn placeholder(width: u32) -> Self {
        let count = ImageSize::new(width, width).cell_count();
        Self { pixels: vec![Pixel::BLACK; count], width, height: width }
    }

    /// Build from a canvas-style RGBA buffer, compositing alpha over black.
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> Result<Self> {
        let expected = ImageSize::new(width, height).cell_count();
        if data.len() != expected * 4 {
            return Err(PixtextError::PixelCountMismatch { expected, actual: data.len() / 4 });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Pixel::over_black(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self { pixels, width, height })
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}
