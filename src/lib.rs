//! Render images as grids of colored, selectable text.
//!
//! A string is repeated and word-wrapped into a grid sized from the sampled
//! image; every cell takes the color of the pixel at the same row-major
//! index, and a generated stylesheet paints it when the text is selected.

pub mod css;
pub mod html;
pub mod layout;
pub mod pixel;
pub mod render;
pub mod sample;
pub mod style;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use css::{generate_css, CssMode, Stylesheet};
pub use layout::{repeat_text, Cell, Glyph, Layout};
pub use pixel::{ImageData, ImageSize, Pixel};
pub use render::{RenderConfig, RenderedCell, Renderer, Rendering};
pub use style::{CellColors, Color, TextStyle};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixtextError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
    #[error("Image has no pixels")]
    EmptyImage,
}

pub type Result<T> = std::result::Result<T, PixtextError>;
