//! Converter tying sampling, layout and styling together.

use crate::css::{generate_css, CssMode, Stylesheet};
use crate::html;
use crate::layout::{repeat_text, Layout};
use crate::pixel::{ImageData, Pixel};
use crate::sample::sample_image;
use crate::style::{CellColors, Color, TextStyle};
use crate::{PixtextError, Result};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_WIDTH: u32 = 1000;
const MAX_SCALE_FACTOR: f32 = 8.0;

/// Rendering options, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Text repeated across the grid
    pub text: String,
    /// Grid columns (one per sampled pixel)
    pub width: u32,
    /// Supersampling factor before the final resize (like a device pixel ratio)
    pub scale_factor: f32,
    pub style: TextStyle,
    pub css_mode: CssMode,
    /// Title of generated HTML documents
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            width: 80,
            scale_factor: 1.0,
            style: TextStyle::default(),
            css_mode: CssMode::default(),
            title: "pixtext".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(PixtextError::InvalidConfig(format!(
                "width must be between 1 and {MAX_WIDTH}, got {}",
                self.width
            )));
        }
        if !(self.scale_factor > 0.0 && self.scale_factor <= MAX_SCALE_FACTOR) {
            return Err(PixtextError::InvalidConfig(format!(
                "scale_factor must be in (0, {MAX_SCALE_FACTOR}], got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }
}

/// One grid cell with everything needed to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCell {
    pub index: usize,
    pub ch: char,
    pub blank: bool,
    pub pixel: Pixel,
    pub foreground: Color,
    pub background: Color,
}

pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.config.text = text.into();
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.config.scale_factor = scale_factor;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn with_css_mode(mut self, mode: CssMode) -> Self {
        self.config.css_mode = mode;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Samples `image` at the configured width and lays the text over it.
    pub fn render(&self, image: &DynamicImage) -> Result<Rendering> {
        self.config.validate()?;
        let data = sample_image(image, self.config.width, self.config.scale_factor)?;
        self.render_pixels(data)
    }

    /// Lays the text over already-sampled pixels.
    pub fn render_pixels(&self, data: ImageData) -> Result<Rendering> {
        let layout = repeat_text(&self.config.text, data.size());
        let stylesheet = generate_css(&layout, &data.pixels, self.config.style, self.config.css_mode)?;
        let markup = html::render_cells(&layout, &data.pixels, self.config.style, self.config.css_mode)?;
        log::info!(
            "rendered {}x{} grid ({} style, {} css)",
            data.width,
            data.height,
            self.config.style,
            self.config.css_mode
        );
        Ok(Rendering {
            data,
            layout,
            stylesheet,
            markup,
            style: self.config.style,
            title: self.config.title.clone(),
        })
    }
}

pub struct Rendering {
    data: ImageData,
    layout: Layout,
    stylesheet: Stylesheet,
    markup: String,
    style: TextStyle,
    title: String,
}

impl Rendering {
    pub fn image(&self) -> &ImageData {
        &self.data
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn css(&self) -> String {
        self.stylesheet.to_string()
    }

    /// The cell spans, without the stylesheet.
    pub fn html(&self) -> &str {
        &self.markup
    }

    pub fn document(&self) -> String {
        html::render_document(&self.title, &self.markup, &self.stylesheet)
    }

    pub fn plain_text(&self) -> String {
        self.layout.to_text()
    }

    pub fn cells(&self) -> Vec<RenderedCell> {
        self.layout
            .cells()
            .iter()
            .zip(&self.data.pixels)
            .map(|(cell, &pixel)| {
                let colors = CellColors::for_pixel(pixel, self.style);
                RenderedCell {
                    index: cell.index,
                    ch: cell.glyph.as_char(),
                    blank: cell.glyph.is_blank(),
                    pixel,
                    foreground: colors.foreground,
                    background: colors.background,
                }
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Output<'a> {
            width: u32,
            height: u32,
            style: TextStyle,
            cells: Vec<RenderedCell>,
            css: &'a str,
        }
        let css = self.css();
        Ok(serde_json::to_string(&Output {
            width: self.data.width,
            height: self.data.height,
            style: self.style,
            cells: self.cells(),
            css: &css,
        })?)
    }
}
