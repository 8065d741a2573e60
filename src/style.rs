//! Text style policies and the per-cell colors they produce.

use crate::pixel::Pixel;
use crate::PixtextError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the characters themselves are painted when selected.
///
/// The background is always the source pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    /// Text is invisible
    #[default]
    Transparent = 0,
    /// Text takes the inverse of the pixel color
    Inverted = 1,
    /// Text is a translucent dark veil over the pixel
    Veiled = 2,
}

impl TextStyle {
    pub const ALL: [TextStyle; 3] = [TextStyle::Transparent, TextStyle::Inverted, TextStyle::Veiled];

    pub fn name(self) -> &'static str {
        match self {
            TextStyle::Transparent => "transparent",
            TextStyle::Inverted => "inverted",
            TextStyle::Veiled => "veiled",
        }
    }
}

impl TryFrom<u8> for TextStyle {
    type Error = PixtextError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TextStyle::ALL
            .into_iter()
            .find(|style| *style as u8 == value)
            .ok_or_else(|| PixtextError::InvalidConfig(format!("unknown text style {value}")))
    }
}

impl FromStr for TextStyle {
    type Err = PixtextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TextStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PixtextError::InvalidConfig(format!("unknown text style '{s}'")))
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Veiled text color: black at half opacity.
pub const VEIL: Color = Color::Rgba(Pixel::BLACK, 0.5);

/// A CSS color value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum Color {
    Transparent,
    Rgb(Pixel),
    Rgba(Pixel, f32),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Transparent => f.write_str("transparent"),
            Color::Rgb(p) => write!(f, "rgb({}, {}, {})", p.r, p.g, p.b),
            Color::Rgba(p, a) => write!(f, "rgba({}, {}, {}, {})", p.r, p.g, p.b, a),
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellColors {
    pub foreground: Color,
    pub background: Color,
}

impl CellColors {
    pub fn for_pixel(pixel: Pixel, style: TextStyle) -> Self {
        let foreground = match style {
            TextStyle::Transparent => Color::Transparent,
            TextStyle::Inverted => Color::Rgb(pixel.inverted()),
            TextStyle::Veiled => VEIL,
        };
        Self { foreground, background: Color::Rgb(pixel) }
    }
}
