//! Stylesheet generation for the selection colors of every grid cell.

use crate::layout::Layout;
use crate::pixel::Pixel;
use crate::style::{CellColors, Color, TextStyle};
use crate::{PixtextError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class prefix shared by the stylesheet and the markup.
pub const CELL_CLASS_PREFIX: &str = "color-";
/// Attribute marking cells that carry their colors as custom properties.
pub const CELL_ATTRIBUTE: &str = "data-px";

/// Selection color for everything outside the grid.
const PAGE_SELECTION: Color = Color::Rgba(Pixel::BLACK, 0.1);

/// Where per-cell colors live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CssMode {
    /// One `.color-{i}::selection` rule per cell.
    #[default]
    PerCell,
    /// A single shared rule; cells carry `--rgb`/`--inv` inline.
    CustomProperties,
}

impl FromStr for CssMode {
    type Err = PixtextError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-cell" => Ok(CssMode::PerCell),
            "custom-properties" => Ok(CssMode::CustomProperties),
            other => Err(PixtextError::InvalidConfig(format!("unknown css mode '{other}'"))),
        }
    }
}

impl fmt::Display for CssMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CssMode::PerCell => "per-cell",
            CssMode::CustomProperties => "custom-properties",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(&'static str, String)>,
}

impl CssRule {
    fn new(selector: impl Into<String>) -> Self {
        Self { selector: selector.into(), declarations: Vec::with_capacity(2) }
    }

    fn declare(mut self, property: &'static str, value: impl ToString) -> Self {
        self.declarations.push((property, value.to_string()));
        self
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for (property, value) in &self.declarations {
            write!(f, " {property}: {value};")?;
        }
        f.write_str(" }")
    }
}

/// Generated rules: per-cell rules first, then the page-wide ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stylesheet {
    cell_rules: Vec<CssRule>,
    page_rules: Vec<CssRule>,
}

impl Stylesheet {
    /// Rules keyed by cell index; empty in custom-property mode.
    pub fn cell_rules(&self) -> &[CssRule] {
        &self.cell_rules
    }

    pub fn rules(&self) -> impl Iterator<Item = &CssRule> {
        self.cell_rules.iter().chain(&self.page_rules)
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.rules() {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

pub fn cell_class(index: usize) -> String {
    format!("{CELL_CLASS_PREFIX}{index}")
}

/// Inline `style` value for a cell in custom-property mode.
pub fn custom_properties(pixel: Pixel, style: TextStyle) -> String {
    let colors = CellColors::for_pixel(pixel, style);
    match style {
        TextStyle::Inverted => format!("--rgb:{};--inv:{}", colors.background, colors.foreground),
        _ => format!("--rgb:{}", colors.background),
    }
}

/// Builds the selection stylesheet for `layout`, coloring cell `i` from
/// `pixels[i]`.
pub fn generate_css(layout: &Layout, pixels: &[Pixel], style: TextStyle, mode: CssMode) -> Result<Stylesheet> {
    if pixels.len() != layout.len() {
        return Err(PixtextError::PixelCountMismatch { expected: layout.len(), actual: pixels.len() });
    }

    let cell_rules = match mode {
        CssMode::PerCell => layout
            .cells()
            .iter()
            .zip(pixels)
            .map(|(cell, &pixel)| {
                let colors = CellColors::for_pixel(pixel, style);
                CssRule::new(format!(".{}::selection", cell_class(cell.index)))
                    .declare("color", colors.foreground)
                    .declare("background-color", colors.background)
            })
            .collect(),
        CssMode::CustomProperties => Vec::new(),
    };

    let mut page_rules = Vec::with_capacity(2);
    if mode == CssMode::CustomProperties {
        let foreground = match style {
            TextStyle::Inverted => "var(--inv)".to_string(),
            _ => CellColors::for_pixel(Pixel::BLACK, style).foreground.to_string(),
        };
        page_rules.push(
            CssRule::new(format!("[{CELL_ATTRIBUTE}]::selection"))
                .declare("color", foreground)
                .declare("background-color", "var(--rgb)"),
        );
    }
    page_rules.push(
        CssRule::new("::selection")
            .declare("color", "inherit")
            .declare("background-color", PAGE_SELECTION),
    );

    log::debug!("generated {} cell rules ({mode}, {style})", cell_rules.len());
    Ok(Stylesheet { cell_rules, page_rules })
}
