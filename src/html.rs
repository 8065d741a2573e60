//! HTML markup for a laid-out grid.

use crate::css::{self, CssMode, Stylesheet, CELL_ATTRIBUTE};
use crate::layout::{Glyph, Layout};
use crate::pixel::Pixel;
use crate::style::TextStyle;
use crate::{PixtextError, Result};

/// Id of the single `<style>` element holding the generated rules.
pub const STYLE_ELEMENT_ID: &str = "styles";

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        c => out.push(c),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    text.chars().for_each(|c| push_escaped(&mut out, c));
    out
}

/// One `<span>` per cell, rows separated by newlines.
pub fn render_cells(layout: &Layout, pixels: &[Pixel], style: TextStyle, mode: CssMode) -> Result<String> {
    if pixels.len() != layout.len() {
        return Err(PixtextError::PixelCountMismatch { expected: layout.len(), actual: pixels.len() });
    }

    // roughly 32 bytes of markup per cell
    let mut out = String::with_capacity(layout.len() * 32);
    for (row_idx, row) in layout.rows().enumerate() {
        if row_idx > 0 {
            out.push('\n');
        }
        for cell in row {
            let open = match mode {
                CssMode::PerCell => format!("<span class=\"{}\">", css::cell_class(cell.index)),
                CssMode::CustomProperties => {
                    let props = css::custom_properties(pixels[cell.index], style);
                    format!("<span {CELL_ATTRIBUTE} style=\"{props}\">")
                }
            };
            out.push_str(&open);
            match cell.glyph {
                Glyph::Char(c) => push_escaped(&mut out, c),
                Glyph::Blank => out.push_str("&nbsp;"),
            }
            out.push_str("</span>");
        }
    }
    Ok(out)
}

/// A standalone page with the stylesheet inlined and the grid in a `<pre>`.
pub fn render_document(title: &str, body: &str, stylesheet: &Stylesheet) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style id=\"{STYLE_ELEMENT_ID}\">\n{stylesheet}</style>\n\
         </head>\n\
         <body>\n\
         <pre>\n{body}\n</pre>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
    )
}
