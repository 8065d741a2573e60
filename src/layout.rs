//! Text layout - repeats a string and word-wraps it into a fixed grid.
//!
//! The grid is stored flat in row-major order, so a cell's index is also the
//! index of the pixel it is colored from. Row boundaries fall every `width`
//! cells; words that overflow a row either wrap (padding the row with blanks)
//! or, when longer than a whole row, continue on the next one.

use crate::pixel::ImageSize;
use serde::Serialize;

pub const ELLIPSIS: &str = "...";
const ELLIPSIS_LEN: usize = ELLIPSIS.len();

/// Content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "char")]
pub enum Glyph {
    Char(char),
    Blank,
}

impl Glyph {
    pub fn is_blank(self) -> bool {
        matches!(self, Glyph::Blank)
    }

    /// The character to print, with blanks as a plain space.
    pub fn as_char(self) -> char {
        match self {
            Glyph::Char(c) => c,
            Glyph::Blank => ' ',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub index: usize,
    pub glyph: Glyph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    size: ImageSize,
    cells: Vec<Cell>,
    ellipsis: Option<usize>,
}

impl Layout {
    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the first ellipsis cell, if the text was cut short.
    pub fn ellipsis(&self) -> Option<usize> {
        self.ellipsis
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.width.max(1) as usize)
    }

    /// Rows of characters joined by newlines, blanks as spaces.
    pub fn to_text(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.glyph.as_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Append-only row-major cell buffer capped at `capacity` cells.
struct GridWriter {
    width: usize,
    capacity: usize,
    cells: Vec<Cell>,
}

impl GridWriter {
    fn new(width: usize, capacity: usize) -> Self {
        Self { width, capacity, cells: Vec::with_capacity(capacity) }
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn column(&self) -> usize {
        self.cells.len() % self.width
    }

    fn push(&mut self, glyph: Glyph) {
        if self.cells.len() < self.capacity {
            let index = self.cells.len();
            self.cells.push(Cell { index, glyph });
        }
    }

    fn pad_row(&mut self) {
        while self.column() != 0 {
            self.push(Glyph::Blank);
        }
    }

    /// Writes the ellipsis at `start` (or the cursor, if earlier) and returns
    /// where it begins.
    fn ellipsis(&mut self, start: usize) -> usize {
        self.cells.truncate(start);
        let at = self.cells.len();
        for c in ELLIPSIS.chars() {
            self.push(Glyph::Char(c));
        }
        at
    }

    /// Writes as much of `word` as fits before `limit`, then the ellipsis.
    fn truncate_word(&mut self, word: &str, limit: usize) -> usize {
        let keep = limit.saturating_sub(self.len());
        for c in word.chars().take(keep) {
            self.push(Glyph::Char(c));
        }
        self.ellipsis(limit)
    }

    fn finish(mut self, size: ImageSize, ellipsis: Option<usize>) -> Layout {
        while self.cells.len() < self.capacity {
            self.push(Glyph::Blank);
        }
        Layout { size, cells: self.cells, ellipsis }
    }
}

/// `text` repeated with single-space joins, cut to `required` characters.
fn repeated_stream(text: &str, required: usize) -> String {
    let text_len = text.chars().count();
    let repetitions = required.div_ceil(text_len);
    vec![text; repetitions].join(" ").chars().take(required).collect()
}

/// Lays `text` out over a grid of `size.width x size.height` cells.
///
/// The text is repeated until it covers the grid, then packed greedily one
/// word at a time. Once the next word would run past the last three cells it
/// is truncated and followed by `...`; anything after that is blank padding.
pub fn repeat_text(text: &str, size: ImageSize) -> Layout {
    let width = size.width as usize;
    let required = size.cell_count();
    let mut grid = GridWriter::new(width.max(1), required);

    if required == 0 || text.trim().is_empty() {
        return grid.finish(size, None);
    }

    let stream = repeated_stream(text, required);
    let limit = required.saturating_sub(ELLIPSIS_LEN);
    let mut ellipsis = None;

    for word in stream.split_whitespace() {
        let len = word.chars().count();
        if grid.len() + len > limit {
            ellipsis = Some(grid.truncate_word(word, limit));
            break;
        }

        let col = grid.column();
        if col > 0 && col + len > width {
            grid.pad_row();
            // the new row may start too late for the whole word
            if grid.len() + len > limit {
                ellipsis = Some(grid.truncate_word(word, limit));
                break;
            }
        }
        for c in word.chars() {
            grid.push(Glyph::Char(c));
        }
        if grid.column() != 0 && grid.len() < required {
            grid.push(Glyph::Blank);
        }
    }

    log::debug!(
        "laid out {}x{} grid ({} cells), ellipsis at {:?}",
        size.width,
        size.height,
        required,
        ellipsis
    );
    grid.finish(size, ellipsis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rows(layout: &Layout) -> Vec<String> {
        layout.to_text().lines().map(str::to_owned).collect()
    }

    #[test]
    fn test_wraps_words_and_ends_with_ellipsis() {
        let layout = repeat_text("hello world", ImageSize::new(6, 3));
        assert_eq!(rows(&layout), ["hello ", "world ", "hel..."]);
        assert_eq!(layout.ellipsis(), Some(15));
    }

    #[test]
    fn test_pads_row_before_wrapping() {
        let layout = repeat_text("aa bbb", ImageSize::new(4, 3));
        assert_eq!(rows(&layout), ["aa  ", "bbb ", "a..."]);
        assert!(layout.cells()[3].glyph.is_blank());
    }

    #[rstest]
    #[case("ab cdefghij", 10, 2, ["ab        ", "cdefghi..."])]
    #[case("xy abcdef", 6, 2, ["xy    ", "abc..."])]
    #[case("abcd efg", 5, 2, ["abcd ", "ef..."])]
    fn test_truncates_after_wrapping(
        #[case] text: &str,
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: [&str; 2],
    ) {
        let layout = repeat_text(text, ImageSize::new(width, height));
        assert_eq!(rows(&layout), expected);
        assert_eq!(layout.ellipsis(), Some((width * height) as usize - 3));
    }

    #[test]
    fn test_long_word_breaks_across_rows() {
        let layout = repeat_text("abcdefghij", ImageSize::new(4, 3));
        assert_eq!(rows(&layout), ["abcd", "efgh", "i..."]);
    }

    #[test]
    fn test_ellipsis_replaces_trailing_separator() {
        let layout = repeat_text("abc de", ImageSize::new(5, 2));
        assert_eq!(rows(&layout), ["abc  ", "de..."]);
        assert_eq!(layout.ellipsis(), Some(7));
    }

    #[test]
    fn test_tiny_grid_clips_ellipsis() {
        let layout = repeat_text("x", ImageSize::new(1, 2));
        assert_eq!(rows(&layout), [".", "."]);
        assert_eq!(layout.ellipsis(), Some(0));
    }

    #[test]
    fn test_blank_text_fills_with_blanks() {
        let layout = repeat_text("   ", ImageSize::new(3, 2));
        assert_eq!(layout.len(), 6);
        assert!(layout.cells().iter().all(|c| c.glyph.is_blank()));
        assert_eq!(layout.ellipsis(), None);
    }

    #[test]
    fn test_zero_sized_grid_is_empty() {
        assert!(repeat_text("text", ImageSize::new(0, 5)).is_empty());
        assert!(repeat_text("text", ImageSize::new(5, 0)).is_empty());
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let layout = repeat_text("héé", ImageSize::new(4, 2));
        assert_eq!(layout.len(), 8);
        assert_eq!(layout.cells()[1].glyph, Glyph::Char('é'));
    }

    #[rstest]
    #[case("The quick brown fox jumps over the lazy dog", 13, 7)]
    #[case("a", 1, 1)]
    #[case("supercalifragilistic", 3, 9)]
    #[case("one two  three\tfour", 8, 8)]
    #[case("x y", 40, 1)]
    fn test_grid_invariants(#[case] text: &str, #[case] width: u32, #[case] height: u32) {
        let layout = repeat_text(text, ImageSize::new(width, height));

        assert_eq!(layout.len(), (width * height) as usize);
        for (i, cell) in layout.cells().iter().enumerate() {
            assert_eq!(cell.index, i);
        }
        assert!(layout.rows().all(|row| row.len() <= width as usize));
        assert_eq!(layout.rows().count(), height as usize);

        let start = layout.ellipsis().expect("text should be cut short");
        let end = (start + ELLIPSIS_LEN).min(layout.len());
        assert!(layout.cells()[start..end].iter().all(|c| c.glyph == Glyph::Char('.')));
        assert!(layout.cells()[end..].iter().all(|c| c.glyph.is_blank()));
    }

    #[test]
    fn test_deterministic() {
        let size = ImageSize::new(11, 5);
        assert_eq!(repeat_text("lorem ipsum", size), repeat_text("lorem ipsum", size));
    }
}
