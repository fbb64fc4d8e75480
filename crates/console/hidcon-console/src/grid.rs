//! In-memory character cell display.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::display::{CURSOR_GLYPH, TextSurface};

const BLANK: u16 = b' ' as u16;

/// A `cols` x `rows` grid of glyphs with a text cursor.
///
/// The cursor column may sit one past the last column; the next printable
/// byte then wraps to the following row. Writing past the bottom row
/// scrolls the grid up by one row.
pub struct TextGrid {
    /// Glyph cells (cols * rows, row-major).
    cells: Box<[u16]>,
    cols: u16,
    rows: u16,
    cursor_col: u16,
    cursor_row: u16,
    scrolled: usize,
}

impl TextGrid {
    /// Creates a blank grid. Zero dimensions are raised to one.
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cells: vec![BLANK; usize::from(cols) * usize::from(rows)].into_boxed_slice(),
            cols,
            rows,
            cursor_col: 0,
            cursor_row: 0,
            scrolled: 0,
        }
    }

    /// Number of columns.
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Number of rows.
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of rows scrolled off the top so far.
    pub const fn scrolled(&self) -> usize {
        self.scrolled
    }

    /// The glyphs of one row.
    pub fn row(&self, y: u16) -> &[u16] {
        let start = usize::from(y.min(self.rows - 1)) * usize::from(self.cols);
        &self.cells[start..start + usize::from(self.cols)]
    }

    /// One row as text with trailing blanks removed.
    pub fn row_text(&self, y: u16) -> String {
        let mut text: String = self.row(y).iter().map(|&g| glyph_char(g)).collect();
        text.truncate(text.trim_end_matches(' ').len());
        text
    }

    /// All rows as text, one line per row, trailing blank rows removed.
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = (0..self.rows).map(|y| self.row_text(y)).collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines.join("\n")
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.cols && y < self.rows)
            .then(|| usize::from(y) * usize::from(self.cols) + usize::from(x))
    }

    fn line_feed(&mut self) {
        self.cursor_col = 0;
        self.cursor_row += 1;
        if self.cursor_row >= self.rows {
            self.scroll_up();
            self.cursor_row = self.rows - 1;
        }
    }

    /// Scrolls the grid up by one row, clearing the bottom row.
    fn scroll_up(&mut self) {
        let cols = usize::from(self.cols);
        self.cells.copy_within(cols.., 0);
        let len = self.cells.len();
        self.cells[len - cols..].fill(BLANK);
        self.scrolled += 1;
    }
}

impl TextSurface for TextGrid {
    fn cursor(&self) -> (u16, u16) {
        (self.cursor_col, self.cursor_row)
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor_col = x.min(self.cols);
        self.cursor_row = y.min(self.rows - 1);
    }

    fn glyph(&self, x: u16, y: u16) -> u16 {
        self.index(x, y).map_or(BLANK, |i| self.cells[i])
    }

    fn draw_glyph(&mut self, x: u16, y: u16, glyph: u16) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = glyph;
        }
    }

    fn write(&mut self, byte: u8) {
        match byte {
            b'\n' => self.line_feed(),
            b'\r' => self.cursor_col = 0,
            _ => {
                if self.cursor_col >= self.cols {
                    self.line_feed();
                }
                self.draw_glyph(self.cursor_col, self.cursor_row, u16::from(byte));
                self.cursor_col += 1;
            }
        }
    }
}

/// Maps a glyph to a printable character: ASCII as is, the cursor block
/// as U+2588, other high bytes as Latin-1, anything else as `.`.
pub fn glyph_char(glyph: u16) -> char {
    match glyph {
        CURSOR_GLYPH => '\u{2588}',
        0x20..=0x7E | 0xA0..=0xFF => u8::try_from(glyph).map_or('.', char::from),
        _ => '.',
    }
}
