//! Character output onto a text display with a block cursor.

use hidcon_core::chardev::CharOutput;
use hidcon_core::sync::SpinLock;

/// Horizontal tab stop width.
pub const H_TAB: u16 = 8;

/// Number of line feeds a vertical tab performs.
pub const V_TAB: u16 = 1;

/// Full block glyph drawn at the cursor position.
pub const CURSOR_GLYPH: u16 = 0xDB;

const BLANK: u16 = b' ' as u16;

/// A character-cell display.
///
/// Coordinates are `(column, row)`. `write` is the display's own text
/// output: it renders printable bytes at the cursor and advances, wrapping
/// at the right edge and scrolling at the bottom. It treats `b'\n'` as a
/// newline (column 0 of the next row) and `b'\r'` as a return to column 0.
pub trait TextSurface {
    /// Current cursor position.
    fn cursor(&self) -> (u16, u16);

    /// Moves the cursor without drawing.
    fn set_cursor(&mut self, x: u16, y: u16);

    /// Glyph stored at a cell. Cells off the display read as blank.
    fn glyph(&self, x: u16, y: u16) -> u16;

    /// Stores a glyph at a cell without moving the cursor. Cells off the
    /// display are ignored.
    fn draw_glyph(&mut self, x: u16, y: u16, glyph: u16);

    /// Writes one byte through the display's text renderer.
    fn write(&mut self, byte: u8);
}

/// Console output on a [`TextSurface`] with a block cursor.
///
/// The cell under the cursor is remembered and restored before the next
/// byte is handled.
pub struct DisplayAdapter<S> {
    surface: S,
    under_cursor: u16,
}

impl<S: TextSurface> DisplayAdapter<S> {
    /// Wraps a surface. The cursor appears on the first byte written.
    pub const fn new(surface: S) -> Self {
        Self {
            surface,
            under_cursor: BLANK,
        }
    }

    /// Handles one console byte.
    pub fn putch(&mut self, ch: u8) {
        let (mut x, y) = self.surface.cursor();
        self.surface.draw_glyph(x, y, self.under_cursor);

        match ch {
            0x20..=0x7E | 0x80..=0xFF => self.surface.write(ch),
            // BS
            0x08 => {
                if x > 0 {
                    x -= 1;
                    self.surface.set_cursor(x, y);
                    self.surface.draw_glyph(x, y, BLANK);
                }
            }
            // HT
            0x09 => {
                for _ in 0..H_TAB - x % H_TAB {
                    x += 1;
                    self.surface.set_cursor(x, y);
                    self.surface.draw_glyph(x, y, BLANK);
                }
            }
            // LF
            0x0A => self.surface.write(b'\n'),
            // VT: down a line, then clear the new row up to the old column.
            0x0B => {
                for _ in 0..V_TAB {
                    self.surface.write(b'\r');
                    self.surface.write(b'\n');
                }
                let (_, row) = self.surface.cursor();
                for col in 0..=x {
                    self.surface.set_cursor(col, row);
                    self.surface.draw_glyph(col, row, BLANK);
                }
            }
            // CR
            0x0D => self.surface.write(b'\r'),
            _ => {}
        }

        let (x, y) = self.surface.cursor();
        self.under_cursor = self.surface.glyph(x, y);
        self.surface.draw_glyph(x, y, CURSOR_GLYPH);
    }

    /// Writes every byte of `bytes`.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.putch(b);
        }
    }

    /// The wrapped surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Glyph hidden by the cursor.
    pub const fn under_cursor(&self) -> u16 {
        self.under_cursor
    }

    /// Unwraps the surface, leaving the cursor glyph drawn.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// A [`DisplayAdapter`] behind a spin lock, usable as a shared console
/// output.
pub struct SharedDisplay<S> {
    inner: SpinLock<DisplayAdapter<S>>,
}

impl<S: TextSurface> SharedDisplay<S> {
    /// Wraps a surface.
    pub const fn new(surface: S) -> Self {
        Self {
            inner: SpinLock::named("DISPLAY", DisplayAdapter::new(surface)),
        }
    }

    /// Runs `f` with the adapter locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut DisplayAdapter<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Unwraps the adapter.
    pub fn into_inner(self) -> DisplayAdapter<S> {
        self.inner.into_inner()
    }
}

impl<S: TextSurface> CharOutput for SharedDisplay<S> {
    fn write_byte(&self, byte: u8) {
        self.inner.lock().putch(byte);
    }
}
