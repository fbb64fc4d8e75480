//! CP/M style console routines on top of the character device traits.

use hidcon_core::chardev::{CharInput, CharOutput};

/// Default console mask: strip the eighth bit, as CP/M expects.
pub const MASK_7BIT: u8 = 0x7F;

/// Mask that passes 8-bit data through (needed for XMODEM).
pub const MASK_8BIT: u8 = 0xFF;

/// The console: one input and one output device plus the output mask.
///
/// Both devices are taken by value; pass references (including
/// `&dyn CharInput`) to share them.
pub struct Console<I, O> {
    input: I,
    output: O,
    mask8bit: u8,
}

impl<I: CharInput, O: CharOutput> Console<I, O> {
    /// Creates a console with the 7-bit output mask.
    pub const fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            mask8bit: MASK_7BIT,
        }
    }

    /// Current output mask.
    pub const fn mask8bit(&self) -> u8 {
        self.mask8bit
    }

    /// Replaces the output mask.
    pub fn set_mask8bit(&mut self, mask: u8) {
        self.mask8bit = mask;
    }

    /// Writes a byte unmasked.
    pub fn putch(&self, ch: u8) {
        self.output.write_byte(ch);
    }

    /// Writes a byte through the output mask.
    pub fn putcon(&self, ch: u8) {
        self.putch(ch & self.mask8bit);
    }

    /// Writes a string through the output mask.
    pub fn puts(&self, s: &str) {
        for b in s.bytes() {
            self.putcon(b);
        }
    }

    /// Writes a byte as two uppercase hex digits.
    pub fn puthex8(&self, value: u8) {
        self.putcon(hex_digit(value >> 4));
        self.putcon(hex_digit(value & 0x0F));
    }

    /// Writes a word as four uppercase hex digits.
    pub fn puthex16(&self, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.puthex8(hi);
        self.puthex8(lo);
    }

    /// Writes a word in decimal, right-aligned in a five character field.
    pub fn putdec(&self, value: u16) {
        let mut buf = *b"    0";
        let mut i = buf.len();
        let mut w = value;
        while w != 0 {
            i -= 1;
            // w % 10 < 10
            #[allow(clippy::cast_possible_truncation)]
            let digit = (w % 10) as u8;
            buf[i] = b'0' + digit;
            w /= 10;
        }
        for b in buf {
            self.putcon(b);
        }
    }

    /// Returns `0xFF` if a key is waiting, `0x00` otherwise.
    pub fn chready(&self) -> u8 {
        if self.input.key_available() > 0 {
            0xFF
        } else {
            0x00
        }
    }

    /// Reads a key, waiting for one.
    pub fn getcon(&self) -> u8 {
        self.input.read_blocking()
    }

    /// Reads a key, waiting for one, and echoes it unmasked.
    pub fn getche(&self) -> u8 {
        let ch = self.getcon();
        self.putch(ch);
        ch
    }

    /// Reads a key if one is waiting, `0x00` otherwise.
    pub fn getcon_nb(&self) -> u8 {
        self.input.read_byte().unwrap_or(0x00)
    }

    /// The input device.
    pub const fn input(&self) -> &I {
        &self.input
    }

    /// The output device.
    pub const fn output(&self) -> &O {
        &self.output
    }
}

const fn hex_digit(nibble: u8) -> u8 {
    match nibble {
        0..=9 => b'0' + nibble,
        _ => b'A' + nibble - 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidcon_core::sync::SpinLock;
    use std::collections::VecDeque;

    struct Keys(SpinLock<VecDeque<u8>>);

    impl CharInput for Keys {
        fn key_available(&self) -> usize {
            self.0.lock().len()
        }

        fn read_byte(&self) -> Option<u8> {
            self.0.lock().pop_front()
        }
    }

    struct Screen(SpinLock<Vec<u8>>);

    impl CharOutput for Screen {
        fn write_byte(&self, byte: u8) {
            self.0.lock().push(byte);
        }
    }

    fn console(keys: &[u8]) -> Console<Keys, Screen> {
        let input = Keys(SpinLock::new(keys.iter().copied().collect()));
        Console::new(input, Screen(SpinLock::new(Vec::new())))
    }

    fn written(con: &Console<Keys, Screen>) -> Vec<u8> {
        con.output().0.lock().clone()
    }

    #[test]
    fn putcon_masks_eighth_bit() {
        let mut con = console(&[]);
        assert_eq!(con.mask8bit(), MASK_7BIT);
        con.putcon(0xC1);
        con.set_mask8bit(MASK_8BIT);
        con.putcon(0xC1);
        con.putch(0xFE);
        assert_eq!(written(&con), [0x41, 0xC1, 0xFE]);
    }

    #[test]
    fn hex_output() {
        let con = console(&[]);
        con.puthex8(0x0A);
        con.puts(" ");
        con.puthex16(0xBEEF);
        assert_eq!(written(&con), b"0A BEEF");
    }

    #[test]
    fn decimal_is_right_aligned() {
        for (value, text) in [
            (0, "    0"),
            (7, "    7"),
            (42, "   42"),
            (1234, " 1234"),
            (65535, "65535"),
        ] {
            let con = console(&[]);
            con.putdec(value);
            assert_eq!(written(&con), text.as_bytes(), "{value}");
        }
    }

    #[test]
    fn input_helpers() {
        let con = console(b"xy");
        assert_eq!(con.chready(), 0xFF);
        assert_eq!(con.getcon(), b'x');
        assert_eq!(con.getcon_nb(), b'y');
        assert_eq!(con.chready(), 0x00);
        assert_eq!(con.getcon_nb(), 0x00);
        assert!(written(&con).is_empty());
    }

    #[test]
    fn getche_echoes_unmasked() {
        let con = console(&[0xE1]);
        assert_eq!(con.getche(), 0xE1);
        assert_eq!(written(&con), [0xE1]);
    }

    #[test]
    fn works_over_trait_objects() {
        let keys = Keys(SpinLock::new(VecDeque::from([b'k'])));
        let screen = Screen(SpinLock::new(Vec::new()));
        let con: Console<&dyn CharInput, &dyn CharOutput> = Console::new(&keys, &screen);
        con.getche();
        con.puts("!");
        assert_eq!(*screen.0.lock(), b"k!");
    }
}
