//! Character device capabilities.
//!
//! The console layer talks to whichever input and output peripherals are
//! active through these traits, chosen once at startup: a USB keyboard or a
//! UART on the input side, a text display or a UART on the output side.
//! Methods take `&self` so implementors can live in `static` items and be
//! shared between the timer interrupt and the console loop.

/// A byte source (keyboard, serial receiver).
pub trait CharInput {
    /// Returns the number of bytes that can be read without blocking.
    fn key_available(&self) -> usize;

    /// Reads one byte if one is available.
    fn read_byte(&self) -> Option<u8>;

    /// Reads one byte, spinning until one arrives.
    ///
    /// Never call this from the context that produces the input (the
    /// timer interrupt), or it will spin forever.
    fn read_blocking(&self) -> u8 {
        loop {
            if let Some(byte) = self.read_byte() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }
}

/// A byte sink (display, serial transmitter).
pub trait CharOutput {
    /// Writes one byte.
    fn write_byte(&self, byte: u8);
}

impl<T: CharInput + ?Sized> CharInput for &T {
    fn key_available(&self) -> usize {
        (**self).key_available()
    }

    fn read_byte(&self) -> Option<u8> {
        (**self).read_byte()
    }
}

impl<T: CharOutput + ?Sized> CharOutput for &T {
    fn write_byte(&self, byte: u8) {
        (**self).write_byte(byte);
    }
}
