//! Printable rendering of console bytes.

use std::fmt::Write;

/// Renders bytes as text: printable ASCII as is, backslash doubled,
/// C0 controls and DEL in caret notation (`^A`, `^?`), high bytes as
/// `\xNN`.
pub fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7E => out.push(char::from(b)),
            0x00..=0x1F => {
                out.push('^');
                out.push(char::from(b + 0x40));
            }
            0x7F => out.push_str("^?"),
            _ => {
                let _ = write!(out, "\\x{b:02X}");
            }
        }
    }
    out
}
