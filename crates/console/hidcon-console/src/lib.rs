//! Console side of the hidcon input stack.
//!
//! [`console::Console`] provides the character routines a CP/M style
//! monitor calls (masked output, hex and decimal printing, polled and
//! blocking reads with optional echo) over any [`CharInput`] and
//! [`CharOutput`]. [`display::DisplayAdapter`] renders console output on a
//! character-cell display with a block cursor, and [`grid::TextGrid`] is
//! an in-memory display for tests and host tools.
//!
//! [`CharInput`]: hidcon_core::chardev::CharInput
//! [`CharOutput`]: hidcon_core::chardev::CharOutput

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod console;
pub mod display;
pub mod grid;

pub use console::Console;
pub use display::{DisplayAdapter, SharedDisplay, TextSurface};
pub use grid::TextGrid;
