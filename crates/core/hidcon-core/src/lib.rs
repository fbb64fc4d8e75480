//! Ambient support code for the hidcon input stack.
//!
//! Everything here is `no_std`, allocation-free and usable from interrupt
//! context: leveled logging macros that route through registrable function
//! pointers, spin locks (with an interrupt-masking variant for state shared
//! with a timer interrupt), a fixed-capacity ring buffer, and the character
//! device traits that connect producers to the console.
//!
//! The crate builds against `std` under `cfg(test)` so the primitives can be
//! exercised with plain `cargo test` on the host.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod chardev;
pub mod log;
pub mod ringbuf;
pub mod sync;
