//! USB HID boot keyboard to console byte translation.
//!
//! Turns the 8-byte boot-protocol reports of a USB keyboard into the single
//! byte characters a CP/M style console reads, with Caps Lock / Num Lock
//! tracking, typematic repeat of the last pressed key, and keyboard LED
//! updates.
//!
//! The pipeline, leaf to root:
//!
//! - [`report`] decodes reports and finds newly pressed keys,
//! - [`translate`] maps a key to a byte through a [`table::CodeTable`],
//! - [`repeat`] re-emits the last byte while its key is held,
//! - [`output`] buffers bytes until the console reads them,
//! - [`led`] mirrors the lock state to the keyboard,
//! - [`driver`] owns the session and is the entry point for the USB
//!   transport, the timer and the console.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod config;
pub mod driver;
pub mod error;
pub mod keycode;
pub mod led;
pub mod output;
pub mod repeat;
pub mod report;
pub mod table;
pub mod time;
pub mod translate;

pub use config::{KeyboardConfig, Layout};
pub use driver::{DeviceHandle, InterfaceProtocol, KeyboardDriver};
pub use led::{HidHost, LedReport};
pub use time::Millis;
