//! Host-side replay of USB keyboard traces.
//!
//! Pipeline: parse trace → build driver from config → step a virtual clock,
//! delivering events and ticks → drain the console → print escaped bytes
//! or a rendered screen.

pub mod config;
pub mod escape;
pub mod logger;
pub mod replay;
pub mod trace;
