//! Command-line interface definitions for hidcon-replay.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use hidcon_core::log::LogLevel;

/// Replay a USB keyboard report trace through the hidcon driver.
#[derive(Parser)]
#[command(name = "hidcon-replay", version, about)]
pub struct Cli {
    /// Trace file to replay.
    pub trace: PathBuf,

    /// Keyboard configuration file (TOML).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Virtual clock step in milliseconds.
    #[arg(long, default_value_t = 1)]
    pub tick_ms: u32,

    /// Milliseconds to keep running after the last event.
    #[arg(long, default_value_t = 0)]
    pub tail_ms: u32,

    /// Render the output on a text screen of this size instead of
    /// printing escaped bytes.
    #[arg(long, value_name = "COLSxROWS")]
    pub render: Option<ScreenSize>,

    /// Most verbose log level printed to stderr.
    #[arg(long, default_value = "info", value_parser = hidcon_replay::logger::parse_level)]
    pub log_level: LogLevel,
}

/// Screen dimensions given as `COLSxROWS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    /// Columns.
    pub cols: u16,
    /// Rows.
    pub rows: u16,
}

impl FromStr for ScreenSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cols, rows) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected COLSxROWS, got `{s}`"))?;
        let parse = |v: &str| {
            v.parse::<u16>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| format!("invalid screen dimension `{v}`"))
        };
        Ok(Self {
            cols: parse(cols)?,
            rows: parse(rows)?,
        })
    }
}
