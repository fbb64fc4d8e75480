//! Replay configuration file (`TOML`).
//!
//! ```toml
//! layout = "jis"
//! extended_keys = true
//! initial_repeat_ms = 400
//! repeat_interval_ms = 33
//! drain = "fifo"
//! ```
//!
//! Every key is optional; omitted keys take the driver defaults.

use std::path::Path;

use anyhow::{Context, Result};
use hidcon_kbd::output::DrainOrder;
use hidcon_kbd::table::CodeTable;
use hidcon_kbd::{KeyboardConfig, Layout, Millis};
use serde::Deserialize;

/// Keyboard layout names accepted in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutName {
    /// US layout.
    #[default]
    Us,
    /// JIS layout.
    Jis,
}

/// Drain order names accepted in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrainName {
    /// Oldest byte first.
    #[default]
    Fifo,
    /// Newest byte first.
    Lifo,
}

/// Contents of a replay configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ReplayConfig {
    /// Lock key behaviour.
    pub layout: LayoutName,
    /// Use the code table with arrow keys and the keypad.
    pub extended_keys: bool,
    /// Delay before the first repeat.
    pub initial_repeat_ms: u32,
    /// Delay between repeats.
    pub repeat_interval_ms: u32,
    /// Output buffer drain order.
    pub drain: DrainName,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        let base = KeyboardConfig::DEFAULT;
        Self {
            layout: LayoutName::Us,
            extended_keys: false,
            initial_repeat_ms: base.initial_repeat.get(),
            repeat_interval_ms: base.repeat_interval.get(),
            drain: DrainName::Fifo,
        }
    }
}

impl ReplayConfig {
    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unknown keys or bad values.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the driver configuration.
    pub fn keyboard_config(&self) -> KeyboardConfig {
        let layout = match self.layout {
            LayoutName::Us => Layout::Us,
            LayoutName::Jis => Layout::Jis,
        };
        let table: &'static CodeTable<'static> = if self.extended_keys {
            &CodeTable::US_EXTENDED
        } else {
            &CodeTable::US
        };
        let drain = match self.drain {
            DrainName::Fifo => DrainOrder::Fifo,
            DrainName::Lifo => DrainOrder::Lifo,
        };
        KeyboardConfig::DEFAULT
            .with_layout(layout)
            .with_table(table)
            .with_repeat(
                Millis(self.initial_repeat_ms),
                Millis(self.repeat_interval_ms),
            )
            .with_drain_order(drain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = ReplayConfig::from_toml("").unwrap();
        assert_eq!(config, ReplayConfig::default());
        assert_eq!(config.initial_repeat_ms, 500);
        assert_eq!(config.repeat_interval_ms, 50);
    }

    #[test]
    fn all_keys() {
        let config = ReplayConfig::from_toml(
            "layout = \"jis\"\nextended_keys = true\ninitial_repeat_ms = 250\nrepeat_interval_ms = 20\ndrain = \"lifo\"\n",
        )
        .unwrap();
        let kbd = config.keyboard_config();
        assert_eq!(kbd.layout, Layout::Jis);
        assert_eq!(kbd.table.name(), "us-extended");
        assert_eq!(kbd.initial_repeat, Millis(250));
        assert_eq!(kbd.repeat_interval, Millis(20));
        assert_eq!(kbd.drain_order, DrainOrder::Lifo);
    }

    #[test]
    fn rejects_unknown_key_and_value() {
        assert!(ReplayConfig::from_toml("capacity = 128").is_err());
        assert!(ReplayConfig::from_toml("layout = \"dvorak\"").is_err());
    }
}
