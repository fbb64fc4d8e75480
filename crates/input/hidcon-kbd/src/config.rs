//! Keyboard configuration.
//!
//! All choices are fixed when the driver is constructed. The compile-time
//! default ([`KeyboardConfig::DEFAULT`]) follows the crate features:
//! `layout-jis` selects [`Layout::Jis`] and `extended-keys` selects
//! [`CodeTable::US_EXTENDED`].

use crate::error::ConfigError;
use crate::output::DrainOrder;
use crate::table::CodeTable;
use crate::time::Millis;

/// Delay before a held key starts repeating (Linux default).
pub const INITIAL_REPEAT: Millis = Millis(500);

/// Steady-state repeat interval (20 per second, Linux default).
pub const REPEAT_INTERVAL: Millis = Millis(50);

/// Physical keyboard layout variant that affects lock-key handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Caps Lock toggles on every press.
    #[default]
    Us,
    /// Caps Lock toggles only with Shift held (JIS Eisu key).
    Jis,
}

impl Layout {
    /// Returns true if Caps Lock must be combined with Shift to toggle.
    pub const fn caps_needs_shift(self) -> bool {
        matches!(self, Self::Jis)
    }
}

/// Driver configuration.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardConfig {
    /// Lock-key behaviour.
    pub layout: Layout,
    /// Key to character rules.
    pub table: &'static CodeTable<'static>,
    /// Delay from the first press to the first repeat.
    pub initial_repeat: Millis,
    /// Delay between subsequent repeats.
    pub repeat_interval: Millis,
    /// Order in which the consumer receives buffered bytes.
    pub drain_order: DrainOrder,
}

impl KeyboardConfig {
    /// The compile-time default configuration.
    pub const DEFAULT: Self = Self {
        layout: if cfg!(feature = "layout-jis") {
            Layout::Jis
        } else {
            Layout::Us
        },
        table: if cfg!(feature = "extended-keys") {
            &CodeTable::US_EXTENDED
        } else {
            &CodeTable::US
        },
        initial_repeat: INITIAL_REPEAT,
        repeat_interval: REPEAT_INTERVAL,
        drain_order: DrainOrder::Fifo,
    };

    /// Returns a copy with a different layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns a copy with a different code table.
    #[must_use]
    pub const fn with_table(mut self, table: &'static CodeTable<'static>) -> Self {
        self.table = table;
        self
    }

    /// Returns a copy with different repeat timing.
    #[must_use]
    pub const fn with_repeat(mut self, initial: Millis, interval: Millis) -> Self {
        self.initial_repeat = initial;
        self.repeat_interval = interval;
        self
    }

    /// Returns a copy with a different drain order.
    #[must_use]
    pub const fn with_drain_order(mut self, order: DrainOrder) -> Self {
        self.drain_order = order;
        self
    }

    /// Checks the repeat timing and the code table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repeat_interval == Millis::ZERO {
            return Err(ConfigError::ZeroRepeatInterval);
        }
        self.table.validate()?;
        Ok(())
    }

    /// Logs the configuration at info level.
    pub fn log(&self) {
        hidcon_core::kinfo!(
            "kbd: layout={:?} table={} repeat={}/{} drain={:?}",
            self.layout,
            self.table.name(),
            self.initial_repeat,
            self.repeat_interval,
            self.drain_order
        );
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::table::{KeyRange, RuleFlags};

    #[test]
    fn default_is_valid() {
        let config = KeyboardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.initial_repeat, Millis(500));
        assert_eq!(config.repeat_interval, Millis(50));
        assert_eq!(config.drain_order, DrainOrder::Fifo);
    }

    #[cfg(not(feature = "layout-jis"))]
    #[test]
    fn default_layout_is_us() {
        assert_eq!(KeyboardConfig::DEFAULT.layout, Layout::Us);
        assert!(!Layout::Us.caps_needs_shift());
        assert!(Layout::Jis.caps_needs_shift());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = KeyboardConfig::DEFAULT.with_repeat(Millis(500), Millis::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroRepeatInterval));
    }

    #[test]
    fn bad_table_is_rejected() {
        static RULES: [KeyRange; 1] = [KeyRange::new(4, 5, 9, RuleFlags::LUT)];
        static BROKEN: CodeTable<'static> = CodeTable::new("broken", &RULES, &[]);
        let config = KeyboardConfig::DEFAULT.with_table(&BROKEN);
        assert_eq!(
            config.validate(),
            Err(ConfigError::Table(TableError::LutIndexOutOfRange {
                rule: 0,
                index: 9
            }))
        );
    }

    #[test]
    fn builders_replace_fields() {
        let config = KeyboardConfig::DEFAULT
            .with_layout(Layout::Jis)
            .with_table(&CodeTable::US_EXTENDED)
            .with_drain_order(DrainOrder::Lifo);
        assert_eq!(config.layout, Layout::Jis);
        assert_eq!(config.table.name(), "us-extended");
        assert_eq!(config.drain_order, DrainOrder::Lifo);
    }
}
