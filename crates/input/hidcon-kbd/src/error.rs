//! Error types for the keyboard core.
//!
//! None of these stop keystroke processing: a bad report is dropped, a bad
//! table is rejected at configuration time, and a failed LED update is
//! logged and forgotten.

use core::fmt;

/// A raw input report could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// Fewer bytes than a boot keyboard report (8) were delivered.
    TooShort {
        /// Number of bytes received.
        len: usize,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => {
                write!(f, "keyboard report too short ({len} bytes, need 8)")
            }
        }
    }
}

impl core::error::Error for ReportError {}

/// A code table violates one of its structural invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A rule's `first` code is above its `last` code.
    EmptyRange {
        /// Index of the offending rule.
        rule: usize,
    },
    /// A lookup rule names a row that does not exist.
    LutIndexOutOfRange {
        /// Index of the offending rule.
        rule: usize,
        /// Row index the rule refers to.
        index: u8,
    },
    /// A lookup row is shorter than the key range that indexes it.
    RowTooShort {
        /// Index of the offending rule.
        rule: usize,
        /// Range width of the rule.
        needed: usize,
        /// Actual row length.
        len: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRange { rule } => write!(f, "rule {rule}: first code above last code"),
            Self::LutIndexOutOfRange { rule, index } => {
                write!(f, "rule {rule}: lookup row {index} does not exist")
            }
            Self::RowTooShort { rule, needed, len } => write!(
                f,
                "rule {rule}: lookup row has {len} entries, range needs {needed}"
            ),
        }
    }
}

impl core::error::Error for TableError {}

/// The keyboard configuration is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero steady-state repeat interval would emit on every tick.
    ZeroRepeatInterval,
    /// The selected code table is malformed.
    Table(TableError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRepeatInterval => f.write_str("repeat interval must be non-zero"),
            Self::Table(e) => write!(f, "invalid code table: {e}"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            Self::ZeroRepeatInterval => None,
        }
    }
}

impl From<TableError> for ConfigError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

/// Errors a USB host collaborator reports back to the keyboard core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The addressed device is not (or no longer) attached.
    NotBound,
    /// The device does not accept the request (e.g. no output report).
    Unsupported,
    /// The transfer failed on the bus.
    IoError,
    /// The transfer did not complete in time.
    Timeout,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBound => f.write_str("device not bound"),
            Self::Unsupported => f.write_str("request not supported by device"),
            Self::IoError => f.write_str("I/O error"),
            Self::Timeout => f.write_str("transfer timed out"),
        }
    }
}

impl core::error::Error for DriverError {}
