//! Key-range to character code tables.
//!
//! A [`CodeTable`] is an ordered list of [`KeyRange`] rules plus the lookup
//! rows they may index. Order matters: the translator takes the first rule
//! whose range contains the key and whose required modifiers are held, so
//! a shifted variant of a range must come before the plain one.

use crate::error::TableError;
use crate::keycode as key;

bitflags::bitflags! {
    /// Per-rule behaviour and modifier requirements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleFlags: u8 {
        /// Letter key: Shift XOR Caps Lock flips the case.
        const ALPHABETIC = 1 << 0;
        /// Rule only applies while Shift is held.
        const SHIFT      = 1 << 1;
        /// Rule only applies while Num Lock is on.
        const NUMLOCK    = 1 << 2;
        /// Rule only applies while Ctrl is held.
        const CTRL       = 1 << 3;
        /// `value` is a lookup row index instead of a base character.
        const LUT        = 1 << 4;
    }
}

/// Lookup row entry meaning "this key produces nothing under this rule".
pub const NO_CHAR: u8 = 0xFF;

/// One rule: an inclusive range of usage codes mapped to characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange {
    /// First usage code covered.
    pub first: u8,
    /// Last usage code covered (inclusive).
    pub last: u8,
    /// Base character, or lookup row index when [`RuleFlags::LUT`] is set.
    pub value: u8,
    /// Behaviour and requirements.
    pub flags: RuleFlags,
}

impl KeyRange {
    /// Creates a rule.
    pub const fn new(first: u8, last: u8, value: u8, flags: RuleFlags) -> Self {
        Self {
            first,
            last,
            value,
            flags,
        }
    }

    /// Returns true if `code` lies within the range.
    pub const fn contains(&self, code: u8) -> bool {
        code >= self.first && code <= self.last
    }

    /// Number of codes covered.
    pub const fn width(&self) -> usize {
        (self.last as usize + 1).saturating_sub(self.first as usize)
    }
}

/// An ordered rule list with its lookup rows.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable<'a> {
    name: &'a str,
    rules: &'a [KeyRange],
    rows: &'a [&'a [u8]],
}

impl<'a> CodeTable<'a> {
    /// Creates a table. Call [`CodeTable::validate`] before use if the rules
    /// were not written by hand.
    pub const fn new(name: &'a str, rules: &'a [KeyRange], rows: &'a [&'a [u8]]) -> Self {
        Self { name, rules, rows }
    }

    /// Table name, for logging.
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// The rules in evaluation order.
    pub const fn rules(&self) -> &'a [KeyRange] {
        self.rules
    }

    /// Returns lookup row `index`, if present.
    pub fn row(&self, index: u8) -> Option<&'a [u8]> {
        self.rows.get(usize::from(index)).copied()
    }

    /// Checks that every range is non-empty and every lookup row exists and
    /// covers the full width of each rule that references it.
    ///
    /// # Errors
    ///
    /// Returns the first [`TableError`] found, in rule order.
    pub fn validate(&self) -> Result<(), TableError> {
        for (rule, range) in self.rules.iter().enumerate() {
            if range.first > range.last {
                return Err(TableError::EmptyRange { rule });
            }
            if !range.flags.contains(RuleFlags::LUT) {
                continue;
            }
            let row = self.row(range.value).ok_or(TableError::LutIndexOutOfRange {
                rule,
                index: range.value,
            })?;
            if row.len() < range.width() {
                return Err(TableError::RowTooShort {
                    rule,
                    needed: range.width(),
                    len: row.len(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Built-in US tables
// ---------------------------------------------------------------------------

const SHIFT_LUT: RuleFlags = RuleFlags::SHIFT.union(RuleFlags::LUT);
const NUMLOCK_LUT: RuleFlags = RuleFlags::NUMLOCK.union(RuleFlags::LUT);

/// Row 0: shifted top-row digits 1..9 (0 has its own rule).
const ROW_SHIFTED_DIGITS: &[u8] = b"!@#$%^&*()";
/// Row 1: Enter through Slash, unshifted.
const ROW_SYMBOLS: &[u8] = b"\r\x1b\x08\t -=[]\\#;'`,./";
/// Row 2: Enter through Slash, shifted.
const ROW_SHIFTED_SYMBOLS: &[u8] = b"\n\x1b\x7f\t _+{}|~:\"~<>?";
/// Row 3: arrows in usage order Right, Left, Down, Up.
const ROW_ARROWS: &[u8] = b"\x1c\x1d\x1f\x1e";
/// Row 4: keypad with Num Lock.
const ROW_KEYPAD_NUM: &[u8] = b"/*-+\n1234567890.";
/// Row 5: keypad without Num Lock; navigation keys reuse the arrow codes.
const ROW_KEYPAD_NAV: &[u8] = &[
    b'/', b'*', b'-', b'+', b'\n', // operators, Enter
    NO_CHAR, 0x1f, NO_CHAR, // End, Down, PgDn
    0x1d, NO_CHAR, 0x1c, // Left, (5), Right
    NO_CHAR, 0x1e, NO_CHAR, // Home, Up, PgUp
    NO_CHAR, 0x7f, // Ins, Del
];

const US_ROWS: &[&[u8]] = &[
    ROW_SHIFTED_DIGITS,
    ROW_SYMBOLS,
    ROW_SHIFTED_SYMBOLS,
    ROW_ARROWS,
    ROW_KEYPAD_NUM,
    ROW_KEYPAD_NAV,
];

const US_RULES: &[KeyRange] = &[
    KeyRange::new(key::A, key::Z, b'a', RuleFlags::ALPHABETIC),
    KeyRange::new(key::DIGIT_1, key::DIGIT_9, 0, SHIFT_LUT),
    KeyRange::new(key::DIGIT_1, key::DIGIT_9, b'1', RuleFlags::empty()),
    KeyRange::new(key::DIGIT_0, key::DIGIT_0, b')', RuleFlags::SHIFT),
    KeyRange::new(key::DIGIT_0, key::DIGIT_0, b'0', RuleFlags::empty()),
    KeyRange::new(key::ENTER, key::ENTER, b'\n', RuleFlags::CTRL),
    KeyRange::new(key::ENTER, key::SLASH, 2, SHIFT_LUT),
    KeyRange::new(key::ENTER, key::SLASH, 1, RuleFlags::LUT),
];

const US_EXTENDED_RULES: &[KeyRange] = &[
    US_RULES[0],
    US_RULES[1],
    US_RULES[2],
    US_RULES[3],
    US_RULES[4],
    US_RULES[5],
    US_RULES[6],
    US_RULES[7],
    KeyRange::new(key::ARROW_RIGHT, key::ARROW_UP, 3, RuleFlags::LUT),
    KeyRange::new(key::KEYPAD_DIVIDE, key::KEYPAD_DECIMAL, 4, NUMLOCK_LUT),
    KeyRange::new(key::KEYPAD_DIVIDE, key::KEYPAD_DECIMAL, 5, RuleFlags::LUT),
];

impl CodeTable<'static> {
    /// US layout: letters, digits, and the Enter..Slash symbol block.
    pub const US: Self = Self::new("us", US_RULES, US_ROWS);

    /// US layout plus arrow keys and the numeric keypad.
    pub const US_EXTENDED: Self = Self::new("us-extended", US_EXTENDED_RULES, US_ROWS);
}
