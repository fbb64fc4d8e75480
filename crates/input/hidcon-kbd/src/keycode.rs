//! HID keyboard usage IDs (usage page 0x07) used by the code tables.

/// Reported in every key slot when more keys are down than the device can
/// report.
pub const ERROR_ROLLOVER: u8 = 0x01;

/// A key.
pub const A: u8 = 0x04;
/// Z key.
pub const Z: u8 = 0x1D;
/// 1 key (top row).
pub const DIGIT_1: u8 = 0x1E;
/// 9 key (top row).
pub const DIGIT_9: u8 = 0x26;
/// 0 key (top row).
pub const DIGIT_0: u8 = 0x27;
/// Enter / Return.
pub const ENTER: u8 = 0x28;
/// Escape.
pub const ESCAPE: u8 = 0x29;
/// Backspace.
pub const BACKSPACE: u8 = 0x2A;
/// Tab.
pub const TAB: u8 = 0x2B;
/// Space bar.
pub const SPACE: u8 = 0x2C;
/// `-` / `_`.
pub const MINUS: u8 = 0x2D;
/// `=` / `+`.
pub const EQUAL: u8 = 0x2E;
/// `[` / `{`.
pub const BRACKET_LEFT: u8 = 0x2F;
/// `]` / `}`.
pub const BRACKET_RIGHT: u8 = 0x30;
/// `\` / `|`.
pub const BACKSLASH: u8 = 0x31;
/// Non-US `#` / `~`.
pub const EUROPE_1: u8 = 0x32;
/// `;` / `:`.
pub const SEMICOLON: u8 = 0x33;
/// `'` / `"`.
pub const APOSTROPHE: u8 = 0x34;
/// `` ` `` / `~`.
pub const GRAVE: u8 = 0x35;
/// `,` / `<`.
pub const COMMA: u8 = 0x36;
/// `.` / `>`.
pub const PERIOD: u8 = 0x37;
/// `/` / `?`.
pub const SLASH: u8 = 0x38;
/// Caps Lock.
pub const CAPS_LOCK: u8 = 0x39;
/// F1 (unmapped by the built-in tables).
pub const F1: u8 = 0x3A;
/// Right arrow.
pub const ARROW_RIGHT: u8 = 0x4F;
/// Left arrow.
pub const ARROW_LEFT: u8 = 0x50;
/// Down arrow.
pub const ARROW_DOWN: u8 = 0x51;
/// Up arrow.
pub const ARROW_UP: u8 = 0x52;
/// Num Lock.
pub const NUM_LOCK: u8 = 0x53;
/// Keypad `/`, first of the contiguous keypad block.
pub const KEYPAD_DIVIDE: u8 = 0x54;
/// Keypad Enter.
pub const KEYPAD_ENTER: u8 = 0x58;
/// Keypad 1 / End.
pub const KEYPAD_1: u8 = 0x59;
/// Keypad 0 / Insert.
pub const KEYPAD_0: u8 = 0x62;
/// Keypad `.` / Delete, last of the contiguous keypad block.
pub const KEYPAD_DECIMAL: u8 = 0x63;
