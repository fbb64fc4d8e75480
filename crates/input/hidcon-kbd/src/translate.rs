//! Key code to character translation.

use crate::report::{LockState, Modifiers};
use crate::table::{CodeTable, NO_CHAR, RuleFlags};

/// ASCII upper/lower case differ only in this bit.
const CASE_BIT: u8 = b'a' ^ b'A';

/// Ctrl maps a character onto the C0 control range.
const CTRL_MASK: u8 = 0x1F;

/// Alt sets the high bit (meta).
const META_BIT: u8 = 0x80;

/// Translates one newly pressed key.
///
/// Returns `None` for keys with no applicable rule (modifiers, function
/// keys) and for lookup entries marked [`NO_CHAR`].
pub fn translate(
    table: &CodeTable<'_>,
    key: u8,
    modifiers: Modifiers,
    locks: LockState,
) -> Option<u8> {
    let rule = table.rules().iter().find(|rule| {
        rule.contains(key)
            && (!rule.flags.contains(RuleFlags::SHIFT) || modifiers.shift)
            && (!rule.flags.contains(RuleFlags::NUMLOCK) || locks.num)
            && (!rule.flags.contains(RuleFlags::CTRL) || modifiers.ctrl)
    })?;

    let offset = key - rule.first;
    let mut code = if rule.flags.contains(RuleFlags::LUT) {
        let byte = *table.row(rule.value)?.get(usize::from(offset))?;
        if byte == NO_CHAR {
            return None;
        }
        byte
    } else {
        rule.value.wrapping_add(offset)
    };

    if rule.flags.contains(RuleFlags::ALPHABETIC) && (modifiers.shift ^ locks.caps) {
        code ^= CASE_BIT;
    }
    if modifiers.ctrl {
        code &= CTRL_MASK;
    }
    if modifiers.alt {
        code |= META_BIT;
    }
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode as key;
    use crate::table::KeyRange;

    const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };
    const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
    const ALT: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: true,
    };
    const CAPS: LockState = LockState {
        caps: true,
        num: false,
    };
    const NUM: LockState = LockState {
        caps: false,
        num: true,
    };
    const UNLOCKED: LockState = LockState {
        caps: false,
        num: false,
    };

    fn us(key: u8, m: Modifiers, l: LockState) -> Option<u8> {
        translate(&CodeTable::US, key, m, l)
    }

    fn ext(key: u8, m: Modifiers, l: LockState) -> Option<u8> {
        translate(&CodeTable::US_EXTENDED, key, m, l)
    }

    #[test]
    fn letter_a_plain_shift_ctrl() {
        assert_eq!(us(key::A, Modifiers::NONE, UNLOCKED), Some(0x61));
        assert_eq!(us(key::A, SHIFT, UNLOCKED), Some(0x41));
        assert_eq!(us(key::A, CTRL, UNLOCKED), Some(0x01));
        assert_eq!(us(key::Z, Modifiers::NONE, UNLOCKED), Some(b'z'));
    }

    #[test]
    fn shift_xor_caps_flips_case() {
        assert_eq!(us(key::A, Modifiers::NONE, CAPS), Some(b'A'));
        assert_eq!(us(key::A, SHIFT, CAPS), Some(b'a'));
        for code in key::A..=key::Z {
            let plain = us(code, Modifiers::NONE, UNLOCKED).unwrap();
            let both = us(code, SHIFT, CAPS).unwrap();
            assert_eq!(plain, both);
            assert_eq!(us(code, SHIFT, UNLOCKED), Some(plain ^ CASE_BIT));
            assert_eq!(us(code, Modifiers::NONE, CAPS), Some(plain ^ CASE_BIT));
        }
    }

    #[test]
    fn caps_does_not_shift_digits() {
        assert_eq!(us(key::DIGIT_1, Modifiers::NONE, CAPS), Some(b'1'));
    }

    #[test]
    fn digits_plain_and_shifted() {
        assert_eq!(us(key::DIGIT_1, Modifiers::NONE, UNLOCKED), Some(0x31));
        assert_eq!(us(key::DIGIT_1, SHIFT, UNLOCKED), Some(0x21));
        assert_eq!(us(key::DIGIT_9, Modifiers::NONE, UNLOCKED), Some(b'9'));
        assert_eq!(us(key::DIGIT_9, SHIFT, UNLOCKED), Some(b'('));
        assert_eq!(us(key::DIGIT_0, Modifiers::NONE, UNLOCKED), Some(b'0'));
        assert_eq!(us(key::DIGIT_0, SHIFT, UNLOCKED), Some(b')'));
    }

    #[test]
    fn enter_prefers_ctrl_rule() {
        assert_eq!(us(key::ENTER, CTRL, UNLOCKED), Some(0x0A));
        assert_eq!(us(key::ENTER, Modifiers::NONE, UNLOCKED), Some(0x0D));
        assert_eq!(us(key::ENTER, SHIFT, UNLOCKED), Some(b'\n'));
    }

    #[test]
    fn symbol_block() {
        let cases = [
            (key::ESCAPE, 0x1b, 0x1b),
            (key::BACKSPACE, 0x08, 0x7f),
            (key::TAB, b'\t', b'\t'),
            (key::SPACE, b' ', b' '),
            (key::MINUS, b'-', b'_'),
            (key::EQUAL, b'=', b'+'),
            (key::BRACKET_LEFT, b'[', b'{'),
            (key::BRACKET_RIGHT, b']', b'}'),
            (key::BACKSLASH, b'\\', b'|'),
            (key::EUROPE_1, b'#', b'~'),
            (key::SEMICOLON, b';', b':'),
            (key::APOSTROPHE, b'\'', b'"'),
            (key::GRAVE, b'`', b'~'),
            (key::COMMA, b',', b'<'),
            (key::PERIOD, b'.', b'>'),
            (key::SLASH, b'/', b'?'),
        ];
        for (code, plain, shifted) in cases {
            assert_eq!(us(code, Modifiers::NONE, UNLOCKED), Some(plain), "{code:#x}");
            assert_eq!(us(code, SHIFT, UNLOCKED), Some(shifted), "{code:#x}");
        }
    }

    #[test]
    fn unmapped_keys_produce_nothing() {
        assert_eq!(us(key::F1, Modifiers::NONE, UNLOCKED), None);
        assert_eq!(us(key::ARROW_UP, Modifiers::NONE, UNLOCKED), None);
        assert_eq!(us(key::CAPS_LOCK, SHIFT, UNLOCKED), None);
        assert_eq!(us(0xE0, Modifiers::NONE, UNLOCKED), None);
    }

    #[test]
    fn alt_sets_high_bit() {
        assert_eq!(us(key::A, ALT, UNLOCKED), Some(b'a' | 0x80));
        let ctrl_alt = Modifiers {
            shift: false,
            ctrl: true,
            alt: true,
        };
        assert_eq!(us(key::A, ctrl_alt, UNLOCKED), Some(0x81));
    }

    #[test]
    fn ctrl_mask_is_idempotent() {
        // Tab and Escape are already control codes.
        assert_eq!(us(key::TAB, CTRL, UNLOCKED), Some(b'\t'));
        assert_eq!(us(key::ESCAPE, CTRL, UNLOCKED), Some(0x1b));
        for code in key::A..=key::SLASH {
            if let Some(byte) = us(code, CTRL, UNLOCKED) {
                assert!(byte < 0x20);
                assert_eq!(byte & CTRL_MASK, byte);
            }
        }
    }

    #[test]
    fn translation_is_deterministic() {
        let modifier_sets = [Modifiers::NONE, SHIFT, CTRL, ALT];
        let lock_sets = [UNLOCKED, CAPS, NUM];
        for rule in CodeTable::US_EXTENDED.rules() {
            for code in rule.first..=rule.last {
                for m in modifier_sets {
                    for l in lock_sets {
                        assert_eq!(ext(code, m, l), ext(code, m, l));
                    }
                }
            }
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        // The letter range is declared twice and a digit rule overlaps the
        // second copy; the earliest rule must always decide.
        static RULES: [KeyRange; 3] = [
            KeyRange::new(key::A, key::DIGIT_0, b'a', RuleFlags::ALPHABETIC),
            KeyRange::new(key::A, key::DIGIT_0, b'A', RuleFlags::empty()),
            KeyRange::new(key::DIGIT_1, key::DIGIT_0, b'1', RuleFlags::empty()),
        ];
        let table = CodeTable::new("dup", &RULES, &[]);
        assert_eq!(translate(&table, key::A, Modifiers::NONE, UNLOCKED), Some(b'a'));
        assert_eq!(
            translate(&table, key::DIGIT_1, Modifiers::NONE, UNLOCKED),
            Some(b'a' + (key::DIGIT_1 - key::A))
        );
    }

    #[test]
    fn unsatisfied_requirement_falls_through() {
        static RULES: [KeyRange; 2] = [
            KeyRange::new(key::A, key::A, b'X', RuleFlags::CTRL),
            KeyRange::new(key::A, key::A, b'y', RuleFlags::empty()),
        ];
        let table = CodeTable::new("fallthrough", &RULES, &[]);
        assert_eq!(translate(&table, key::A, Modifiers::NONE, UNLOCKED), Some(b'y'));
        assert_eq!(translate(&table, key::A, CTRL, UNLOCKED), Some(b'X' & CTRL_MASK));
    }

    #[test]
    fn arrows_in_extended_table() {
        assert_eq!(ext(key::ARROW_RIGHT, Modifiers::NONE, UNLOCKED), Some(0x1c));
        assert_eq!(ext(key::ARROW_LEFT, Modifiers::NONE, UNLOCKED), Some(0x1d));
        assert_eq!(ext(key::ARROW_DOWN, Modifiers::NONE, UNLOCKED), Some(0x1f));
        assert_eq!(ext(key::ARROW_UP, Modifiers::NONE, UNLOCKED), Some(0x1e));
    }

    #[test]
    fn keypad_follows_num_lock() {
        assert_eq!(ext(key::KEYPAD_1, Modifiers::NONE, NUM), Some(b'1'));
        assert_eq!(ext(key::KEYPAD_0, Modifiers::NONE, NUM), Some(b'0'));
        assert_eq!(ext(key::KEYPAD_DECIMAL, Modifiers::NONE, NUM), Some(b'.'));
        assert_eq!(ext(key::KEYPAD_ENTER, Modifiers::NONE, UNLOCKED), Some(b'\n'));
        assert_eq!(ext(key::KEYPAD_DIVIDE, Modifiers::NONE, UNLOCKED), Some(b'/'));
        // Without Num Lock, End has no character while Down maps to the arrow code.
        assert_eq!(ext(key::KEYPAD_1, Modifiers::NONE, UNLOCKED), None);
        assert_eq!(ext(key::KEYPAD_1 + 1, Modifiers::NONE, UNLOCKED), Some(0x1f));
        assert_eq!(ext(key::KEYPAD_DECIMAL, Modifiers::NONE, UNLOCKED), Some(0x7f));
    }
}
