//! Boot keyboard reports and edge detection between successive reports.

use crate::config::Layout;
use crate::error::ReportError;
use crate::keycode;

/// Number of key slots in a boot keyboard report.
pub const KEY_SLOTS: usize = 6;

/// Length of a boot keyboard input report.
pub const REPORT_LEN: usize = 8;

/// One decoded input report: modifier bits plus up to six pressed keys.
///
/// The report's reserved byte is not kept; lock state is tracked by the
/// session alongside the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Modifier bitmask (bit 0..3 left Ctrl/Shift/Alt/GUI, bit 4..7 right).
    pub modifiers: u8,
    /// Usage codes of pressed keys; 0 marks an empty slot.
    pub keys: [u8; KEY_SLOTS],
}

impl InputSnapshot {
    /// An all-released report.
    pub const EMPTY: Self = Self {
        modifiers: 0,
        keys: [0; KEY_SLOTS],
    };

    /// Builds a snapshot from a modifier byte and a key list (extra keys are
    /// ignored, missing slots are empty).
    pub fn new(modifiers: u8, keys: &[u8]) -> Self {
        let mut slots = [0; KEY_SLOTS];
        for (slot, &key) in slots.iter_mut().zip(keys) {
            *slot = key;
        }
        Self {
            modifiers,
            keys: slots,
        }
    }

    /// Decodes an 8-byte boot report (`modifiers, reserved, key0..key5`).
    ///
    /// Bytes past the eighth are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TooShort`] for fewer than eight bytes.
    pub fn parse(raw: &[u8]) -> Result<Self, ReportError> {
        if raw.len() < REPORT_LEN {
            return Err(ReportError::TooShort { len: raw.len() });
        }
        let mut keys = [0; KEY_SLOTS];
        keys.copy_from_slice(&raw[2..REPORT_LEN]);
        Ok(Self {
            modifiers: raw[0],
            keys,
        })
    }

    /// Returns true if `key` occupies any slot.
    pub fn contains(&self, key: u8) -> bool {
        self.keys.contains(&key)
    }

    /// Returns true if the device flagged phantom-state rollover.
    pub fn is_rollover(&self) -> bool {
        self.keys[0] == keycode::ERROR_ROLLOVER && self.keys[1] == keycode::ERROR_ROLLOVER
    }
}

/// Modifier bits of the boot report.
pub mod modifier {
    /// Left Control.
    pub const LEFT_CTRL: u8 = 1 << 0;
    /// Left Shift.
    pub const LEFT_SHIFT: u8 = 1 << 1;
    /// Left Alt.
    pub const LEFT_ALT: u8 = 1 << 2;
    /// Left GUI.
    pub const LEFT_GUI: u8 = 1 << 3;
    /// Right Control.
    pub const RIGHT_CTRL: u8 = 1 << 4;
    /// Right Shift.
    pub const RIGHT_SHIFT: u8 = 1 << 5;
    /// Right Alt (AltGr).
    pub const RIGHT_ALT: u8 = 1 << 6;
    /// Right GUI.
    pub const RIGHT_GUI: u8 = 1 << 7;
}

/// Held modifiers with left and right variants merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Either Shift key.
    pub shift: bool,
    /// Either Control key.
    pub ctrl: bool,
    /// Either Alt key.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Decodes the report modifier byte. GUI keys are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            shift: bits & (modifier::LEFT_SHIFT | modifier::RIGHT_SHIFT) != 0,
            ctrl: bits & (modifier::LEFT_CTRL | modifier::RIGHT_CTRL) != 0,
            alt: bits & (modifier::LEFT_ALT | modifier::RIGHT_ALT) != 0,
        }
    }
}

/// Application-side Caps Lock / Num Lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockState {
    /// Caps Lock on.
    pub caps: bool,
    /// Num Lock on.
    pub num: bool,
}

/// Newly pressed keys of one report, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressedKeys {
    keys: [u8; KEY_SLOTS],
    len: usize,
}

impl PressedKeys {
    fn push(&mut self, key: u8) {
        // At most one entry per slot, so this never overflows.
        self.keys[self.len] = key;
        self.len += 1;
    }

    /// The keys as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.keys[..self.len]
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing new was pressed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Result of comparing a report with the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOutcome {
    /// The device reported rollover; the report carries no key information.
    Rollover,
    /// A usable report.
    Keys {
        /// Held modifiers.
        modifiers: Modifiers,
        /// Lock state after applying any lock keys in this report.
        locks: LockState,
        /// Newly pressed keys other than consumed lock keys.
        pressed: PressedKeys,
    },
}

/// Classifies the keys of `current` against `previous`.
///
/// Lock keys among the newly pressed keys toggle `locks` and are not
/// returned. With [`Layout::Jis`], Caps Lock toggles only while Shift is
/// held; a bare Caps Lock press is passed on like any other key.
pub fn diff(
    current: &InputSnapshot,
    previous: &InputSnapshot,
    locks: LockState,
    layout: Layout,
) -> DiffOutcome {
    if current.is_rollover() {
        return DiffOutcome::Rollover;
    }

    let modifiers = Modifiers::from_bits(current.modifiers);
    let mut locks = locks;
    let mut pressed = PressedKeys::default();

    for &key in &current.keys {
        if key == 0 || previous.contains(key) {
            continue;
        }
        match key {
            keycode::NUM_LOCK => locks.num = !locks.num,
            keycode::CAPS_LOCK if layout.caps_needs_shift() && !modifiers.shift => {
                pressed.push(key);
            }
            keycode::CAPS_LOCK => locks.caps = !locks.caps,
            _ => pressed.push(key),
        }
    }

    DiffOutcome::Keys {
        modifiers,
        locks,
        pressed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode as key;

    fn keys_of(outcome: DiffOutcome) -> (Modifiers, LockState, Vec<u8>) {
        match outcome {
            DiffOutcome::Keys {
                modifiers,
                locks,
                pressed,
            } => (modifiers, locks, pressed.as_slice().to_vec()),
            DiffOutcome::Rollover => panic!("unexpected rollover"),
        }
    }

    #[test]
    fn parse_boot_report() {
        let snap = InputSnapshot::parse(&[0x02, 0xAA, key::A, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(snap.modifiers, 0x02);
        assert_eq!(snap.keys, [key::A, 0, 0, 0, 0, 0]);
        assert_eq!(
            InputSnapshot::parse(&[0; 5]),
            Err(ReportError::TooShort { len: 5 })
        );
        // Trailing bytes are ignored.
        assert!(InputSnapshot::parse(&[0; 9]).is_ok());
    }

    #[test]
    fn modifiers_merge_left_and_right() {
        assert_eq!(Modifiers::from_bits(0), Modifiers::NONE);
        for bits in [modifier::LEFT_SHIFT, modifier::RIGHT_SHIFT] {
            assert!(Modifiers::from_bits(bits).shift);
        }
        for bits in [modifier::LEFT_CTRL, modifier::RIGHT_CTRL] {
            let m = Modifiers::from_bits(bits);
            assert!(m.ctrl && !m.shift && !m.alt);
        }
        for bits in [modifier::LEFT_ALT, modifier::RIGHT_ALT] {
            assert!(Modifiers::from_bits(bits).alt);
        }
        assert_eq!(
            Modifiers::from_bits(modifier::LEFT_GUI | modifier::RIGHT_GUI),
            Modifiers::NONE
        );
    }

    #[test]
    fn newly_pressed_is_set_difference() {
        let prev = InputSnapshot::new(0, &[key::A, key::Z]);
        let cur = InputSnapshot::new(0, &[key::Z, key::DIGIT_1, key::A, key::ENTER]);
        let (_, _, pressed) = keys_of(diff(&cur, &prev, LockState::default(), Layout::Us));
        assert_eq!(pressed, [key::DIGIT_1, key::ENTER]);
    }

    #[test]
    fn release_only_report_has_no_presses() {
        let prev = InputSnapshot::new(0, &[key::A]);
        let (_, _, pressed) = keys_of(diff(
            &InputSnapshot::EMPTY,
            &prev,
            LockState::default(),
            Layout::Us,
        ));
        assert!(pressed.is_empty());
    }

    #[test]
    fn held_key_is_not_pressed_again() {
        let prev = InputSnapshot::new(0, &[key::A]);
        let cur = InputSnapshot::new(modifier::LEFT_SHIFT, &[key::A]);
        let (mods, _, pressed) = keys_of(diff(&cur, &prev, LockState::default(), Layout::Us));
        assert!(mods.shift);
        assert!(pressed.is_empty());
    }

    #[test]
    fn lock_keys_toggle_and_are_consumed() {
        let cur = InputSnapshot::new(0, &[key::CAPS_LOCK, key::NUM_LOCK, key::A]);
        let (_, locks, pressed) = keys_of(diff(
            &cur,
            &InputSnapshot::EMPTY,
            LockState::default(),
            Layout::Us,
        ));
        assert_eq!(locks, LockState { caps: true, num: true });
        assert_eq!(pressed, [key::A]);

        // Pressing again toggles back.
        let (_, locks, _) = keys_of(diff(
            &InputSnapshot::new(0, &[key::CAPS_LOCK]),
            &InputSnapshot::EMPTY,
            locks,
            Layout::Us,
        ));
        assert_eq!(locks, LockState { caps: false, num: true });
    }

    #[test]
    fn held_lock_key_does_not_toggle_twice() {
        let held = InputSnapshot::new(0, &[key::CAPS_LOCK]);
        let locks = LockState { caps: true, num: false };
        let (_, after, _) = keys_of(diff(&held, &held, locks, Layout::Us));
        assert_eq!(after, locks);
    }

    #[test]
    fn jis_caps_lock_requires_shift() {
        let bare = InputSnapshot::new(0, &[key::CAPS_LOCK]);
        let (_, locks, pressed) = keys_of(diff(
            &bare,
            &InputSnapshot::EMPTY,
            LockState::default(),
            Layout::Jis,
        ));
        assert!(!locks.caps);
        assert_eq!(pressed, [key::CAPS_LOCK]);

        let shifted = InputSnapshot::new(modifier::RIGHT_SHIFT, &[key::CAPS_LOCK]);
        let (_, locks, pressed) = keys_of(diff(
            &shifted,
            &InputSnapshot::EMPTY,
            LockState::default(),
            Layout::Jis,
        ));
        assert!(locks.caps);
        assert!(pressed.is_empty());
    }

    #[test]
    fn rollover_is_detected() {
        let cur = InputSnapshot::new(0, &[key::ERROR_ROLLOVER; KEY_SLOTS]);
        assert!(cur.is_rollover());
        assert_eq!(
            diff(&cur, &InputSnapshot::EMPTY, LockState::default(), Layout::Us),
            DiffOutcome::Rollover
        );
        // A single ErrorRollOver slot is not the rollover marker.
        assert!(!InputSnapshot::new(0, &[key::ERROR_ROLLOVER, key::A]).is_rollover());
    }
}
