//! Typematic repeat for the most recently pressed character.

use crate::time::Millis;

/// Repeat state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatState {
    /// Nothing held that repeats.
    #[default]
    Idle,
    /// A character is armed and will fire at `deadline`.
    Armed {
        /// Character re-emitted on each firing.
        byte: u8,
        /// Time of the next firing.
        deadline: Millis,
    },
}

/// Arms, re-arms and cancels the single repeating character.
///
/// Only the last armed character repeats. Any new report cancels the
/// current repeat before its own keys are processed, so there is never
/// more than one character pending.
#[derive(Debug, Clone, Copy)]
pub struct RepeatScheduler {
    state: RepeatState,
    initial: Millis,
    interval: Millis,
}

impl RepeatScheduler {
    /// Creates an idle scheduler with the given delays.
    pub const fn new(initial: Millis, interval: Millis) -> Self {
        Self {
            state: RepeatState::Idle,
            initial,
            interval,
        }
    }

    /// Starts repeating `byte`; the first repeat fires after the initial delay.
    pub fn arm(&mut self, byte: u8, now: Millis) {
        self.state = RepeatState::Armed {
            byte,
            deadline: now + self.initial,
        };
    }

    /// Stops any pending repeat.
    pub fn cancel(&mut self) {
        self.state = RepeatState::Idle;
    }

    /// Returns the character to emit if the deadline has been reached.
    ///
    /// A firing schedules the next one one interval after `now`, so a late
    /// tick emits a single character rather than a burst.
    pub fn poll(&mut self, now: Millis) -> Option<u8> {
        let RepeatState::Armed { byte, deadline } = self.state else {
            return None;
        };
        if !now.has_reached(deadline) {
            return None;
        }
        self.state = RepeatState::Armed {
            byte,
            deadline: now + self.interval,
        };
        Some(byte)
    }

    /// Returns true while a character is armed.
    pub const fn is_armed(&self) -> bool {
        matches!(self.state, RepeatState::Armed { .. })
    }

    /// Current state.
    pub const fn state(&self) -> RepeatState {
        self.state
    }

    /// Time of the next firing, if armed.
    pub const fn deadline(&self) -> Option<Millis> {
        match self.state {
            RepeatState::Armed { deadline, .. } => Some(deadline),
            RepeatState::Idle => None,
        }
    }
}
