//! Millisecond timestamps from a free-running 32-bit counter.

use core::fmt;
use core::ops::Add;

/// A point in time (or a duration) in milliseconds.
///
/// The underlying counter wraps after about 49.7 days. Comparisons between
/// two instants are made with wrapping subtraction, so they stay correct
/// across a wrap as long as the instants are less than `i32::MAX` ms apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Millis(pub u32);

impl Millis {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// Returns the raw counter value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns true once `self` is at or past `deadline`.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn has_reached(self, deadline: Self) -> bool {
        // Reinterpreting the wrapped difference as signed gives the sign
        // of the true distance for instants within i32::MAX of each other.
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }

    /// Milliseconds from `self` until `deadline`, or zero if it has passed.
    pub const fn until(self, deadline: Self) -> u32 {
        if self.has_reached(deadline) {
            0
        } else {
            deadline.0.wrapping_sub(self.0)
        }
    }
}

impl Add for Millis {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
