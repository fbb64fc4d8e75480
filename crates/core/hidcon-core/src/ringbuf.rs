//! Fixed-capacity circular buffer.
//!
//! [`RingBuf`] stores up to `N` elements inline (all `N` slots are usable;
//! the element count is tracked explicitly instead of sacrificing a slot).
//! Elements are normally removed front-first (FIFO) with [`RingBuf::pop`];
//! [`RingBuf::pop_back`] removes the newest element instead, which gives
//! stack (LIFO) order over the same storage.
//!
//! # Examples
//!
//! ```
//! use hidcon_core::ringbuf::RingBuf;
//!
//! let mut buf = RingBuf::<u8, 4>::new();
//! buf.push(1);
//! buf.push(2);
//! assert_eq!(buf.pop(), Some(1));
//! assert_eq!(buf.pop_back(), Some(2));
//! assert!(buf.is_empty());
//! ```

use core::mem::MaybeUninit;

/// A circular / ring buffer with a compile-time capacity of `N`.
#[derive(Clone, Copy)]
pub struct RingBuf<T: Copy, const N: usize> {
    buf: [MaybeUninit<T>; N],
    /// Index of the oldest element.
    tail: usize,
    /// Number of initialized elements starting at `tail`.
    len: usize,
}

impl<T: Copy, const N: usize> Default for RingBuf<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> RingBuf<T, N> {
    /// Number of elements the buffer can hold.
    pub const CAPACITY: usize = N;

    /// Creates an empty ring buffer. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(N > 0, "RingBuf capacity must be non-zero") };
        Self {
            buf: [const { MaybeUninit::uninit() }; N],
            tail: 0,
            len: 0,
        }
    }

    /// Returns true if the ring buffer holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of stored elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if another push would fail.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns the maximum number of elements.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index one past the newest element.
    const fn head(&self) -> usize {
        (self.tail + self.len) % N
    }

    /// Pushes an element at the back.
    ///
    /// # Errors
    /// Returns the value back if the buffer is full.
    pub fn try_push(&mut self, x: T) -> Result<(), T> {
        if self.is_full() {
            return Err(x);
        }
        let head = self.head();
        self.buf[head].write(x);
        self.len += 1;
        Ok(())
    }

    /// Pushes an element at the back.
    ///
    /// # Panics
    /// Panics if the buffer is full. See [`RingBuf::try_push`].
    pub fn push(&mut self, x: T) {
        assert!(self.try_push(x).is_ok(), "ringbuf is full");
    }

    /// Removes the oldest element.
    #[must_use]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: `tail` is within the `len` initialized slots.
        let x = unsafe { self.buf[self.tail].assume_init_read() };
        self.tail = (self.tail + 1) % N;
        self.len -= 1;
        Some(x)
    }

    /// Removes the newest element.
    #[must_use]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        let idx = self.head();
        // SAFETY: `idx` was the last of the initialized slots before `len`
        // was decremented.
        Some(unsafe { self.buf[idx].assume_init_read() })
    }

    /// Returns the oldest element without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: `tail` is within the initialized slots.
        Some(unsafe { self.buf[self.tail].assume_init_ref() })
    }

    /// Drops all elements. `T: Copy`, so nothing needs to run.
    pub fn clear(&mut self) {
        self.tail = 0;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let mut buf = RingBuf::<u8, 8>::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.pop(), None);
        assert_eq!(buf.pop_back(), None);
        assert_eq!(buf.peek(), None);
    }

    #[test]
    fn full_capacity_is_usable() {
        let mut buf = RingBuf::<u8, 4>::new();
        for i in 0..4 {
            assert!(buf.try_push(i).is_ok());
        }
        assert!(buf.is_full());
        assert_eq!(buf.try_push(9), Err(9));
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn push_pop_fifo_order() {
        let mut buf = RingBuf::<u8, 8>::new();
        buf.push(1);
        buf.push(2);
        buf.push(3);
        assert_eq!(buf.peek(), Some(&1));
        assert_eq!(buf.pop(), Some(1));
        assert_eq!(buf.pop(), Some(2));
        assert_eq!(buf.pop(), Some(3));
        assert_eq!(buf.pop(), None);
    }

    #[test]
    fn pop_back_lifo_order() {
        let mut buf = RingBuf::<u8, 8>::new();
        buf.push(1);
        buf.push(2);
        buf.push(3);
        assert_eq!(buf.pop_back(), Some(3));
        assert_eq!(buf.pop_back(), Some(2));
        buf.push(4);
        assert_eq!(buf.pop_back(), Some(4));
        assert_eq!(buf.pop_back(), Some(1));
        assert!(buf.is_empty());
    }

    #[test]
    fn wrap_around_multiple_times() {
        let mut buf = RingBuf::<u8, 3>::new();
        for round in 0u8..5 {
            buf.push(round * 3);
            buf.push(round * 3 + 1);
            assert_eq!(buf.pop(), Some(round * 3));
            buf.push(round * 3 + 2);
            assert_eq!(buf.pop(), Some(round * 3 + 1));
            assert_eq!(buf.pop(), Some(round * 3 + 2));
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn pop_back_across_wrap() {
        let mut buf = RingBuf::<u8, 3>::new();
        buf.push(1);
        buf.push(2);
        let _ = buf.pop();
        let _ = buf.pop();
        // tail is now 2; the next pushes wrap to index 0.
        buf.push(3);
        buf.push(4);
        assert_eq!(buf.pop_back(), Some(4));
        assert_eq!(buf.pop(), Some(3));
    }

    #[test]
    fn clear_resets() {
        let mut buf = RingBuf::<u8, 2>::new();
        buf.push(1);
        buf.push(2);
        buf.clear();
        assert!(buf.is_empty());
        buf.push(5);
        assert_eq!(buf.pop(), Some(5));
    }

    #[test]
    #[should_panic(expected = "ringbuf is full")]
    fn push_panics_when_full() {
        let mut buf = RingBuf::<u8, 2>::new();
        buf.push(1);
        buf.push(2);
        buf.push(3);
    }
}
