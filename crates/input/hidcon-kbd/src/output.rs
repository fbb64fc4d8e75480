//! Bounded queue of translated bytes waiting for the console.

use hidcon_core::ringbuf::RingBuf;

/// Default output buffer capacity.
pub const OUTPUT_CAPACITY: usize = 64;

/// Order in which buffered bytes are handed to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainOrder {
    /// Oldest byte first: keystrokes arrive in the order they were typed.
    #[default]
    Fifo,
    /// Newest byte first. Reorders fast typing; only for software that was
    /// written against stack-ordered keyboard buffers.
    Lifo,
}

/// Fixed-capacity byte buffer between the translator and the console.
///
/// Writes beyond capacity are rejected; exactly `N` bytes fit.
#[derive(Clone, Copy)]
pub struct OutputBuffer<const N: usize = OUTPUT_CAPACITY> {
    bytes: RingBuf<u8, N>,
    order: DrainOrder,
}

impl<const N: usize> OutputBuffer<N> {
    /// Creates an empty buffer.
    pub const fn new(order: DrainOrder) -> Self {
        Self {
            bytes: RingBuf::new(),
            order,
        }
    }

    /// Queues a byte. Returns `false` (and drops the byte) when full.
    pub fn write(&mut self, byte: u8) -> bool {
        self.bytes.try_push(byte).is_ok()
    }

    /// Number of bytes waiting.
    pub const fn available(&self) -> usize {
        self.bytes.len()
    }

    /// Takes the next byte according to the drain order.
    pub fn read(&mut self) -> Option<u8> {
        match self.order {
            DrainOrder::Fifo => self.bytes.pop(),
            DrainOrder::Lifo => self.bytes.pop_back(),
        }
    }

    /// Maximum number of buffered bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The configured drain order.
    pub const fn order(&self) -> DrainOrder {
        self.order
    }

    /// Discards all buffered bytes.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl<const N: usize> Default for OutputBuffer<N> {
    fn default() -> Self {
        Self::new(DrainOrder::Fifo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_plus_one_write_fails() {
        let mut buf = OutputBuffer::<OUTPUT_CAPACITY>::default();
        for i in 0..OUTPUT_CAPACITY {
            assert!(buf.write(i as u8), "write {i} should fit");
        }
        assert!(!buf.write(0xEE));
        assert_eq!(buf.available(), OUTPUT_CAPACITY);
        assert_eq!(buf.capacity(), 64);
    }

    #[test]
    fn drain_then_refill_to_capacity() {
        let mut buf = OutputBuffer::<8>::new(DrainOrder::Fifo);
        for i in 0..9u8 {
            buf.write(i);
        }
        let drained: Vec<u8> = core::iter::from_fn(|| buf.read()).collect();
        assert_eq!(drained, [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(buf.available(), 0);
        assert_eq!(buf.read(), None);
        for i in 0..8u8 {
            assert!(buf.write(i + 100));
        }
        assert!(!buf.write(0));
    }

    #[test]
    fn lifo_returns_newest_first() {
        let mut buf = OutputBuffer::<4>::new(DrainOrder::Lifo);
        assert_eq!(buf.order(), DrainOrder::Lifo);
        buf.write(b'a');
        buf.write(b'b');
        buf.write(b'c');
        assert_eq!(buf.read(), Some(b'c'));
        assert_eq!(buf.read(), Some(b'b'));
        buf.write(b'd');
        assert_eq!(buf.read(), Some(b'd'));
        assert_eq!(buf.read(), Some(b'a'));
        assert_eq!(buf.read(), None);
    }

    #[test]
    fn clear_empties() {
        let mut buf = OutputBuffer::<4>::default();
        buf.write(1);
        buf.clear();
        assert_eq!(buf.available(), 0);
    }
}
