//! Synchronization primitives.
//!
//! Provides [`SpinLock`] for state touched only from thread context and
//! [`IrqSpinLock`] for state shared with the keyboard timer interrupt. Both
//! are const-constructable for `static` items.

mod irq_spinlock;
mod spinlock;

pub use irq_spinlock::{IrqSpinLock, IrqSpinLockGuard};
pub use spinlock::{SpinLock, SpinLockGuard};
