//! Interrupt-safe spin lock.
//!
//! Masks interrupts before acquiring the inner spinlock and restores the
//! previous interrupt state on release. Needed for anything shared between
//! the USB/repeat timer interrupt and the console loop: if the loop held a
//! plain spin lock when the timer fired on the same core, the handler would
//! spin forever.

use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

/// A spin lock that masks interrupts while held.
pub struct IrqSpinLock<T> {
    locked: AtomicBool,
    name: &'static str,
    data: UnsafeCell<T>,
}

// SAFETY: as for SpinLock, the atomic flag ensures exclusive access.
unsafe impl<T: Send> Send for IrqSpinLock<T> {}
unsafe impl<T: Send> Sync for IrqSpinLock<T> {}

impl<T> IrqSpinLock<T> {
    /// Creates a new unlocked `IrqSpinLock`.
    pub const fn new(value: T) -> Self {
        Self::named("<unnamed>", value)
    }

    /// Creates a new unlocked `IrqSpinLock` with a diagnostic name.
    pub const fn named(name: &'static str, value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            name,
            data: UnsafeCell::new(value),
        }
    }

    /// Returns the diagnostic name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Acquires the lock, masking interrupts first.
    pub fn lock(&self) -> IrqSpinLockGuard<'_, T> {
        let saved = save_and_mask();

        // TTAS spin to acquire.
        loop {
            if self
                .locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return IrqSpinLockGuard {
                    lock: self,
                    saved,
                    _not_send: PhantomData,
                };
            }
            while self.locked.load(Ordering::Relaxed) {
                core::hint::spin_loop();
            }
        }
    }

    /// Attempts to acquire the lock without blocking.
    pub fn try_lock(&self) -> Option<IrqSpinLockGuard<'_, T>> {
        let saved = save_and_mask();
        if self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(IrqSpinLockGuard {
                lock: self,
                saved,
                _not_send: PhantomData,
            })
        } else {
            // Failed, restore the interrupt state.
            restore(saved);
            None
        }
    }
}

/// RAII guard that restores interrupt state on drop.
///
/// Not `Send`: the saved interrupt state belongs to the core that took it.
pub struct IrqSpinLockGuard<'a, T> {
    lock: &'a IrqSpinLock<T>,
    saved: u32,
    _not_send: PhantomData<*const ()>,
}

impl<T> Deref for IrqSpinLockGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        // SAFETY: The lock is held, so we have exclusive access to the data.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for IrqSpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: The lock is held, so we have exclusive access to the data.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for IrqSpinLockGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
        restore(self.saved);
    }
}

/// Reads PRIMASK and masks interrupts (Cortex-M).
#[cfg(all(target_os = "none", target_arch = "arm"))]
#[inline]
fn save_and_mask() -> u32 {
    let primask: u32;
    // SAFETY: Reading PRIMASK and setting it is always permitted in
    // privileged thread or handler mode.
    unsafe {
        core::arch::asm!(
            "mrs {}, PRIMASK",
            "cpsid i",
            out(reg) primask,
            options(nomem, nostack, preserves_flags),
        );
    }
    primask
}

/// Unmasks interrupts if they were enabled when the lock was taken.
#[cfg(all(target_os = "none", target_arch = "arm"))]
#[inline]
fn restore(primask: u32) {
    // PRIMASK bit 0 set means interrupts were already masked.
    if primask & 1 == 0 {
        // SAFETY: Re-enabling interrupts restores a previous state.
        unsafe {
            core::arch::asm!("cpsie i", options(nomem, nostack, preserves_flags));
        }
    }
}

#[cfg(not(all(target_os = "none", target_arch = "arm")))]
#[inline]
fn save_and_mask() -> u32 {
    0
}

#[cfg(not(all(target_os = "none", target_arch = "arm")))]
#[inline]
fn restore(_saved: u32) {}
