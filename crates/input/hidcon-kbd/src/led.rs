//! Keyboard LED output report tracking.

use crate::driver::DeviceHandle;
use crate::error::DriverError;
use crate::report::LockState;

/// HID LED output report (bit 0 Num Lock, bit 1 Caps Lock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedReport(pub u8);

impl LedReport {
    /// Num Lock LED bit.
    pub const NUM_LOCK: u8 = 1 << 0;
    /// Caps Lock LED bit.
    pub const CAPS_LOCK: u8 = 1 << 1;

    /// Packs the lock state.
    pub const fn from_locks(locks: LockState) -> Self {
        Self((locks.num as u8) | ((locks.caps as u8) << 1))
    }

    /// Raw report byte.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// The USB host side the driver sends output reports through.
pub trait HidHost {
    /// Sends the LED output report to `device`.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] if the transfer could not be queued or
    /// failed. The driver does not retry.
    fn set_leds(&self, device: DeviceHandle, report: LedReport) -> Result<(), DriverError>;
}

impl<T: HidHost + ?Sized> HidHost for &T {
    fn set_leds(&self, device: DeviceHandle, report: LedReport) -> Result<(), DriverError> {
        (**self).set_leds(device, report)
    }
}

/// Last LED report sent and whether the lock state has moved on since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedSync {
    sent: LedReport,
    pending: LedReport,
    dirty: bool,
}

impl LedSync {
    /// Nothing sent, all LEDs off.
    pub const fn new() -> Self {
        Self {
            sent: LedReport(0),
            pending: LedReport(0),
            dirty: false,
        }
    }

    /// Records the current lock state. Marks the LEDs dirty if it differs
    /// from the last report sent, clean otherwise.
    pub fn update(&mut self, locks: LockState) {
        self.pending = LedReport::from_locks(locks);
        self.dirty = self.pending != self.sent;
    }

    /// Returns the report to send if one is due, and marks it sent.
    ///
    /// The caller performs the transfer; this split lets the session lock
    /// be released before talking to the host.
    pub fn take_pending(&mut self) -> Option<LedReport> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.sent = self.pending;
        Some(self.pending)
    }

    /// Sends the pending report, if any, to `device`.
    ///
    /// Delivery is best effort: the report counts as sent whether or not
    /// the host accepted it.
    pub fn flush<H: HidHost + ?Sized>(&mut self, host: &H, device: DeviceHandle) {
        if let Some(report) = self.take_pending() {
            send(host, device, report);
        }
    }

    /// Forgets everything (device detached).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns true if a report is waiting to be sent.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The last report handed to the host.
    pub const fn sent(&self) -> LedReport {
        self.sent
    }
}

/// Sends one report and logs a failure.
pub(crate) fn send<H: HidHost + ?Sized>(host: &H, device: DeviceHandle, report: LedReport) {
    match host.set_leds(device, report) {
        Ok(()) => hidcon_core::ktrace!("kbd: leds {:#04x} -> {}", report.bits(), device),
        Err(e) => hidcon_core::kdebug!("kbd: led update to {} failed: {}", device, e),
    }
}
