//! USB boot keyboard driver session.
//!
//! [`KeyboardDriver`] ties the pieces together. The USB host transport
//! calls [`on_mount`](KeyboardDriver::on_mount),
//! [`on_unmount`](KeyboardDriver::on_unmount) and
//! [`on_report`](KeyboardDriver::on_report) from its callbacks, and the
//! periodic timer calls [`tick`](KeyboardDriver::tick). The console loop
//! reads translated bytes through [`CharInput`].
//!
//! Two [`IrqSpinLock`]s guard the mutable state: the session (snapshot,
//! locks, repeat, LEDs, binding) and the output buffer. The timer side
//! takes them in that order; the console side only ever takes the output
//! lock. LED transfers happen after the session lock is released.

use core::fmt;

use hidcon_core::chardev::CharInput;
use hidcon_core::sync::IrqSpinLock;

use crate::config::KeyboardConfig;
use crate::error::{ConfigError, ReportError};
use crate::led::{self, HidHost, LedReport, LedSync};
use crate::output::OutputBuffer;
use crate::repeat::RepeatScheduler;
use crate::report::{DiffOutcome, InputSnapshot, LockState, diff};
use crate::time::Millis;
use crate::translate::translate;

/// Identifies one HID interface on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle {
    /// USB device address.
    pub address: u8,
    /// HID interface instance on that device.
    pub instance: u8,
}

impl DeviceHandle {
    /// Creates a handle.
    pub const fn new(address: u8, instance: u8) -> Self {
        Self { address, instance }
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.instance)
    }
}

/// HID interface protocol announced at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceProtocol {
    /// Not a boot device.
    None,
    /// Boot keyboard.
    Keyboard,
    /// Boot mouse.
    Mouse,
}

/// Per-device state, reset on every mount and unmount.
struct Session {
    device: Option<DeviceHandle>,
    previous: InputSnapshot,
    locks: LockState,
    repeat: RepeatScheduler,
    leds: LedSync,
}

impl Session {
    const fn new(config: &KeyboardConfig) -> Self {
        Self {
            device: None,
            previous: InputSnapshot::EMPTY,
            locks: LockState {
                caps: false,
                num: false,
            },
            repeat: RepeatScheduler::new(config.initial_repeat, config.repeat_interval),
            leds: LedSync::new(),
        }
    }
}

/// A USB boot keyboard feeding a character console.
pub struct KeyboardDriver<H> {
    config: KeyboardConfig,
    host: H,
    session: IrqSpinLock<Session>,
    output: IrqSpinLock<OutputBuffer>,
}

impl<H: HidHost> KeyboardDriver<H> {
    /// Creates a driver after validating `config`, and logs the
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`KeyboardConfig::validate`].
    pub fn new(config: KeyboardConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        config.log();
        Ok(Self::new_unvalidated(config, host))
    }

    /// Creates a driver in a `const` context, e.g. for a `static`.
    ///
    /// The configuration is not checked; call
    /// [`KeyboardConfig::validate`] and [`KeyboardConfig::log`] during
    /// startup.
    pub const fn new_unvalidated(config: KeyboardConfig, host: H) -> Self {
        Self {
            session: IrqSpinLock::named("KBD_SESSION", Session::new(&config)),
            output: IrqSpinLock::named("KBD_OUTPUT", OutputBuffer::new(config.drain_order)),
            config,
            host,
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// The host collaborator.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// A HID interface was attached.
    ///
    /// Binds it if it is a boot keyboard and no keyboard is bound yet.
    pub fn on_mount(&self, device: DeviceHandle, protocol: InterfaceProtocol) {
        if protocol != InterfaceProtocol::Keyboard {
            hidcon_core::kdebug!("kbd: ignoring {:?} interface {}", protocol, device);
            return;
        }
        let mut session = self.session.lock();
        if let Some(bound) = session.device {
            hidcon_core::kinfo!("kbd: keyboard {} ignored, {} already bound", device, bound);
            return;
        }
        *session = Session::new(&self.config);
        session.device = Some(device);
        hidcon_core::kinfo!("kbd: keyboard {} mounted", device);
    }

    /// A HID interface was detached.
    ///
    /// Unbinding the keyboard resets all session state. Bytes already in
    /// the output buffer stay readable.
    pub fn on_unmount(&self, device: DeviceHandle) {
        let mut session = self.session.lock();
        if session.device != Some(device) {
            return;
        }
        *session = Session::new(&self.config);
        hidcon_core::kinfo!("kbd: keyboard {} unmounted", device);
    }

    /// Processes one input report from `device`, received at `now`.
    ///
    /// Reports from any device other than the bound keyboard are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the report is malformed. It is dropped
    /// without touching the session.
    pub fn on_report(
        &self,
        device: DeviceHandle,
        raw: &[u8],
        now: Millis,
    ) -> Result<(), ReportError> {
        let mut session = self.session.lock();
        if session.device != Some(device) {
            return Ok(());
        }
        let snapshot = InputSnapshot::parse(raw).inspect_err(|e| {
            hidcon_core::kdebug!("kbd: dropping report from {}: {}", device, e);
        })?;

        session.repeat.cancel();

        let (modifiers, locks, pressed) =
            match diff(&snapshot, &session.previous, session.locks, self.config.layout) {
                DiffOutcome::Rollover => {
                    hidcon_core::ktrace!("kbd: rollover from {}", device);
                    return Ok(());
                }
                DiffOutcome::Keys {
                    modifiers,
                    locks,
                    pressed,
                } => (modifiers, locks, pressed),
            };

        let mut last = None;
        for &key in pressed.as_slice() {
            if let Some(byte) = translate(self.config.table, key, modifiers, locks) {
                self.emit(byte);
                last = Some(byte);
            }
        }
        if let Some(byte) = last {
            session.repeat.arm(byte, now);
        }

        session.locks = locks;
        session.leds.update(locks);
        session.previous = snapshot;
        Ok(())
    }

    /// Periodic work: fires a due key repeat and sends a pending LED report.
    pub fn tick(&self, now: Millis) {
        let pending = {
            let mut session = self.session.lock();
            if let Some(byte) = session.repeat.poll(now) {
                self.emit(byte);
            }
            match session.device {
                Some(device) => session.leds.take_pending().map(|report| (device, report)),
                None => None,
            }
        };
        if let Some((device, report)) = pending {
            led::send(&self.host, device, report);
        }
    }

    /// The bound keyboard, if any.
    pub fn bound_device(&self) -> Option<DeviceHandle> {
        self.session.lock().device
    }

    /// Current lock state.
    pub fn locks(&self) -> LockState {
        self.session.lock().locks
    }

    /// The LED report most recently handed to the host.
    pub fn leds_sent(&self) -> LedReport {
        self.session.lock().leds.sent()
    }

    /// Returns true while a key repeat is armed.
    pub fn is_repeating(&self) -> bool {
        self.session.lock().repeat.is_armed()
    }

    fn emit(&self, byte: u8) {
        if !self.output.lock().write(byte) {
            hidcon_core::kdebug!("kbd: output full, dropped {:#04x}", byte);
        }
    }
}

impl<H: HidHost> CharInput for KeyboardDriver<H> {
    fn key_available(&self) -> usize {
        self.output.lock().available()
    }

    fn read_byte(&self) -> Option<u8> {
        self.output.lock().read()
    }
}
