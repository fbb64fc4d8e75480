//! Virtual-clock replay of a trace through the keyboard driver.

use anyhow::{Context, Result, ensure};
use hidcon_console::{Console, SharedDisplay, TextGrid};
use hidcon_core::chardev::CharOutput;
use hidcon_core::sync::SpinLock;
use hidcon_kbd::error::DriverError;
use hidcon_kbd::{
    DeviceHandle, HidHost, InterfaceProtocol, KeyboardConfig, KeyboardDriver, LedReport, Millis,
};

use crate::trace::{Event, EventKind};

/// The single keyboard every trace talks about.
pub const KEYBOARD: DeviceHandle = DeviceHandle::new(1, 0);

/// Clock settings for a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Virtual clock step.
    pub tick: Millis,
    /// How long to keep ticking after the last event.
    pub tail: Millis,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tick: Millis(1),
            tail: Millis(0),
        }
    }
}

/// What the console and the keyboard saw during a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Bytes the console read, in order.
    pub bytes: Vec<u8>,
    /// LED reports sent to the keyboard, with their send time.
    pub leds: Vec<(Millis, LedReport)>,
}

/// A host that accepts every LED report and remembers it.
struct RecordingHost {
    now: SpinLock<Millis>,
    leds: SpinLock<Vec<(Millis, LedReport)>>,
}

impl RecordingHost {
    const fn new() -> Self {
        Self {
            now: SpinLock::named("REPLAY_CLOCK", Millis::ZERO),
            leds: SpinLock::named("REPLAY_LEDS", Vec::new()),
        }
    }
}

impl HidHost for RecordingHost {
    fn set_leds(&self, device: DeviceHandle, report: LedReport) -> Result<(), DriverError> {
        let now = *self.now.lock();
        hidcon_core::kinfo!("host: {} leds {:#04x} at {}", device, report.bits(), now);
        self.leds.lock().push((now, report));
        Ok(())
    }
}

/// Collects console output.
struct ByteSink(SpinLock<Vec<u8>>);

impl CharOutput for ByteSink {
    fn write_byte(&self, byte: u8) {
        self.0.lock().push(byte);
    }
}

/// Replays `events` and returns everything the console read.
///
/// The clock starts at zero and advances by `options.tick`. At each step
/// every event due by then is delivered, the driver ticks, and the console
/// drains all available bytes. The replay ends at the last event plus
/// `options.tail`.
///
/// # Errors
///
/// Fails on a zero tick, an invalid configuration, or a clock overflow.
pub fn run(config: KeyboardConfig, events: &[Event], options: Options) -> Result<Transcript> {
    ensure!(options.tick.get() > 0, "tick must be at least 1 ms");
    let host = RecordingHost::new();
    let driver = KeyboardDriver::new(config, &host).context("invalid keyboard configuration")?;
    let sink = ByteSink(SpinLock::new(Vec::new()));
    let console = Console::new(&driver, &sink);

    let last = events.last().map_or(0, |e| e.at.get());
    let end = last
        .checked_add(options.tail.get())
        .context("trace end time overflows the millisecond clock")?;

    let mut pending = events.iter().peekable();
    let mut now = 0u32;
    loop {
        *host.now.lock() = Millis(now);
        while let Some(event) = pending.next_if(|e| e.at.get() <= now) {
            deliver(&driver, event)?;
        }
        driver.tick(Millis(now));
        while console.chready() != 0 {
            console.getche();
        }
        if now >= end {
            break;
        }
        now = now.saturating_add(options.tick.get()).min(end);
    }

    Ok(Transcript {
        bytes: sink.0.into_inner(),
        leds: host.leds.into_inner(),
    })
}

fn deliver<H: HidHost>(driver: &KeyboardDriver<H>, event: &Event) -> Result<()> {
    match event.kind {
        EventKind::Mount => driver.on_mount(KEYBOARD, InterfaceProtocol::Keyboard),
        EventKind::Unmount => driver.on_unmount(KEYBOARD),
        EventKind::Report(raw) => driver
            .on_report(KEYBOARD, &raw, event.at)
            .with_context(|| format!("report at {}", event.at))?,
    }
    Ok(())
}

/// Feeds console bytes through the display adapter onto a `cols` x `rows`
/// grid and returns the resulting screen.
pub fn render(bytes: &[u8], cols: u16, rows: u16) -> String {
    let display = SharedDisplay::new(TextGrid::new(cols, rows));
    for &b in bytes {
        display.write_byte(b);
    }
    display.with(|d| d.surface().to_text())
}
