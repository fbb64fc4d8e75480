//! Report trace file parsing.
//!
//! One event per line, `#` starts a comment:
//!
//! ```text
//! 0     mount
//! 10    keys lshift 04        # Shift+A
//! 20    keys -                # all released
//! 30    report 01 00 04 00 00 00 00 00
//! 900   unmount
//! ```

use anyhow::{Context, Result, bail, ensure};
use hidcon_kbd::Millis;
use hidcon_kbd::report::{KEY_SLOTS, REPORT_LEN, modifier};

/// What happens at one point of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The keyboard is attached.
    Mount,
    /// The keyboard is detached.
    Unmount,
    /// A raw boot report arrives.
    Report([u8; REPORT_LEN]),
}

/// A timestamped trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Delivery time.
    pub at: Millis,
    /// The event.
    pub kind: EventKind,
}

/// Parses a whole trace. Timestamps must not decrease.
///
/// # Errors
///
/// Returns an error naming the first offending line.
pub fn parse(text: &str) -> Result<Vec<Event>> {
    let mut events: Vec<Event> = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let event = parse_line(line).with_context(|| format!("line {}: `{line}`", idx + 1))?;
        if let Some(prev) = events.last() {
            ensure!(
                event.at.get() >= prev.at.get(),
                "line {}: time {} is before previous event at {}",
                idx + 1,
                event.at,
                prev.at
            );
        }
        events.push(event);
    }
    Ok(events)
}

/// Parses one non-empty, comment-free line.
///
/// # Errors
///
/// Returns an error describing the malformed field.
pub fn parse_line(line: &str) -> Result<Event> {
    let mut words = line.split_whitespace();
    let stamp = words.next().context("missing timestamp")?;
    let at = stamp
        .parse::<u32>()
        .with_context(|| format!("invalid timestamp `{stamp}`"))?;
    let kind = match words.next().context("missing event name")? {
        "mount" => EventKind::Mount,
        "unmount" => EventKind::Unmount,
        "report" => EventKind::Report(parse_report(words)?),
        "keys" => EventKind::Report(parse_keys(words)?),
        other => bail!("unknown event `{other}`"),
    };
    Ok(Event {
        at: Millis(at),
        kind,
    })
}

fn parse_report<'a>(words: impl Iterator<Item = &'a str>) -> Result<[u8; REPORT_LEN]> {
    let hex: String = words.collect();
    ensure!(
        hex.is_ascii() && hex.len() == REPORT_LEN * 2,
        "report needs {REPORT_LEN} hex bytes, got `{hex}`"
    );
    let mut report = [0; REPORT_LEN];
    for (i, byte) in report.iter_mut().enumerate() {
        let pair = &hex[i * 2..i * 2 + 2];
        *byte =
            u8::from_str_radix(pair, 16).with_context(|| format!("invalid hex byte `{pair}`"))?;
    }
    Ok(report)
}

fn parse_keys<'a>(words: impl Iterator<Item = &'a str>) -> Result<[u8; REPORT_LEN]> {
    let mut words = words.peekable();
    let mut report = [0; REPORT_LEN];
    if let Some(mods) = words.peek().and_then(|w| parse_modifiers(w)) {
        report[0] = mods;
        words.next();
    }
    let mut slot = 0;
    for word in words {
        ensure!(slot < KEY_SLOTS, "at most {KEY_SLOTS} keys per report");
        let digits = word.trim_start_matches("0x");
        report[2 + slot] =
            u8::from_str_radix(digits, 16).with_context(|| format!("invalid key code `{word}`"))?;
        slot += 1;
    }
    Ok(report)
}

/// Parses `-` or a `+`-joined modifier list into report modifier bits.
fn parse_modifiers(word: &str) -> Option<u8> {
    if word == "-" {
        return Some(0);
    }
    word.split('+').try_fold(0, |bits, name| {
        let bit = match name {
            "lctrl" => modifier::LEFT_CTRL,
            "lshift" => modifier::LEFT_SHIFT,
            "lalt" => modifier::LEFT_ALT,
            "rctrl" => modifier::RIGHT_CTRL,
            "rshift" => modifier::RIGHT_SHIFT,
            "ralt" => modifier::RIGHT_ALT,
            _ => return None,
        };
        Some(bits | bit)
    })
}
