//! hidcon-replay: feed a recorded keyboard trace through the driver.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use hidcon_kbd::Millis;
use hidcon_replay::config::ReplayConfig;
use hidcon_replay::replay::{self, Options};
use hidcon_replay::{escape, logger, trace};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logger::init(cli.log_level);

    let config = match &cli.config {
        Some(path) => ReplayConfig::load(path)?,
        None => ReplayConfig::default(),
    };
    let text = std::fs::read_to_string(&cli.trace)
        .with_context(|| format!("reading {}", cli.trace.display()))?;
    let events = trace::parse(&text).with_context(|| format!("parsing {}", cli.trace.display()))?;

    let options = Options {
        tick: Millis(cli.tick_ms),
        tail: Millis(cli.tail_ms),
    };
    let transcript = replay::run(config.keyboard_config(), &events, options)?;
    hidcon_core::kinfo!(
        "replay: {} events, {} bytes, {} led reports",
        events.len(),
        transcript.bytes.len(),
        transcript.leds.len()
    );

    match cli.render {
        Some(size) => println!("{}", replay::render(&transcript.bytes, size.cols, size.rows)),
        None => println!("{}", escape::escape(&transcript.bytes)),
    }
    Ok(())
}
