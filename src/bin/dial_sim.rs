//! Host simulator for the dial path.
//!
//! Synthesizes the edge timing of a rotary dial (60 ms open / 40 ms closed
//! per pulse) for a given number, drives a [`DialSensor`] on a virtual
//! monotonic clock, and prints what the decoder makes of it. No hardware,
//! no sleeping; the whole call runs instantly.

use anyhow::{bail, Result};
use clap::Parser;

use fetap_core::config::DialConfig;
use fetap_core::sensor::DialSensor;
use fetap_core::signal::{EdgeObserver, Level, Tickable};

/// Contact-open phase of one pulse, in microseconds.
const PULSE_OPEN_US: i64 = 60_000;
/// Contact-closed phase of one pulse, in microseconds.
const PULSE_CLOSED_US: i64 = 40_000;

#[derive(Parser, Debug)]
#[command(
    name = "dial-sim",
    about = "Replay a dialed number through the rotary pulse decoder"
)]
struct Args {
    /// Digits to dial (e.g. 042)
    number: String,

    /// Inter-digit timeout in milliseconds
    #[arg(long, default_value_t = 200)]
    timeout_ms: u32,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = 10)]
    tick_ms: u32,

    /// GPIO number handed to the config (validation only)
    #[arg(long, default_value_t = 4)]
    pin: u8,

    /// Print the drained diagnostic events at the end
    #[arg(long)]
    verbose: bool,
}

/// One scheduled level transition of the virtual dial line.
struct ScheduledEdge {
    at_us: i64,
    level: Level,
}

/// Lay out the edge schedule for the whole number.
fn build_schedule(digits: &[u8], timeout_us: i64) -> Vec<ScheduledEdge> {
    // The pause between digits must outlast the inter-digit timeout (so
    // each train finalizes) but stay short of twice the timeout (so the
    // number is not published mid-dial). Zero timeout gets a nominal pause.
    let digit_gap_us = if timeout_us > 0 {
        timeout_us + timeout_us / 2
    } else {
        300_000
    };

    let mut edges = Vec::new();
    let mut t = 0i64;

    for &digit in digits {
        let pulses = if digit == 0 { 10 } else { i64::from(digit) };
        for _ in 0..pulses {
            edges.push(ScheduledEdge {
                at_us: t,
                level: Level::Low,
            });
            edges.push(ScheduledEdge {
                at_us: t + PULSE_OPEN_US,
                level: Level::High,
            });
            t += PULSE_OPEN_US + PULSE_CLOSED_US;
        }
        t += digit_gap_us;
    }

    edges
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut digits = Vec::new();
    for c in args.number.chars() {
        match c.to_digit(10) {
            Some(d) => digits.push(d as u8),
            None => bail!("'{c}' is not a dialable digit"),
        }
    }
    if digits.is_empty() {
        bail!("nothing to dial");
    }

    let config = DialConfig::new(args.pin, args.timeout_ms);
    let mut sensor = DialSensor::new(config)?;

    let timeout_us = config.timeout_us();
    let tick_us = i64::from(args.tick_ms.max(1)) * 1000;
    let edges = build_schedule(&digits, timeout_us);

    // Run past the last edge far enough for finalization and publish.
    let end_us = edges.last().map_or(0, |e| e.at_us) + 2 * timeout_us + 2 * tick_us;

    let mut next_edge = 0;
    let mut now_us = 0i64;
    while now_us <= end_us {
        while next_edge < edges.len() && edges[next_edge].at_us <= now_us {
            let edge = &edges[next_edge];
            sensor.on_edge(edge.level, edge.at_us);
            next_edge += 1;
        }

        sensor.tick(now_us);

        if let Some(number) = sensor.take_number() {
            println!("[{:>9} us] dialed number: {}", now_us, number.as_str());
        }

        now_us += tick_us;
    }

    let stats = sensor.stats().snapshot();
    println!(
        "pulses: {}  digits: {}  numbers: {}  bounced: {}  spurious: {}",
        stats.pulses_counted,
        stats.digits_decoded,
        stats.numbers_published,
        stats.edges_bounced,
        stats.spurious_trains
    );

    if args.verbose {
        while let Some(event) = sensor.events().drain() {
            println!("[{:>9} us] {:?}", event.timestamp_us, event.kind);
        }
        let dropped = sensor.events().dropped();
        if dropped > 0 {
            println!("({dropped} events dropped)");
        }
    }

    Ok(())
}
