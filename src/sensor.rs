//! Dial sensor: the host-facing composition of the dial path.
//!
//! The host runtime reports pin transitions through [`EdgeObserver`] and
//! polls [`Tickable`] on a fixed schedule (non-reentrantly, from one
//! execution context). The sensor feeds decoder outcomes into the number
//! assembler, records diagnostics, and hands out complete numbers for
//! publishing. Capabilities are composed, not inherited: the sensor owns a
//! [`PulseDecoder`] and drives it through the same traits the host uses to
//! drive the sensor.

use heapless::String;

use crate::config::{ConfigError, DialConfig};
use crate::decoder::PulseDecoder;
use crate::diag::DialStats;
use crate::events::{DialEvent, EventKind, EventRing};
use crate::number::{NumberAssembler, MAX_NUMBER_DIGITS};
use crate::signal::{Digit, EdgeObserver, EdgeOutcome, Level, Tickable, TrainOutcome};

/// Capacity of the diagnostic event ring.
pub const EVENT_RING_CAPACITY: usize = 64;

/// A complete dialed number, ready for publishing.
pub type DialedNumber = String<MAX_NUMBER_DIGITS>;

/// Rotary dial sensor.
///
/// # Example
///
/// ```
/// use fetap_core::config::DialConfig;
/// use fetap_core::sensor::DialSensor;
/// use fetap_core::signal::{EdgeObserver, Level, Tickable};
///
/// let mut sensor = DialSensor::new(DialConfig::new(4, 200)).unwrap();
///
/// // Host loop: edges as the platform reports them, ticks on a schedule
/// sensor.on_edge(Level::Low, 0);
/// sensor.on_edge(Level::High, 60_000);
/// sensor.tick(300_000);
/// sensor.tick(600_000);
///
/// let number = sensor.take_number().unwrap();
/// assert_eq!(number.as_str(), "1");
/// ```
pub struct DialSensor {
    decoder: PulseDecoder,
    number: NumberAssembler,
    stats: DialStats,
    events: EventRing<EVENT_RING_CAPACITY>,

    // Number publish timing: same configured timeout, measured from the
    // last finalized digit instead of the last pulse
    timeout_us: i64,
    last_digit_us: i64,

    published: Option<DialedNumber>,
}

impl DialSensor {
    /// Build the sensor from a validated configuration.
    pub fn new(config: DialConfig) -> Result<Self, ConfigError> {
        let timeout_us = config.timeout_us();

        Ok(Self {
            decoder: PulseDecoder::new(config)?,
            number: NumberAssembler::new(),
            stats: DialStats::new(),
            events: EventRing::new(),
            timeout_us,
            last_digit_us: 0,
            published: None,
        })
    }

    /// The most recently finalized digit, cleared by this read.
    pub fn current_digit(&mut self) -> Option<Digit> {
        self.decoder.current_digit()
    }

    /// Take the most recently completed number, if one is ready.
    pub fn take_number(&mut self) -> Option<DialedNumber> {
        self.published.take()
    }

    /// Digits dialed so far for the number in progress.
    pub fn digits_in_progress(&self) -> &str {
        self.number.as_str()
    }

    /// Diagnostic counters. Readable from another context.
    pub fn stats(&self) -> &DialStats {
        &self.stats
    }

    /// Diagnostic event ring. Drain from the host at leisure.
    pub fn events(&self) -> &EventRing<EVENT_RING_CAPACITY> {
        &self.events
    }

    /// Drop all in-flight state: open train, partial number, pending
    /// publication. Counters and queued events are preserved.
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.number.clear();
        self.last_digit_us = 0;
        self.published = None;
    }

    fn record(&self, timestamp_us: i64, kind: EventKind) {
        self.events.push(DialEvent { timestamp_us, kind });
    }

    fn on_digit(&mut self, digit: Digit, now_us: i64) {
        self.stats.record_digit_decoded();
        self.record(now_us, EventKind::DigitDecoded { digit });

        if !self.number.push(digit) {
            self.stats.record_digit_dropped();
            self.record(now_us, EventKind::DigitDropped);
        }
        self.last_digit_us = now_us;
    }

    fn publish_if_idle(&mut self, now_us: i64) {
        if self.number.is_empty() {
            return;
        }
        // The caller is still dialing the next digit
        if self.decoder.is_train_open() {
            return;
        }
        if now_us.saturating_sub(self.last_digit_us) < self.timeout_us {
            return;
        }

        let digits = self.number.len() as u8;
        self.published = Some(self.number.take());
        self.stats.record_number_published();
        self.record(now_us, EventKind::NumberPublished { digits });
    }
}

impl EdgeObserver for DialSensor {
    type Outcome = EdgeOutcome;

    fn on_edge(&mut self, level: Level, now_us: i64) -> EdgeOutcome {
        let outcome = self.decoder.on_edge(level, now_us);

        match outcome {
            EdgeOutcome::Pulse { count } => {
                self.stats.record_edge_accepted();
                self.stats.record_pulse();
                self.record(now_us, EventKind::PulseCounted { count });
            }
            EdgeOutcome::Accepted => {
                self.stats.record_edge_accepted();
            }
            EdgeOutcome::Bounced => {
                self.stats.record_edge_bounced();
                self.record(now_us, EventKind::EdgeBounced);
            }
            EdgeOutcome::Ignored => {}
        }

        outcome
    }
}

impl Tickable for DialSensor {
    type Outcome = Option<TrainOutcome>;

    fn tick(&mut self, now_us: i64) -> Option<TrainOutcome> {
        let outcome = self.decoder.tick(now_us);

        match outcome {
            Some(TrainOutcome::Digit(digit)) => self.on_digit(digit, now_us),
            Some(TrainOutcome::Spurious { pulse_count }) => {
                self.stats.record_spurious_train();
                self.record(now_us, EventKind::SpuriousTrain { pulse_count });
            }
            None => {}
        }

        self.publish_if_idle(now_us);
        outcome
    }
}
