//! Rotary dial pulse decoder.
//!
//! Pure logic, no hardware dependencies. Consumes debounced-at-source or
//! raw edge reports plus a polled tick, produces decoded digits. Fully
//! testable on host.
//!
//! Pulse counting is edge-driven; train finalization is time-driven and
//! polled, so the line stays responsive to new edges while an open train
//! waits out the inter-digit timeout. Debounce and the inter-digit timeout
//! are independent constants: debounce guards a single pulse against contact
//! bounce, the timeout decides when the dial has returned to rest.

use crate::config::{ConfigError, DialConfig};
use crate::signal::{Digit, EdgeObserver, EdgeOutcome, Level, Tickable, TrainOutcome};

/// FSM state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// No open train; waiting for the first falling edge.
    Idle,
    /// A train is open and accumulating pulses.
    Counting,
}

/// Rotary dial pulse decoder.
///
/// Owned directly by the embedding sensor and driven through
/// [`EdgeObserver`] and [`Tickable`]; there is no registration and no
/// shared state. Single execution context, nothing blocks.
///
/// # Example
///
/// ```
/// use fetap_core::config::DialConfig;
/// use fetap_core::decoder::PulseDecoder;
/// use fetap_core::signal::{EdgeObserver, Level, Tickable, TrainOutcome};
///
/// let mut decoder = PulseDecoder::new(DialConfig::new(4, 200)).unwrap();
///
/// // One full pulse: contact opens (falling) and closes (rising)
/// decoder.on_edge(Level::Low, 0);
/// decoder.on_edge(Level::High, 60_000);
///
/// // Inter-digit timeout elapses
/// let outcome = decoder.tick(260_000);
/// assert!(matches!(outcome, Some(TrainOutcome::Digit(_))));
/// ```
pub struct PulseDecoder {
    config: DialConfig,

    // Time constants in microseconds, fixed at construction
    debounce_us: i64,
    timeout_us: i64,

    // FSM state
    state: State,
    pulse_count: u8,
    train_started_us: i64,
    last_pulse_us: i64,

    // Line state
    line: Level,
    last_edge_us: Option<i64>,

    // Most recently finalized digit, cleared on read
    pending: Option<Digit>,
}

impl PulseDecoder {
    /// Create a decoder bound to the given configuration.
    ///
    /// Fails if the pin number, timeout or debounce window is out of range.
    /// Fatal to startup of the owning component; nothing is retried.
    pub fn new(config: DialConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            debounce_us: config.debounce_us(),
            timeout_us: config.timeout_us(),
            config,
            state: State::Idle,
            pulse_count: 0,
            train_started_us: 0,
            last_pulse_us: 0,
            line: Level::High, // contact closed, line pulled up
            last_edge_us: None,
            pending: None,
        })
    }

    /// Get the bound configuration.
    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    /// The most recently finalized digit, cleared by this read.
    ///
    /// Returns `None` if no train has been finalized since the last read.
    #[inline]
    pub fn current_digit(&mut self) -> Option<Digit> {
        self.pending.take()
    }

    /// Whether a pulse train is currently open.
    #[inline]
    pub fn is_train_open(&self) -> bool {
        self.state == State::Counting
    }

    /// Running pulse count of the open train (0 when idle).
    #[inline]
    pub fn pulse_count(&self) -> u8 {
        self.pulse_count
    }

    /// Timestamp of the most recent counted pulse.
    ///
    /// Only meaningful while a train is open.
    #[inline]
    pub fn last_pulse_us(&self) -> i64 {
        self.last_pulse_us
    }

    /// Reset to idle. Drops any open train and pending digit.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.pulse_count = 0;
        self.train_started_us = 0;
        self.last_pulse_us = 0;
        self.line = Level::High;
        self.last_edge_us = None;
        self.pending = None;
    }
}

impl EdgeObserver for PulseDecoder {
    type Outcome = EdgeOutcome;

    /// Consume one reported transition of the dial line.
    ///
    /// Transitions within the debounce window of the previous accepted
    /// transition are rejected. A falling edge opens a train or adds a pulse
    /// to the open one; a rising edge just closes the current pulse.
    #[inline]
    fn on_edge(&mut self, level: Level, now_us: i64) -> EdgeOutcome {
        if let Some(prev) = self.last_edge_us {
            if now_us.saturating_sub(prev) < self.debounce_us {
                return EdgeOutcome::Bounced;
            }
        }

        if level == self.line {
            return EdgeOutcome::Ignored;
        }

        self.line = level;
        self.last_edge_us = Some(now_us);

        match level {
            Level::Low => {
                // Pulse start
                match self.state {
                    State::Idle => {
                        self.state = State::Counting;
                        self.pulse_count = 1;
                        self.train_started_us = now_us;
                    }
                    State::Counting => {
                        self.pulse_count = self.pulse_count.saturating_add(1);
                    }
                }
                self.last_pulse_us = now_us;
                EdgeOutcome::Pulse {
                    count: self.pulse_count,
                }
            }
            Level::High => EdgeOutcome::Accepted,
        }
    }
}

impl Tickable for PulseDecoder {
    type Outcome = Option<TrainOutcome>;

    /// Check the open train against the inter-digit timeout.
    ///
    /// Finalizes exactly when `now - last_pulse >= timeout`. With a timeout
    /// of 0 an open train finalizes on the very next tick after its last
    /// pulse. The train is closed regardless of outcome; counts outside
    /// 1..=10 are dropped silently as dial-mechanism noise.
    #[inline]
    fn tick(&mut self, now_us: i64) -> Option<TrainOutcome> {
        if self.state != State::Counting {
            return None;
        }

        if now_us.saturating_sub(self.last_pulse_us) < self.timeout_us {
            return None;
        }

        let count = self.pulse_count;
        self.state = State::Idle;
        self.pulse_count = 0;

        match Digit::from_pulse_count(count) {
            Some(digit) => {
                self.pending = Some(digit);
                Some(TrainOutcome::Digit(digit))
            }
            None => Some(TrainOutcome::Spurious { pulse_count: count }),
        }
    }
}
