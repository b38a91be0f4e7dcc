//! # fetap-core
//!
//! Core logic for a rotary-dial telephone retrofit.
//!
//! The hardware layers (GPIO interrupts, I2S channels, the publishing
//! framework) live outside this crate. What lives here is the pure logic
//! those layers delegate to:
//!
//! - [`PulseDecoder`]: converts debounced dial-contact edges into digits
//! - [`DialSensor`]: assembles digits into a dialed number and collects
//!   diagnostics
//! - [`audio`]: sample-level helpers and the start/stop state machine shared
//!   by the microphone and speaker drivers
//!
//! All timing is driven by caller-supplied monotonic microsecond timestamps.
//! Nothing blocks, nothing sleeps, nothing reads a clock.

#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod config;
pub mod decoder;
pub mod diag;
pub mod events;
pub mod number;
pub mod sensor;
pub mod signal;

pub use config::{ConfigError, DialConfig, MicrophoneConfig, SpeakerConfig};
pub use decoder::PulseDecoder;
pub use diag::{DialStats, StatsSnapshot};
pub use events::{DialEvent, EventKind, EventRing};
pub use number::NumberAssembler;
pub use sensor::{DialSensor, DialedNumber};
pub use signal::{Digit, EdgeObserver, EdgeOutcome, Level, Tickable, TrainOutcome};
