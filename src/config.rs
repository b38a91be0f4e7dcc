//! Configuration for the dial sensor and audio components.
//!
//! Plain structs validated once at construction. The owning application
//! builds these explicitly and passes them in; there is no registry and no
//! schema layer. Validation failures are fatal to component startup and are
//! surfaced to the caller, never recovered internally.

use thiserror::Error;

/// Highest GPIO number that can be wired to a component.
pub const MAX_GPIO_PIN: u8 = 48;

/// Upper bound for the dial timeout, in milliseconds.
pub const MAX_DIAL_TIMEOUT_MS: u32 = 1_000_000;

/// Upper bound for the debounce window, in milliseconds.
///
/// The shortest phase of a dial pulse is the 40 ms contact-closed period;
/// a debounce window at or above that would eat real edges.
pub const MAX_DEBOUNCE_MS: u32 = 39;

/// Default debounce window, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u32 = 10;

/// Configuration errors. All fatal at construction time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Pin number outside the wirable GPIO range.
    #[error("gpio {pin} is not a wirable pin (valid range 0..=48)")]
    InvalidPin { pin: u8 },

    /// Dial timeout outside the accepted range.
    #[error("dial timeout {timeout_ms} ms is out of range (max 1000000 ms)")]
    TimeoutOutOfRange { timeout_ms: u32 },

    /// Debounce window too long to pass real dial edges.
    #[error("debounce window {debounce_ms} ms would swallow dial pulses (max 39 ms)")]
    DebounceTooLong { debounce_ms: u32 },

    /// Gain shift would zero out every 16-bit sample.
    #[error("gain shift {shift} is out of range (max 15)")]
    GainShiftTooLarge { shift: u8 },
}

fn validate_pin(pin: u8) -> Result<(), ConfigError> {
    if pin > MAX_GPIO_PIN {
        return Err(ConfigError::InvalidPin { pin });
    }
    Ok(())
}

/// Rotary dial sensor configuration.
///
/// `dial_timeout_ms` is the idle period after the last pulse that confirms a
/// pulse train is complete. A value of 0 finalizes an open train on the very
/// next tick after the last pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialConfig {
    /// GPIO wired to the dial's pulse contact.
    pub dial_pin: u8,

    /// Inter-digit timeout in milliseconds (0..=1_000_000).
    pub dial_timeout_ms: u32,

    /// Debounce window in milliseconds. Edges closer than this to the
    /// previous accepted edge are rejected as contact bounce.
    pub debounce_ms: u32,
}

impl DialConfig {
    /// Create a config with the default debounce window.
    pub fn new(dial_pin: u8, dial_timeout_ms: u32) -> Self {
        Self {
            dial_pin,
            dial_timeout_ms,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Override the debounce window.
    pub fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Check all fields against their accepted ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pin(self.dial_pin)?;
        if self.dial_timeout_ms > MAX_DIAL_TIMEOUT_MS {
            return Err(ConfigError::TimeoutOutOfRange {
                timeout_ms: self.dial_timeout_ms,
            });
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::DebounceTooLong {
                debounce_ms: self.debounce_ms,
            });
        }
        Ok(())
    }

    /// Inter-digit timeout in microseconds.
    #[inline]
    pub fn timeout_us(&self) -> i64 {
        self.dial_timeout_ms as i64 * 1000
    }

    /// Debounce window in microseconds.
    #[inline]
    pub fn debounce_us(&self) -> i64 {
        self.debounce_ms as i64 * 1000
    }
}

/// I2S microphone pin assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MicrophoneConfig {
    /// I2S bit clock pin.
    pub bclk_pin: u8,
    /// I2S word select (LRCLK) pin.
    pub lrclk_pin: u8,
    /// I2S data-in pin.
    pub din_pin: u8,
}

impl MicrophoneConfig {
    pub fn new(bclk_pin: u8, lrclk_pin: u8, din_pin: u8) -> Self {
        Self {
            bclk_pin,
            lrclk_pin,
            din_pin,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pin(self.bclk_pin)?;
        validate_pin(self.lrclk_pin)?;
        validate_pin(self.din_pin)?;
        Ok(())
    }
}

/// I2S speaker pin assignment and output gain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeakerConfig {
    /// I2S bit clock pin.
    pub bclk_pin: u8,
    /// I2S word select (LRCLK) pin.
    pub lrclk_pin: u8,
    /// I2S data-out pin.
    pub dout_pin: u8,
    /// Right-shift applied to each sample before output.
    /// The resulting gain factor is 1 / 2^gain_shift.
    pub gain_shift: u8,
}

impl SpeakerConfig {
    pub fn new(bclk_pin: u8, lrclk_pin: u8, dout_pin: u8) -> Self {
        Self {
            bclk_pin,
            lrclk_pin,
            dout_pin,
            gain_shift: crate::audio::level::DEFAULT_GAIN_SHIFT,
        }
    }

    pub fn with_gain_shift(mut self, gain_shift: u8) -> Self {
        self.gain_shift = gain_shift;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pin(self.bclk_pin)?;
        validate_pin(self.lrclk_pin)?;
        validate_pin(self.dout_pin)?;
        if self.gain_shift > 15 {
            return Err(ConfigError::GainShiftTooLarge {
                shift: self.gain_shift,
            });
        }
        Ok(())
    }
}
