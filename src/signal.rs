//! Signal vocabulary shared by the dial components.
//!
//! Small Copy types describing what the pulse contact does and what the
//! decoder makes of it, plus the traits through which the host loop drives
//! a component. Components are composed from these capabilities rather than
//! inheriting from framework base classes.

/// Instantaneous level of the dial's pulse line.
///
/// The line idles high; each dial pulse pulls it low. A falling edge marks a
/// pulse start, a rising edge marks the pulse end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Build from a raw sampled level.
    #[inline]
    pub const fn from_high(is_high: bool) -> Self {
        if is_high {
            Level::High
        } else {
            Level::Low
        }
    }

    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    #[inline]
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

/// A decoded dial digit (0-9).
///
/// Standard rotary convention: a train of `n` pulses means digit `n` for
/// 1-9, and ten pulses mean digit 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    /// Create from a digit value 0-9.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Map a completed pulse train to its digit.
    ///
    /// Counts outside 1..=10 have no digit; the dial mechanism produces
    /// them on disturbance and they are discarded upstream.
    pub const fn from_pulse_count(count: u8) -> Option<Self> {
        match count {
            1..=9 => Some(Self(count)),
            10 => Some(Self(0)),
            _ => None,
        }
    }

    /// Digit value 0-9.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The digit as an ASCII character.
    #[inline]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

/// What the decoder did with one reported edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// Falling edge accepted; a pulse was counted. Carries the running
    /// count of the open train.
    Pulse { count: u8 },

    /// Rising edge accepted (pulse end), nothing counted.
    Accepted,

    /// Edge arrived within the debounce window of the previous accepted
    /// edge and was rejected as contact bounce.
    Bounced,

    /// Reported level matches the current line level; no transition.
    Ignored,
}

/// Result of finalizing a pulse train.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainOutcome {
    /// Train mapped to a digit.
    Digit(Digit),

    /// Pulse count was 0 or above 10; the train is dropped silently.
    /// This is expected dial-mechanism noise, not an error.
    Spurious { pulse_count: u8 },
}

/// Capability: consumes level transitions of a digital input line.
///
/// Called once per observed transition, with the new level and a monotonic
/// microsecond timestamp. Must not block.
pub trait EdgeObserver {
    type Outcome;

    fn on_edge(&mut self, level: Level, now_us: i64) -> Self::Outcome;
}

/// Capability: advances time-driven state on a polled schedule.
///
/// Called periodically (typically every 10-50 ms) with a monotonic
/// microsecond timestamp. Must not block.
pub trait Tickable {
    type Outcome;

    fn tick(&mut self, now_us: i64) -> Self::Outcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_from_pulse_count() {
        for n in 1..=9u8 {
            assert_eq!(Digit::from_pulse_count(n), Digit::new(n));
        }
        assert_eq!(Digit::from_pulse_count(10), Digit::new(0));
    }

    #[test]
    fn test_out_of_range_counts_have_no_digit() {
        assert_eq!(Digit::from_pulse_count(0), None);
        assert_eq!(Digit::from_pulse_count(11), None);
        assert_eq!(Digit::from_pulse_count(255), None);
    }

    #[test]
    fn test_digit_as_char() {
        assert_eq!(Digit::new(0).unwrap().as_char(), '0');
        assert_eq!(Digit::new(7).unwrap().as_char(), '7');
        assert_eq!(Digit::new(10), None);
    }

    #[test]
    fn test_level_from_high() {
        assert!(Level::from_high(true).is_high());
        assert!(Level::from_high(false).is_low());
    }
}
