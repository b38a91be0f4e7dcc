//! Dialed-number assembly.
//!
//! Finalized digits accumulate into a fixed-capacity string until the
//! publish timeout decides the caller has stopped dialing. Capacity
//! overflow drops the digit rather than failing; the embedding sensor
//! counts the drop.

use heapless::String;

use crate::signal::Digit;

/// Maximum number of digits in one dialed number.
pub const MAX_NUMBER_DIGITS: usize = 32;

/// Accumulates decoded digits into a dialed number.
#[derive(Debug, Default)]
pub struct NumberAssembler {
    digits: String<MAX_NUMBER_DIGITS>,
}

impl NumberAssembler {
    pub fn new() -> Self {
        Self {
            digits: String::new(),
        }
    }

    /// Append a digit. Returns `false` if the number is already at
    /// capacity and the digit was dropped.
    pub fn push(&mut self, digit: Digit) -> bool {
        self.digits.push(digit.as_char()).is_ok()
    }

    /// Number of accumulated digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The digits accumulated so far.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.digits.as_str()
    }

    /// Hand out the assembled number and reset for the next one.
    pub fn take(&mut self) -> String<MAX_NUMBER_DIGITS> {
        core::mem::take(&mut self.digits)
    }

    /// Discard everything accumulated so far.
    pub fn clear(&mut self) {
        self.digits.clear();
    }
}
