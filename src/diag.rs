//! Diagnostic counters for the dial path.
//!
//! Spurious pulse trains and bounced edges are expected behavior of a
//! decades-old dial mechanism, never failures. They are counted here so the
//! host can expose them, and otherwise dropped silently.

use core::sync::atomic::{AtomicU32, Ordering};

/// Lock-free counter block for dial activity.
///
/// Safe to read from another execution context while the sensor updates it;
/// counters are never cleared by reads.
#[derive(Debug, Default)]
pub struct DialStats {
    edges_accepted: AtomicU32,
    edges_bounced: AtomicU32,
    pulses_counted: AtomicU32,
    digits_decoded: AtomicU32,
    spurious_trains: AtomicU32,
    digits_dropped: AtomicU32,
    numbers_published: AtomicU32,
}

impl DialStats {
    pub const fn new() -> Self {
        Self {
            edges_accepted: AtomicU32::new(0),
            edges_bounced: AtomicU32::new(0),
            pulses_counted: AtomicU32::new(0),
            digits_decoded: AtomicU32::new(0),
            spurious_trains: AtomicU32::new(0),
            digits_dropped: AtomicU32::new(0),
            numbers_published: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn record_edge_accepted(&self) {
        self.edges_accepted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_edge_bounced(&self) {
        self.edges_bounced.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_pulse(&self) {
        self.pulses_counted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_digit_decoded(&self) {
        self.digits_decoded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_spurious_train(&self) {
        self.spurious_trains.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_digit_dropped(&self) {
        self.digits_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_number_published(&self) {
        self.numbers_published.fetch_add(1, Ordering::Relaxed);
    }

    /// Consistent-enough snapshot for reporting.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            edges_accepted: self.edges_accepted.load(Ordering::Relaxed),
            edges_bounced: self.edges_bounced.load(Ordering::Relaxed),
            pulses_counted: self.pulses_counted.load(Ordering::Relaxed),
            digits_decoded: self.digits_decoded.load(Ordering::Relaxed),
            spurious_trains: self.spurious_trains.load(Ordering::Relaxed),
            digits_dropped: self.digits_dropped.load(Ordering::Relaxed),
            numbers_published: self.numbers_published.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`DialStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub edges_accepted: u32,
    pub edges_bounced: u32,
    pub pulses_counted: u32,
    pub digits_decoded: u32,
    pub spurious_trains: u32,
    pub digits_dropped: u32,
    pub numbers_published: u32,
}
