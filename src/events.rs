//! Diagnostic event ring for the dial path.
//!
//! The sensor runs in a context that must never block, so events go into a
//! fixed-capacity lock-free ring and the host drains them at leisure (and
//! may log them however it likes). Push never blocks; if the ring is full
//! the event is dropped and counted.
//!
//! Single producer (the sensor's execution context), single consumer (the
//! draining context). The ring is `Sync` so the consumer may live on
//! another thread.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::signal::Digit;

/// What happened on the dial path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// A falling edge was accepted; carries the running pulse count.
    PulseCounted { count: u8 },

    /// An edge was rejected as contact bounce.
    EdgeBounced,

    /// A pulse train finalized into a digit.
    DigitDecoded { digit: Digit },

    /// A pulse train finalized with an out-of-range count and was dropped.
    SpuriousTrain { pulse_count: u8 },

    /// A decoded digit was dropped because the number was at capacity.
    DigitDropped,

    /// A complete number was handed to the publisher.
    NumberPublished { digits: u8 },
}

/// A timestamped dial event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialEvent {
    /// Monotonic timestamp in microseconds.
    pub timestamp_us: i64,
    pub kind: EventKind,
}

const EMPTY_EVENT: DialEvent = DialEvent {
    timestamp_us: 0,
    kind: EventKind::EdgeBounced,
};

/// Lock-free SPSC ring of [`DialEvent`]s.
///
/// `N` must be a power of two.
pub struct EventRing<const N: usize> {
    entries: UnsafeCell<[DialEvent; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: single producer and single consumer, coordinated through the
// acquire/release pairs on write_idx and read_idx. A slot is only written
// while the consumer cannot yet see it, and only read after the producer
// has published it.
unsafe impl<const N: usize> Sync for EventRing<N> {}
unsafe impl<const N: usize> Send for EventRing<N> {}

impl<const N: usize> EventRing<N> {
    const MASK: usize = N - 1;

    /// Create an empty ring.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Event ring size must be power of 2");

        Self {
            entries: UnsafeCell::new([EMPTY_EVENT; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push an event. Never blocks.
    ///
    /// Returns `true` if the event was queued, `false` if it was dropped
    /// because the ring is full.
    #[inline]
    pub fn push(&self, event: DialEvent) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // SAFETY: sole producer; the consumer cannot read this slot until
        // write_idx is published below.
        unsafe {
            (*self.entries.get())[(write as usize) & Self::MASK] = event;
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain the oldest event, if any.
    #[inline]
    pub fn drain(&self) -> Option<DialEvent> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: sole consumer; the producer published this slot before
        // advancing write_idx.
        let event = unsafe { (*self.entries.get())[(read as usize) & Self::MASK] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(event)
    }

    /// Whether there are events waiting to be drained.
    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Number of events waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    /// Count of events dropped because the ring was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset the dropped counter (e.g. after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }
}

impl<const N: usize> Default for EventRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(timestamp_us: i64, kind: EventKind) -> DialEvent {
        DialEvent { timestamp_us, kind }
    }

    #[test]
    fn test_push_drain_order() {
        let ring = EventRing::<16>::new();

        assert!(ring.push(event(1, EventKind::PulseCounted { count: 1 })));
        assert!(ring.push(event(2, EventKind::PulseCounted { count: 2 })));
        assert_eq!(ring.pending(), 2);

        assert_eq!(
            ring.drain(),
            Some(event(1, EventKind::PulseCounted { count: 1 }))
        );
        assert_eq!(
            ring.drain(),
            Some(event(2, EventKind::PulseCounted { count: 2 }))
        );
        assert_eq!(ring.drain(), None);
        assert!(!ring.has_entries());
    }

    #[test]
    fn test_full_ring_drops() {
        let ring = EventRing::<4>::new();

        for i in 0..4 {
            assert!(ring.push(event(i, EventKind::EdgeBounced)));
        }
        assert!(!ring.push(event(4, EventKind::EdgeBounced)));
        assert_eq!(ring.dropped(), 1);

        // Draining frees a slot
        ring.drain();
        assert!(ring.push(event(5, EventKind::EdgeBounced)));
    }

    #[test]
    fn test_reset_dropped() {
        let ring = EventRing::<2>::new();
        ring.push(event(0, EventKind::EdgeBounced));
        ring.push(event(1, EventKind::EdgeBounced));
        ring.push(event(2, EventKind::EdgeBounced));

        assert_eq!(ring.dropped(), 1);
        ring.reset_dropped();
        assert_eq!(ring.dropped(), 0);
    }

    #[test]
    fn test_wraparound() {
        let ring = EventRing::<4>::new();

        for round in 0..10i64 {
            assert!(ring.push(event(round, EventKind::DigitDropped)));
            assert_eq!(ring.drain(), Some(event(round, EventKind::DigitDropped)));
        }
        assert_eq!(ring.dropped(), 0);
    }
}
