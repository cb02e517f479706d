//! Stream-time clock.
//!
//! The block callback is the only heartbeat the engine has, so time is
//! counted in samples delivered rather than read from the wall clock. Every
//! timer (spectrum reports, radar transmit, QPSK receive window) is a
//! deadline on this clock, which keeps the engines deterministic under test.

use std::ops::Add;

use crate::config::{BLOCK_SIZE, SAMPLE_RATE};

/// A point on the stream clock, in samples since start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct StreamTime(u64);

impl StreamTime {
    pub const ZERO: StreamTime = StreamTime(0);

    pub const fn from_blocks(blocks: u64) -> Self {
        StreamTime(blocks * BLOCK_SIZE as u64)
    }

    pub const fn from_millis(ms: u64) -> Self {
        StreamTime(ms * SAMPLE_RATE as u64 / 1000)
    }

    pub const fn samples(self) -> u64 {
        self.0
    }
}

impl Add for StreamTime {
    type Output = StreamTime;

    fn add(self, rhs: StreamTime) -> StreamTime {
        StreamTime(self.0 + rhs.0)
    }
}

/// Advances by one block per callback.
#[derive(Debug, Default)]
pub struct StreamClock {
    now: StreamTime,
}

impl StreamClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start time of the block currently being processed.
    pub fn now(&self) -> StreamTime {
        self.now
    }

    pub fn advance(&mut self) {
        self.now = self.now + StreamTime::from_blocks(1);
    }
}

/// A repeating deadline.
///
/// Fires on the first poll at or after `next`, then re-arms one period
/// later. Missed periods are not replayed.
#[derive(Debug, Clone)]
pub struct Interval {
    period: StreamTime,
    next: StreamTime,
}

impl Interval {
    /// First fires at `start`.
    pub fn starting_at(start: StreamTime, period: StreamTime) -> Self {
        Self {
            period,
            next: start,
        }
    }

    pub fn poll(&mut self, now: StreamTime) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.period;
        true
    }
}
