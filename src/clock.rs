//! Wall-clock pacing for the terminal loop.

use std::time::{Duration, Instant};

/// Hands out elapsed time in whole milliseconds. The sub-millisecond
/// remainder stays on the clock and is paid out on a later call, so the
/// frame accumulator and the countdown never drift behind real time.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole milliseconds since the previous call.
    pub fn take_elapsed_ms(&mut self, now: Instant) -> u64 {
        let elapsed_ms = now.saturating_duration_since(self.last).as_millis() as u64;
        self.last += Duration::from_millis(elapsed_ms);
        elapsed_ms
    }
}
