//! Restart cooldown: a cancellable once-per-second countdown.
//!
//! The countdown is a single task owned by the session. Starting it always
//! replaces the running task, so two countdowns can never decrement at once.
//! Hosts that drive it from their own timer tag each tick with the
//! [`CountdownHandle`] returned by `start`; ticks carrying a stale handle are
//! dropped.

use crate::core::constants::COUNTDOWN_INTERVAL_MS;

/// Identifies one started countdown task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownHandle(u64);

/// What a countdown tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// One second elapsed; `remaining` is the new display value.
    Tick { remaining: u32 },
    /// Reached zero; the restart control is enabled.
    Complete,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining: u32,
    active: bool,
    accumulated_ms: u64,
    generation: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running task and start counting down from `from`.
    /// A zero start completes immediately.
    pub fn start(&mut self, from: u32) -> (CountdownHandle, Option<CountdownStep>) {
        self.cancel();
        self.generation += 1;
        self.remaining = from;
        self.active = from > 0;
        let immediate = (from == 0).then_some(CountdownStep::Complete);
        (CountdownHandle(self.generation), immediate)
    }

    /// Stop the running task. The displayed value is left as is.
    pub fn cancel(&mut self) {
        self.active = false;
        self.accumulated_ms = 0;
    }

    /// One timer tick for the current task.
    pub fn tick(&mut self) -> Vec<CountdownStep> {
        if !self.active {
            return Vec::new();
        }
        self.remaining = self.remaining.saturating_sub(1);
        let mut steps = vec![CountdownStep::Tick {
            remaining: self.remaining,
        }];
        if self.remaining == 0 {
            self.cancel();
            steps.push(CountdownStep::Complete);
        }
        steps
    }

    /// One timer tick from an external timer started for `handle`.
    /// Ticks from a cancelled or replaced task do nothing.
    pub fn tick_for(&mut self, handle: CountdownHandle) -> Vec<CountdownStep> {
        if handle != self.handle() {
            return Vec::new();
        }
        self.tick()
    }

    /// Feed elapsed wall time; ticks once per full second.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<CountdownStep> {
        if !self.active {
            return Vec::new();
        }
        self.accumulated_ms += dt_ms;
        let mut steps = Vec::new();
        while self.active && self.accumulated_ms >= COUNTDOWN_INTERVAL_MS {
            self.accumulated_ms -= COUNTDOWN_INTERVAL_MS;
            steps.extend(self.tick());
        }
        steps
    }

    pub fn handle(&self) -> CountdownHandle {
        CountdownHandle(self.generation)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}
