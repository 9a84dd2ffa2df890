//! Core domain: countdown primitive shared by every timed lock and cooldown.

use serde::Serialize;

/// A single named deadline, advanced once per fixed tick.
///
/// Restarting replaces the previous deadline instead of stacking, so a lock
/// never has more than one active instance. `tick` reports the zero-crossing
/// exactly once; after that the countdown stays parked at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// A countdown that is already running.
    pub fn running(duration: f32) -> Self {
        let mut countdown = Self::default();
        countdown.start(duration);
        countdown
    }

    /// Start (or restart) the countdown. The newest deadline always wins.
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Drop the deadline without firing its expiry.
    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advance by `dt` seconds. Returns `true` only on the tick that reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }
}
