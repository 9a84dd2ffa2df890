//! Level domain: moving and falling platforms.

use bevy::prelude::*;

use crate::core::Countdown;

/// Platform shuttling between two points at a constant speed.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovingPlatform {
    pub from: Vec2,
    pub to: Vec2,
    pub speed: f32,
    /// Heading toward `to` when set, toward `from` otherwise
    pub outbound: bool,
}

impl MovingPlatform {
    pub fn new(from: Vec2, to: Vec2, speed: f32) -> Self {
        Self {
            from,
            to,
            speed,
            outbound: true,
        }
    }

    pub fn target(&self) -> Vec2 {
        if self.outbound { self.to } else { self.from }
    }

    /// Velocity that moves `position` toward the current target this tick
    /// without overshooting. Reaching the target turns the platform around.
    pub fn velocity(&mut self, position: Vec2, dt: f32) -> Vec2 {
        if dt <= 0.0 {
            return Vec2::ZERO;
        }
        let offset = self.target() - position;
        let step = self.speed * dt;
        if offset.length() <= step {
            self.outbound = !self.outbound;
            return offset / dt;
        }
        offset.normalize_or_zero() * self.speed
    }
}

/// What a falling platform does on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallStep {
    Hold,
    /// Stop being static and drop under gravity
    Drop,
    Remove,
}

/// Platform that gives way a moment after the player lands on it.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct FallingPlatform {
    pub triggered: bool,
    fall: Countdown,
    remove: Countdown,
}

impl FallingPlatform {
    /// Start the fall delay. Later touches are ignored.
    pub fn touch(&mut self, fall_wait: f32) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        self.fall.start(fall_wait);
        true
    }

    pub fn tick(&mut self, dt: f32, remove_wait: f32) -> FallStep {
        if self.fall.tick(dt) {
            self.remove.start(remove_wait);
            return FallStep::Drop;
        }
        if self.remove.tick(dt) {
            return FallStep::Remove;
        }
        FallStep::Hold
    }
}
