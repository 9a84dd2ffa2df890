//! Level domain: hazard tuning and run progress.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::StatDelta;

/// Hazard, pickup and platform tuning. Velocities are in pixels per second.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    pub spike_bounce: f32,
    pub spike_damage: f32,
    pub spike_cooldown: f32,
    pub bounce_force: f32,
    pub bounce_cooldown: f32,
    pub hazard_size: (f32, f32),
    pub health_heal: f32,
    pub health_max_increase: f32,
    /// Permanent gun upgrade granted by the wizard hat
    pub wizard_hat: StatDelta,
    pub star_value: u32,
    pub progress_goal: u32,
    pub pickup_size: f32,
    pub platform_speed: f32,
    /// Seconds a falling platform holds after being touched
    pub fall_wait: f32,
    /// Seconds a falling platform keeps dropping before it is removed
    pub fall_remove_wait: f32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            spike_bounce: 960.0,
            spike_damage: 1.0,
            spike_cooldown: 0.5,
            bounce_force: 1920.0,
            bounce_cooldown: 10.0,
            hazard_size: (48.0, 16.0),
            health_heal: 1.0,
            health_max_increase: 1.0,
            wizard_hat: StatDelta {
                bullet_speed: 160.0,
                fire_rate: 0.5,
                bullet_damage: 5.0,
                ..default()
            },
            star_value: 50,
            progress_goal: 100,
            pickup_size: 20.0,
            platform_speed: 64.0,
            fall_wait: 1.0,
            fall_remove_wait: 2.0,
        }
    }
}

/// Stars collected this run.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct Progress {
    pub collected: u32,
    pub complete: bool,
}

impl Progress {
    /// Add collected value. Returns `true` the first time `goal` is reached.
    pub fn add(&mut self, value: u32, goal: u32) -> bool {
        self.collected = self.collected.saturating_add(value);
        if !self.complete && self.collected >= goal {
            self.complete = true;
            return true;
        }
        false
    }
}
