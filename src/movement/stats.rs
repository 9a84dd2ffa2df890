//! Movement domain: runtime stat block and additive power-up deltas.

use serde::{Deserialize, Serialize};

use crate::combat::GunTuning;
use crate::movement::MovementTuning;

/// Stats that pickups and power-ups may change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub move_speed: f32,
    pub jump_power: f32,
    pub dash_speed: f32,
    pub max_jump_charges: u8,
    pub bullet_damage: f32,
    pub bullet_speed: f32,
    /// Shots per second
    pub fire_rate: f32,
}

impl StatBlock {
    pub fn from_tuning(movement: &MovementTuning, gun: &GunTuning) -> Self {
        Self {
            move_speed: movement.move_speed,
            jump_power: movement.jump_power,
            dash_speed: movement.dash_speed,
            max_jump_charges: movement.max_jump_charges,
            bullet_damage: gun.bullet_damage,
            bullet_speed: gun.bullet_speed,
            fire_rate: gun.fire_rate,
        }
    }

    pub fn apply(&mut self, delta: &StatDelta) {
        self.move_speed += delta.move_speed;
        self.jump_power += delta.jump_power;
        self.dash_speed += delta.dash_speed;
        self.max_jump_charges = self.max_jump_charges.saturating_add(delta.max_jump_charges);
        self.bullet_damage += delta.bullet_damage;
        self.bullet_speed += delta.bullet_speed;
        self.fire_rate += delta.fire_rate;
    }

    /// Undo a previous `apply` of the same delta.
    pub fn revert(&mut self, delta: &StatDelta) {
        self.move_speed -= delta.move_speed;
        self.jump_power -= delta.jump_power;
        self.dash_speed -= delta.dash_speed;
        self.max_jump_charges = self.max_jump_charges.saturating_sub(delta.max_jump_charges);
        self.bullet_damage -= delta.bullet_damage;
        self.bullet_speed -= delta.bullet_speed;
        self.fire_rate -= delta.fire_rate;
    }
}

/// Additive change to a [`StatBlock`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDelta {
    pub move_speed: f32,
    pub jump_power: f32,
    pub dash_speed: f32,
    pub max_jump_charges: u8,
    pub bullet_damage: f32,
    pub bullet_speed: f32,
    pub fire_rate: f32,
}

/// Progress of the hold-to-activate power-up gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoldCharge {
    /// A power-up may be charged
    pub armed: bool,
    /// Seconds the hold action has been kept down
    pub progress: f32,
}

impl Default for HoldCharge {
    fn default() -> Self {
        Self {
            armed: true,
            progress: 0.0,
        }
    }
}

impl HoldCharge {
    /// Advance the gesture. Returns `true` on the tick the hold completes.
    pub fn advance(&mut self, dt: f32, held: bool, released: bool, hold_time: f32) -> bool {
        if !self.armed {
            return false;
        }
        if released {
            self.progress = 0.0;
        }
        if !held {
            return false;
        }
        self.progress += dt;
        if self.progress >= hold_time {
            self.progress = 0.0;
            self.armed = false;
            return true;
        }
        false
    }

    pub fn fill_ratio(&self, hold_time: f32) -> f32 {
        if hold_time <= 0.0 {
            return 1.0;
        }
        (self.progress / hold_time).clamp(0.0, 1.0)
    }
}
