//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{Action, InputSource};
use crate::movement::stats::StatDelta;

/// Offsets and sizes of the contact probes, relative to the body center.
/// The wall probe is mirrored on the x axis when the actor faces left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeGeometry {
    pub ground_offset: (f32, f32),
    pub ground_half_extents: (f32, f32),
    pub wall_offset: (f32, f32),
    pub wall_half_extents: (f32, f32),
}

impl Default for ProbeGeometry {
    fn default() -> Self {
        Self {
            ground_offset: (0.0, -24.0),
            ground_half_extents: (10.0, 2.0),
            wall_offset: (13.0, 0.0),
            wall_half_extents: (2.0, 18.0),
        }
    }
}

/// Hold-to-activate power-up definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpDef {
    /// Seconds the hold action must be kept down
    pub hold_time: f32,
    /// Seconds the stat boost lasts
    pub duration: f32,
    pub delta: StatDelta,
}

impl Default for PowerUpDef {
    fn default() -> Self {
        Self {
            hold_time: 1.0,
            duration: 15.0,
            delta: StatDelta {
                move_speed: 160.0,
                jump_power: 320.0,
                ..default()
            },
        }
    }
}

/// Player locomotion tuning. Distances are in pixels, times in seconds.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    pub jump_power: f32,
    pub dash_speed: f32,
    /// Ground jump plus air jumps available before landing
    pub max_jump_charges: u8,
    /// Vertical velocity factor applied when jump is released while rising
    pub jump_cut_multiplier: f32,
    pub base_gravity: f32,
    pub fall_multiplier: f32,
    pub max_fall_speed: f32,
    pub wall_slide_speed: f32,
    pub wall_jump_coyote_time: f32,
    pub wall_jump_lock_time: f32,
    pub wall_jump_power: (f32, f32),
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub knockback_force: f32,
    pub knockback_upward: f32,
    pub knockback_lock_time: f32,
    pub hit_invulnerability: f32,
    /// Seconds platform collision stays off after dropping through
    pub drop_duration: f32,
    /// Seconds of standing still before resuming movement counts as a fresh start
    pub stop_moving_threshold: f32,
    pub max_health: f32,
    pub probe: ProbeGeometry,
    pub power_up: PowerUpDef,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 320.0,
            jump_power: 960.0,
            dash_speed: 768.0,
            max_jump_charges: 2,
            jump_cut_multiplier: 0.5,
            base_gravity: 3.0,
            fall_multiplier: 3.0,
            max_fall_speed: 960.0,
            wall_slide_speed: 96.0,
            wall_jump_coyote_time: 0.1,
            wall_jump_lock_time: 0.2,
            wall_jump_power: (320.0, 960.0),
            dash_duration: 0.25,
            dash_cooldown: 3.0,
            knockback_force: 320.0,
            knockback_upward: 320.0,
            knockback_lock_time: 0.3,
            hit_invulnerability: 1.0,
            drop_duration: 0.4,
            stop_moving_threshold: 1.0,
            max_health: 5.0,
            probe: ProbeGeometry::default(),
            power_up: PowerUpDef::default(),
        }
    }
}

impl MovementTuning {
    pub fn wall_jump_velocity(&self, direction: f32) -> Vec2 {
        Vec2::new(direction * self.wall_jump_power.0, self.wall_jump_power.1)
    }
}

/// Latched action state.
///
/// Sampled every frame; press/release edges accumulate until the next fixed
/// tick consumes them, so an edge is never lost when a frame runs no fixed
/// step and never seen twice when a frame runs several.
#[derive(Resource, Debug, Default, Clone)]
pub struct ActionState {
    held: u8,
    pressed: u8,
    released: u8,
    /// Cursor position in world space, if the cursor is over the window
    pub aim: Option<Vec2>,
}

impl ActionState {
    pub fn sample(&mut self, action: Action, held: bool, just_pressed: bool, just_released: bool) {
        let bit = action.bit();
        if held {
            self.held |= bit;
        } else {
            self.held &= !bit;
        }
        if just_pressed {
            self.pressed |= bit;
        }
        if just_released {
            self.released |= bit;
        }
    }

    /// Forget consumed edges; held state is kept.
    pub fn clear_edges(&mut self) {
        self.pressed = 0;
        self.released = 0;
    }
}

impl InputSource for ActionState {
    fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }

    fn was_released(&self, action: Action) -> bool {
        self.released & action.bit() != 0
    }
}
