//! Movement domain: gravity model and hit-reaction helpers used by the integrator.

use bevy::prelude::*;

use crate::core::BodyActuator;
use crate::movement::MovementTuning;

/// Scale gravity up while falling freely and cap the fall speed.
pub fn apply_fall_gravity(
    on_ground: bool,
    wall_sliding: bool,
    tuning: &MovementTuning,
    body: &mut impl BodyActuator,
) {
    let velocity = body.velocity();
    let falling = velocity.y < 0.0 && !on_ground && !wall_sliding;
    body.set_gravity_scale(if falling {
        tuning.base_gravity * tuning.fall_multiplier
    } else {
        tuning.base_gravity
    });
    if velocity.y < -tuning.max_fall_speed {
        body.set_velocity_y(-tuning.max_fall_speed);
    }
}

/// Hold a wall slide to at most `wall_slide_speed` downward.
pub fn clamp_wall_slide(tuning: &MovementTuning, body: &mut impl BodyActuator) {
    let velocity = body.velocity();
    if velocity.y < -tuning.wall_slide_speed {
        body.set_velocity_y(-tuning.wall_slide_speed);
    }
}

/// Velocity override for a hit: pushed away from the attacker horizontally
/// and always lifted by a fixed amount. Coincident positions push right.
pub fn knockback_velocity(victim: Vec2, attacker: Vec2, force: f32, upward: f32) -> Vec2 {
    let direction = (victim - attacker).normalize_or_zero();
    let direction = if direction == Vec2::ZERO {
        Vec2::X
    } else {
        direction
    };
    Vec2::new(direction.x * force, upward)
}
