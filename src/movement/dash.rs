//! Movement domain: dash sub-controller.

use bevy::prelude::*;

use crate::core::{BodyActuator, Facing, Notification, NotificationSink};
use crate::movement::controller::LocomotionTimers;
use crate::movement::{GameLayer, LocomotionCapabilities, MovementTuning};

pub fn can_dash(capabilities: &LocomotionCapabilities, timers: &LocomotionTimers) -> bool {
    capabilities.dash && !timers.dash.is_active() && !timers.dash_cooldown.is_active()
}

/// Start the dash: weightless, horizontal, and passing through enemies.
pub fn begin_dash(
    timers: &mut LocomotionTimers,
    facing: Facing,
    dash_speed: f32,
    tuning: &MovementTuning,
    body: &mut impl BodyActuator,
    sink: &mut impl NotificationSink,
) {
    timers.dash.start(tuning.dash_duration);
    timers.wall_jump_lock.cancel();
    body.set_gravity_scale(0.0);
    body.set_collision_enabled(GameLayer::Enemy, false);
    sustain_dash(facing, dash_speed, body);
    sink.notify(Notification::DashStarted);
    debug!("Dash started: facing={:?}, speed={}", facing, dash_speed);
}

pub fn sustain_dash(facing: Facing, dash_speed: f32, body: &mut impl BodyActuator) {
    body.set_velocity(Vec2::new(facing.sign() * dash_speed, 0.0));
}

/// Undo everything `begin_dash` changed and start the cooldown.
pub fn end_dash(
    timers: &mut LocomotionTimers,
    tuning: &MovementTuning,
    body: &mut impl BodyActuator,
    sink: &mut impl NotificationSink,
) {
    timers.dash.cancel();
    timers.dash_cooldown.start(tuning.dash_cooldown);
    body.set_velocity_x(0.0);
    body.set_gravity_scale(tuning.base_gravity);
    body.set_collision_enabled(GameLayer::Enemy, true);
    sink.notify(Notification::DashEnded);
    debug!("Dash ended: cooldown={}", tuning.dash_cooldown);
}
