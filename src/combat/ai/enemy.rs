//! Combat domain: enemy chase controller.
//!
//! Runs the same probe, decide, integrate and timer stages as the player
//! controller, with input replaced by chase decisions against a target.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use serde::Serialize;

use crate::combat::resources::{EnemyCapabilities, EnemySenseTuning, EnemyTuning};
use crate::core::{
    BodyActuator, Countdown, Facing, Notification, NotificationSink, PhysicsQuery,
};
use crate::movement::{ContactState, GameLayer, TickFrame, facing_offset, ground_mask};

/// Facts about the chased actor, read from its own components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetInfo {
    pub position: Vec2,
    pub on_platform: bool,
    pub wall_sliding: bool,
}

/// What an enemy perceives at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EnemySenses {
    /// `on_ground` means standing on ground or a platform
    pub contact: ContactState,
    pub distance_to_target: f32,
    /// Sign of the horizontal offset to the target; zero counts as right
    pub direction: f32,
    pub target_directly_above: bool,
    pub target_directly_below: bool,
    pub target_any_below: bool,
    pub land_in_front: bool,
    pub gap_ahead: bool,
    pub platform_overhead: bool,
    pub target_in_reach: bool,
}

/// Chosen jump, at most one per decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyJump {
    /// Across a gap ahead
    Side,
    /// Straight up toward a target overhead
    Vertical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnemyTimers {
    pub stop_moving: Countdown,
    pub jump_cooldown: Countdown,
    pub attack_cooldown: Countdown,
    pub hit_cooldown: Countdown,
    pub drop_through: Countdown,
}

#[derive(Component, Debug, Clone, Serialize)]
pub struct EnemyController {
    pub capabilities: EnemyCapabilities,
    pub senses: EnemySenses,
    pub timers: EnemyTimers,
    pub facing: Facing,
}

impl EnemyController {
    pub fn new(capabilities: EnemyCapabilities) -> Self {
        Self {
            capabilities,
            senses: EnemySenses::default(),
            timers: EnemyTimers::default(),
            facing: Facing::Right,
        }
    }

    /// Out of range, staggered or waiting out a jump.
    pub fn is_idle(&self, tuning: &EnemyTuning) -> bool {
        self.senses.distance_to_target > tuning.chase_range
            || self.timers.stop_moving.is_active()
            || self.timers.jump_cooldown.is_active()
    }

    /// Pause chasing. Retriggering replaces the previous deadline.
    pub fn trigger_stop_moving(&mut self, duration: f32) {
        self.timers.stop_moving.start(duration);
    }

    pub fn can_contact_hit(&self) -> bool {
        !self.timers.hit_cooldown.is_active()
    }

    /// Record a landed contact hit: start the hit cooldown and stagger.
    pub fn register_contact_hit(&mut self, tuning: &EnemyTuning) {
        self.timers.hit_cooldown.start(tuning.hit_cooldown);
        if self.capabilities.stagger_on_contact {
            self.trigger_stop_moving(tuning.stop_duration);
        }
    }

    pub fn step(
        &mut self,
        frame: TickFrame,
        target: &TargetInfo,
        tuning: &EnemyTuning,
        physics: &impl PhysicsQuery,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        self.senses = sense(
            physics,
            frame.position,
            target,
            Facing::from_sign(target.position.x - frame.position.x),
            &tuning.senses,
            self.timers.drop_through.is_active(),
        );

        self.turn_to(Facing::from_sign(self.senses.direction), body, sink);

        if self.senses.distance_to_target > tuning.chase_range {
            body.set_velocity_x(0.0);
        } else if !self.is_idle(tuning) {
            self.chase(target, tuning, body, sink);
        }

        if self.senses.target_in_reach && !self.timers.attack_cooldown.is_active() {
            self.timers.attack_cooldown.start(tuning.attack_cooldown);
            sink.notify(Notification::Attacked);
        }

        self.advance_timers(frame.dt, body);
    }

    fn chase(
        &mut self,
        target: &TargetInfo,
        tuning: &EnemyTuning,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        let senses = self.senses;
        if senses.contact.on_ground && !senses.target_directly_above && !senses.target_directly_below
        {
            body.set_velocity_x(tuning.move_speed * senses.direction);
        }

        if let Some(jump) = decide_jump(&senses, target, &self.capabilities) {
            let vx = match jump {
                EnemyJump::Side => senses.direction * tuning.side_jump_speed,
                EnemyJump::Vertical => 0.0,
            };
            body.set_velocity(Vec2::new(vx, tuning.jump_power));
            self.timers.jump_cooldown.start(tuning.jump_cooldown);
            sink.notify(Notification::Jumped);
            debug!("Enemy jump: {:?}", jump);
        }

        if should_drop(&senses, &self.capabilities) {
            self.timers.drop_through.start(tuning.drop_duration);
            body.set_collision_enabled(GameLayer::Platform, false);
        }
    }

    fn turn_to(
        &mut self,
        facing: Facing,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        if self.facing == facing {
            return;
        }
        self.facing = facing;
        body.set_facing(facing);
        sink.notify(Notification::Flipped);
    }

    fn advance_timers(&mut self, dt: f32, body: &mut impl BodyActuator) {
        self.timers.stop_moving.tick(dt);
        self.timers.jump_cooldown.tick(dt);
        self.timers.attack_cooldown.tick(dt);
        self.timers.hit_cooldown.tick(dt);
        if self.timers.drop_through.tick(dt) {
            body.set_collision_enabled(GameLayer::Platform, true);
        }
    }
}

/// Jump decision, first match wins:
/// a gap ahead with no land in front, then a target standing on a platform
/// overhead, then a target wall-sliding overhead.
pub fn decide_jump(
    senses: &EnemySenses,
    target: &TargetInfo,
    capabilities: &EnemyCapabilities,
) -> Option<EnemyJump> {
    if !capabilities.jump || !senses.contact.on_ground || senses.target_any_below {
        return None;
    }
    if !senses.land_in_front && senses.gap_ahead {
        return Some(EnemyJump::Side);
    }
    if senses.target_directly_above && senses.platform_overhead && target.on_platform {
        return Some(EnemyJump::Vertical);
    }
    if senses.target_directly_above && target.wall_sliding {
        return Some(EnemyJump::Vertical);
    }
    None
}

pub fn should_drop(senses: &EnemySenses, capabilities: &EnemyCapabilities) -> bool {
    capabilities.drop_through
        && senses.contact.on_ground
        && senses.contact.on_platform
        && !senses.target_directly_above
        && senses.target_any_below
        && senses.target_directly_below
}

fn sense(
    physics: &impl PhysicsQuery,
    position: Vec2,
    target: &TargetInfo,
    facing: Facing,
    tuning: &EnemySenseTuning,
    ignore_platforms: bool,
) -> EnemySenses {
    let direction = facing.sign();
    let player = LayerMask::from(GameLayer::Player);
    let platform = LayerMask::from(GameLayer::Platform);

    let land_center = position + Vec2::new(tuning.land_offset.0, tuning.land_offset.1);
    let land_half = Vec2::new(tuning.land_half_extents.0, tuning.land_half_extents.1);
    let on_ground = physics.overlap_box(land_center, land_half, ground_mask(ignore_platforms));
    let on_platform = !ignore_platforms && physics.overlap_box(land_center, land_half, platform);

    let reach_center = position + facing_offset(tuning.side_check_offset, facing);
    let reach_half = Vec2::new(
        tuning.side_check_half_extents.0,
        tuning.side_check_half_extents.1,
    );

    EnemySenses {
        contact: ContactState {
            on_ground,
            on_platform,
            ..default()
        },
        distance_to_target: position.distance(target.position),
        direction,
        target_directly_above: physics
            .raycast(position, Vec2::Y, tuning.target_above_distance, player)
            .is_some(),
        target_directly_below: physics
            .raycast(position, Vec2::NEG_Y, tuning.target_below_distance, player)
            .is_some(),
        target_any_below: target.position.y < position.y - tuning.target_below_margin,
        land_in_front: physics
            .raycast(
                position,
                Vec2::new(direction, 0.0),
                tuning.front_check_distance,
                LayerMask::from([GameLayer::Ground, GameLayer::Wall]),
            )
            .is_some(),
        gap_ahead: physics
            .raycast(
                position + Vec2::new(direction * tuning.gap_probe_offset, 0.0),
                Vec2::NEG_Y,
                tuning.gap_check_distance,
                ground_mask(false),
            )
            .is_none(),
        platform_overhead: physics
            .raycast(position, Vec2::Y, tuning.platform_above_distance, platform)
            .is_some(),
        target_in_reach: physics.overlap_box(reach_center, reach_half, player),
    }
}
