//! Movement domain: the player locomotion controller.
//!
//! One fixed tick runs five stages in order: sample input, probe contacts,
//! arbitrate jumps and dashes, integrate the chosen motion into the body, and
//! advance the timer bank. Requests are produced and consumed inside the same
//! tick, so nothing is ever left pending between ticks.

use bevy::prelude::*;
use serde::Serialize;

use crate::core::{
    Action, BodyActuator, Countdown, Facing, InputSource, Notification, NotificationSink,
    PhysicsQuery,
};
use crate::movement::stats::{HoldCharge, StatBlock, StatDelta};
use crate::movement::{
    ContactState, GameLayer, LocomotionCapabilities, MovementTuning, arbiter, dash, integrator,
    probe,
};

/// One-shot motion intent, consumed by the integrator in the tick it is made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionRequest {
    GroundJump,
    AirJump,
    WallJump,
    Dash,
    /// Velocity override from a hit; outranks every voluntary request
    Knockback(Vec2),
}

/// Cooldowns and lockouts owned by the player controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocomotionTimers {
    pub jump_charges: u8,
    pub wall_coyote: Countdown,
    pub wall_jump_lock: Countdown,
    /// Running while a dash is active
    pub dash: Countdown,
    pub dash_cooldown: Countdown,
    pub knockback_lock: Countdown,
    pub power_up: Countdown,
    pub invulnerability: Countdown,
    pub drop_through: Countdown,
}

/// Inputs that vary per tick but are not owned by the controller.
#[derive(Debug, Clone, Copy)]
pub struct TickFrame {
    pub dt: f32,
    pub position: Vec2,
}

#[derive(Component, Debug, Clone, Serialize)]
pub struct LocomotionController {
    pub capabilities: LocomotionCapabilities,
    pub stats: StatBlock,
    pub timers: LocomotionTimers,
    pub contact: ContactState,
    pub facing: Facing,
    pub wall_sliding: bool,
    pub hold: HoldCharge,
    was_grounded: bool,
    /// Direction of the next wall jump, away from the last slid wall
    wall_jump_direction: f32,
    idle_time: f32,
    active_boost: Option<StatDelta>,
    #[serde(skip)]
    pending: Option<MotionRequest>,
}

impl LocomotionController {
    pub fn new(capabilities: LocomotionCapabilities, stats: StatBlock) -> Self {
        Self {
            capabilities,
            stats,
            timers: LocomotionTimers {
                jump_charges: stats.max_jump_charges,
                ..default()
            },
            contact: ContactState::default(),
            facing: Facing::Right,
            wall_sliding: false,
            hold: HoldCharge::default(),
            was_grounded: false,
            wall_jump_direction: -1.0,
            idle_time: 0.0,
            active_boost: None,
            pending: None,
        }
    }

    pub fn pending_request(&self) -> Option<MotionRequest> {
        self.pending
    }

    pub fn is_dashing(&self) -> bool {
        self.timers.dash.is_active()
    }

    pub fn is_knocked_back(&self) -> bool {
        self.timers.knockback_lock.is_active()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.timers.invulnerability.is_active()
    }

    /// Queue a velocity override. Resolved at the top of the next integration.
    pub fn queue_knockback(&mut self, velocity: Vec2) {
        self.pending = Some(MotionRequest::Knockback(velocity));
    }

    /// React to a hit from `attacker`. Returns `false` while invulnerable.
    pub fn receive_hit(&mut self, victim: Vec2, attacker: Vec2, tuning: &MovementTuning) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.timers.invulnerability.start(tuning.hit_invulnerability);
        self.queue_knockback(integrator::knockback_velocity(
            victim,
            attacker,
            tuning.knockback_force,
            tuning.knockback_upward,
        ));
        true
    }

    /// Apply a power-up delta, replacing any boost still running.
    pub fn activate_power_up(
        &mut self,
        delta: StatDelta,
        duration: f32,
        sink: &mut impl NotificationSink,
    ) {
        if let Some(previous) = self.active_boost.take() {
            self.stats.revert(&previous);
        }
        self.stats.apply(&delta);
        self.active_boost = Some(delta);
        self.timers.power_up.start(duration);
        sink.notify(Notification::PowerUpStarted);
        debug!("Power-up started: {:?} for {}s", delta, duration);
    }

    /// Run one fixed tick.
    pub fn step(
        &mut self,
        frame: TickFrame,
        tuning: &MovementTuning,
        input: &impl InputSource,
        physics: &impl PhysicsQuery,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        if self.hold.advance(
            frame.dt,
            input.is_held(Action::Hold),
            input.was_released(Action::Hold),
            tuning.power_up.hold_time,
        ) && !self.timers.power_up.is_active()
        {
            self.activate_power_up(tuning.power_up.delta, tuning.power_up.duration, sink);
        }

        self.contact = probe::probe_contacts(
            physics,
            frame.position,
            self.facing,
            &tuning.probe,
            self.timers.drop_through.is_active(),
        );
        self.detect_landing(sink);

        let knocked = self.is_knocked_back()
            || matches!(self.pending, Some(MotionRequest::Knockback(_)));
        if knocked || self.is_dashing() {
            self.wall_sliding = false;
        } else {
            self.arbitrate(tuning, input, body, sink);
        }

        self.integrate(frame.dt, tuning, input, body, sink);
        self.advance_timers(frame.dt, tuning, body, sink);
    }

    fn detect_landing(&mut self, sink: &mut impl NotificationSink) {
        if self.contact.on_ground && !self.was_grounded {
            self.timers.jump_charges = self.stats.max_jump_charges;
            sink.notify(Notification::Landed);
            debug!("Landed: jump_charges={}", self.timers.jump_charges);
        } else if !self.contact.on_ground && self.was_grounded {
            debug!("Left ground: jump_charges={}", self.timers.jump_charges);
        }
        self.was_grounded = self.contact.on_ground;
    }

    fn arbitrate(
        &mut self,
        tuning: &MovementTuning,
        input: &impl InputSource,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        if self.capabilities.drop_through
            && input.was_pressed(Action::MoveDown)
            && self.contact.on_platform
        {
            self.timers.drop_through.start(tuning.drop_duration);
            body.set_collision_enabled(GameLayer::Platform, false);
            debug!("Dropping through platform for {}s", tuning.drop_duration);
        }

        if input.was_pressed(Action::Dash) && dash::can_dash(&self.capabilities, &self.timers) {
            // A held direction wins over last tick's facing.
            let axis = input.horizontal();
            if axis != 0.0 {
                self.turn_to(Facing::from_sign(axis), body, sink);
            }
            self.wall_sliding = false;
            self.pending = Some(MotionRequest::Dash);
            return;
        }

        self.wall_sliding = self.capabilities.wall_jump
            && arbiter::is_wall_sliding(
                &self.contact,
                input.horizontal(),
                self.timers.wall_jump_lock.is_active(),
            );
        if self.wall_sliding {
            self.timers.wall_coyote.start(tuning.wall_jump_coyote_time);
            if let Some(wall) = self.contact.wall_direction {
                self.wall_jump_direction = -wall.sign();
            }
        }

        if let Some(cut) = arbiter::cut_jump(
            body.velocity().y,
            input.was_released(Action::Jump),
            tuning.jump_cut_multiplier,
        ) {
            body.set_velocity_y(cut);
        }

        self.pending = arbiter::arbitrate_jump(
            input.was_pressed(Action::Jump),
            &self.contact,
            &mut self.timers,
            &self.capabilities,
            self.stats.max_jump_charges,
            tuning,
        );
        match self.pending {
            Some(MotionRequest::WallJump) => {
                self.wall_sliding = false;
                sink.notify(Notification::WallJumped);
            }
            Some(MotionRequest::GroundJump) => sink.notify(Notification::Jumped),
            Some(MotionRequest::AirJump) => sink.notify(Notification::AirJumped),
            _ => {}
        }
    }

    fn integrate(
        &mut self,
        dt: f32,
        tuning: &MovementTuning,
        input: &impl InputSource,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        match self.pending.take() {
            Some(MotionRequest::Knockback(velocity)) => {
                self.begin_knockback(velocity, tuning, body, sink);
            }
            Some(MotionRequest::Dash) => {
                dash::begin_dash(
                    &mut self.timers,
                    self.facing,
                    self.stats.dash_speed,
                    tuning,
                    body,
                    sink,
                );
                return;
            }
            Some(MotionRequest::WallJump) => {
                body.set_velocity(tuning.wall_jump_velocity(self.wall_jump_direction));
                self.turn_to(Facing::from_sign(self.wall_jump_direction), body, sink);
                debug!("Wall jump: direction={}", self.wall_jump_direction);
            }
            Some(MotionRequest::GroundJump | MotionRequest::AirJump) => {
                body.set_velocity_y(self.stats.jump_power);
                debug!("Jump: jump_charges={}", self.timers.jump_charges);
            }
            None => {}
        }

        if self.is_knocked_back() {
            integrator::apply_fall_gravity(self.contact.on_ground, false, tuning, body);
            return;
        }

        if self.is_dashing() {
            dash::sustain_dash(self.facing, self.stats.dash_speed, body);
            return;
        }

        if self.wall_sliding {
            integrator::clamp_wall_slide(tuning, body);
        }

        if !self.timers.wall_jump_lock.is_active() {
            self.drive_horizontal(dt, tuning, input, body, sink);
        }

        integrator::apply_fall_gravity(self.contact.on_ground, self.wall_sliding, tuning, body);
    }

    fn begin_knockback(
        &mut self,
        velocity: Vec2,
        tuning: &MovementTuning,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        if self.is_dashing() {
            dash::end_dash(&mut self.timers, tuning, body, sink);
        }
        self.timers.wall_jump_lock.cancel();
        self.wall_sliding = false;
        self.timers.knockback_lock.start(tuning.knockback_lock_time);
        body.set_velocity(velocity);
        debug!(
            "Knockback applied: velocity=({:.1}, {:.1}), lock={}",
            velocity.x, velocity.y, tuning.knockback_lock_time
        );
    }

    fn drive_horizontal(
        &mut self,
        dt: f32,
        tuning: &MovementTuning,
        input: &impl InputSource,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        let axis = input.horizontal();
        body.set_velocity_x(axis * self.stats.move_speed);

        if axis == 0.0 {
            self.idle_time += dt;
            return;
        }
        if self.idle_time >= tuning.stop_moving_threshold {
            sink.notify(Notification::StartedMoving);
        }
        self.idle_time = 0.0;
        self.turn_to(Facing::from_sign(axis), body, sink);
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

    fn advance_timers(
        &mut self,
        dt: f32,
        tuning: &MovementTuning,
        body: &mut impl BodyActuator,
        sink: &mut impl NotificationSink,
    ) {
        if self.timers.knockback_lock.tick(dt) {
            debug!("Knockback lock released");
        }

        // Ticked before the dash so a cooldown started this tick begins full
        self.timers.dash_cooldown.tick(dt);
        if self.timers.dash.tick(dt) {
            dash::end_dash(&mut self.timers, tuning, body, sink);
        }

        self.timers.wall_jump_lock.tick(dt);
        if !self.wall_sliding {
            self.timers.wall_coyote.tick(dt);
        }
        self.timers.invulnerability.tick(dt);

        if self.timers.drop_through.tick(dt) {
            body.set_collision_enabled(GameLayer::Platform, true);
        }

        if self.timers.power_up.tick(dt) {
            if let Some(delta) = self.active_boost.take() {
                self.stats.revert(&delta);
            }
            self.hold.armed = true;
            sink.notify(Notification::PowerUpEnded);
            debug!("Power-up ended: stats restored to {:?}", self.stats);
        }
    }
}
