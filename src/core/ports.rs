//! Core domain: capability traits the controllers are written against.
//!
//! Controllers never touch ECS queries directly. The bridging systems wrap
//! avian2d and Bevy state in these traits, and tests supply in-memory fakes.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use serde::Serialize;

use crate::movement::GameLayer;

/// Horizontal facing of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1.0 for right, -1.0 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing for a horizontal direction; zero counts as right.
    pub fn from_sign(direction: f32) -> Self {
        if direction < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Discrete player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    Jump,
    Dash,
    Hold,
    Shoot,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveDown,
        Action::Jump,
        Action::Dash,
        Action::Hold,
        Action::Shoot,
    ];

    pub(crate) fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Per-tick view of the player's input.
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
    fn was_pressed(&self, action: Action) -> bool;
    fn was_released(&self, action: Action) -> bool;

    /// -1, 0 or +1 from the held move actions. Right wins when both are held.
    fn horizontal(&self) -> f32 {
        if self.is_held(Action::MoveRight) {
            1.0
        } else if self.is_held(Action::MoveLeft) {
            -1.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
}

/// Read-only spatial queries against the current physics world.
pub trait PhysicsQuery {
    fn overlap_box(&self, center: Vec2, half_extents: Vec2, mask: LayerMask) -> bool;
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

/// Write access to the controlled rigid body.
pub trait BodyActuator {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn set_gravity_scale(&mut self, scale: f32);
    fn set_facing(&mut self, facing: Facing);
    fn set_collision_enabled(&mut self, layer: GameLayer, enabled: bool);

    fn set_velocity_x(&mut self, x: f32) {
        let v = self.velocity();
        self.set_velocity(Vec2::new(x, v.y));
    }

    fn set_velocity_y(&mut self, y: f32) {
        let v = self.velocity();
        self.set_velocity(Vec2::new(v.x, y));
    }
}

/// Health owner that controllers can damage without owning the health state.
pub trait DamageTarget {
    fn apply_damage(&mut self, amount: f32);
    fn is_alive(&self) -> bool;
}
