//! Combat domain: the player's gun and bullet spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{Bullet, Lifetime};
use crate::combat::resources::GunTuning;
use crate::core::{Countdown, Facing};
use crate::movement::{GameLayer, StatBlock};

/// Fire-rate gate for one shooter.
#[derive(Component, Debug, Clone, Default)]
pub struct Gun {
    pub cooldown: Countdown,
}

impl Gun {
    /// Fire if the previous shot has cleared. The next shot waits `1 / fire_rate`.
    pub fn try_fire(&mut self, fire_rate: f32) -> bool {
        if self.cooldown.is_active() || fire_rate <= 0.0 {
            return false;
        }
        self.cooldown.start(1.0 / fire_rate);
        true
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown.tick(dt);
    }
}

/// Unit direction from the shooter toward the aim point, or along the
/// facing when there is no usable aim point.
pub fn aim_direction(origin: Vec2, aim: Option<Vec2>, facing: Facing) -> Vec2 {
    aim.map(|target| (target - origin).normalize_or_zero())
        .filter(|direction| *direction != Vec2::ZERO)
        .unwrap_or(Vec2::new(facing.sign(), 0.0))
}

pub fn spawn_bullet(
    commands: &mut Commands,
    origin: Vec2,
    direction: Vec2,
    stats: &StatBlock,
    tuning: &GunTuning,
) -> Entity {
    let diameter = tuning.bullet_radius * 2.0;
    commands
        .spawn((
            Bullet {
                damage: stats.bullet_damage,
            },
            Lifetime(Countdown::running(tuning.bullet_lifetime)),
            Sprite {
                color: Color::srgb(1.0, 0.9, 0.3),
                custom_size: Some(Vec2::splat(diameter)),
                ..default()
            },
            Transform::from_xyz(origin.x, origin.y, 1.0),
            (
                RigidBody::Kinematic,
                Collider::circle(tuning.bullet_radius),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::new(GameLayer::Bullet, [GameLayer::Enemy]),
                LinearVelocity(direction * stats.bullet_speed),
            ),
        ))
        .id()
}
