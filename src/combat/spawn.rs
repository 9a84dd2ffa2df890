//! Combat domain: enemy and boss spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::{EnemyController, boss_collision_filters, boss_controller};
use crate::combat::components::{Boss, ContactDamage, Enemy, Health, Team};
use crate::combat::resources::{BossTuning, EnemyTuning};
use crate::movement::GameLayer;

/// Bundle for a chasing enemy, boss included
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub team: Team,
    pub controller: EnemyController,
    pub health: Health,
    pub contact_damage: ContactDamage,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub colliding: CollidingEntities,
    pub velocity: LinearVelocity,
    pub gravity_scale: GravityScale,
    pub friction: Friction,
    pub locked_axes: LockedAxes,
}

impl EnemyBundle {
    pub fn new(position: Vec2, tuning: &EnemyTuning, color: Color) -> Self {
        let size = Vec2::new(tuning.size.0, tuning.size.1);
        Self {
            enemy: Enemy,
            team: Team::Enemy,
            controller: EnemyController::new(tuning.capabilities),
            health: Health::new(tuning.max_health),
            contact_damage: ContactDamage(tuning.contact_damage),
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(size.x, size.y),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::Platform,
                    GameLayer::Player,
                    GameLayer::Enemy,
                    GameLayer::Bullet,
                ],
            ),
            colliding: CollidingEntities::default(),
            velocity: LinearVelocity::default(),
            gravity_scale: GravityScale(1.0),
            friction: Friction::new(0.0),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}

pub fn spawn_enemy(commands: &mut Commands, position: Vec2, tuning: &EnemyTuning) -> Entity {
    let entity = commands
        .spawn(EnemyBundle::new(
            position,
            tuning,
            Color::srgb(0.8, 0.3, 0.3),
        ))
        .id();
    info!("Spawned enemy {:?} at {:?}", entity, position);
    entity
}

pub fn spawn_boss(commands: &mut Commands, position: Vec2, tuning: &BossTuning) -> Entity {
    let mut bundle = EnemyBundle::new(position, &tuning.locomotion, Color::srgb(0.9, 0.1, 0.1));
    bundle.controller = boss_controller(tuning);
    bundle.collision_layers = CollisionLayers::new(GameLayer::Enemy, boss_collision_filters());

    let entity = commands.spawn((bundle, Boss)).id();
    info!(
        "Spawned boss {:?} at {:?} with {} health",
        entity, position, tuning.locomotion.max_health
    );
    entity
}
