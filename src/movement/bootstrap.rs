//! Movement domain: player spawn from the loaded tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Gun, GunTuning, Health, Team};
use crate::movement::stats::StatBlock;
use crate::movement::{GameLayer, LocomotionCapabilities, LocomotionController, MovementTuning, Player};

pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);
pub const PLAYER_SPAWN: Vec2 = Vec2::new(-400.0, -120.0);

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    gun: Res<GunTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let stats = StatBlock::from_tuning(&tuning, &gun);
    info!(
        "Spawning player: move_speed={}, jump_power={}, jump_charges={}, health={}",
        stats.move_speed, stats.jump_power, stats.max_jump_charges, tuning.max_health
    );

    commands.spawn((
        // Identity & locomotion
        (
            Player,
            Team::Player,
            LocomotionController::new(LocomotionCapabilities::default(), stats),
        ),
        // Combat
        (Health::new(tuning.max_health), Gun::default()),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(tuning.base_gravity),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::Platform,
                    GameLayer::Enemy,
                    GameLayer::Hazard,
                    GameLayer::Pickup,
                ],
            ),
        ),
    ));
}
