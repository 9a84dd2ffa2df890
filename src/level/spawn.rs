//! Level domain: spawning the level layout.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{BossTuning, EnemyTuning, spawn_boss, spawn_enemy};
use crate::level::components::{BouncePad, LevelEntity, Pickup, SpikeTrap, TriggerCooldown};
use crate::level::data::{Block, HazardKind, LevelLayout, PickupKind};
use crate::level::platforms::{FallingPlatform, MovingPlatform};
use crate::level::resources::HazardTuning;
use crate::movement::{GameLayer, Ground, Platform, Wall};

pub(crate) fn spawn_level(
    mut commands: Commands,
    layout: Res<LevelLayout>,
    hazard_tuning: Res<HazardTuning>,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let platform_color = Color::srgb(0.55, 0.45, 0.3);
    let solid_filters = [GameLayer::Player, GameLayer::Enemy];

    for block in &layout.ground {
        let entity = spawn_block(&mut commands, block, ground_color, GameLayer::Ground, solid_filters);
        commands.entity(entity).insert(Ground);
    }
    for block in &layout.walls {
        let entity = spawn_block(&mut commands, block, wall_color, GameLayer::Wall, solid_filters);
        commands.entity(entity).insert(Wall);
    }
    for block in &layout.platforms {
        let entity =
            spawn_block(&mut commands, block, platform_color, GameLayer::Platform, solid_filters);
        commands.entity(entity).insert(Platform);
    }

    for def in &layout.moving_platforms {
        let from = Vec2::new(def.from.0, def.from.1);
        let to = Vec2::new(def.to.0, def.to.1);
        let block = Block::new(def.from, def.size);
        let entity =
            spawn_block(&mut commands, &block, platform_color, GameLayer::Platform, solid_filters);
        commands.entity(entity).insert((
            Platform,
            MovingPlatform::new(from, to, hazard_tuning.platform_speed),
            RigidBody::Kinematic,
            LinearVelocity::default(),
            CollidingEntities::default(),
        ));
    }
    for block in &layout.falling_platforms {
        let entity = spawn_block(
            &mut commands,
            block,
            Color::srgb(0.65, 0.4, 0.3),
            GameLayer::Platform,
            solid_filters,
        );
        commands.entity(entity).insert((
            Platform,
            FallingPlatform::default(),
            CollisionEventsEnabled,
            LockedAxes::ROTATION_LOCKED,
        ));
    }

    for &(x, y) in &layout.enemies {
        let entity = spawn_enemy(&mut commands, Vec2::new(x, y), &enemy_tuning);
        commands.entity(entity).insert(LevelEntity);
    }
    if let Some((x, y)) = layout.boss {
        let entity = spawn_boss(&mut commands, Vec2::new(x, y), &boss_tuning);
        commands.entity(entity).insert(LevelEntity);
    }

    let hazard_size = Vec2::new(hazard_tuning.hazard_size.0, hazard_tuning.hazard_size.1);
    for &(kind, (x, y)) in &layout.hazards {
        let color = match kind {
            HazardKind::Spikes => Color::srgb(0.7, 0.7, 0.75),
            HazardKind::BouncePad => Color::srgb(0.3, 0.8, 0.5),
        };
        let mut entity = commands.spawn((
            LevelEntity,
            TriggerCooldown::default(),
            Sprite {
                color,
                custom_size: Some(hazard_size),
                ..default()
            },
            Transform::from_xyz(x, y, 0.0),
            sensor(GameLayer::Hazard, Collider::rectangle(hazard_size.x, hazard_size.y)),
        ));
        match kind {
            HazardKind::Spikes => entity.insert(SpikeTrap),
            HazardKind::BouncePad => entity.insert(BouncePad),
        };
    }

    let pickup_size = hazard_tuning.pickup_size;
    for &(kind, (x, y)) in &layout.pickups {
        let color = match kind {
            PickupKind::Health => Color::srgb(0.9, 0.2, 0.3),
            PickupKind::WizardHat => Color::srgb(0.5, 0.3, 0.9),
            PickupKind::Star => Color::srgb(1.0, 0.85, 0.2),
        };
        commands.spawn((
            LevelEntity,
            Pickup(kind),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(pickup_size)),
                ..default()
            },
            Transform::from_xyz(x, y, 0.0),
            sensor(GameLayer::Pickup, Collider::rectangle(pickup_size, pickup_size)),
        ));
    }

    info!(
        "Level spawned: {} ground, {} walls, {} platforms, {} enemies, boss={}",
        layout.ground.len(),
        layout.walls.len(),
        layout.platforms.len() + layout.moving_platforms.len() + layout.falling_platforms.len(),
        layout.enemies.len(),
        layout.boss.is_some()
    );
}

fn spawn_block(
    commands: &mut Commands,
    block: &Block,
    color: Color,
    layer: GameLayer,
    filters: [GameLayer; 2],
) -> Entity {
    let size = block.size();
    let center = block.center();
    commands
        .spawn((
            LevelEntity,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(layer, filters),
        ))
        .id()
}

fn sensor(layer: GameLayer, collider: Collider) -> impl Bundle {
    (
        RigidBody::Static,
        collider,
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(layer, [GameLayer::Player]),
    )
}
