//! Debug domain: debug systems for hotkeys and runtime tweaks.

use bevy::prelude::*;

use crate::combat::{BossTuning, EnemyController, EnemyTuning, Health, spawn_boss, spawn_enemy};
use crate::debug::state::{ActorSnapshot, DebugState, snapshot_json};
use crate::level::LevelEntity;
use crate::movement::{LocomotionController, MovementTuning, Player};

/// F1 logs the player and enemy controllers as JSON.
pub(crate) fn log_snapshot(
    keyboard: Res<ButtonInput<KeyCode>>,
    player_query: Query<(Entity, &Transform, &LocomotionController, Option<&Health>), With<Player>>,
    enemy_query: Query<(Entity, &Transform, &EnemyController, Option<&Health>)>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }

    for (entity, transform, controller, health) in &player_query {
        let snapshot = ActorSnapshot::new(
            entity,
            transform.translation.truncate(),
            health.map(|h| (h.current, h.max)),
            controller,
        );
        match snapshot_json(&snapshot) {
            Ok(json) => info!("[DEBUG] Player snapshot:\n{}", json),
            Err(e) => warn!("[DEBUG] Failed to serialize player snapshot: {}", e),
        }
    }

    for (entity, transform, controller, health) in &enemy_query {
        let snapshot = ActorSnapshot::new(
            entity,
            transform.translation.truncate(),
            health.map(|h| (h.current, h.max)),
            controller,
        );
        match snapshot_json(&snapshot) {
            Ok(json) => info!("[DEBUG] Enemy snapshot:\n{}", json),
            Err(e) => warn!("[DEBUG] Failed to serialize enemy snapshot: {}", e),
        }
    }
}

/// Handle Ctrl+key shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
    mut player_query: Query<(&Transform, &mut Health), With<Player>>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+I: Toggle invincibility
    if keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        let msg = if debug_state.invincible {
            "Invincibility ON"
        } else {
            "Invincibility OFF"
        };
        info!("[DEBUG] {}", msg);
    }

    let Ok((transform, mut health)) = player_query.single_mut() else {
        return;
    };
    let player_pos = transform.translation.truncate();

    // Ctrl+H: Full heal
    if keyboard.just_pressed(KeyCode::KeyH) {
        let max = health.max;
        let healed = health.heal(max);
        info!("[DEBUG] Healed {} ({}/{})", healed, health.current, health.max);
    }

    // Ctrl+E: Spawn enemy beside the player
    if keyboard.just_pressed(KeyCode::KeyE) {
        let entity = spawn_enemy(&mut commands, player_pos + Vec2::new(100.0, 0.0), &enemy_tuning);
        commands.entity(entity).insert(LevelEntity);
    }

    // Ctrl+B: Spawn boss beside the player
    if keyboard.just_pressed(KeyCode::KeyB) {
        let entity = spawn_boss(&mut commands, player_pos + Vec2::new(150.0, 0.0), &boss_tuning);
        commands.entity(entity).insert(LevelEntity);
    }
}

/// Keep the player topped up and shielded from contact hits.
pub(crate) fn apply_invincibility(
    tuning: Res<MovementTuning>,
    mut player_query: Query<(&mut Health, &mut LocomotionController), With<Player>>,
) {
    for (mut health, mut controller) in &mut player_query {
        if !controller.is_invulnerable() {
            controller
                .timers
                .invulnerability
                .start(tuning.hit_invulnerability);
        }
        if health.current < health.max {
            health.current = health.max;
        }
    }
}
