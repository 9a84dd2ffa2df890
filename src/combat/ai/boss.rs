//! Combat domain: boss controller setup and defeat handling.
//!
//! The boss is an ordinary enemy controller built from [`BossTuning`], which
//! turns jumping, dropping through platforms and contact staggering off.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::ai::enemy::EnemyController;
use crate::combat::components::Boss;
use crate::combat::events::DeathEvent;
use crate::combat::resources::BossTuning;
use crate::movement::GameLayer;

pub fn boss_controller(tuning: &BossTuning) -> EnemyController {
    EnemyController::new(tuning.locomotion.capabilities)
}

/// Layers the boss collides with. Ordinary enemies are left out so they
/// never block or shove it.
pub fn boss_collision_filters() -> [GameLayer; 5] {
    [
        GameLayer::Ground,
        GameLayer::Wall,
        GameLayer::Platform,
        GameLayer::Player,
        GameLayer::Bullet,
    ]
}

pub(crate) fn announce_boss_defeat(
    mut death_events: MessageReader<DeathEvent>,
    boss_query: Query<(), With<Boss>>,
) {
    for event in death_events.read() {
        if boss_query.contains(event.entity) {
            info!("Boss defeated: {:?}", event.entity);
        }
    }
}
