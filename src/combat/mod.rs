//! Combat domain: health, the player's gun, enemy and boss controllers, and
//! the damage and death flow between them.

pub mod ai;
mod components;
mod events;
mod resources;
mod shooting;
mod spawn;
pub(crate) mod systems;

#[cfg(test)]
mod tests;

pub use ai::{EnemyController, EnemyJump, EnemySenses, TargetInfo};
pub use components::{Boss, Bullet, ContactDamage, Dying, Enemy, Health, Lifetime, Team};
pub use events::{DamageEvent, DeathEvent};
pub use resources::{BossTuning, EnemyCapabilities, EnemySenseTuning, EnemyTuning, GunTuning};
pub use shooting::{Gun, aim_direction, spawn_bullet};
pub use spawn::{EnemyBundle, spawn_boss, spawn_enemy};

use bevy::prelude::*;

use crate::combat::ai::boss::announce_boss_defeat;
use crate::combat::systems::{
    apply_damage, detect_bullet_hits, drive_enemies, fire_player_gun, process_deaths,
    resolve_contact_hits, tick_lifetimes,
};
use crate::core::{GameState, TickSet};
use crate::level::systems::move_platforms;
use crate::movement::systems::drive_player_locomotion;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GunTuning>()
            .init_resource::<EnemyTuning>()
            .init_resource::<BossTuning>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_systems(
                FixedUpdate,
                (resolve_contact_hits, detect_bullet_hits)
                    .chain()
                    .in_set(TickSet::Reactions)
                    .after(move_platforms)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                (apply_damage, process_deaths)
                    .chain()
                    .in_set(TickSet::Damage)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                drive_enemies
                    .in_set(TickSet::Locomotion)
                    .after(drive_player_locomotion)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                (fire_player_gun, tick_lifetimes, announce_boss_defeat)
                    .chain()
                    .in_set(TickSet::Combat)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
