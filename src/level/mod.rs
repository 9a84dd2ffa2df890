//! Level domain: layout spawning, hazards, pickups, moving and falling
//! platforms, and run restarts.

mod components;
mod data;
mod hazards;
mod platforms;
mod resources;
mod spawn;
pub(crate) mod systems;

#[cfg(test)]
mod tests;

pub use components::{BouncePad, LevelEntity, Pickup, SpikeTrap, TriggerCooldown};
pub use data::{Block, HazardKind, LevelLayout, MovingPlatformDef, PickupKind};
pub use hazards::{apply_pickup, launch, spike_knockback};
pub use platforms::{FallStep, FallingPlatform, MovingPlatform};
pub use resources::{HazardTuning, Progress};

use bevy::prelude::*;

use crate::combat::systems::detect_bullet_hits;
use crate::core::{GameState, TickSet};
use crate::level::spawn::spawn_level;
use crate::level::systems::{
    announce_game_over, collect_pickups, drop_falling_platforms, move_platforms, restart_run,
    tick_trigger_cooldowns, touch_falling_platforms, trigger_hazards,
};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelLayout>()
            .init_resource::<HazardTuning>()
            .init_resource::<Progress>()
            .add_systems(OnEnter(GameState::Run), spawn_level)
            .add_systems(OnEnter(GameState::GameOver), announce_game_over)
            .add_systems(Update, restart_run.run_if(in_state(GameState::GameOver)))
            .add_systems(
                FixedUpdate,
                move_platforms
                    .in_set(TickSet::Reactions)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                (trigger_hazards, collect_pickups, touch_falling_platforms)
                    .chain()
                    .in_set(TickSet::Reactions)
                    .after(detect_bullet_hits)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                (tick_trigger_cooldowns, drop_falling_platforms)
                    .chain()
                    .in_set(TickSet::Cleanup)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
