//! Debug domain: hotkeys for fast iteration and state snapshots.
//!
//! - F1 logs a JSON snapshot of the player and every enemy controller
//! - Ctrl+I toggles invincibility
//! - Ctrl+H fully heals the player
//! - Ctrl+E / Ctrl+B spawn an enemy or the boss beside the player

mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use state::{ActorSnapshot, DebugState, snapshot_json};

use bevy::prelude::*;

use crate::combat::systems::resolve_contact_hits;
use crate::core::{GameState, TickSet};
use crate::debug::systems::{apply_invincibility, handle_debug_hotkeys, log_snapshot};
use crate::level::systems::move_platforms;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (log_snapshot, handle_debug_hotkeys)
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                apply_invincibility
                    .in_set(TickSet::Reactions)
                    .after(move_platforms)
                    .before(resolve_contact_hits)
                    .run_if(|state: Res<DebugState>| state.invincible),
            );
    }
}
