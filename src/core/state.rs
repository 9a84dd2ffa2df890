//! Core domain: game state definitions for the run flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Tuning data is being loaded
    #[default]
    Boot,
    Run,
    /// The player died; actors stop thinking
    GameOver,
}

/// Ordering of the fixed-step gameplay tick.
///
/// Contacts and triggers queue their reactions first so knockback lands in
/// the same tick. Damage from those reactions is applied before locomotion
/// resolves every controller. Combat then spawns and despawns projectiles,
/// and cleanup clears the latched input edges last.
///
/// Reactions run in a fixed order: moving platforms carry their riders, then
/// contact hits and bullet hits resolve, then hazards, pickups and falling
/// platforms. A spike hit in the same tick as an enemy hit therefore replaces
/// the enemy's knockback. Within locomotion the player steps before enemies,
/// so enemies chase this tick's player state.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Reactions,
    Damage,
    Locomotion,
    Combat,
    Cleanup,
}
