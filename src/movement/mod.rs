//! Movement domain: player locomotion controller, contact probing and input.

mod arbiter;
mod bootstrap;
mod components;
mod controller;
mod dash;
mod integrator;
mod probe;
mod resources;
pub(crate) mod stats;
pub(crate) mod systems;


pub use bootstrap::{PLAYER_SIZE, PLAYER_SPAWN};
pub use components::{
    ContactState, GameLayer, Ground, LocomotionCapabilities, Platform, Player, Wall,
};
pub use controller::{LocomotionController, LocomotionTimers, MotionRequest, TickFrame};
pub use integrator::knockback_velocity;
pub use probe::{facing_offset, ground_mask, probe_contacts};
pub use resources::{ActionState, MovementTuning, PowerUpDef, ProbeGeometry};
pub use stats::{HoldCharge, StatBlock, StatDelta};

use bevy::prelude::*;

use crate::core::{GameState, TickSet};
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    clear_action_edges, drive_player_locomotion, sample_actions, tint_hold_charge,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<ActionState>()
            .add_systems(OnEnter(GameState::Run), spawn_player)
            .add_systems(Update, sample_actions)
            .add_systems(Update, tint_hold_charge.run_if(in_state(GameState::Run)))
            .add_systems(
                FixedUpdate,
                drive_player_locomotion
                    .in_set(TickSet::Locomotion)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(FixedUpdate, clear_action_edges.in_set(TickSet::Cleanup));
    }
}
