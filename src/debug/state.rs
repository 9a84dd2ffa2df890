//! Debug domain: debug mode state and snapshot formatting.

use bevy::prelude::*;
use serde::Serialize;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the player ignores damage
    pub invincible: bool,
}

/// One actor as logged by the snapshot hotkey.
#[derive(Debug, Serialize)]
pub struct ActorSnapshot<'a, C: Serialize> {
    pub entity: String,
    pub position: (f32, f32),
    pub health: Option<(f32, f32)>,
    pub controller: &'a C,
}

impl<'a, C: Serialize> ActorSnapshot<'a, C> {
    pub fn new(entity: Entity, position: Vec2, health: Option<(f32, f32)>, controller: &'a C) -> Self {
        Self {
            entity: format!("{:?}", entity),
            position: (position.x, position.y),
            health,
            controller,
        }
    }
}

pub fn snapshot_json<T: Serialize>(snapshot: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}
