//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::Serialize;

use crate::core::Facing;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid floors
    Ground,
    /// Wall surfaces (slide and wall-jump targets)
    Wall,
    /// Platforms that actors can drop through
    Platform,
    /// Player character
    Player,
    /// Enemy characters, bosses included
    Enemy,
    /// Player projectiles
    Bullet,
    /// Traps and bounce pads
    Hazard,
    /// Collectible items
    Pickup,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for drop-through platform colliders
#[derive(Component, Debug)]
pub struct Platform;

/// Per-tick contact snapshot. Every field is overwritten on each probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ContactState {
    pub on_ground: bool,
    pub on_wall: bool,
    pub on_platform: bool,
    /// Side of the touched wall, `None` when not touching one
    pub wall_direction: Option<Facing>,
}

/// What a locomotion controller is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct LocomotionCapabilities {
    pub wall_jump: bool,
    pub dash: bool,
    pub drop_through: bool,
}

impl Default for LocomotionCapabilities {
    fn default() -> Self {
        Self {
            wall_jump: true,
            dash: true,
            drop_through: true,
        }
    }
}
