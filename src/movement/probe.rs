//! Movement domain: contact probing shared by the player and enemy controllers.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::core::{Facing, PhysicsQuery};
use crate::movement::{ContactState, GameLayer, ProbeGeometry};

pub fn ground_mask(ignore_platforms: bool) -> LayerMask {
    if ignore_platforms {
        LayerMask::from(GameLayer::Ground)
    } else {
        LayerMask::from([GameLayer::Ground, GameLayer::Platform])
    }
}

/// Offset of a probe relative to the body, mirrored on x for left-facing actors.
pub fn facing_offset(offset: (f32, f32), facing: Facing) -> Vec2 {
    Vec2::new(offset.0 * facing.sign(), offset.1)
}

/// Query ground, platform and wall contact for one body.
///
/// Platforms count as ground unless `ignore_platforms` is set, which is the
/// case while the actor is dropping through them.
pub fn probe_contacts(
    physics: &impl PhysicsQuery,
    position: Vec2,
    facing: Facing,
    geometry: &ProbeGeometry,
    ignore_platforms: bool,
) -> ContactState {
    let ground_center = position + Vec2::from(geometry.ground_offset);
    let ground_half = Vec2::from(geometry.ground_half_extents);
    let on_ground = physics.overlap_box(ground_center, ground_half, ground_mask(ignore_platforms));
    let on_platform = !ignore_platforms
        && physics.overlap_box(ground_center, ground_half, LayerMask::from(GameLayer::Platform));

    let wall_center = position + facing_offset(geometry.wall_offset, facing);
    let on_wall = physics.overlap_box(
        wall_center,
        Vec2::from(geometry.wall_half_extents),
        LayerMask::from(GameLayer::Wall),
    );

    ContactState {
        on_ground,
        on_wall,
        on_platform,
        wall_direction: on_wall.then_some(facing),
    }
}
