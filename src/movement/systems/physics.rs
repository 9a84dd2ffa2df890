//! Movement domain: avian2d adapters for the controller collaborator traits.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::{BodyActuator, Facing, PhysicsQuery, RayHit};
use crate::movement::GameLayer;

/// Spatial queries on behalf of one actor, which never detects itself.
pub(crate) struct AvianQuery<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
    exclude: Entity,
}

impl<'a, 'w, 's> AvianQuery<'a, 'w, 's> {
    pub(crate) fn new(spatial: &'a SpatialQuery<'w, 's>, exclude: Entity) -> Self {
        Self { spatial, exclude }
    }

    fn filter(&self, mask: LayerMask) -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask(mask).with_excluded_entities([self.exclude])
    }
}

impl PhysicsQuery for AvianQuery<'_, '_, '_> {
    fn overlap_box(&self, center: Vec2, half_extents: Vec2, mask: LayerMask) -> bool {
        let shape = Collider::rectangle(half_extents.x * 2.0, half_extents.y * 2.0);
        !self
            .spatial
            .shape_intersections(&shape, center, 0.0, &self.filter(mask))
            .is_empty()
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let direction = Dir2::new(direction).ok()?;
        self.spatial
            .cast_ray(origin, direction, max_distance, true, &self.filter(mask))
            .map(|hit| RayHit {
                distance: hit.distance,
            })
    }
}

/// Body write access for one actor. Facing is shown by mirroring the sprite.
pub(crate) struct AvianBody<'a> {
    pub velocity: &'a mut LinearVelocity,
    pub gravity: &'a mut GravityScale,
    pub layers: &'a mut CollisionLayers,
    pub sprite: &'a mut Sprite,
}

impl BodyActuator for AvianBody<'_> {
    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity.0 = scale;
    }

    fn set_facing(&mut self, facing: Facing) {
        self.sprite.flip_x = facing == Facing::Left;
    }

    fn set_collision_enabled(&mut self, layer: GameLayer, enabled: bool) {
        if enabled {
            self.layers.filters.add(layer);
        } else {
            self.layers.filters.remove(layer);
        }
    }
}
