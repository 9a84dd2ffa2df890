//! Movement domain: fixed-step bridge between the ECS and the player controller.

use avian2d::prelude::*;
use bevy::color::Mix;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{ActorNotification, MessageSink};
use crate::movement::systems::physics::{AvianBody, AvianQuery};
use crate::movement::{ActionState, LocomotionController, MovementTuning, Player, TickFrame};

pub(crate) fn drive_player_locomotion(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    actions: Res<ActionState>,
    spatial_query: SpatialQuery,
    mut notifications: MessageWriter<ActorNotification>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &mut LocomotionController,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut CollisionLayers,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut controller, mut velocity, mut gravity, mut layers, mut sprite) in
        &mut query
    {
        let physics = AvianQuery::new(&spatial_query, entity);
        let mut body = AvianBody {
            velocity: &mut *velocity,
            gravity: &mut *gravity,
            layers: &mut *layers,
            sprite: &mut *sprite,
        };
        let mut sink = MessageSink::new(entity, &mut notifications);

        controller.step(
            TickFrame {
                dt,
                position: transform.translation.truncate(),
            },
            &tuning,
            &*actions,
            &physics,
            &mut body,
            &mut sink,
        );
    }
}

/// Tint the player toward gold while the power-up hold charges.
pub(crate) fn tint_hold_charge(
    tuning: Res<MovementTuning>,
    mut query: Query<(&LocomotionController, &mut Sprite), With<Player>>,
) {
    let base = Srgba::rgb(0.9, 0.9, 0.9);
    let charged = Srgba::rgb(1.0, 0.8, 0.2);
    for (controller, mut sprite) in &mut query {
        let ratio = controller.hold.fill_ratio(tuning.power_up.hold_time);
        let target = if controller.timers.power_up.is_active() {
            charged
        } else {
            base.mix(&charged, ratio)
        };
        sprite.color = target.into();
    }
}
