//! Level domain: hazard triggers, pickups and the run restart.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{Bullet, DamageEvent, Enemy, Health};
use crate::core::{ActorNotification, GameState, MessageSink};
use crate::level::components::{BouncePad, LevelEntity, Pickup, SpikeTrap, TriggerCooldown};
use crate::level::data::PickupKind;
use crate::level::hazards::{apply_pickup, launch, spike_knockback};
use crate::level::platforms::{FallStep, FallingPlatform, MovingPlatform};
use crate::level::resources::{HazardTuning, Progress};
use crate::movement::systems::AvianBody;
use crate::movement::{LocomotionController, Player};

/// Other side of a collision pair that involves `entity`.
fn partner(event: &CollisionStart, entity: Entity) -> Option<Entity> {
    if event.collider1 == entity {
        Some(event.collider2)
    } else if event.collider2 == entity {
        Some(event.collider1)
    } else {
        None
    }
}

pub(crate) fn trigger_hazards(
    tuning: Res<HazardTuning>,
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut notifications: MessageWriter<ActorNotification>,
    mut hazard_query: Query<(Has<SpikeTrap>, Has<BouncePad>, &mut TriggerCooldown)>,
    mut player_query: Query<
        (
            Entity,
            &mut LocomotionController,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut CollisionLayers,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    let Ok((player, mut controller, mut velocity, mut gravity, mut layers, mut sprite)) =
        player_query.single_mut()
    else {
        return;
    };

    for event in collision_events.read() {
        let Some(hazard) = partner(event, player) else {
            continue;
        };
        let Ok((is_spikes, is_pad, mut cooldown)) = hazard_query.get_mut(hazard) else {
            continue;
        };

        if is_spikes && cooldown.try_trigger(tuning.spike_cooldown) {
            controller.queue_knockback(spike_knockback(&tuning));
            damage_events.write(DamageEvent {
                source: hazard,
                target: player,
                amount: tuning.spike_damage,
            });
            debug!("Spike trap {:?} triggered", hazard);
        } else if is_pad && cooldown.try_trigger(tuning.bounce_cooldown) {
            let mut body = AvianBody {
                velocity: &mut *velocity,
                gravity: &mut *gravity,
                layers: &mut *layers,
                sprite: &mut *sprite,
            };
            launch(&tuning, &mut body, &mut MessageSink::new(player, &mut notifications));
            debug!("Bounce pad {:?} triggered", hazard);
        }
    }
}

pub(crate) fn collect_pickups(
    mut commands: Commands,
    tuning: Res<HazardTuning>,
    mut progress: ResMut<Progress>,
    mut collision_events: MessageReader<CollisionStart>,
    pickup_query: Query<&Pickup>,
    mut player_query: Query<(Entity, &mut LocomotionController, &mut Health), With<Player>>,
) {
    let Ok((player, mut controller, mut health)) = player_query.single_mut() else {
        return;
    };
    let mut collected: Vec<Entity> = Vec::new();

    for event in collision_events.read() {
        let Some(item) = partner(event, player) else {
            continue;
        };
        if collected.contains(&item) {
            continue;
        }
        let Ok(pickup) = pickup_query.get(item) else {
            continue;
        };
        // Stars stay put once the goal is reached
        if pickup.0 == PickupKind::Star && progress.complete {
            continue;
        }

        let completed = apply_pickup(
            pickup.0,
            &tuning,
            &mut controller,
            &mut health,
            &mut progress,
        );
        info!("Collected {:?}", pickup.0);
        if completed {
            info!("Level complete: {} stars collected", progress.collected);
        }
        commands.entity(item).despawn();
        collected.push(item);
    }
}

/// Drive moving platforms and carry whoever stands on top along with them.
pub(crate) fn move_platforms(
    time: Res<Time>,
    mut platform_query: Query<(
        &Transform,
        &mut MovingPlatform,
        &mut LinearVelocity,
        &CollidingEntities,
    )>,
    mut rider_query: Query<
        &mut Transform,
        (Or<(With<Player>, With<Enemy>)>, Without<MovingPlatform>),
    >,
) {
    let dt = time.delta_secs();
    for (transform, mut platform, mut velocity, colliding) in &mut platform_query {
        let position = transform.translation.truncate();
        velocity.0 = platform.velocity(position, dt);

        for &rider in colliding.iter() {
            let Ok(mut rider_transform) = rider_query.get_mut(rider) else {
                continue;
            };
            if rider_transform.translation.y > position.y {
                rider_transform.translation.x += velocity.x * dt;
            }
        }
    }
}

pub(crate) fn touch_falling_platforms(
    tuning: Res<HazardTuning>,
    mut collision_events: MessageReader<CollisionStart>,
    mut platform_query: Query<&mut FallingPlatform>,
    player_query: Query<Entity, With<Player>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    for event in collision_events.read() {
        let Some(other) = partner(event, player) else {
            continue;
        };
        let Ok(mut platform) = platform_query.get_mut(other) else {
            continue;
        };
        if platform.touch(tuning.fall_wait) {
            debug!("Falling platform {:?} touched", other);
        }
    }
}

pub(crate) fn drop_falling_platforms(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<HazardTuning>,
    mut query: Query<(Entity, &mut FallingPlatform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut platform) in &mut query {
        match platform.tick(dt, tuning.fall_remove_wait) {
            FallStep::Hold => {}
            FallStep::Drop => {
                commands.entity(entity).insert(RigidBody::Dynamic);
            }
            FallStep::Remove => {
                commands.entity(entity).despawn();
            }
        }
    }
}

pub(crate) fn tick_trigger_cooldowns(time: Res<Time>, mut query: Query<&mut TriggerCooldown>) {
    let dt = time.delta_secs();
    for mut cooldown in &mut query {
        cooldown.0.tick(dt);
    }
}

pub(crate) fn announce_game_over(progress: Res<Progress>) {
    info!(
        "Game over with {} stars collected. Press R to restart",
        progress.collected
    );
}

/// Tear the level down, clear progress and start a fresh run.
pub(crate) fn restart_run(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut progress: ResMut<Progress>,
    query: Query<Entity, Or<(With<LevelEntity>, With<Player>, With<Bullet>)>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }
    for entity in &query {
        commands.entity(entity).despawn();
    }
    *progress = Progress::default();
    next_state.set(GameState::Run);
    info!("Restarting run");
}
