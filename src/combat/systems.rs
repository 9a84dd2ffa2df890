//! Combat domain: enemy driving, shooting, damage and death systems.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::ai::{EnemyController, TargetInfo};
use crate::combat::components::{Boss, Bullet, ContactDamage, Dying, Health, Lifetime, Team};
use crate::combat::events::{DamageEvent, DeathEvent};
use crate::combat::resources::{BossTuning, EnemyTuning, GunTuning};
use crate::combat::shooting::{Gun, aim_direction, spawn_bullet};
use crate::core::{
    Action, ActorNotification, Countdown, DamageTarget, GameState, InputSource, MessageSink,
    Notification, NotificationSink,
};
use crate::movement::systems::{AvianBody, AvianQuery};
use crate::movement::{ActionState, LocomotionController, MovementTuning, Player, TickFrame};

pub(crate) fn drive_enemies(
    time: Res<Time>,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
    spatial_query: SpatialQuery,
    mut notifications: MessageWriter<ActorNotification>,
    player_query: Query<(&Transform, &LocomotionController), With<Player>>,
    mut enemy_query: Query<
        (
            Entity,
            &Transform,
            &mut EnemyController,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut CollisionLayers,
            &mut Sprite,
            Has<Boss>,
        ),
        (Without<Player>, Without<Dying>),
    >,
) {
    let Ok((player_transform, player)) = player_query.single() else {
        return;
    };
    let target = TargetInfo {
        position: player_transform.translation.truncate(),
        on_platform: player.contact.on_platform,
        wall_sliding: player.wall_sliding,
    };
    let dt = time.delta_secs();

    for (entity, transform, mut controller, mut velocity, mut gravity, mut layers, mut sprite, is_boss) in
        &mut enemy_query
    {
        let tuning = if is_boss {
            &boss_tuning.locomotion
        } else {
            &*enemy_tuning
        };
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
            &target,
            tuning,
            &physics,
            &mut body,
            &mut sink,
        );
    }
}

/// Enemies touching the player deal contact damage, each gated by its own
/// hit cooldown and by the player's invulnerability.
pub(crate) fn resolve_contact_hits(
    movement_tuning: Res<MovementTuning>,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut player_query: Query<(Entity, &Transform, &mut LocomotionController), With<Player>>,
    mut enemy_query: Query<
        (
            Entity,
            &Transform,
            &mut EnemyController,
            &ContactDamage,
            &CollidingEntities,
            Has<Boss>,
        ),
        (Without<Player>, Without<Dying>),
    >,
) {
    let Ok((player, player_transform, mut locomotion)) = player_query.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (enemy, transform, mut controller, damage, colliding, is_boss) in &mut enemy_query {
        if !colliding.contains(&player) || !controller.can_contact_hit() {
            continue;
        }
        let enemy_pos = transform.translation.truncate();
        if !locomotion.receive_hit(player_pos, enemy_pos, &movement_tuning) {
            continue;
        }

        let tuning = if is_boss {
            &boss_tuning.locomotion
        } else {
            &*enemy_tuning
        };
        controller.register_contact_hit(tuning);
        damage_events.write(DamageEvent {
            source: enemy,
            target: player,
            amount: damage.0,
        });
        debug!("Contact hit: {:?} -> {:?} for {}", enemy, player, damage.0);
    }
}

pub(crate) fn detect_bullet_hits(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    bullet_query: Query<&Bullet>,
    target_query: Query<&Team, (With<Health>, Without<Dying>)>,
) {
    let mut spent: Vec<Entity> = Vec::new();

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (bullet_entity, target) in pairs {
            if spent.contains(&bullet_entity) {
                continue;
            }
            let Ok(bullet) = bullet_query.get(bullet_entity) else {
                continue;
            };
            let Ok(team) = target_query.get(target) else {
                continue;
            };
            if *team != Team::Enemy {
                continue;
            }

            damage_events.write(DamageEvent {
                source: bullet_entity,
                target,
                amount: bullet.damage,
            });
            commands.entity(bullet_entity).despawn();
            spent.push(bullet_entity);
        }
    }
}

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut notifications: MessageWriter<ActorNotification>,
    mut query: Query<&mut Health, Without<Dying>>,
) {
    for event in damage_events.read() {
        let Ok(mut health) = query.get_mut(event.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        health.apply_damage(event.amount);
        let mut sink = MessageSink::new(event.target, &mut notifications);
        if !health.is_alive() {
            sink.notify(Notification::Died);
            death_events.write(DeathEvent {
                entity: event.target,
            });
        } else {
            sink.notify(Notification::Hit);
        }
        debug!(
            "Damage {:?} -> {:?}: {} ({:.0}% left)",
            event.source,
            event.target,
            event.amount,
            health.percent() * 100.0
        );
    }
}

/// The player dying ends the run; enemies linger as `Dying` before despawning.
pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    mut next_state: ResMut<NextState<GameState>>,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
    mut query: Query<(Has<Player>, Has<Boss>, &mut LinearVelocity)>,
) {
    for event in death_events.read() {
        let Ok((is_player, is_boss, mut velocity)) = query.get_mut(event.entity) else {
            continue;
        };

        if is_player {
            info!("Player died, run over");
            next_state.set(GameState::GameOver);
            continue;
        }

        let die_duration = if is_boss {
            boss_tuning.locomotion.die_duration
        } else {
            enemy_tuning.die_duration
        };
        velocity.x = 0.0;
        commands
            .entity(event.entity)
            .insert(Dying(Countdown::running(die_duration)));
    }
}

pub(crate) fn fire_player_gun(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<GunTuning>,
    actions: Res<ActionState>,
    mut notifications: MessageWriter<ActorNotification>,
    mut query: Query<(Entity, &Transform, &LocomotionController, &mut Gun), With<Player>>,
) {
    for (entity, transform, controller, mut gun) in &mut query {
        gun.tick(time.delta_secs());

        if !actions.was_pressed(Action::Shoot) || !gun.try_fire(controller.stats.fire_rate) {
            continue;
        }

        let origin = transform.translation.truncate();
        let direction = aim_direction(origin, actions.aim, controller.facing);
        spawn_bullet(&mut commands, origin, direction, &controller.stats, &tuning);
        MessageSink::new(entity, &mut notifications).notify(Notification::Shot);
    }
}

/// Despawn expired bullets and enemies whose death delay has run out.
pub(crate) fn tick_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut lifetimes: Query<(Entity, &mut Lifetime)>,
    mut dying: Query<(Entity, &mut Dying), Without<Lifetime>>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut lifetimes {
        if lifetime.0.tick(dt) {
            commands.entity(entity).despawn();
        }
    }
    for (entity, mut dying) in &mut dying {
        if dying.0.tick(dt) {
            debug!("Despawning dead actor {:?}", entity);
            commands.entity(entity).despawn();
        }
    }
}
