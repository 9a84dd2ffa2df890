//! Combat domain: tests for health, the gun and the enemy controller.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use super::ai::{decide_jump, should_drop};
use super::{
    BossTuning, EnemyCapabilities, EnemyController, EnemyJump, EnemySenses, EnemyTuning, Gun,
    Health, TargetInfo, aim_direction,
};
use crate::core::{BodyActuator, DamageTarget, Facing, Notification, PhysicsQuery, RayHit};
use crate::movement::{ContactState, GameLayer, TickFrame};

const DT: f32 = 1.0 / 32.0;

// -----------------------------------------------------------------------------
// Fakes
// -----------------------------------------------------------------------------

/// Answers each enemy probe from a flag, keyed on ray direction and layer.
#[derive(Debug, Clone, Copy)]
struct Scene {
    land: bool,
    platform: bool,
    land_in_front: bool,
    floor_ahead: bool,
    platform_overhead: bool,
    player_above: bool,
    player_below: bool,
    player_in_reach: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            land: true,
            platform: false,
            land_in_front: false,
            floor_ahead: true,
            platform_overhead: false,
            player_above: false,
            player_below: false,
            player_in_reach: false,
        }
    }
}

fn mask_has(mask: LayerMask, layer: GameLayer) -> bool {
    mask.0 & LayerMask::from(layer).0 != 0
}

impl PhysicsQuery for Scene {
    fn overlap_box(&self, _center: Vec2, _half_extents: Vec2, mask: LayerMask) -> bool {
        if mask_has(mask, GameLayer::Player) {
            return self.player_in_reach;
        }
        (self.land && mask_has(mask, GameLayer::Ground))
            || (self.platform && mask_has(mask, GameLayer::Platform))
    }

    fn raycast(&self, _origin: Vec2, direction: Vec2, _max: f32, mask: LayerMask) -> Option<RayHit> {
        let hit = if mask_has(mask, GameLayer::Player) {
            (direction.y > 0.0 && self.player_above) || (direction.y < 0.0 && self.player_below)
        } else if direction.x != 0.0 {
            self.land_in_front
        } else if direction.y > 0.0 {
            self.platform_overhead
        } else {
            self.floor_ahead
        };
        hit.then_some(RayHit { distance: 1.0 })
    }
}

#[derive(Debug, Default)]
struct FakeBody {
    velocity: Vec2,
    facing: Option<Facing>,
    disabled: Vec<GameLayer>,
}

impl BodyActuator for FakeBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }
    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }
    fn set_gravity_scale(&mut self, _scale: f32) {}
    fn set_facing(&mut self, facing: Facing) {
        self.facing = Some(facing);
    }
    fn set_collision_enabled(&mut self, layer: GameLayer, enabled: bool) {
        self.disabled.retain(|l| *l != layer);
        if !enabled {
            self.disabled.push(layer);
        }
    }
}

struct EnemyRig {
    controller: EnemyController,
    tuning: EnemyTuning,
    scene: Scene,
    target: TargetInfo,
    body: FakeBody,
    events: Vec<Notification>,
}

impl EnemyRig {
    fn new() -> Self {
        let tuning = EnemyTuning {
            jump_cooldown: 0.5,
            stop_duration: 1.0,
            drop_duration: 0.25,
            attack_cooldown: 0.5,
            hit_cooldown: 0.5,
            ..default()
        };
        Self {
            controller: EnemyController::new(tuning.capabilities),
            tuning,
            scene: Scene::default(),
            target: TargetInfo {
                position: Vec2::new(100.0, 0.0),
                ..default()
            },
            body: FakeBody::default(),
            events: Vec::new(),
        }
    }

    fn tick(&mut self) {
        self.controller.step(
            TickFrame {
                dt: DT,
                position: Vec2::ZERO,
            },
            &self.target,
            &self.tuning,
            &self.scene,
            &mut self.body,
            &mut self.events,
        );
    }

    fn tick_n(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    fn count(&self, notification: Notification) -> usize {
        self.events.iter().filter(|n| **n == notification).count()
    }
}

fn grounded_senses() -> EnemySenses {
    EnemySenses {
        contact: ContactState {
            on_ground: true,
            ..default()
        },
        direction: 1.0,
        land_in_front: true,
        ..default()
    }
}

// -----------------------------------------------------------------------------
// Health
// -----------------------------------------------------------------------------

#[test]
fn test_health_damage_and_heal_clamp() {
    let mut health = Health::new(5.0);
    assert_eq!(health.take_damage(2.0), 2.0);
    assert_eq!(health.take_damage(10.0), 3.0);
    assert!(health.is_dead());
    assert_eq!(health.heal(1.0), 1.0);
    assert_eq!(health.heal(10.0), 4.0);
    assert_eq!(health.percent(), 1.0);
}

#[test]
fn test_health_raise_max_fills_new_room() {
    let mut health = Health::new(5.0);
    health.take_damage(2.0);
    health.raise_max(1.0);
    assert_eq!(health.max, 6.0);
    assert_eq!(health.current, 4.0);
}

#[test]
fn test_health_as_damage_target() {
    let mut health = Health::new(1.0);
    assert!(health.is_alive());
    health.apply_damage(1.0);
    assert!(!health.is_alive());
}

// -----------------------------------------------------------------------------
// Gun
// -----------------------------------------------------------------------------

#[test]
fn test_gun_respects_fire_rate() {
    let mut gun = Gun::default();
    assert!(gun.try_fire(4.0));
    assert!(!gun.try_fire(4.0));

    // 4 shots per second: the next shot is due after 0.25s
    for _ in 0..7 {
        gun.tick(DT);
        assert!(!gun.try_fire(4.0));
    }
    gun.tick(DT);
    assert!(gun.try_fire(4.0));
}

#[test]
fn test_gun_never_fires_at_zero_rate() {
    let mut gun = Gun::default();
    assert!(!gun.try_fire(0.0));
}

#[test]
fn test_aim_direction_falls_back_to_facing() {
    assert_eq!(
        aim_direction(Vec2::ZERO, Some(Vec2::new(0.0, 10.0)), Facing::Right),
        Vec2::Y
    );
    assert_eq!(aim_direction(Vec2::ONE, Some(Vec2::ONE), Facing::Left), Vec2::NEG_X);
    assert_eq!(aim_direction(Vec2::ZERO, None, Facing::Right), Vec2::X);
}

// -----------------------------------------------------------------------------
// Jump and drop decisions
// -----------------------------------------------------------------------------

#[test]
fn test_gap_jump_wins_over_vertical_jump() {
    let senses = EnemySenses {
        land_in_front: false,
        gap_ahead: true,
        target_directly_above: true,
        platform_overhead: true,
        ..grounded_senses()
    };
    let target = TargetInfo {
        on_platform: true,
        wall_sliding: true,
        ..default()
    };
    assert_eq!(
        decide_jump(&senses, &target, &EnemyCapabilities::default()),
        Some(EnemyJump::Side)
    );
}

#[test]
fn test_vertical_jump_needs_reason_overhead() {
    let caps = EnemyCapabilities::default();
    let above = EnemySenses {
        target_directly_above: true,
        ..grounded_senses()
    };

    let standing = TargetInfo::default();
    assert_eq!(decide_jump(&above, &standing, &caps), None);

    let on_platform = TargetInfo {
        on_platform: true,
        ..default()
    };
    assert_eq!(decide_jump(&above, &on_platform, &caps), None);
    let with_platform = EnemySenses {
        platform_overhead: true,
        ..above
    };
    assert_eq!(
        decide_jump(&with_platform, &on_platform, &caps),
        Some(EnemyJump::Vertical)
    );

    let sliding = TargetInfo {
        wall_sliding: true,
        ..default()
    };
    assert_eq!(decide_jump(&above, &sliding, &caps), Some(EnemyJump::Vertical));
}

#[test]
fn test_no_jump_when_airborne_or_target_below() {
    let caps = EnemyCapabilities::default();
    let gap = EnemySenses {
        land_in_front: false,
        gap_ahead: true,
        ..grounded_senses()
    };

    let airborne = EnemySenses {
        contact: ContactState::default(),
        ..gap
    };
    assert_eq!(decide_jump(&airborne, &TargetInfo::default(), &caps), None);

    let below = EnemySenses {
        target_any_below: true,
        ..gap
    };
    assert_eq!(decide_jump(&below, &TargetInfo::default(), &caps), None);

    let grounded_only = EnemyCapabilities {
        jump: false,
        ..caps
    };
    assert_eq!(decide_jump(&gap, &TargetInfo::default(), &grounded_only), None);
}

#[test]
fn test_drop_requires_target_directly_below_on_platform() {
    let caps = EnemyCapabilities::default();
    let senses = EnemySenses {
        contact: ContactState {
            on_ground: true,
            on_platform: true,
            ..default()
        },
        target_any_below: true,
        target_directly_below: true,
        ..default()
    };
    assert!(should_drop(&senses, &caps));

    let off_platform = EnemySenses {
        contact: ContactState {
            on_ground: true,
            ..default()
        },
        ..senses
    };
    assert!(!should_drop(&off_platform, &caps));

    let boss = BossTuning::default().locomotion.capabilities;
    assert!(!should_drop(&senses, &boss));
}

// -----------------------------------------------------------------------------
// Controller ticks
// -----------------------------------------------------------------------------

#[test]
fn test_enemy_chases_toward_target() {
    let mut rig = EnemyRig::new();
    rig.tick();
    assert_eq!(rig.body.velocity.x, rig.tuning.move_speed);

    rig.target.position = Vec2::new(-100.0, 0.0);
    rig.tick();
    assert_eq!(rig.body.velocity.x, -rig.tuning.move_speed);
    assert_eq!(rig.controller.facing, Facing::Left);
    assert_eq!(rig.count(Notification::Flipped), 1);
}

#[test]
fn test_enemy_stops_out_of_range() {
    let mut rig = EnemyRig::new();
    rig.tick();
    rig.target.position = Vec2::new(rig.tuning.chase_range + 1.0, 0.0);
    rig.scene.land_in_front = false;
    rig.scene.floor_ahead = false;
    rig.tick();

    assert_eq!(rig.body.velocity.x, 0.0);
    assert_eq!(rig.count(Notification::Jumped), 0);
}

#[test]
fn test_enemy_gap_jump_over_vertical_jump_in_tick() {
    let mut rig = EnemyRig::new();
    rig.scene.floor_ahead = false;
    rig.scene.player_above = true;
    rig.scene.platform_overhead = true;
    rig.target = TargetInfo {
        position: Vec2::new(0.0, 100.0),
        on_platform: true,
        wall_sliding: false,
    };
    rig.tick();

    assert_eq!(
        rig.body.velocity,
        Vec2::new(rig.tuning.side_jump_speed, rig.tuning.jump_power)
    );
    assert_eq!(rig.count(Notification::Jumped), 1);
}

#[test]
fn test_enemy_jump_cooldown_pauses_chasing() {
    let mut rig = EnemyRig::new();
    rig.scene.floor_ahead = false;
    rig.tick();
    assert_eq!(rig.count(Notification::Jumped), 1);

    // jump_cooldown is 0.5s: 16 ticks including the jump tick
    rig.body.velocity = Vec2::ZERO;
    rig.tick_n(15);
    assert_eq!(rig.count(Notification::Jumped), 1);
    assert_eq!(rig.body.velocity, Vec2::ZERO);

    rig.tick();
    assert_eq!(rig.count(Notification::Jumped), 2);
}

#[test]
fn test_stop_moving_retrigger_keeps_newer_deadline() {
    let mut rig = EnemyRig::new();
    rig.controller.trigger_stop_moving(1.0);
    rig.tick_n(16);
    assert_eq!(rig.controller.timers.stop_moving.remaining(), 0.5);

    rig.controller.trigger_stop_moving(1.0);
    assert_eq!(rig.controller.timers.stop_moving.remaining(), 1.0);

    // The first deadline would have passed here
    rig.tick_n(16);
    assert!(rig.controller.timers.stop_moving.is_active());
    assert_eq!(rig.body.velocity.x, 0.0);

    rig.tick_n(16);
    assert!(!rig.controller.timers.stop_moving.is_active());
    rig.tick();
    assert_eq!(rig.body.velocity.x, rig.tuning.move_speed);
}

#[test]
fn test_contact_hit_cooldown_and_stagger() {
    let mut rig = EnemyRig::new();
    assert!(rig.controller.can_contact_hit());
    let tuning = rig.tuning.clone();
    rig.controller.register_contact_hit(&tuning);
    assert!(!rig.controller.can_contact_hit());
    assert!(rig.controller.timers.stop_moving.is_active());

    // hit_cooldown is 0.5s
    rig.tick_n(16);
    assert!(rig.controller.can_contact_hit());
}

#[test]
fn test_boss_never_staggers() {
    let boss = BossTuning::default();
    let mut controller = super::ai::boss_controller(&boss);
    controller.register_contact_hit(&boss.locomotion);
    assert!(!controller.timers.stop_moving.is_active());
    assert!(!controller.can_contact_hit());
}

#[test]
fn test_enemy_drop_through_restores_platform() {
    let mut rig = EnemyRig::new();
    rig.scene.platform = true;
    rig.scene.land = false;
    rig.scene.player_below = true;
    rig.target.position = Vec2::new(0.0, -200.0);
    rig.tick();
    assert!(rig.body.disabled.contains(&GameLayer::Platform));

    // drop_duration is 0.25s
    rig.tick_n(6);
    assert_eq!(rig.body.disabled, vec![GameLayer::Platform]);
    rig.tick();
    assert!(rig.body.disabled.is_empty());
}

#[test]
fn test_enemy_drop_retrigger_replaces_deadline() {
    let mut rig = EnemyRig::new();
    rig.controller.timers.drop_through.start(0.25);
    rig.tick_n(4);
    rig.controller.timers.drop_through.start(0.25);
    rig.tick_n(7);
    assert!(rig.controller.timers.drop_through.is_active());
    rig.tick();
    assert!(!rig.controller.timers.drop_through.is_active());
}

#[test]
fn test_enemy_attack_notification_gated_by_cooldown() {
    let mut rig = EnemyRig::new();
    rig.scene.player_in_reach = true;
    rig.tick();
    assert_eq!(rig.count(Notification::Attacked), 1);

    // attack_cooldown is 0.5s
    rig.tick_n(15);
    assert_eq!(rig.count(Notification::Attacked), 1);
    rig.tick();
    assert_eq!(rig.count(Notification::Attacked), 2);
}

// -----------------------------------------------------------------------------
// Damage and death systems
// -----------------------------------------------------------------------------

mod systems {
    use avian2d::prelude::{CollidingEntities, CollisionStart, LinearVelocity};
    use bevy::ecs::message::Messages;
    use bevy::prelude::*;
    use bevy::state::app::StatesPlugin;

    use super::super::systems::{
        apply_damage, detect_bullet_hits, process_deaths, resolve_contact_hits,
    };
    use super::super::{
        BossTuning, Bullet, ContactDamage, DamageEvent, DeathEvent, Dying, EnemyController,
        EnemyTuning, GunTuning, Health, Team,
    };
    use crate::core::{ActorNotification, GameState};
    use crate::movement::{
        LocomotionCapabilities, LocomotionController, MotionRequest, MovementTuning, Player,
        StatBlock,
    };

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GameState>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<ActorNotification>()
            .add_message::<CollisionStart>()
            .init_resource::<MovementTuning>()
            .init_resource::<EnemyTuning>()
            .init_resource::<BossTuning>();
        app
    }

    fn spawn_player(app: &mut App, health: f32) -> Entity {
        let stats = StatBlock::from_tuning(&MovementTuning::default(), &GunTuning::default());
        app.world_mut()
            .spawn((
                Player,
                Team::Player,
                Health::new(health),
                Transform::default(),
                LinearVelocity::default(),
                LocomotionController::new(LocomotionCapabilities::default(), stats),
            ))
            .id()
    }

    fn spawn_enemy(app: &mut App, x: f32) -> Entity {
        let capabilities = EnemyTuning::default().capabilities;
        app.world_mut()
            .spawn((
                Team::Enemy,
                Health::new(3.0),
                Transform::from_xyz(x, 0.0, 0.0),
                LinearVelocity(Vec2::new(160.0, 0.0)),
                EnemyController::new(capabilities),
                ContactDamage(1.0),
            ))
            .id()
    }

    fn touching(app: &mut App, enemy: Entity, player: Entity) {
        let mut colliding = CollidingEntities::default();
        colliding.0.insert(player);
        app.world_mut().entity_mut(enemy).insert(colliding);
    }

    fn damage_count(app: &App) -> usize {
        app.world().resource::<Messages<DamageEvent>>().len()
    }

    fn hit(app: &mut App, target: Entity, amount: f32) {
        app.world_mut().write_message(DamageEvent {
            source: target,
            target,
            amount,
        });
    }

    #[test]
    fn test_contact_hit_while_invulnerable_keeps_enemy_cooldown() {
        let mut app = app();
        app.add_systems(Update, resolve_contact_hits);
        let player = spawn_player(&mut app, 5.0);
        let enemy = spawn_enemy(&mut app, 20.0);
        touching(&mut app, enemy, player);
        app.world_mut()
            .get_mut::<LocomotionController>(player)
            .expect("player controller")
            .timers
            .invulnerability
            .start(1.0);

        app.update();

        let controller = app.world().get::<EnemyController>(enemy).expect("enemy");
        assert!(controller.can_contact_hit());
        assert_eq!(damage_count(&app), 0);
    }

    #[test]
    fn test_contact_hit_lands_and_spends_enemy_cooldown() {
        let mut app = app();
        app.add_systems(Update, resolve_contact_hits);
        let player = spawn_player(&mut app, 5.0);
        let enemy = spawn_enemy(&mut app, 20.0);
        touching(&mut app, enemy, player);

        app.update();

        let controller = app.world().get::<EnemyController>(enemy).expect("enemy");
        assert!(!controller.can_contact_hit());
        assert!(controller.timers.stop_moving.is_active());
        let locomotion = app
            .world()
            .get::<LocomotionController>(player)
            .expect("player controller");
        assert!(locomotion.is_invulnerable());
        assert!(matches!(
            locomotion.pending_request(),
            Some(MotionRequest::Knockback(v)) if v.x < 0.0 && v.y > 0.0
        ));
        assert_eq!(damage_count(&app), 1);
    }

    #[test]
    fn test_player_death_ends_run() {
        let mut app = app();
        app.add_systems(Update, (apply_damage, process_deaths).chain());
        let player = spawn_player(&mut app, 1.0);
        hit(&mut app, player, 5.0);

        app.update();
        assert!(app.world().get::<Health>(player).expect("health").is_dead());
        assert!(app.world().get::<Dying>(player).is_none());

        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::GameOver
        );
    }

    #[test]
    fn test_dead_enemy_lingers_then_ignores_damage() {
        let mut app = app();
        app.add_systems(Update, (apply_damage, process_deaths).chain());
        let enemy = spawn_enemy(&mut app, 20.0);
        hit(&mut app, enemy, 3.0);

        app.update();
        assert!(app.world().get::<Dying>(enemy).is_some());
        assert_eq!(
            app.world().get::<LinearVelocity>(enemy).expect("velocity").x,
            0.0
        );

        hit(&mut app, enemy, 3.0);
        app.update();
        assert_eq!(app.world().get::<Health>(enemy).expect("health").current, 0.0);
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::default()
        );
    }

    #[test]
    fn test_bullet_spent_on_first_enemy() {
        let mut app = app();
        app.add_systems(Update, detect_bullet_hits);
        let first = spawn_enemy(&mut app, 20.0);
        let second = spawn_enemy(&mut app, 24.0);
        let bullet = app.world_mut().spawn(Bullet { damage: 2.0 }).id();
        for enemy in [first, second] {
            app.world_mut().write_message(CollisionStart {
                collider1: bullet,
                collider2: enemy,
                body1: None,
                body2: None,
            });
        }

        app.update();

        assert_eq!(damage_count(&app), 1);
        assert!(app.world().get::<Bullet>(bullet).is_none());
    }
}
