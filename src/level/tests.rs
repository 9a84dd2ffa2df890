//! Level domain: tests for hazards, pickups and progress.

use bevy::prelude::*;

use super::{
    FallStep, FallingPlatform, HazardTuning, LevelLayout, MovingPlatform, PickupKind, Progress,
    TriggerCooldown, apply_pickup, launch, spike_knockback,
};
use crate::combat::{GunTuning, Health};
use crate::core::{BodyActuator, Facing, Notification};
use crate::movement::{
    GameLayer, LocomotionCapabilities, LocomotionController, MovementTuning, StatBlock,
};

fn player() -> (LocomotionController, Health) {
    let stats = StatBlock::from_tuning(&MovementTuning::default(), &GunTuning::default());
    (
        LocomotionController::new(LocomotionCapabilities::default(), stats),
        Health::new(5.0),
    )
}

#[derive(Default)]
struct Body {
    velocity: Vec2,
}

impl BodyActuator for Body {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }
    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }
    fn set_gravity_scale(&mut self, _: f32) {}
    fn set_facing(&mut self, _: Facing) {}
    fn set_collision_enabled(&mut self, _: GameLayer, _: bool) {}
}

#[test]
fn test_trigger_cooldown_rearms() {
    let mut cooldown = TriggerCooldown::default();
    assert!(cooldown.try_trigger(0.5));
    assert!(!cooldown.try_trigger(0.5));
    cooldown.0.tick(0.25);
    assert!(!cooldown.try_trigger(0.5));
    cooldown.0.tick(0.25);
    assert!(cooldown.try_trigger(0.5));
}

#[test]
fn test_spikes_knock_straight_up() {
    let tuning = HazardTuning::default();
    assert_eq!(spike_knockback(&tuning), Vec2::new(0.0, tuning.spike_bounce));

    let (mut controller, _) = player();
    controller.queue_knockback(spike_knockback(&tuning));
    assert!(controller.pending_request().is_some());
}

#[test]
fn test_bounce_pad_replaces_velocity() {
    let tuning = HazardTuning::default();
    let mut body = Body {
        velocity: Vec2::new(300.0, -800.0),
    };
    let mut events = Vec::new();
    launch(&tuning, &mut body, &mut events);

    assert_eq!(body.velocity, Vec2::new(0.0, tuning.bounce_force));
    assert_eq!(events, vec![Notification::Jumped]);
}

#[test]
fn test_health_pickup_raises_and_heals() {
    let tuning = HazardTuning::default();
    let (mut controller, mut health) = player();
    let mut progress = Progress::default();
    health.take_damage(3.0);

    apply_pickup(
        PickupKind::Health,
        &tuning,
        &mut controller,
        &mut health,
        &mut progress,
    );
    assert_eq!(health.max, 6.0);
    assert_eq!(health.current, 4.0);
}

#[test]
fn test_wizard_hat_is_permanent() {
    let tuning = HazardTuning::default();
    let (mut controller, mut health) = player();
    let mut progress = Progress::default();
    let before = controller.stats;

    apply_pickup(
        PickupKind::WizardHat,
        &tuning,
        &mut controller,
        &mut health,
        &mut progress,
    );
    assert_eq!(
        controller.stats.bullet_damage,
        before.bullet_damage + tuning.wizard_hat.bullet_damage
    );
    assert_eq!(
        controller.stats.fire_rate,
        before.fire_rate + tuning.wizard_hat.fire_rate
    );
    assert_eq!(controller.stats.move_speed, before.move_speed);
}

#[test]
fn test_stars_complete_level_once() {
    let tuning = HazardTuning::default();
    let (mut controller, mut health) = player();
    let mut progress = Progress::default();

    let mut collect = |progress: &mut Progress| {
        apply_pickup(PickupKind::Star, &tuning, &mut controller, &mut health, progress)
    };
    assert!(!collect(&mut progress));
    assert!(collect(&mut progress));
    assert!(!collect(&mut progress));
    assert_eq!(progress.collected, 150);
}

#[test]
fn test_default_layout_is_well_formed() {
    let layout = LevelLayout::default();
    assert!(!layout.ground.is_empty());
    for block in layout
        .ground
        .iter()
        .chain(&layout.walls)
        .chain(&layout.platforms)
    {
        assert!(block.size.0 > 0.0 && block.size.1 > 0.0);
    }
    assert!(layout.boss.is_some());
    assert!(!layout.moving_platforms.is_empty());
    assert!(!layout.falling_platforms.is_empty());
}

const DT: f32 = 1.0 / 32.0;

#[test]
fn test_moving_platform_travels_and_turns_around() {
    let from = Vec2::new(-40.0, 0.0);
    let to = Vec2::new(40.0, 0.0);
    let mut platform = MovingPlatform::new(from, to, 64.0);
    let mut position = from;

    // 80 pixels at 64 px/s is 40 ticks of 2 pixels
    for tick in 0..40 {
        let velocity = platform.velocity(position, DT);
        assert_eq!(velocity, Vec2::new(64.0, 0.0), "tick {}", tick);
        position += velocity * DT;
        assert!(platform.outbound || tick == 39);
    }
    assert_eq!(position, to);

    // The last step lands exactly on the target and turns the platform around
    assert!(!platform.outbound);
    assert_eq!(platform.target(), from);
    assert_eq!(platform.velocity(position, DT), Vec2::new(-64.0, 0.0));
}

#[test]
fn test_moving_platform_never_overshoots() {
    let mut platform = MovingPlatform::new(Vec2::ZERO, Vec2::new(0.0, 3.0), 64.0);
    let mut position = Vec2::new(0.0, 2.0);
    let velocity = platform.velocity(position, DT);
    position += velocity * DT;

    assert_eq!(position, Vec2::new(0.0, 3.0));
    assert!(!platform.outbound);
    assert_eq!(platform.target(), Vec2::ZERO);
}

#[test]
fn test_falling_platform_drops_then_removes() {
    let mut platform = FallingPlatform::default();
    assert_eq!(platform.tick(DT, 0.5), FallStep::Hold);

    assert!(platform.touch(0.25));
    assert!(!platform.touch(0.25));

    for _ in 0..7 {
        assert_eq!(platform.tick(DT, 0.5), FallStep::Hold);
    }
    assert_eq!(platform.tick(DT, 0.5), FallStep::Drop);
    for _ in 0..15 {
        assert_eq!(platform.tick(DT, 0.5), FallStep::Hold);
    }
    assert_eq!(platform.tick(DT, 0.5), FallStep::Remove);
    assert_eq!(platform.tick(DT, 0.5), FallStep::Hold);
}

// -----------------------------------------------------------------------------
// Pickup and restart systems
// -----------------------------------------------------------------------------

mod systems {
    use avian2d::prelude::CollisionStart;
    use bevy::prelude::*;
    use bevy::state::app::StatesPlugin;

    use super::super::systems::{collect_pickups, restart_run};
    use super::super::{HazardTuning, LevelEntity, Pickup, PickupKind, Progress};
    use super::player;
    use crate::combat::{Bullet, Health};
    use crate::core::GameState;
    use crate::movement::Player;

    fn pickup_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<CollisionStart>()
            .init_resource::<HazardTuning>()
            .init_resource::<Progress>()
            .add_systems(Update, collect_pickups);
        let (controller, health) = player();
        let player = app.world_mut().spawn((Player, controller, health)).id();
        (app, player)
    }

    fn touch(app: &mut App, a: Entity, b: Entity) {
        app.world_mut().write_message(CollisionStart {
            collider1: a,
            collider2: b,
            body1: None,
            body2: None,
        });
    }

    #[test]
    fn test_pickup_collected_once_per_contact() {
        let (mut app, player) = pickup_app();
        let item = app.world_mut().spawn(Pickup(PickupKind::Health)).id();
        touch(&mut app, player, item);
        touch(&mut app, item, player);

        app.update();

        let health = app.world().get::<Health>(player).expect("health");
        assert_eq!(health.max, 6.0);
        assert!(app.world().get::<Pickup>(item).is_none());
    }

    #[test]
    fn test_star_reaching_goal_completes_level() {
        let (mut app, player) = pickup_app();
        app.world_mut().resource_mut::<Progress>().collected = 50;
        let star = app.world_mut().spawn(Pickup(PickupKind::Star)).id();
        touch(&mut app, player, star);

        app.update();

        let progress = app.world().resource::<Progress>();
        assert_eq!(progress.collected, 100);
        assert!(progress.complete);
        assert!(app.world().get::<Pickup>(star).is_none());
    }

    #[test]
    fn test_star_left_in_place_after_goal() {
        let (mut app, player) = pickup_app();
        *app.world_mut().resource_mut::<Progress>() = Progress {
            collected: 100,
            complete: true,
        };
        let star = app.world_mut().spawn(Pickup(PickupKind::Star)).id();
        touch(&mut app, player, star);

        app.update();

        assert_eq!(app.world().resource::<Progress>().collected, 100);
        assert!(app.world().get::<Pickup>(star).is_some());
    }

    #[test]
    fn test_restart_clears_level_and_progress() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GameState>()
            .init_resource::<Progress>()
            .add_systems(Update, restart_run);
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyR);
        app.insert_resource(keyboard);
        *app.world_mut().resource_mut::<Progress>() = Progress {
            collected: 100,
            complete: true,
        };

        let block = app.world_mut().spawn(LevelEntity).id();
        let (controller, health) = player();
        let hero = app.world_mut().spawn((Player, controller, health)).id();
        let bullet = app.world_mut().spawn(Bullet { damage: 1.0 }).id();
        let camera = app.world_mut().spawn(Transform::default()).id();

        app.update();

        assert!(app.world().get::<LevelEntity>(block).is_none());
        assert!(app.world().get::<Player>(hero).is_none());
        assert!(app.world().get::<Bullet>(bullet).is_none());
        assert!(app.world().get::<Transform>(camera).is_some());
        assert_eq!(*app.world().resource::<Progress>(), Progress::default());

        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Run
        );
    }
}
