//! Debug domain: tests for state snapshots.

use bevy::prelude::*;

use super::{ActorSnapshot, snapshot_json};
use crate::combat::{EnemyCapabilities, EnemyController, GunTuning};
use crate::movement::{LocomotionCapabilities, LocomotionController, MovementTuning, StatBlock};

#[test]
fn player_snapshot_includes_timers_and_stats() {
    let stats = StatBlock::from_tuning(&MovementTuning::default(), &GunTuning::default());
    let mut controller = LocomotionController::new(LocomotionCapabilities::default(), stats);
    controller.timers.jump_charges = 1;

    let snapshot = ActorSnapshot::new(
        Entity::PLACEHOLDER,
        Vec2::new(12.0, -4.0),
        Some((3.0, 5.0)),
        &controller,
    );
    let json = snapshot_json(&snapshot).expect("controller should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output should be JSON");

    assert_eq!(value["position"][0], 12.0);
    assert_eq!(value["health"][1], 5.0);
    assert_eq!(value["controller"]["timers"]["jump_charges"], 1);
    assert_eq!(value["controller"]["stats"]["max_jump_charges"], 2);
}

#[test]
fn enemy_snapshot_without_health_is_null() {
    let controller = EnemyController::new(EnemyCapabilities::default());
    let snapshot = ActorSnapshot::new(Entity::PLACEHOLDER, Vec2::ZERO, None, &controller);
    let json = snapshot_json(&snapshot).expect("controller should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output should be JSON");

    assert!(value["health"].is_null());
    assert_eq!(value["controller"]["capabilities"]["jump"], true);
    assert_eq!(value["controller"]["facing"], "Right");
}
