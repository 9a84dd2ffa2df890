//! Combat domain: enemy and boss controllers.

pub(crate) mod boss;
pub(crate) mod enemy;

pub use boss::{boss_collision_filters, boss_controller};
pub use enemy::{
    EnemyController, EnemyJump, EnemySenses, EnemyTimers, TargetInfo, decide_jump, should_drop,
};
