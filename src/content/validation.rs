//! Validation for loaded tuning values.

use super::data::TuningFile;
use crate::combat::EnemyTuning;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Helper macro for checking a value is strictly positive
macro_rules! check_positive {
    ($errors:expr, $section:expr, $owner:expr, $($field:ident),+ $(,)?) => {
        $(
            if !($owner.$field > 0.0) {
                $errors.push(ValidationError {
                    section: $section,
                    field: stringify!($field),
                    message: format!("must be positive, got {}", $owner.$field),
                });
            }
        )+
    };
}

/// Helper macro for checking a value is not negative
macro_rules! check_non_negative {
    ($errors:expr, $section:expr, $owner:expr, $($field:ident),+ $(,)?) => {
        $(
            if !($owner.$field >= 0.0) {
                $errors.push(ValidationError {
                    section: $section,
                    field: stringify!($field),
                    message: format!("must not be negative, got {}", $owner.$field),
                });
            }
        )+
    };
}

/// Validate every tuning section.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &TuningFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let movement = &tuning.movement;
    check_positive!(
        errors,
        "movement",
        movement,
        move_speed,
        jump_power,
        dash_speed,
        base_gravity,
        max_fall_speed,
        dash_duration,
        knockback_lock_time,
        drop_duration,
        max_health,
    );
    check_non_negative!(
        errors,
        "movement",
        movement,
        wall_slide_speed,
        wall_jump_coyote_time,
        wall_jump_lock_time,
        dash_cooldown,
        hit_invulnerability,
        stop_moving_threshold,
    );
    if movement.max_jump_charges < 1 {
        errors.push(ValidationError {
            section: "movement",
            field: "max_jump_charges",
            message: "at least one jump charge is required".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&movement.jump_cut_multiplier) {
        errors.push(ValidationError {
            section: "movement",
            field: "jump_cut_multiplier",
            message: format!("must be within 0..=1, got {}", movement.jump_cut_multiplier),
        });
    }
    if movement.fall_multiplier < 1.0 {
        errors.push(ValidationError {
            section: "movement",
            field: "fall_multiplier",
            message: format!("must be at least 1, got {}", movement.fall_multiplier),
        });
    }
    check_positive!(
        errors,
        "movement.power_up",
        movement.power_up,
        hold_time,
        duration
    );

    check_positive!(
        errors,
        "gun",
        tuning.gun,
        bullet_damage,
        bullet_speed,
        fire_rate,
        bullet_lifetime,
        bullet_radius,
    );

    validate_enemy(&mut errors, "enemy", &tuning.enemy);
    validate_enemy(&mut errors, "boss", &tuning.boss.locomotion);

    check_positive!(
        errors,
        "hazards",
        tuning.hazards,
        spike_bounce,
        bounce_force,
        pickup_size,
        fall_wait,
        fall_remove_wait,
    );
    check_non_negative!(
        errors,
        "hazards",
        tuning.hazards,
        spike_damage,
        spike_cooldown,
        bounce_cooldown,
        health_heal,
        health_max_increase,
        platform_speed,
    );
    if tuning.hazards.progress_goal == 0 {
        errors.push(ValidationError {
            section: "hazards",
            field: "progress_goal",
            message: "goal must be at least 1".to_string(),
        });
    }

    if tuning.level.ground.is_empty() {
        errors.push(ValidationError {
            section: "level",
            field: "ground",
            message: "a level needs at least one ground block".to_string(),
        });
    }
    let blocks = tuning
        .level
        .ground
        .iter()
        .chain(&tuning.level.walls)
        .chain(&tuning.level.platforms)
        .chain(&tuning.level.falling_platforms);
    for block in blocks {
        if block.size.0 <= 0.0 || block.size.1 <= 0.0 {
            errors.push(ValidationError {
                section: "level",
                field: "size",
                message: format!("block at {:?} has size {:?}", block.center, block.size),
            });
        }
    }

    for def in &tuning.level.moving_platforms {
        if def.size.0 <= 0.0 || def.size.1 <= 0.0 {
            errors.push(ValidationError {
                section: "level",
                field: "size",
                message: format!("moving platform from {:?} has size {:?}", def.from, def.size),
            });
        }
    }

    errors
}

fn validate_enemy(errors: &mut Vec<ValidationError>, section: &'static str, enemy: &EnemyTuning) {
    check_positive!(
        errors,
        section,
        enemy,
        move_speed,
        jump_power,
        chase_range,
        drop_duration,
        max_health,
        die_duration,
    );
    check_non_negative!(
        errors,
        section,
        enemy,
        side_jump_speed,
        jump_cooldown,
        stop_duration,
        contact_damage,
        attack_cooldown,
        hit_cooldown,
    );
    if enemy.size.0 <= 0.0 || enemy.size.1 <= 0.0 {
        errors.push(ValidationError {
            section,
            field: "size",
            message: format!("must be positive, got {:?}", enemy.size),
        });
    }
}
