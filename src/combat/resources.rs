//! Combat domain: tuning resources for the gun, enemies and the boss.

use bevy::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Player gun tuning. Damage, speed and fire rate seed the player's stat block.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunTuning {
    pub bullet_damage: f32,
    pub bullet_speed: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub bullet_lifetime: f32,
    pub bullet_radius: f32,
}

impl Default for GunTuning {
    fn default() -> Self {
        Self {
            bullet_damage: 1.0,
            bullet_speed: 480.0,
            fire_rate: 4.0,
            bullet_lifetime: 3.0,
            bullet_radius: 4.0,
        }
    }
}

/// What an enemy controller is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyCapabilities {
    pub jump: bool,
    pub drop_through: bool,
    /// Pause chasing after landing a contact hit
    pub stagger_on_contact: bool,
}

impl Default for EnemyCapabilities {
    fn default() -> Self {
        Self {
            jump: true,
            drop_through: true,
            stagger_on_contact: true,
        }
    }
}

/// Enemy locomotion and combat tuning. Distances are in pixels, times in seconds.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub capabilities: EnemyCapabilities,
    pub size: (f32, f32),
    pub move_speed: f32,
    pub jump_power: f32,
    pub side_jump_speed: f32,
    pub chase_range: f32,
    pub jump_cooldown: f32,
    pub stop_duration: f32,
    pub drop_duration: f32,
    pub max_health: f32,
    pub contact_damage: f32,
    pub attack_cooldown: f32,
    pub hit_cooldown: f32,
    pub die_duration: f32,
    pub senses: EnemySenseTuning,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            capabilities: EnemyCapabilities::default(),
            size: (32.0, 32.0),
            move_speed: 160.0,
            jump_power: 960.0,
            side_jump_speed: 640.0,
            chase_range: 480.0,
            jump_cooldown: 1.0,
            stop_duration: 2.0,
            drop_duration: 0.4,
            max_health: 3.0,
            contact_damage: 1.0,
            attack_cooldown: 1.0,
            hit_cooldown: 1.0,
            die_duration: 1.0,
            senses: EnemySenseTuning::default(),
        }
    }
}

/// Probe placement and ray lengths for enemy senses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySenseTuning {
    pub land_offset: (f32, f32),
    pub land_half_extents: (f32, f32),
    pub target_above_distance: f32,
    pub target_below_distance: f32,
    /// How far below the enemy the target must be to count as below at all
    pub target_below_margin: f32,
    pub platform_above_distance: f32,
    pub front_check_distance: f32,
    /// Horizontal offset of the downward gap ray
    pub gap_probe_offset: f32,
    pub gap_check_distance: f32,
    pub side_check_offset: (f32, f32),
    pub side_check_half_extents: (f32, f32),
}

impl Default for EnemySenseTuning {
    fn default() -> Self {
        Self {
            land_offset: (0.0, -16.0),
            land_half_extents: (32.0, 1.0),
            target_above_distance: 480.0,
            target_below_distance: 480.0,
            target_below_margin: 32.0,
            platform_above_distance: 224.0,
            front_check_distance: 64.0,
            gap_probe_offset: 32.0,
            gap_check_distance: 64.0,
            side_check_offset: (32.0, 0.0),
            side_check_half_extents: (64.0, 32.0),
        }
    }
}

/// The boss runs the enemy controller with its own tuning.
///
/// A partial `locomotion` section is laid over the boss defaults, not the
/// regular enemy ones, so a boss never picks up enemy capabilities by omission.
#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct BossTuning {
    pub locomotion: EnemyTuning,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            locomotion: EnemyTuning {
                capabilities: EnemyCapabilities {
                    jump: false,
                    drop_through: false,
                    stagger_on_contact: false,
                },
                size: (64.0, 96.0),
                move_speed: 128.0,
                chase_range: 640.0,
                max_health: 30.0,
                contact_damage: 3.0,
                die_duration: 2.0,
                senses: EnemySenseTuning {
                    land_offset: (0.0, -48.0),
                    land_half_extents: (48.0, 1.0),
                    side_check_offset: (48.0, 0.0),
                    side_check_half_extents: (80.0, 48.0),
                    ..default()
                },
                ..default()
            },
        }
    }
}

impl<'de> Deserialize<'de> for BossTuning {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct Sections {
            locomotion: Option<Value>,
        }

        let sections = Sections::deserialize(deserializer)?;
        let mut merged = serde_json::to_value(Self::default().locomotion).map_err(D::Error::custom)?;
        if let Some(patch) = sections.locomotion {
            overlay(&mut merged, patch);
        }
        let locomotion = serde_json::from_value(merged).map_err(D::Error::custom)?;
        Ok(Self { locomotion })
    }
}

/// Recursively replace the fields of `base` that `patch` names.
fn overlay(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}
