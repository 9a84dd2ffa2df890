//! Content domain: the on-disk tuning file layout.

use serde::{Deserialize, Serialize};

use crate::combat::{BossTuning, EnemyTuning, GunTuning};
use crate::level::{HazardTuning, LevelLayout};
use crate::movement::MovementTuning;

/// Every tunable section of a run. Sections missing from the file keep
/// their built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningFile {
    pub movement: MovementTuning,
    pub gun: GunTuning,
    pub enemy: EnemyTuning,
    pub boss: BossTuning,
    pub hazards: HazardTuning,
    pub level: LevelLayout,
}
