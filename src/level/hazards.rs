//! Level domain: hazard and pickup effects on the player.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::{BodyActuator, Notification, NotificationSink};
use crate::level::data::PickupKind;
use crate::level::resources::{HazardTuning, Progress};
use crate::movement::LocomotionController;

/// Spikes throw the player straight up and lock voluntary motion like a hit.
pub fn spike_knockback(tuning: &HazardTuning) -> Vec2 {
    Vec2::new(0.0, tuning.spike_bounce)
}

/// Bounce pads replace the vertical velocity without locking controls.
pub fn launch(tuning: &HazardTuning, body: &mut impl BodyActuator, sink: &mut impl NotificationSink) {
    body.set_velocity(Vec2::new(0.0, tuning.bounce_force));
    sink.notify(Notification::Jumped);
}

/// Apply a collected pickup. Returns `true` when it completes the level.
pub fn apply_pickup(
    kind: PickupKind,
    tuning: &HazardTuning,
    controller: &mut LocomotionController,
    health: &mut Health,
    progress: &mut Progress,
) -> bool {
    match kind {
        PickupKind::Health => {
            health.raise_max(tuning.health_max_increase);
            health.heal(tuning.health_heal);
            false
        }
        PickupKind::WizardHat => {
            controller.stats.apply(&tuning.wizard_hat);
            false
        }
        PickupKind::Star => progress.add(tuning.star_value, tuning.progress_goal),
    }
}
