//! Level domain: markers and trigger state for level entities.

use bevy::prelude::*;

use crate::core::Countdown;
use crate::level::data::PickupKind;

/// Despawned when the run restarts
#[derive(Component, Debug)]
pub struct LevelEntity;

/// Re-arm delay shared by spike traps and bounce pads.
#[derive(Component, Debug, Clone, Default)]
pub struct TriggerCooldown(pub Countdown);

impl TriggerCooldown {
    /// Trigger unless still cooling down; a trigger starts the cooldown.
    pub fn try_trigger(&mut self, cooldown: f32) -> bool {
        if self.0.is_active() {
            return false;
        }
        self.0.start(cooldown);
        true
    }
}

#[derive(Component, Debug)]
pub struct SpikeTrap;

#[derive(Component, Debug)]
pub struct BouncePad;

#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup(pub PickupKind);
