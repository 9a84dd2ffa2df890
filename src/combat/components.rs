//! Combat domain: components for damageable actors and projectiles.

use bevy::prelude::*;

use crate::core::{Countdown, DamageTarget};

/// Health component for damageable entities
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    /// Raise the cap and fill the new room.
    pub fn raise_max(&mut self, amount: f32) {
        let amount = amount.max(0.0);
        self.max += amount;
        self.current += amount;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }
}

impl DamageTarget for Health {
    fn apply_damage(&mut self, amount: f32) {
        self.take_damage(amount);
    }

    fn is_alive(&self) -> bool {
        !self.is_dead()
    }
}

/// Team affiliation to prevent friendly fire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

#[derive(Component, Debug)]
pub struct Enemy;

#[derive(Component, Debug)]
pub struct Boss;

/// Damage dealt to the player on body contact
#[derive(Component, Debug, Clone, Copy)]
pub struct ContactDamage(pub f32);

#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    pub damage: f32,
}

/// Despawn when the countdown runs out
#[derive(Component, Debug, Clone, Copy)]
pub struct Lifetime(pub Countdown);

/// Dead and waiting out its death animation before despawning
#[derive(Component, Debug, Clone, Copy)]
pub struct Dying(pub Countdown);
