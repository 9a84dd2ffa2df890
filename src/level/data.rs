//! Level domain: data-driven level layout.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned block of static geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub center: (f32, f32),
    pub size: (f32, f32),
}

impl Block {
    pub const fn new(center: (f32, f32), size: (f32, f32)) -> Self {
        Self { center, size }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center.0, self.center.1)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Spikes,
    BouncePad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    WizardHat,
    Star,
}

/// Platform shuttling between two centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatformDef {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub size: (f32, f32),
}

/// Everything spawned when a run starts.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub ground: Vec<Block>,
    pub walls: Vec<Block>,
    pub platforms: Vec<Block>,
    pub moving_platforms: Vec<MovingPlatformDef>,
    pub falling_platforms: Vec<Block>,
    pub enemies: Vec<(f32, f32)>,
    pub boss: Option<(f32, f32)>,
    pub hazards: Vec<(HazardKind, (f32, f32))>,
    pub pickups: Vec<(PickupKind, (f32, f32))>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            ground: vec![
                Block::new((-450.0, -200.0), (700.0, 40.0)),
                Block::new((450.0, -200.0), (700.0, 40.0)),
                // Catch floor under the central gap
                Block::new((0.0, -420.0), (1600.0, 40.0)),
            ],
            walls: vec![
                Block::new((-820.0, 0.0), (40.0, 880.0)),
                Block::new((820.0, 0.0), (40.0, 880.0)),
                Block::new((250.0, -80.0), (32.0, 200.0)),
            ],
            platforms: vec![
                Block::new((-450.0, -60.0), (200.0, 16.0)),
                Block::new((0.0, 40.0), (240.0, 16.0)),
                Block::new((450.0, 140.0), (200.0, 16.0)),
            ],
            moving_platforms: vec![MovingPlatformDef {
                from: (-40.0, -140.0),
                to: (40.0, -140.0),
                size: (96.0, 16.0),
            }],
            falling_platforms: vec![
                Block::new((-200.0, 100.0), (120.0, 16.0)),
                Block::new((650.0, 260.0), (120.0, 16.0)),
            ],
            enemies: vec![(-300.0, -160.0), (500.0, -160.0)],
            boss: Some((650.0, -130.0)),
            hazards: vec![
                (HazardKind::Spikes, (-600.0, -172.0)),
                (HazardKind::BouncePad, (-720.0, -172.0)),
            ],
            pickups: vec![
                (PickupKind::Health, (-450.0, -30.0)),
                (PickupKind::WizardHat, (0.0, 70.0)),
                (PickupKind::Star, (450.0, 170.0)),
                (PickupKind::Star, (600.0, -150.0)),
            ],
        }
    }
}
