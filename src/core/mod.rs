//! Core domain: run state, tick ordering, shared timers and collaborator traits.

mod events;
mod ports;
mod state;
mod systems;
mod timers;


pub use events::{ActorNotification, MessageSink, Notification, NotificationSink};
pub use ports::{
    Action, BodyActuator, DamageTarget, Facing, InputSource, PhysicsQuery, RayHit,
};
pub use state::{GameState, TickSet};
pub use timers::Countdown;

use bevy::prelude::*;

use crate::core::systems::{log_notifications, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_message::<ActorNotification>()
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Reactions,
                    TickSet::Damage,
                    TickSet::Locomotion,
                    TickSet::Combat,
                    TickSet::Cleanup,
                )
                    .chain(),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(Update, log_notifications);
    }
}
