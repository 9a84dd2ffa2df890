//! Core domain: camera setup and notification logging.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::events::ActorNotification;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Stand-in listener for the audio/visual collaborators: every notification is logged.
pub(crate) fn log_notifications(mut notifications: MessageReader<ActorNotification>) {
    for notification in notifications.read() {
        debug!("{:?} -> {:?}", notification.actor, notification.kind);
    }
}
