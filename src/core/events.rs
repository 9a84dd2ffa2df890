//! Core domain: gameplay notifications for visual and audio collaborators.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;
use serde::Serialize;

/// Fire-and-forget gameplay notification. Controllers never wait on a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notification {
    Jumped,
    AirJumped,
    WallJumped,
    Landed,
    Flipped,
    DashStarted,
    DashEnded,
    Hit,
    Died,
    PowerUpStarted,
    PowerUpEnded,
    /// Horizontal drive resumed after standing still for a while
    StartedMoving,
    /// Enemy swung at a player inside its side-check box
    Attacked,
    Shot,
}

/// Receiver for notifications raised during a tick.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Notification tagged with the actor that raised it
#[derive(Debug, Clone, Copy)]
pub struct ActorNotification {
    pub actor: Entity,
    pub kind: Notification,
}

impl Message for ActorNotification {}

/// Sink that forwards a single actor's notifications into the message queue.
pub struct MessageSink<'a, 'w> {
    actor: Entity,
    writer: &'a mut MessageWriter<'w, ActorNotification>,
}

impl<'a, 'w> MessageSink<'a, 'w> {
    pub fn new(actor: Entity, writer: &'a mut MessageWriter<'w, ActorNotification>) -> Self {
        Self { actor, writer }
    }
}

impl NotificationSink for MessageSink<'_, '_> {
    fn notify(&mut self, notification: Notification) {
        self.writer.write(ActorNotification {
            actor: self.actor,
            kind: notification,
        });
    }
}
