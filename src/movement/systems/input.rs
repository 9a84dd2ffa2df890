//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::Action;
use crate::movement::ActionState;

fn bindings(action: Action) -> &'static [KeyCode] {
    match action {
        Action::MoveLeft => &[KeyCode::KeyA, KeyCode::ArrowLeft],
        Action::MoveRight => &[KeyCode::KeyD, KeyCode::ArrowRight],
        Action::MoveDown => &[KeyCode::KeyS, KeyCode::ArrowDown],
        Action::Jump => &[KeyCode::Space, KeyCode::KeyW],
        Action::Dash => &[KeyCode::ShiftLeft, KeyCode::KeyJ],
        Action::Hold => &[KeyCode::KeyE],
        Action::Shoot => &[KeyCode::KeyK],
    }
}

pub(crate) fn sample_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut actions: ResMut<ActionState>,
) {
    for action in Action::ALL {
        let keys = bindings(action).iter().copied();
        let mut held = keyboard.any_pressed(keys.clone());
        let mut just_pressed = keyboard.any_just_pressed(keys.clone());
        let mut just_released = keyboard.any_just_released(keys);

        // Shooting also follows the left mouse button
        if action == Action::Shoot {
            held |= mouse.pressed(MouseButton::Left);
            just_pressed |= mouse.just_pressed(MouseButton::Left);
            just_released |= mouse.just_released(MouseButton::Left);
        }

        actions.sample(action, held, just_pressed, just_released);
    }

    actions.aim = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .and_then(|cursor| {
            let (camera, camera_transform) = cameras.iter().next()?;
            camera.viewport_to_world_2d(camera_transform, cursor).ok()
        });
}

pub(crate) fn clear_action_edges(mut actions: ResMut<ActionState>) {
    actions.clear_edges();
}
