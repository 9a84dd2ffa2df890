//! Movement domain: jump arbitration and wall-slide detection.

use crate::core::Facing;
use crate::movement::controller::{LocomotionTimers, MotionRequest};
use crate::movement::{ContactState, LocomotionCapabilities, MovementTuning};

/// Airborne, touching a wall and holding toward it. Never true while the
/// post wall-jump movement lock runs, so a wall jump cannot re-grab the wall
/// it just left.
pub fn is_wall_sliding(contact: &ContactState, horizontal: f32, wall_jump_locked: bool) -> bool {
    if contact.on_ground || wall_jump_locked || horizontal == 0.0 {
        return false;
    }
    contact.wall_direction == Some(Facing::from_sign(horizontal))
}

/// Resolve a jump press into at most one jump request.
///
/// A live wall coyote window always wins and turns the press into a wall
/// jump. Otherwise a charge is spent on a ground or air jump. Wall jumps
/// refill the air jumps but not the ground jump.
pub fn arbitrate_jump(
    pressed: bool,
    contact: &ContactState,
    timers: &mut LocomotionTimers,
    capabilities: &LocomotionCapabilities,
    max_jump_charges: u8,
    tuning: &MovementTuning,
) -> Option<MotionRequest> {
    if !pressed {
        return None;
    }

    if capabilities.wall_jump && timers.wall_coyote.is_active() {
        timers.wall_coyote.cancel();
        timers.wall_jump_lock.start(tuning.wall_jump_lock_time);
        timers.jump_charges = max_jump_charges.saturating_sub(1);
        return Some(MotionRequest::WallJump);
    }

    if timers.jump_charges > 0 && !timers.wall_coyote.is_active() {
        timers.jump_charges -= 1;
        return Some(if contact.on_ground {
            MotionRequest::GroundJump
        } else {
            MotionRequest::AirJump
        });
    }

    None
}

/// Variable jump height: releasing jump while rising scales the rise down.
pub fn cut_jump(velocity_y: f32, released: bool, multiplier: f32) -> Option<f32> {
    (released && velocity_y > 0.0).then(|| velocity_y * multiplier)
}
