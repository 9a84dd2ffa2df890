//! Movement domain: system modules for locomotion updates.

pub(crate) mod input;
pub(crate) mod locomotion;
pub(crate) mod physics;

pub(crate) use input::{clear_action_edges, sample_actions};
pub(crate) use locomotion::{drive_player_locomotion, tint_hold_charge};
pub(crate) use physics::{AvianBody, AvianQuery};
