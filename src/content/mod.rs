//! Content domain: loading and validating the tuning file.

mod data;
mod loader;
mod validation;


pub use data::TuningFile;
pub use loader::{ContentLoadError, TUNING_PATH, load_tuning, parse_tuning};
pub use validation::{ValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::core::GameState;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

/// Load the tuning file into resources, then start the run.
/// Any load or validation failure keeps the built-in defaults.
fn load_content(mut commands: Commands, mut next_state: ResMut<NextState<GameState>>) {
    match load_tuning(Path::new(TUNING_PATH)) {
        Ok(tuning) => {
            let errors = validate_tuning(&tuning);
            if errors.is_empty() {
                info!("Loaded tuning from {}", TUNING_PATH);
                insert_tuning(&mut commands, tuning);
            } else {
                for error in &errors {
                    error!("Tuning validation error: {}", error);
                }
                warn!(
                    "{} validation errors in {}, using built-in tuning",
                    errors.len(),
                    TUNING_PATH
                );
            }
        }
        Err(e) => {
            warn!("{}, using built-in tuning", e);
        }
    }

    next_state.set(GameState::Run);
}

fn insert_tuning(commands: &mut Commands, tuning: TuningFile) {
    let TuningFile {
        movement,
        gun,
        enemy,
        boss,
        hazards,
        level,
    } = tuning;

    commands.insert_resource(movement);
    commands.insert_resource(gun);
    commands.insert_resource(enemy);
    commands.insert_resource(boss);
    commands.insert_resource(hazards);
    commands.insert_resource(level);
}
