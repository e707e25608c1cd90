//! Input handling systems

use bevy::prelude::*;

use super::components::SimWorldResource;
use crate::simulation::Command;

fn key_command(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::KeyC => Some(Command::ToggleShowCollisions),
        KeyCode::KeyS => Some(Command::ToggleSlowMode),
        KeyCode::Escape => Some(Command::Quit),
        _ => None,
    }
}

/// Turn key presses into simulation commands
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    mut exit: MessageWriter<AppExit>,
) {
    for key in keyboard.get_just_pressed() {
        let Some(command) = key_command(*key) else {
            continue;
        };
        if !sim_world.0.handle_command(command) {
            exit.write(AppExit::Success);
        }
    }
}
