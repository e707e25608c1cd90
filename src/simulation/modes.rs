//! Process-wide display toggles and the commands that flip them

use std::sync::atomic::{AtomicBool, Ordering};

/// Discrete command delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleShowCollisions,
    ToggleSlowMode,
    Quit,
}

impl Command {
    /// Map a key name to a command. Unknown keys are not commands.
    pub fn from_key(key: &str) -> Option<Command> {
        match key.trim() {
            "c" | "C" => Some(Command::ToggleShowCollisions),
            "s" | "S" => Some(Command::ToggleSlowMode),
            k if k.eq_ignore_ascii_case("escape") || k.eq_ignore_ascii_case("esc") => {
                Some(Command::Quit)
            }
            _ => None,
        }
    }
}

/// Toggles written by the control thread.
///
/// `slow_mode` is read by agent threads while they hold the intersection.
#[derive(Debug, Default)]
pub struct ModeFlags {
    show_collisions: AtomicBool,
    slow_mode: AtomicBool,
}

impl ModeFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_collisions(&self) -> bool {
        self.show_collisions.load(Ordering::Relaxed)
    }

    pub fn slow_mode(&self) -> bool {
        self.slow_mode.load(Ordering::Relaxed)
    }

    /// Apply a command. Returns false when the command asks to quit.
    pub fn apply(&self, command: Command) -> bool {
        match command {
            Command::ToggleShowCollisions => {
                self.show_collisions.fetch_xor(true, Ordering::Relaxed);
                true
            }
            Command::ToggleSlowMode => {
                self.slow_mode.fetch_xor(true, Ordering::Relaxed);
                true
            }
            Command::Quit => false,
        }
    }
}
