//! Keyboard input handling

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Movement keys are tracked in `HeldKeys`
    Move,
    Fire,
    /// Start a match, or pause/resume one in progress
    StartOrPause,
    TogglePractice,
    ToggleDebug,
    ToggleMute,
    Ignored,
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// Handle key down event
    pub fn key_down(&mut self, key: &str) -> KeyCommand {
        match key {
            "ArrowUp" | "w" | "W" => {
                self.up = true;
                KeyCommand::Move
            }
            "ArrowDown" | "s" | "S" => {
                self.down = true;
                KeyCommand::Move
            }
            " " => KeyCommand::StartOrPause,
            "e" | "E" => KeyCommand::Fire,
            "p" | "P" => KeyCommand::TogglePractice,
            "d" | "D" => KeyCommand::ToggleDebug,
            "m" | "M" => KeyCommand::ToggleMute,
            _ => KeyCommand::Ignored,
        }
    }

    /// Handle key up event
    pub fn key_up(&mut self, key: &str) {
        match key {
            "ArrowUp" | "w" | "W" => self.up = false,
            "ArrowDown" | "s" | "S" => self.down = false,
            _ => {}
        }
    }

    /// Window lost focus: nothing stays held
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
