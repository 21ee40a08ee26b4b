//! UI State Machine
//!
//! Tracks which screen the page shows and the practice/debug toggles. The
//! match keeps its own lifecycle; this machine only decides which match
//! calls a UI action maps to.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// UI screens
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Title,
    Playing,
    Paused,
    GameOver,
}

/// Actions that trigger state transitions
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Start,
    Pause,
    Resume,
    GameOver,
    PlayAgain,
}

/// Result of a state transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_state: UiState,
    to_state: UiState,
    action: UiAction,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_state(&self) -> UiState {
        self.from_state
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_state(&self) -> UiState {
        self.to_state
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn action(&self) -> UiAction {
        self.action
    }
}

/// UI Finite State Machine
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct UiFsm {
    state: UiState,
    practice: bool,
    debug: bool,
    muted: bool,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl UiFsm {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self {
            state: UiState::Title,
            practice: false,
            debug: false,
            muted: false,
        }
    }

    /// Get current state
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn state(&self) -> UiState {
        self.state
    }

    /// Get current state as string (for JS interop)
    pub fn state_string(&self) -> String {
        format!("{:?}", self.state)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn practice(&self) -> bool {
        self.practice
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn debug(&self) -> bool {
        self.debug
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: UiAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    /// The single start/pause key: start from a menu, otherwise flip pause
    pub fn start_or_pause(&mut self) -> TransitionResult {
        let action = match self.state {
            UiState::Title => UiAction::Start,
            UiState::GameOver => UiAction::PlayAgain,
            UiState::Playing => UiAction::Pause,
            UiState::Paused => UiAction::Resume,
        };
        self.transition(action)
    }

    /// Practice mode only toggles outside a running match
    pub fn toggle_practice(&mut self) -> bool {
        if self.state == UiState::Playing {
            return false;
        }
        self.practice = !self.practice;
        true
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: UiAction) -> Option<UiState> {
        match (self.state, action) {
            // From Title
            (UiState::Title, UiAction::Start) => Some(UiState::Playing),

            // From Playing
            (UiState::Playing, UiAction::Pause) => Some(UiState::Paused),
            (UiState::Playing, UiAction::GameOver) => Some(UiState::GameOver),

            // From Paused
            (UiState::Paused, UiAction::Resume) => Some(UiState::Playing),

            // From GameOver
            (UiState::GameOver, UiAction::PlayAgain) => Some(UiState::Playing),

            // Invalid transition
            _ => None,
        }
    }

    /// Check if a match is running
    pub fn is_playing(&self) -> bool {
        self.state == UiState::Playing
    }

    /// Check if in game over state
    pub fn is_game_over(&self) -> bool {
        self.state == UiState::GameOver
    }
}

impl Default for UiFsm {
    fn default() -> Self {
        Self::new()
    }
}
