//! Host messages for Impossible Pong
//!
//! Uses postcard for compact binary payloads between the simulation and a
//! renderer or audio layer running in another JS context.

use postcard::{from_bytes, to_allocvec};

// ============================================================================
// Host -> simulation
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum InputMsg {
    /// Held keys plus a one-shot fire trigger
    Input { up: bool, down: bool, fire: bool },

    /// Start a match from the title or game-over screen
    Start,

    TogglePause,

    /// Practice mode, applied between matches only
    SetPractice { on: bool },

    /// Show the AI debug overlay in frames
    SetDebug { on: bool },

    /// Host frame callback timestamp in milliseconds
    Frame { now_ms: f64 },
}

// ============================================================================
// Simulation -> host
// ============================================================================

/// Screen the UI should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Screen {
    Title,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectileState {
    pub owner: u8, // 0 = player, 1 = AI
    pub x: f32,
    pub y: f32,
}

/// AI internals, only sent while the debug overlay is on
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AiOverlay {
    pub target_y: f32,
    pub predicted_y: f32,
    pub will_miss: bool,
    pub speed: f32,
    pub accuracy: f32,
    pub reaction_delay: f32,
    pub perfect_mode: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HostMsg {
    /// Render state for one tick
    Frame {
        tick: u32,
        screen: Screen,
        ball_x: f32,
        ball_y: f32,
        ball_vx: f32,
        ball_vy: f32,
        player_y: f32,
        ai_y: f32,
        player_frozen: bool,
        ai_frozen: bool,
        player_ice_ready: bool,
        /// Ticks until the player's ice shot recharges
        player_ice_cooldown: u16,
        projectiles: Vec<ProjectileState>,
        player_score: u8,
        ai_score: u8,
        rally: u16,
        speed_multiplier: f32,
        serve_speed: f32,
        serve_indicator: bool,
        extreme_speed: bool,
        in_zone: bool,
        practice: bool,
        ai: Option<AiOverlay>,
    },

    /// Named audio cue, `value` carries the rally count or win flag
    Sound { name: String, value: u16 },

    /// Visual effect trigger at an arena position
    Effect {
        name: String,
        x: f32,
        y: f32,
        intensity: f32,
    },

    /// End-of-game summary
    GameOver {
        player_won: bool,
        player_score: u8,
        ai_score: u8,
        survival_secs: u32,
        longest_rally: u16,
        accuracy: u8,
        max_streak: u16,
        zone_secs: u32,
        max_ball_speed: f32,
        rallies: u16,
    },
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl InputMsg {
    /// Serialize InputMsg to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize InputMsg from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl HostMsg {
    /// Serialize HostMsg to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize HostMsg from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}
