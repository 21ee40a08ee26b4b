//! Read-only view of a match for rendering. Never fed back into the core.

use crate::components::Side;
use crate::game::MatchState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleView {
    pub side: Side,
    pub x: f32, // centre
    pub y: f32, // centre
    pub width: f32,
    pub height: f32,
    pub frozen: bool,
    pub freeze_remaining: u32,
    pub ice_ready: bool,
    pub ice_cooldown: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileView {
    pub owner: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// AI internals for the debug overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDebug {
    pub target_y: f32,
    pub predicted_y: f32,
    pub tracking: bool,
    pub will_miss: bool,
    pub speed: f32,
    pub accuracy: f32,
    pub reaction_delay: f32,
    pub perfect_mode: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub player: PaddleView,
    pub ai: PaddleView,
    pub ball: BallView,
    pub projectiles: Vec<ProjectileView>,
    pub player_score: u32,
    pub ai_score: u32,
    pub rally: u32,
    pub longest_rally: u32,
    pub speed_multiplier: f32,
    pub serve_speed: f32,
    pub serve_indicator: bool,
    /// Horizontal ball speed above the extreme threshold
    pub extreme_speed: bool,
    pub in_zone: bool,
    pub ai_debug: AiDebug,
    pub state: MatchState,
    pub winner: Option<Side>,
    pub practice: bool,
}
