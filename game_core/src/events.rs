//! Notifications emitted by the simulation for the external collaborators.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::Side;

/// Fire-and-forget audio cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Wall,
    PaddleHit { rally: u32 },
    /// Player scored
    Score,
    /// AI scored
    Lose,
    GameOver { player_won: bool },
    Freeze,
    Thaw,
    IceShot,
}

impl SoundEvent {
    /// Stable event name handed to the audio collaborator
    pub fn name(&self) -> &'static str {
        match self {
            SoundEvent::Wall => "wall",
            SoundEvent::PaddleHit { .. } => "paddle-hit",
            SoundEvent::Score => "score",
            SoundEvent::Lose => "lose",
            SoundEvent::GameOver { .. } => "game-over",
            SoundEvent::Freeze => "freeze",
            SoundEvent::Thaw => "thaw",
            SoundEvent::IceShot => "ice-shot",
        }
    }
}

/// Visual effect trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectEvent {
    PaddleHit { pos: Vec2, intensity: f32 },
    Score { pos: Vec2, scorer: Side },
    Freeze { pos: Vec2 },
    /// Rally reached the zone threshold
    ZoneActivate,
    /// Serve speed crossed 1.5x the initial speed
    DangerZone,
    RoundEnd { player_won: bool },
}

impl EffectEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EffectEvent::PaddleHit { .. } => "paddle-hit",
            EffectEvent::Score { .. } => "score",
            EffectEvent::Freeze { .. } => "freeze",
            EffectEvent::ZoneActivate => "zone",
            EffectEvent::DangerZone => "danger-zone",
            EffectEvent::RoundEnd { .. } => "round-end",
        }
    }

    /// Arena position of the effect, if it has one
    pub fn pos(&self) -> Option<Vec2> {
        match self {
            EffectEvent::PaddleHit { pos, .. }
            | EffectEvent::Score { pos, .. }
            | EffectEvent::Freeze { pos } => Some(*pos),
            _ => None,
        }
    }
}

/// End-of-game record for the progression collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub player_score: u32,
    pub ai_score: u32,
    pub survival_secs: u32,
    pub longest_rally: u32,
    pub accuracy: u32, // percent
    pub max_streak: u32,
    pub zone_secs: u32,
    pub max_ball_speed: f32,
    pub rallies: u32, // player paddle hits
    pub player_won: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_names() {
        assert_eq!(SoundEvent::Wall.name(), "wall");
        assert_eq!(SoundEvent::PaddleHit { rally: 3 }.name(), "paddle-hit");
        assert_eq!(SoundEvent::GameOver { player_won: false }.name(), "game-over");
        assert_eq!(SoundEvent::IceShot.name(), "ice-shot");
        assert_eq!(SoundEvent::Thaw.name(), "thaw");
    }

    #[test]
    fn test_effect_positions() {
        let hit = EffectEvent::PaddleHit {
            pos: Vec2::new(30.0, 120.0),
            intensity: 0.5,
        };
        assert_eq!(hit.name(), "paddle-hit");
        assert_eq!(hit.pos(), Some(Vec2::new(30.0, 120.0)));
        assert_eq!(EffectEvent::DangerZone.pos(), None);
    }
}
