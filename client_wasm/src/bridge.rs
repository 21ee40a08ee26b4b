//! Conversions from simulation output to host messages

use game_core::{EffectEvent, MatchState, RoundSummary, Side, Snapshot, SoundEvent};
use proto::{AiOverlay, HostMsg, ProjectileState, Screen};

fn to_u8(v: u32) -> u8 {
    u8::try_from(v).unwrap_or(u8::MAX)
}

fn to_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

fn side_id(side: Side) -> u8 {
    match side {
        Side::Player => 0,
        Side::Ai => 1,
    }
}

pub fn screen(state: MatchState) -> Screen {
    match state {
        MatchState::Ready => Screen::Title,
        MatchState::Playing => Screen::Playing,
        MatchState::Paused => Screen::Paused,
        MatchState::GameOver => Screen::GameOver,
    }
}

/// Frame message for the renderer. AI internals only go out with `debug`.
pub fn frame_msg(snapshot: &Snapshot, debug: bool) -> HostMsg {
    let ai = debug.then(|| {
        let d = &snapshot.ai_debug;
        AiOverlay {
            target_y: d.target_y,
            predicted_y: d.predicted_y,
            will_miss: d.will_miss,
            speed: d.speed,
            accuracy: d.accuracy,
            reaction_delay: d.reaction_delay,
            perfect_mode: d.perfect_mode,
        }
    });

    HostMsg::Frame {
        tick: u32::try_from(snapshot.tick).unwrap_or(u32::MAX),
        screen: screen(snapshot.state),
        ball_x: snapshot.ball.x,
        ball_y: snapshot.ball.y,
        ball_vx: snapshot.ball.vx,
        ball_vy: snapshot.ball.vy,
        player_y: snapshot.player.y,
        ai_y: snapshot.ai.y,
        player_frozen: snapshot.player.frozen,
        ai_frozen: snapshot.ai.frozen,
        player_ice_ready: snapshot.player.ice_ready,
        player_ice_cooldown: to_u16(snapshot.player.ice_cooldown),
        projectiles: snapshot
            .projectiles
            .iter()
            .map(|p| ProjectileState {
                owner: side_id(p.owner),
                x: p.x,
                y: p.y,
            })
            .collect(),
        player_score: to_u8(snapshot.player_score),
        ai_score: to_u8(snapshot.ai_score),
        rally: to_u16(snapshot.rally),
        speed_multiplier: snapshot.speed_multiplier,
        serve_speed: snapshot.serve_speed,
        serve_indicator: snapshot.serve_indicator,
        extreme_speed: snapshot.extreme_speed,
        in_zone: snapshot.in_zone,
        practice: snapshot.practice,
        ai,
    }
}

pub fn sound_msg(sound: SoundEvent) -> HostMsg {
    let value = match sound {
        SoundEvent::PaddleHit { rally } => to_u16(rally),
        SoundEvent::GameOver { player_won } => u16::from(player_won),
        _ => 0,
    };
    HostMsg::Sound {
        name: sound.name().to_string(),
        value,
    }
}

pub fn effect_msg(effect: EffectEvent) -> HostMsg {
    let pos = effect.pos().unwrap_or_default();
    let intensity = match effect {
        EffectEvent::PaddleHit { intensity, .. } => intensity,
        _ => 1.0,
    };
    HostMsg::Effect {
        name: effect.name().to_string(),
        x: pos.x,
        y: pos.y,
        intensity,
    }
}

pub fn summary_msg(summary: &RoundSummary) -> HostMsg {
    HostMsg::GameOver {
        player_won: summary.player_won,
        player_score: to_u8(summary.player_score),
        ai_score: to_u8(summary.ai_score),
        survival_secs: summary.survival_secs,
        longest_rally: to_u16(summary.longest_rally),
        accuracy: to_u8(summary.accuracy),
        max_streak: to_u16(summary.max_streak),
        zone_secs: summary.zone_secs,
        max_ball_speed: summary.max_ball_speed,
        rallies: to_u16(summary.rallies),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Config, Match};

    #[test]
    fn test_frame_hides_ai_unless_debugging() {
        let mut game = Match::new(Config::new(), 3).unwrap();
        game.start();
        let snapshot = game.snapshot();

        match frame_msg(&snapshot, false) {
            HostMsg::Frame { ai, screen, .. } => {
                assert!(ai.is_none());
                assert_eq!(screen, Screen::Playing);
            }
            _ => panic!("Expected a frame"),
        }
        match frame_msg(&snapshot, true) {
            HostMsg::Frame { ai, .. } => assert!(ai.is_some()),
            _ => panic!("Expected a frame"),
        }
    }

    #[test]
    fn test_sound_carries_rally() {
        assert_eq!(
            sound_msg(SoundEvent::PaddleHit { rally: 12 }),
            HostMsg::Sound {
                name: "paddle-hit".to_string(),
                value: 12,
            }
        );
        assert_eq!(
            sound_msg(SoundEvent::GameOver { player_won: true }),
            HostMsg::Sound {
                name: "game-over".to_string(),
                value: 1,
            }
        );
    }

    #[test]
    fn test_positionless_effect_defaults_to_origin() {
        match effect_msg(EffectEvent::ZoneActivate) {
            HostMsg::Effect { name, x, y, intensity } => {
                assert_eq!(name, "zone");
                assert_eq!((x, y), (0.0, 0.0));
                assert_eq!(intensity, 1.0);
            }
            _ => panic!("Expected an effect"),
        }
    }

    #[test]
    fn test_summary_saturates_counts() {
        let summary = RoundSummary {
            player_score: 7,
            ai_score: 4,
            survival_secs: 95,
            longest_rally: 70_000,
            accuracy: 88,
            max_streak: 9,
            zone_secs: 12,
            max_ball_speed: 21.5,
            rallies: 40,
            player_won: true,
        };
        match summary_msg(&summary) {
            HostMsg::GameOver {
                longest_rally,
                player_score,
                ..
            } => {
                assert_eq!(longest_rally, u16::MAX);
                assert_eq!(player_score, 7);
            }
            _ => panic!("Expected a summary"),
        }
    }
}
