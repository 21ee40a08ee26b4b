use glam::Vec2;
use hecs::World;
use log::{debug, info};

use crate::components::*;
use crate::config::{Config, ServeRule};
use crate::difficulty::Difficulty;
use crate::events::{EffectEvent, SoundEvent};
use crate::map::GameMap;
use crate::resources::*;

/// Distance from the goal line of the score effect
const SCORE_EFFECT_INSET: f32 = 50.0;

/// Serve vertical speed is uniform in `±span/2` of the serve speed
const SERVE_VERTICAL_SPAN: f32 = 0.5;

/// Record a point for `scorer`. Returns the winner when the point ends the match.
#[allow(clippy::too_many_arguments)]
pub fn award_point(
    world: &mut World,
    scorer: Side,
    map: &GameMap,
    config: &Config,
    score: &mut Score,
    difficulty: &mut Difficulty,
    rally: &mut RallyStats,
    events: &mut Events,
) -> Option<Side> {
    score.increment(scorer);

    for (_e, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == scorer {
            paddle.stats.record_point();
        } else {
            paddle.stats.record_miss();
        }
    }

    difficulty.on_point(config);
    rally.end_point();

    let ball_y = world
        .query::<&Ball>()
        .iter()
        .next()
        .map_or(map.center().y, |(_e, ball)| ball.pos.y);
    let effect_x = match scorer {
        Side::Player => map.width - SCORE_EFFECT_INSET,
        Side::Ai => SCORE_EFFECT_INSET,
    };
    events.sound(match scorer {
        Side::Player => SoundEvent::Score,
        Side::Ai => SoundEvent::Lose,
    });
    events.effect(EffectEvent::Score {
        pos: Vec2::new(effect_x, ball_y),
        scorer,
    });

    let winner = score.has_winner(config.match_rules.win_score)?;
    score.winner = Some(winner);
    let player_won = winner == Side::Player;
    events.sound(SoundEvent::GameOver { player_won });
    events.effect(EffectEvent::RoundEnd { player_won });
    info!(
        "game over: {winner:?} wins {}-{}",
        score.player, score.ai
    );
    Some(winner)
}

/// Side the next serve travels toward after `scorer` took the point
pub fn serve_direction(scorer: Side, rule: ServeRule) -> Side {
    match rule {
        ServeRule::TowardConceder => scorer.opponent(),
        ServeRule::TowardScorer => scorer,
    }
}

/// Recentre the ball and launch it toward `toward`. The opening serve of a
/// match uses the base speed; later serves blend in the previous rally.
#[allow(clippy::too_many_arguments)]
pub fn serve_ball(
    world: &mut World,
    toward: Side,
    opening: bool,
    map: &GameMap,
    config: &Config,
    difficulty: &mut Difficulty,
    rally: &mut RallyStats,
    rng: &mut GameRng,
    events: &mut Events,
) {
    let speed = if opening {
        difficulty.opening_serve(config)
    } else {
        difficulty.next_serve(config)
    };

    let vel = Vec2::new(
        -toward.attack_dir() * speed,
        rng.centered(SERVE_VERTICAL_SPAN) * speed,
    );
    for (_e, ball) in world.query_mut::<&mut Ball>() {
        ball.pos = map.ball_spawn();
        ball.vel = vel;
        ball.base_speed = speed;
        ball.clamp_velocity(config.ball.max_speed, config.ball.max_vertical_speed());
        ball.record_speed();
    }

    rally.length = 0;
    if difficulty.is_danger_serve(config) {
        events.effect(EffectEvent::DangerZone);
    }
    debug!(
        "serve toward {toward:?} at {speed:.2} (multiplier {:.3})",
        difficulty.speed_multiplier
    );
}
