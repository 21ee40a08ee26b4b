use hecs::World;

use crate::components::*;
use crate::config::Config;
use crate::difficulty::Difficulty;
use crate::events::{EffectEvent, SoundEvent};
use crate::map::GameMap;
use crate::resources::*;
use crate::systems::collision::*;

/// Number of equal sub-steps for a horizontal speed `vx`
pub fn substep_count(vx: f32, paddle_width: f32) -> u32 {
    let step = paddle_width / 3.0;
    if vx.abs() > step {
        (vx.abs() / step).ceil() as u32
    } else {
        1
    }
}

/// Move the ball one tick, resolving wall and paddle contacts per sub-step.
/// Returns the scoring side when the ball crossed a goal line.
#[allow(clippy::too_many_arguments)]
pub fn advance_ball(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    score: &Score,
    difficulty: &mut Difficulty,
    rally: &mut RallyStats,
    rng: &mut GameRng,
    events: &mut Events,
) -> Option<Side> {
    let mut ball = world.query::<&Ball>().iter().next().map(|(_e, ball)| *ball)?;

    let paddles: Vec<PaddleBody> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| PaddleBody {
            side: p.side,
            y: p.y,
            height: p.height,
        })
        .collect();

    ball.clamp_velocity(config.ball.max_speed, config.ball.max_vertical_speed());

    let steps = substep_count(ball.vel.x, map.paddle_width());
    let delta = ball.vel / steps as f32;
    let mut hit_by = None;
    let mut hit_wall = false;
    let mut scorer = None;

    for _ in 0..steps {
        ball.pos += delta;

        hit_wall |= resolve_walls(&mut ball, map);

        if let Some(paddle) = paddles
            .iter()
            .find(|p| hits_paddle(&ball, p, map, config))
        {
            let offset = hit_offset(ball.pos.y, paddle.y, paddle.height);
            let ai_leads = score.lead(Side::Ai) > 0;
            let vy = deflection(paddle.side, offset, ai_leads, config, rng);
            let speed = difficulty.on_paddle_hit(paddle.side, rally.length, config);
            bounce(&mut ball, paddle, vy, speed, map, config);
            hit_by = Some(paddle.side);
            break;
        }

        if let Some(side) = goal_scorer(&ball, map) {
            scorer = Some(side);
            break;
        }
    }

    if hit_wall {
        events.sound(SoundEvent::Wall);
    }

    if let Some(side) = hit_by {
        if rally.record_hit(config.match_rules.zone_rally) {
            events.effect(EffectEvent::ZoneActivate);
        }
        events.sound(SoundEvent::PaddleHit {
            rally: rally.length,
        });
        let intensity = match side {
            Side::Player => 0.5,
            Side::Ai => 0.3,
        };
        events.effect(EffectEvent::PaddleHit {
            pos: ball.pos,
            intensity,
        });
        for (_e, paddle) in world.query_mut::<&mut Paddle>() {
            if paddle.side == side {
                paddle.stats.hits += 1;
            }
        }
    }

    for (_e, b) in world.query_mut::<&mut Ball>() {
        *b = ball;
    }
    scorer
}
