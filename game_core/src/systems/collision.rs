use glam::Vec2;

use crate::components::{Ball, Side};
use crate::config::Config;
use crate::map::{Aabb, GameMap};
use crate::resources::GameRng;

/// Paddle geometry the resolver needs, copied out of the world
#[derive(Debug, Clone, Copy)]
pub struct PaddleBody {
    pub side: Side,
    pub y: f32,
    pub height: f32,
}

/// Reflect the ball off the top and bottom walls. Returns true on contact.
pub fn resolve_walls(ball: &mut Ball, map: &GameMap) -> bool {
    let half = map.ball_half();
    if ball.pos.y - half <= 0.0 {
        ball.pos.y = half;
        ball.vel.y = ball.vel.y.abs();
        true
    } else if ball.pos.y + half >= map.height {
        ball.pos.y = map.height - half;
        ball.vel.y = -ball.vel.y.abs();
        true
    } else {
        false
    }
}

/// Hit box of a paddle grown by the edge buffer
pub fn paddle_hitbox(paddle: &PaddleBody, map: &GameMap, config: &Config) -> Aabb {
    map.paddle_rect(paddle.side, paddle.y, paddle.height)
        .expanded(config.ball.edge_buffer)
}

/// Ball overlaps the paddle while travelling toward it
pub fn hits_paddle(ball: &Ball, paddle: &PaddleBody, map: &GameMap, config: &Config) -> bool {
    if !ball.moving_toward(paddle.side) {
        return false;
    }
    let ball_box = Aabb::from_center_size(ball.pos, Vec2::splat(map.ball_half() * 2.0));
    ball_box.overlaps(&paddle_hitbox(paddle, map, config))
}

/// Normalised hit offset, -1 at the top edge and 1 at the bottom
pub fn hit_offset(ball_y: f32, paddle_y: f32, paddle_height: f32) -> f32 {
    ((ball_y - paddle_y) / (paddle_height / 2.0)).clamp(-1.0, 1.0)
}

/// Vertical return speed for a hit at `offset`
pub fn deflection(side: Side, offset: f32, ai_leads: bool, config: &Config, rng: &mut GameRng) -> f32 {
    match side {
        Side::Player => offset * config.ball.player_angle_scale,
        Side::Ai if ai_leads => rng.sign() * config.ball.corner_angle,
        Side::Ai => offset * config.ball.ai_angle_scale,
    }
}

/// Push the ball one unit clear of the paddle face and send it back with
/// horizontal speed `speed`
pub fn bounce(
    ball: &mut Ball,
    paddle: &PaddleBody,
    vy: f32,
    speed: f32,
    map: &GameMap,
    config: &Config,
) {
    let hitbox = paddle_hitbox(paddle, map, config);
    let half = map.ball_half();
    let dir = paddle.side.attack_dir();
    ball.pos.x = match paddle.side {
        Side::Player => hitbox.max.x + 1.0 + half,
        Side::Ai => hitbox.min.x - 1.0 - half,
    };
    ball.base_speed = speed;
    ball.vel = Vec2::new(dir * speed, vy);
    ball.clamp_velocity(config.ball.max_speed, config.ball.max_vertical_speed());
    ball.record_speed();
}

/// Side that scores when the ball centre crosses a goal line
pub fn goal_scorer(ball: &Ball, map: &GameMap) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Ai)
    } else if ball.pos.x > map.width {
        Some(Side::Player)
    } else {
        None
    }
}
