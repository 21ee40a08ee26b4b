use glam::Vec2;

use crate::components::Side;
use crate::config::Config;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Closed-interval overlap test, touching counts as overlapping
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}

/// Arena geometry derived from the configuration
#[derive(Debug, Clone)]
pub struct GameMap {
    pub width: f32,
    pub height: f32,
    paddle_width: f32,
    paddle_inset: f32,
    ball_half: f32,
}

impl GameMap {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.arena.width,
            height: config.arena.height,
            paddle_width: config.paddle.width,
            paddle_inset: config.paddle.inset,
            ball_half: config.ball.size / 2.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn ball_spawn(&self) -> Vec2 {
        self.center()
    }

    pub fn ball_half(&self) -> f32 {
        self.ball_half
    }

    /// Get centre X of a side's paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        let offset = self.paddle_inset + self.paddle_width / 2.0;
        match side {
            Side::Player => offset,
            Side::Ai => self.width - offset,
        }
    }

    /// X of the paddle face that looks into the arena
    pub fn paddle_face_x(&self, side: Side) -> f32 {
        self.paddle_x(side) + side.attack_dir() * self.paddle_width / 2.0
    }

    pub fn paddle_width(&self) -> f32 {
        self.paddle_width
    }

    pub fn paddle_rect(&self, side: Side, y: f32, height: f32) -> Aabb {
        Aabb::from_center_size(
            Vec2::new(self.paddle_x(side), y),
            Vec2::new(self.paddle_width, height),
        )
    }

    /// Clamp a centre Y so a body of the given half height stays inside
    pub fn clamp_y(&self, y: f32, half_height: f32) -> f32 {
        y.clamp(half_height, self.height - half_height)
    }

    /// Lowest and highest legal ball centre Y
    pub fn ball_y_range(&self) -> (f32, f32) {
        (self.ball_half, self.height - self.ball_half)
    }
}
