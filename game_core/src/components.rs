use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which end of the arena an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human player, left edge
    Player,
    /// AI opponent, right edge
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Horizontal direction pointing away from this side's goal line
    pub fn attack_dir(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Ai => -1.0,
        }
    }
}

/// Who drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Human,
    Ai,
}

/// Per-side counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleStats {
    pub hits: u32,
    pub misses: u32,
    pub streak: u32,
    pub max_streak: u32,
}

impl PaddleStats {
    /// Returned-ball percentage, 100 before the first contact
    pub fn accuracy(&self) -> u32 {
        let total = self.hits + self.misses;
        if total == 0 {
            100
        } else {
            ((self.hits as f32 / total as f32) * 100.0).round() as u32
        }
    }

    pub fn record_point(&mut self) {
        self.streak += 1;
        self.max_streak = self.max_streak.max(self.streak);
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.streak = 0;
    }
}

/// Paddle component - one per side
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub controller: Controller,
    pub y: f32, // centre Y, clamped to arena
    pub height: f32,
    pub speed: f32,
    pub stats: PaddleStats,
}

impl Paddle {
    pub fn new(side: Side, controller: Controller, y: f32, height: f32, speed: f32) -> Self {
        Self {
            side,
            controller,
            y,
            height,
            speed,
            stats: PaddleStats::default(),
        }
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// Movement intent for a human paddle, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleIntent {
    pub up: bool,
    pub down: bool,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// -1 = up, 0 = stop, 1 = down
    pub fn dir(&self) -> i8 {
        match (self.up, self.down) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Freeze effect on a paddle. `remaining == 0` means not frozen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Freeze {
    pub remaining: u32,
}

impl Freeze {
    pub fn is_frozen(&self) -> bool {
        self.remaining > 0
    }

    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    /// Count down one tick. Returns true on the tick the paddle thaws.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// Ice-shot launcher state on a paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IceShot {
    pub cooldown: u32, // ticks until the next shot, 0 = charged
    pub in_flight: bool,
}

impl IceShot {
    pub fn is_ready(&self) -> bool {
        self.cooldown == 0 && !self.in_flight
    }
}

/// Ice projectile in flight
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub owner: Side,
    pub pos: Vec2,
    pub vel_x: f32,
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub base_speed: f32,
    pub max_speed_reached: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        let speed = vel.x.abs();
        Self {
            pos,
            vel,
            base_speed: speed,
            max_speed_reached: speed,
        }
    }

    /// True when the ball is travelling toward `side`'s goal line
    pub fn moving_toward(&self, side: Side) -> bool {
        match side {
            Side::Player => self.vel.x < 0.0,
            Side::Ai => self.vel.x > 0.0,
        }
    }

    /// Clamp each axis independently to its cap
    pub fn clamp_velocity(&mut self, max_x: f32, max_y: f32) {
        if self.vel.x.abs() > max_x {
            self.vel.x = self.vel.x.signum() * max_x;
        }
        if self.vel.y.abs() > max_y {
            self.vel.y = self.vel.y.signum() * max_y;
        }
    }

    pub fn record_speed(&mut self) {
        self.max_speed_reached = self.max_speed_reached.max(self.vel.length());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_dir() {
        let mut intent = PaddleIntent::new();
        assert_eq!(intent.dir(), 0);
        intent.up = true;
        assert_eq!(intent.dir(), -1);
        intent.down = true;
        assert_eq!(intent.dir(), 0, "Both keys cancel out");
        intent.up = false;
        assert_eq!(intent.dir(), 1);
    }

    #[test]
    fn test_freeze_counts_down_and_thaws_once() {
        let mut freeze = Freeze::default();
        assert!(!freeze.tick());
        freeze.start(2);
        assert!(freeze.is_frozen());
        assert!(!freeze.tick());
        assert!(freeze.tick(), "Thaw reported on the last tick");
        assert!(!freeze.is_frozen());
        assert!(!freeze.tick());
    }

    #[test]
    fn test_stats_accuracy_and_streak() {
        let mut stats = PaddleStats::default();
        assert_eq!(stats.accuracy(), 100);
        stats.hits = 3;
        stats.record_miss();
        assert_eq!(stats.accuracy(), 75);
        stats.record_point();
        stats.record_point();
        stats.record_miss();
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.max_streak, 2);
    }

    #[test]
    fn test_ball_clamp_velocity_per_axis() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(-40.0, 25.0));
        ball.clamp_velocity(30.0, 21.0);
        assert_eq!(ball.vel, Vec2::new(-30.0, 21.0));
    }
}
