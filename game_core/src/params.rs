/// Game tuning parameters for Impossible Pong (the "balanced" tuning).
///
/// Distances are arena units, speeds are units per tick, timers are ticks.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    pub const PADDLE_INSET: f32 = 20.0; // gap between arena edge and paddle outer face
    pub const FROZEN_SPEED_FACTOR: f32 = 0.1;

    // Ball
    pub const BALL_SIZE: f32 = 10.0;
    pub const BALL_SPEED_INITIAL: f32 = 10.0;
    pub const BALL_SPEED_INCREMENT: f32 = 0.3;
    pub const BALL_SPEED_MAX: f32 = 30.0;
    pub const BALL_VERTICAL_CAP_RATIO: f32 = 0.7;
    pub const EXTREME_SPEED_THRESHOLD: f32 = 25.0;
    pub const EDGE_BUFFER: f32 = 3.0;
    pub const PLAYER_ANGLE_SCALE: f32 = 6.0;
    pub const AI_ANGLE_SCALE: f32 = 5.0;
    pub const CORNER_ANGLE: f32 = 6.0;
    pub const AI_HIT_FACTOR: f32 = 0.7;

    // Difficulty
    pub const RALLY_SPEED_INCREASE: f32 = 0.025;
    pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;
    pub const TIME_SPEED_INCREMENT: f32 = 0.0008; // per second
    pub const OVERALL_INCREMENT: f32 = 0.02;
    pub const OVERALL_CAP: f32 = 1.5;
    pub const SERVE_SPEED_RATIO: f32 = 0.5;
    pub const MAX_SERVE_SPEED: f32 = 15.0;
    pub const FAST_RALLY_THRESHOLD: f32 = 1.5;
    pub const PLAYER_CATCH_UP_BOOST: f32 = 0.1;
    pub const AI_CATCH_UP_BOOST: f32 = 0.08;
    pub const SERVE_INDICATOR_TICKS: u32 = 60;
    pub const RUBBER_BAND_GAP: u32 = 2;

    // AI
    pub const AI_BASE_SPEED: f32 = 10.0;
    pub const AI_REACTION_DELAY: f32 = 5.0;
    pub const AI_ACCURACY: f32 = 0.91;
    pub const AI_JITTER: f32 = 20.0;
    pub const AI_MISTAKE_CHANCE: f32 = 0.02;
    pub const AI_MISTAKE_MAGNITUDE: f32 = 30.0;
    pub const AI_DRIFT_FACTOR: f32 = 0.5;

    // Ice shot
    pub const ICE_COOLDOWN_TICKS: u32 = 300; // 5 s
    pub const ICE_FREEZE_TICKS: u32 = 90; // 1.5 s
    pub const ICE_PROJECTILE_SPEED: f32 = 15.0;
    pub const ICE_PROJECTILE_WIDTH: f32 = 20.0;
    pub const ICE_PROJECTILE_HEIGHT: f32 = 6.0;

    // Match
    pub const WIN_SCORE: u32 = 7;
    pub const TICK_RATE: u32 = 60;
    pub const ZONE_RALLY: u32 = 5;
}
