//! Match configuration.
//!
//! One [`Config`] parameterises the whole core; the historical tunings of the
//! game are exposed as presets. Every section is `#[serde(default)]`, so a
//! TOML document only needs the keys it overrides:
//!
//! ```toml
//! [ball]
//! initial_speed = 8.0
//!
//! [match_rules]
//! win_score = 5
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::Params;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Which trajectory predictor the AI uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictorKind {
    /// Linear extrapolation folded off the walls by mirror reflection
    #[default]
    Mirror,
    /// Tick-by-tick simulation of the ball path
    Stepwise,
}

/// Who receives the serve after a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeRule {
    #[default]
    TowardConceder,
    TowardScorer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: Params::ARENA_WIDTH,
            height: Params::ARENA_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub inset: f32,
    pub frozen_speed_factor: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: Params::PADDLE_WIDTH,
            height: Params::PADDLE_HEIGHT,
            speed: Params::PADDLE_SPEED,
            inset: Params::PADDLE_INSET,
            frozen_speed_factor: Params::FROZEN_SPEED_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub size: f32,
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
    pub vertical_cap_ratio: f32,
    pub extreme_speed_threshold: f32,
    pub edge_buffer: f32,
    pub player_angle_scale: f32,
    pub ai_angle_scale: f32,
    pub corner_angle: f32,
    /// Scales the rally increase and speed increment on AI-side hits
    pub ai_hit_factor: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            size: Params::BALL_SIZE,
            initial_speed: Params::BALL_SPEED_INITIAL,
            speed_increment: Params::BALL_SPEED_INCREMENT,
            max_speed: Params::BALL_SPEED_MAX,
            vertical_cap_ratio: Params::BALL_VERTICAL_CAP_RATIO,
            extreme_speed_threshold: Params::EXTREME_SPEED_THRESHOLD,
            edge_buffer: Params::EDGE_BUFFER,
            player_angle_scale: Params::PLAYER_ANGLE_SCALE,
            ai_angle_scale: Params::AI_ANGLE_SCALE,
            corner_angle: Params::CORNER_ANGLE,
            ai_hit_factor: Params::AI_HIT_FACTOR,
        }
    }
}

impl BallConfig {
    pub fn max_vertical_speed(&self) -> f32 {
        self.max_speed * self.vertical_cap_ratio
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub rally_speed_increase: f32,
    pub max_speed_multiplier: f32,
    pub time_speed_increment: f32,
    pub overall_increment: f32,
    pub overall_cap: f32,
    pub serve_speed_ratio: f32,
    pub max_serve_speed: f32,
    pub fast_rally_threshold: f32,
    pub player_catch_up_boost: f32,
    pub ai_catch_up_boost: f32,
    pub serve_indicator_ticks: u32,
    pub rubber_band_gap: u32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            rally_speed_increase: Params::RALLY_SPEED_INCREASE,
            max_speed_multiplier: Params::MAX_SPEED_MULTIPLIER,
            time_speed_increment: Params::TIME_SPEED_INCREMENT,
            overall_increment: Params::OVERALL_INCREMENT,
            overall_cap: Params::OVERALL_CAP,
            serve_speed_ratio: Params::SERVE_SPEED_RATIO,
            max_serve_speed: Params::MAX_SERVE_SPEED,
            fast_rally_threshold: Params::FAST_RALLY_THRESHOLD,
            player_catch_up_boost: Params::PLAYER_CATCH_UP_BOOST,
            ai_catch_up_boost: Params::AI_CATCH_UP_BOOST,
            serve_indicator_ticks: Params::SERVE_INDICATOR_TICKS,
            rubber_band_gap: Params::RUBBER_BAND_GAP,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub base_speed: f32,
    pub reaction_delay: f32,
    pub accuracy: f32,
    pub jitter: f32,
    pub mistake_chance: f32,
    pub mistake_magnitude: f32,
    pub generous_mistake_bonus: f32,
    pub drift_factor: f32,
    pub predictor: PredictorKind,
    pub perfect_mode_unlock_score: Option<u32>,
    pub perfect_speed_factor: f32,

    // Rubber-banding bounds
    pub min_accuracy: f32,
    pub max_accuracy: f32,
    pub min_reaction_delay: f32,
    pub max_reaction_delay: f32,

    // Practice overrides
    pub practice_speed: f32,
    pub practice_accuracy: f32,
    pub practice_reaction_delay: f32,

    // Generosity handicap
    pub generous_losses: u32,
    pub very_generous_losses: u32,
    pub generous_handicap: f32,
    pub very_generous_handicap: f32,
    pub comeback_score: u32,

    // Ice shot strategy
    pub fire_base_chance: f32,
    pub fire_max_chance: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_speed: Params::AI_BASE_SPEED,
            reaction_delay: Params::AI_REACTION_DELAY,
            accuracy: Params::AI_ACCURACY,
            jitter: Params::AI_JITTER,
            mistake_chance: Params::AI_MISTAKE_CHANCE,
            mistake_magnitude: Params::AI_MISTAKE_MAGNITUDE,
            generous_mistake_bonus: 0.02,
            drift_factor: Params::AI_DRIFT_FACTOR,
            predictor: PredictorKind::Mirror,
            perfect_mode_unlock_score: None,
            perfect_speed_factor: 1.5,
            min_accuracy: 0.85,
            max_accuracy: 0.95,
            min_reaction_delay: 3.0,
            max_reaction_delay: 8.0,
            practice_speed: 7.0,
            practice_accuracy: 0.95,
            practice_reaction_delay: 10.0,
            generous_losses: 5,
            very_generous_losses: 10,
            generous_handicap: 0.05,
            very_generous_handicap: 0.10,
            comeback_score: 3,
            fire_base_chance: 0.05,
            fire_max_chance: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IceShotConfig {
    pub enabled: bool,
    pub cooldown_ticks: u32,
    pub freeze_ticks: u32,
    pub projectile_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
}

impl Default for IceShotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_ticks: Params::ICE_COOLDOWN_TICKS,
            freeze_ticks: Params::ICE_FREEZE_TICKS,
            projectile_speed: Params::ICE_PROJECTILE_SPEED,
            projectile_width: Params::ICE_PROJECTILE_WIDTH,
            projectile_height: Params::ICE_PROJECTILE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    pub win_score: u32,
    pub serve_rule: ServeRule,
    pub tick_rate: u32,
    pub zone_rally: u32,
    pub practice_mode: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            win_score: Params::WIN_SCORE,
            serve_rule: ServeRule::TowardConceder,
            tick_rate: Params::TICK_RATE,
            zone_rally: Params::ZONE_RALLY,
            practice_mode: false,
        }
    }
}

impl MatchRules {
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.tick_rate as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub particles: bool,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self { particles: true }
    }
}

/// Game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena: ArenaConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub difficulty: DifficultyConfig,
    pub ai: AiConfig,
    pub ice_shot: IceShotConfig,
    pub match_rules: MatchRules,
    pub effects: EffectsConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expert-level tuning; the default
    pub fn balanced() -> Self {
        Self::default()
    }

    /// The first release: slow paddles and ball, large increments
    pub fn classic() -> Self {
        let mut config = Self::default();
        config.paddle.speed = 5.0;
        config.ball.initial_speed = 5.0;
        config.ball.speed_increment = 0.5;
        config
    }

    /// Beginner tuning with a slow serve and small increments
    pub fn gentle() -> Self {
        let mut config = Self::default();
        config.paddle.speed = 5.0;
        config.ball.initial_speed = 3.0;
        config.ball.speed_increment = 0.2;
        config
    }

    /// Balanced tuning where the AI switches to perfect tracking once the
    /// player reaches three points
    pub fn impossible() -> Self {
        let mut config = Self::default();
        config.ai.perfect_mode_unlock_score = Some(3);
        config
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "balanced" => Some(Self::balanced()),
            "classic" => Some(Self::classic()),
            "gentle" => Some(Self::gentle()),
            "impossible" => Some(Self::impossible()),
            _ => None,
        }
    }

    /// Parse a (partial) TOML document on top of the defaults and validate it
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason })
            }
        }

        check(self.arena.width > 0.0, "arena.width", "must be positive")?;
        check(self.arena.height > 0.0, "arena.height", "must be positive")?;
        check(self.paddle.width > 0.0, "paddle.width", "must be positive")?;
        check(
            self.paddle.height > 0.0 && self.paddle.height < self.arena.height,
            "paddle.height",
            "must be positive and shorter than the arena",
        )?;
        check(self.paddle.speed > 0.0, "paddle.speed", "must be positive")?;
        check(
            self.paddle.inset + self.paddle.width < self.arena.width / 2.0,
            "paddle.inset",
            "paddles must stay on their own half",
        )?;
        check(
            (0.0..=1.0).contains(&self.paddle.frozen_speed_factor),
            "paddle.frozen_speed_factor",
            "must be within [0, 1]",
        )?;
        check(
            self.ball.size > 0.0 && self.ball.size < self.arena.height,
            "ball.size",
            "must be positive and smaller than the arena",
        )?;
        check(
            self.ball.initial_speed > 0.0,
            "ball.initial_speed",
            "must be positive",
        )?;
        check(
            self.ball.max_speed >= self.ball.initial_speed,
            "ball.max_speed",
            "must not be below the initial speed",
        )?;
        check(
            self.ball.vertical_cap_ratio > 0.0 && self.ball.vertical_cap_ratio <= 1.0,
            "ball.vertical_cap_ratio",
            "must be within (0, 1]",
        )?;
        check(
            self.ball.edge_buffer >= 0.0,
            "ball.edge_buffer",
            "must not be negative",
        )?;
        check(
            self.difficulty.max_speed_multiplier >= 1.0,
            "difficulty.max_speed_multiplier",
            "must be at least 1",
        )?;
        check(
            self.difficulty.overall_cap >= 1.0
                && self.difficulty.overall_cap <= self.difficulty.max_speed_multiplier,
            "difficulty.overall_cap",
            "must be within [1, max_speed_multiplier]",
        )?;
        check(
            self.difficulty.max_serve_speed >= self.ball.initial_speed
                && self.difficulty.max_serve_speed <= self.ball.max_speed,
            "difficulty.max_serve_speed",
            "must be within [initial_speed, max_speed]",
        )?;
        check(
            (0.0..=1.0).contains(&self.ai.accuracy),
            "ai.accuracy",
            "must be within [0, 1]",
        )?;
        check(
            self.ai.min_accuracy <= self.ai.max_accuracy,
            "ai.min_accuracy",
            "must not exceed ai.max_accuracy",
        )?;
        check(
            self.ai.min_reaction_delay <= self.ai.max_reaction_delay,
            "ai.min_reaction_delay",
            "must not exceed ai.max_reaction_delay",
        )?;
        check(self.ai.base_speed >= 0.0, "ai.base_speed", "must not be negative")?;
        check(self.ai.jitter >= 0.0, "ai.jitter", "must not be negative")?;
        check(
            (0.0..=1.0).contains(&self.ai.mistake_chance),
            "ai.mistake_chance",
            "must be a probability",
        )?;
        check(
            self.ai.very_generous_losses >= self.ai.generous_losses,
            "ai.very_generous_losses",
            "must not be below ai.generous_losses",
        )?;
        check(
            self.ice_shot.projectile_speed > 0.0,
            "ice_shot.projectile_speed",
            "must be positive",
        )?;
        check(
            self.ice_shot.projectile_speed <= self.paddle.width + self.ice_shot.projectile_width,
            "ice_shot.projectile_speed",
            "must not exceed paddle.width + ice_shot.projectile_width",
        )?;
        check(
            self.match_rules.win_score > 0,
            "match_rules.win_score",
            "must be positive",
        )?;
        check(
            self.match_rules.tick_rate > 0,
            "match_rules.tick_rate",
            "must be positive",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
        for name in ["balanced", "classic", "gentle", "impossible"] {
            let preset = Config::preset(name).expect("preset exists");
            assert!(preset.validate().is_ok(), "{name} preset should validate");
        }
        assert!(Config::preset("nightmare").is_none());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            [ball]
            initial_speed = 8.0

            [match_rules]
            win_score = 5
            serve_rule = "toward_scorer"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.ball.initial_speed, 8.0);
        assert_eq!(config.ball.max_speed, Params::BALL_SPEED_MAX);
        assert_eq!(config.match_rules.win_score, 5);
        assert_eq!(config.match_rules.serve_rule, ServeRule::TowardScorer);
        assert_eq!(config.paddle.height, Params::PADDLE_HEIGHT);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Config::from_toml_str("[match_rules]\nwin_score = 0\n").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "match_rules.win_score"),
            other => panic!("unexpected error: {other}"),
        }

        let mut config = Config::new();
        config.difficulty.max_serve_speed = config.ball.max_speed + 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_projectile_speed_and_ai_speed_are_bounded() {
        let mut config = Config::new();
        config.ice_shot.projectile_speed = config.paddle.width + config.ice_shot.projectile_width;
        assert!(config.validate().is_ok(), "Speed equal to the bound is allowed");

        config.ice_shot.projectile_speed += 1.0;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "ice_shot.projectile_speed"),
            other => panic!("projectile could skip the paddle: {other:?}"),
        }

        let err = Config::from_toml_str("[ai]\nbase_speed = -1.0\n").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "ai.base_speed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[ball\ninitial_speed = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_frame_ms() {
        let rules = MatchRules::default();
        assert!((rules.frame_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }
}
