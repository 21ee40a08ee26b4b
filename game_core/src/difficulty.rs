//! Rally speed multiplier, overall ratchet, serve speed and rubber-banding.

use crate::components::Side;
use crate::config::Config;
use crate::resources::Score;

/// Per-match difficulty state
#[derive(Debug, Clone, Copy)]
pub struct Difficulty {
    /// Rally speed multiplier, `[1, max_speed_multiplier]`
    pub speed_multiplier: f32,
    /// Whole-game ratchet, raised on every point
    pub overall: f32,
    pub serve_speed: f32,
    /// Multiplier reached in the rally before the current serve
    pub last_rally_speed: f32,
    /// Ticks the serve indicator stays visible
    pub serve_indicator: u32,
    base_speed: f32,
}

impl Difficulty {
    pub fn new(config: &Config) -> Self {
        Self {
            speed_multiplier: 1.0,
            overall: 1.0,
            serve_speed: config.ball.initial_speed,
            last_rally_speed: 1.0,
            serve_indicator: 0,
            base_speed: config.ball.initial_speed,
        }
    }

    /// Register a paddle hit and return the new horizontal ball speed.
    ///
    /// `rally_length` is the rally count before this hit.
    pub fn on_paddle_hit(&mut self, side: Side, rally_length: u32, config: &Config) -> f32 {
        let d = &config.difficulty;
        let (boost, factor) = match side {
            Side::Player => (d.player_catch_up_boost, 1.0),
            Side::Ai => (d.ai_catch_up_boost, config.ball.ai_hit_factor),
        };

        // Get back to the previous pace quickly after a fast rally
        if rally_length == 0 && self.last_rally_speed > d.fast_rally_threshold {
            self.speed_multiplier += boost;
        }
        self.speed_multiplier =
            (self.speed_multiplier + d.rally_speed_increase * factor).min(d.max_speed_multiplier);

        let speed = self.base_speed * self.speed_multiplier + config.ball.speed_increment * factor;
        speed.min(config.ball.max_speed)
    }

    /// Raise the overall ratchet after a point
    pub fn on_point(&mut self, config: &Config) {
        self.overall =
            (self.overall + config.difficulty.overall_increment).min(config.difficulty.overall_cap);
    }

    /// Speed for the next serve, blended from the ratchet and the rally that
    /// just ended. Resets the rally multiplier to match.
    pub fn next_serve(&mut self, config: &Config) -> f32 {
        let d = &config.difficulty;
        self.last_rally_speed = self.speed_multiplier;

        let reached = self.base_speed * self.last_rally_speed;
        let serve = self.base_speed * self.overall + (reached - self.base_speed) * d.serve_speed_ratio;
        self.serve_speed = serve.min(d.max_serve_speed);
        self.speed_multiplier = self.serve_speed / self.base_speed;
        self.serve_indicator = d.serve_indicator_ticks;
        self.serve_speed
    }

    /// First serve of a match: base speed, no ratchet
    pub fn opening_serve(&mut self, config: &Config) -> f32 {
        *self = Self::new(config);
        self.serve_indicator = config.difficulty.serve_indicator_ticks;
        self.serve_speed
    }

    /// Elapsed match time keeps a floor under the multiplier
    pub fn apply_time(&mut self, elapsed_secs: f32, config: &Config) {
        let d = &config.difficulty;
        let time_multiplier = 1.0 + elapsed_secs * d.time_speed_increment;
        self.speed_multiplier = self
            .speed_multiplier
            .max(time_multiplier)
            .min(d.max_speed_multiplier);
    }

    pub fn tick_indicator(&mut self) {
        self.serve_indicator = self.serve_indicator.saturating_sub(1);
    }

    pub fn serve_indicator_visible(&self) -> bool {
        self.serve_indicator > 0
    }

    /// Serve fast enough to warrant the danger-zone effect
    pub fn is_danger_serve(&self, config: &Config) -> bool {
        self.serve_speed > config.ball.initial_speed * 1.5
    }
}

/// AI base values after rubber-banding, recomputed at every serve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiTuning {
    pub speed: f32,
    pub accuracy: f32,
    pub reaction_delay: f32,
}

impl AiTuning {
    /// Unadjusted values for the configured mode
    pub fn base(config: &Config) -> Self {
        let ai = &config.ai;
        if config.match_rules.practice_mode {
            Self {
                speed: ai.practice_speed,
                accuracy: ai.practice_accuracy,
                reaction_delay: ai.practice_reaction_delay,
            }
        } else {
            Self {
                speed: ai.base_speed,
                accuracy: ai.accuracy,
                reaction_delay: ai.reaction_delay,
            }
        }
    }
}

/// Nudge the AI toward harder or easier values when the score gap is wide
pub fn rubber_band(score: &Score, config: &Config) -> AiTuning {
    let ai = &config.ai;
    let base = AiTuning::base(config);
    let gap = config.difficulty.rubber_band_gap as i32;
    let lead = score.lead(Side::Player);

    if lead > gap {
        AiTuning {
            accuracy: ai.max_accuracy.min(base.accuracy + 0.04),
            reaction_delay: ai.min_reaction_delay.max(base.reaction_delay - 1.0),
            ..base
        }
    } else if lead < -gap {
        AiTuning {
            accuracy: ai.min_accuracy.max(base.accuracy - 0.05),
            reaction_delay: ai.max_reaction_delay.min(base.reaction_delay + 1.0),
            ..base
        }
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_hit_raises_multiplier_and_speed() {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);

        let speed = difficulty.on_paddle_hit(Side::Player, 0, &config);

        assert!((difficulty.speed_multiplier - 1.025).abs() < 1e-6);
        assert!((speed - (10.0 * 1.025 + 0.3)).abs() < 1e-5, "speed was {speed}");
    }

    #[test]
    fn test_ai_hit_is_gentler() {
        let config = Config::new();
        let mut player = Difficulty::new(&config);
        let mut ai = Difficulty::new(&config);

        let player_speed = player.on_paddle_hit(Side::Player, 0, &config);
        let ai_speed = ai.on_paddle_hit(Side::Ai, 0, &config);

        assert!(ai.speed_multiplier < player.speed_multiplier);
        assert!(ai_speed < player_speed);
    }

    #[test]
    fn test_catch_up_boost_only_on_first_hit_after_fast_rally() {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);
        difficulty.last_rally_speed = 2.0;

        difficulty.on_paddle_hit(Side::Player, 0, &config);
        assert!((difficulty.speed_multiplier - 1.125).abs() < 1e-6);

        difficulty.on_paddle_hit(Side::Player, 1, &config);
        assert!((difficulty.speed_multiplier - 1.15).abs() < 1e-6);
    }

    #[test]
    fn test_multiplier_and_speed_are_capped() {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);
        let mut speed = 0.0;
        for rally in 0..500 {
            speed = difficulty.on_paddle_hit(Side::Player, rally, &config);
        }
        assert_eq!(difficulty.speed_multiplier, config.difficulty.max_speed_multiplier);
        assert_eq!(speed, config.ball.max_speed);
    }

    #[test]
    fn test_serve_blends_ratchet_and_previous_rally() {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);
        difficulty.speed_multiplier = 1.2;
        difficulty.overall = 1.04;

        let serve = difficulty.next_serve(&config);

        // 10 * 1.04 + (12 - 10) * 0.5
        assert!((serve - 11.4).abs() < 1e-5, "serve was {serve}");
        assert!((difficulty.speed_multiplier - 1.14).abs() < 1e-5);
        assert!((difficulty.last_rally_speed - 1.2).abs() < 1e-6);
        assert_eq!(difficulty.serve_indicator, 60);
    }

    #[test]
    fn test_serve_is_capped() {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);
        difficulty.speed_multiplier = 3.0;
        difficulty.overall = 1.5;

        let serve = difficulty.next_serve(&config);

        assert_eq!(serve, config.difficulty.max_serve_speed);
        assert!(difficulty.is_danger_serve(&config));
    }

    #[test]
    fn test_overall_ratchet_caps() {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);
        for _ in 0..100 {
            difficulty.on_point(&config);
        }
        assert_eq!(difficulty.overall, config.difficulty.overall_cap);
    }

    #[test]
    fn test_time_floor_never_lowers_multiplier() {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);

        difficulty.apply_time(100.0, &config);
        assert!((difficulty.speed_multiplier - 1.08).abs() < 1e-5);

        difficulty.speed_multiplier = 1.5;
        difficulty.apply_time(100.0, &config);
        assert_eq!(difficulty.speed_multiplier, 1.5);

        difficulty.apply_time(1.0e6, &config);
        assert_eq!(difficulty.speed_multiplier, config.difficulty.max_speed_multiplier);
    }

    #[test]
    fn test_rubber_band_directions() {
        let config = Config::new();
        let base = AiTuning::base(&config);

        let close = Score {
            player: 3,
            ai: 1,
            winner: None,
        };
        assert_eq!(rubber_band(&close, &config), base, "Gap of 2 is not wide");

        let player_ahead = Score {
            player: 4,
            ai: 1,
            winner: None,
        };
        let harder = rubber_band(&player_ahead, &config);
        assert!(harder.accuracy > base.accuracy);
        assert!(harder.reaction_delay < base.reaction_delay);

        let ai_ahead = Score {
            player: 0,
            ai: 3,
            winner: None,
        };
        let easier = rubber_band(&ai_ahead, &config);
        assert!(easier.accuracy < base.accuracy);
        assert!(easier.reaction_delay > base.reaction_delay);
        assert!(easier.accuracy >= config.ai.min_accuracy);
    }

    #[test]
    fn test_practice_mode_tuning() {
        let mut config = Config::new();
        config.match_rules.practice_mode = true;
        let tuning = AiTuning::base(&config);
        assert_eq!(tuning.speed, 7.0);
        assert_eq!(tuning.accuracy, 0.95);
        assert_eq!(tuning.reaction_delay, 10.0);
    }
}
