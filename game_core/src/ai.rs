//! AI opponent: trajectory prediction, deliberate imperfection, speed
//! adaptation and the cross-match generosity handicap.

use glam::Vec2;
use log::{debug, trace};

use crate::components::{Ball, Side};
use crate::config::{Config, PredictorKind};
use crate::difficulty::{rubber_band, AiTuning};
use crate::map::GameMap;
use crate::resources::{GameRng, Score};

/// Horizontal speeds below this are treated as "not approaching"
pub const VX_EPSILON: f32 = 1e-3;

/// Stepwise predictor gives up after this many ticks
const MAX_PREDICT_STEPS: usize = 10_000;

// Adaptation curve
const EXTREME_RATIO: f32 = 2.0;
const EXTREME_SPEED_SCALE: f32 = 15.0;
const EXTREME_REACTION_DELAY: f32 = 1.0;
const EXTREME_ACCURACY: f32 = 0.95;
const SPEED_SCALE: f32 = 10.0;
const MIN_REACTION_DELAY: f32 = 2.0;
const MAX_ADAPTED_ACCURACY: f32 = 0.94;
const ACCURACY_PER_RATIO: f32 = 0.03;

// Ice-shot strategy weights
const FIRE_PER_POINT_BEHIND: f32 = 0.1;
const FIRE_FAST_BALL_SPEED: f32 = 20.0;
const FIRE_FAST_BALL_BONUS: f32 = 0.25;
const FIRE_LONG_RALLY: u32 = 8;
const FIRE_LONG_RALLY_BONUS: f32 = 0.15;
const FIRE_MATCH_POINT_BONUS: f32 = 0.3;
const FIRE_COMFORTABLE_LEAD: i32 = 3;
const FIRE_COMFORTABLE_FACTOR: f32 = 0.3;
const FIRE_OUT_OF_POSITION_BONUS: f32 = 0.2;
const FIRE_MAX_RATIO_SCALE: f32 = 2.0;

/// Fold a coordinate into `[min, max]` by mirror reflection
pub fn fold_into(y: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range <= 0.0 {
        return min;
    }
    let period = 2.0 * range;
    let t = (y - min).rem_euclid(period);
    if t > range {
        min + period - t
    } else {
        min + t
    }
}

/// Linear extrapolation to `face_x`, folded off the walls.
/// Returns `None` when the ball is not moving toward +x.
pub fn predict_mirror(pos: Vec2, vel: Vec2, face_x: f32, min_y: f32, max_y: f32) -> Option<f32> {
    if vel.x <= VX_EPSILON {
        return None;
    }
    let t = ((face_x - pos.x) / vel.x).max(0.0);
    Some(fold_into(pos.y + vel.y * t, min_y, max_y))
}

/// Tick-by-tick walk of the ball path to `face_x` with wall reflection
pub fn predict_stepwise(
    pos: Vec2,
    vel: Vec2,
    face_x: f32,
    min_y: f32,
    max_y: f32,
) -> Option<f32> {
    if vel.x <= VX_EPSILON {
        return None;
    }
    let t = ((face_x - pos.x) / vel.x).max(0.0);
    let whole = (t.floor() as usize).min(MAX_PREDICT_STEPS);
    let fraction = if whole == MAX_PREDICT_STEPS {
        0.0
    } else {
        t - whole as f32
    };

    let mut y = pos.y;
    let mut vy = vel.y;
    for _ in 0..whole {
        y += vy;
        if y < min_y {
            y = 2.0 * min_y - y;
            vy = vy.abs();
        } else if y > max_y {
            y = 2.0 * max_y - y;
            vy = -vy.abs();
        }
    }
    Some(fold_into(y + vy * fraction, min_y, max_y))
}

/// Pull a prediction toward `centre` by `1 - accuracy`
pub fn apply_imperfection(raw: f32, centre: f32, accuracy: f32) -> f32 {
    raw * accuracy + centre * (1.0 - accuracy)
}

/// Inputs to the ice-shot decision
#[derive(Debug, Clone, Copy)]
pub struct FireContext {
    pub player_score: u32,
    pub ai_score: u32,
    pub win_score: u32,
    pub ball_speed: f32,
    pub ball_toward_player: bool,
    /// Ball centre is at or past the arena midline on the AI's side
    pub ball_in_ai_half: bool,
    pub rally: u32,
    /// Vertical distance between the player paddle centre and the ball
    pub player_offset: f32,
    pub player_height: f32,
    pub speed_multiplier: f32,
}

/// Per-tick probability that the AI fires its ice shot
/// Zero while the ball is still in the player's half.
pub fn fire_chance(ctx: &FireContext, config: &Config) -> f32 {
    if !ctx.ball_in_ai_half {
        return 0.0;
    }
    let behind = ctx.player_score as i32 - ctx.ai_score as i32;
    let mut chance = config.ai.fire_base_chance;

    if behind > 0 {
        chance += behind as f32 * FIRE_PER_POINT_BEHIND;
    }
    if ctx.ball_speed > FIRE_FAST_BALL_SPEED && ctx.ball_toward_player {
        chance += FIRE_FAST_BALL_BONUS;
    }
    if ctx.rally > FIRE_LONG_RALLY {
        chance += FIRE_LONG_RALLY_BONUS;
    }
    if ctx.player_score + 1 == ctx.win_score {
        chance += FIRE_MATCH_POINT_BONUS;
    }
    if -behind >= FIRE_COMFORTABLE_LEAD {
        chance *= FIRE_COMFORTABLE_FACTOR;
    }
    if ctx.player_offset > ctx.player_height {
        chance += FIRE_OUT_OF_POSITION_BONUS;
    }
    chance *= ctx.speed_multiplier.min(FIRE_MAX_RATIO_SCALE);
    chance.min(config.ai.fire_max_chance)
}

/// Hidden catch-up handicap carried across matches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generosity {
    pub consecutive_losses: u32,
    pub handicap: f32,
    pub adaptive: f32,
}

impl Default for Generosity {
    fn default() -> Self {
        Self {
            consecutive_losses: 0,
            handicap: 0.0,
            adaptive: 1.0,
        }
    }
}

impl Generosity {
    pub fn is_generous(&self) -> bool {
        self.handicap > 0.0
    }

    /// Multiplier applied to the AI paddle speed
    pub fn speed_factor(&self) -> f32 {
        (1.0 - self.handicap) * self.adaptive
    }

    /// Update from a finished match. Practice matches don't count.
    pub fn record_result(&mut self, player_won: bool, player_score: u32, config: &Config) {
        if config.match_rules.practice_mode {
            return;
        }
        let ai = &config.ai;

        if player_won {
            self.consecutive_losses = 0;
        } else {
            self.consecutive_losses += 1;
        }

        if self.consecutive_losses >= ai.very_generous_losses {
            self.handicap = ai.very_generous_handicap;
        } else if self.consecutive_losses >= ai.generous_losses {
            self.handicap = ai.generous_handicap;
        } else if player_score >= ai.comeback_score {
            self.handicap = 0.0;
        }

        self.adaptive = if player_won {
            (self.adaptive + 0.1).min(1.5)
        } else {
            (self.adaptive - 0.02).max(1.0)
        };

        debug!(
            "generosity: losses={} handicap={} adaptive={}",
            self.consecutive_losses, self.handicap, self.adaptive
        );
    }
}

/// AI opponent state
#[derive(Debug, Clone)]
pub struct AiController {
    pub target_y: f32,
    pub predicted_y: f32,
    pub tracking: bool,
    pub will_miss: bool,
    pub speed: f32,
    pub accuracy: f32,
    pub reaction_delay: f32,
    pub tuning: AiTuning,
    pub perfect_mode: bool,
    pub generosity: Generosity,
}

impl AiController {
    pub fn new(config: &Config, map: &GameMap) -> Self {
        let tuning = AiTuning::base(config);
        let centre = map.center().y;
        Self {
            target_y: centre,
            predicted_y: centre,
            tracking: false,
            will_miss: false,
            speed: tuning.speed,
            accuracy: tuning.accuracy,
            reaction_delay: tuning.reaction_delay,
            tuning,
            perfect_mode: false,
            generosity: Generosity::default(),
        }
    }

    /// Reset per-match state. Generosity survives.
    pub fn reset_match(&mut self, config: &Config, map: &GameMap) {
        let generosity = self.generosity;
        *self = Self::new(config, map);
        self.generosity = generosity;
    }

    /// Rubber-band the base values against the score
    pub fn retune(&mut self, score: &Score, config: &Config) {
        self.tuning = rubber_band(score, config);
        trace!("ai retuned: {:?}", self.tuning);
    }

    pub fn check_perfect_mode(&mut self, score: &Score, config: &Config) {
        if self.perfect_mode || config.match_rules.practice_mode {
            return;
        }
        if let Some(unlock) = config.ai.perfect_mode_unlock_score {
            if score.player >= unlock {
                self.perfect_mode = true;
                debug!("ai perfect mode unlocked at {}", score.player);
            }
        }
    }

    /// Scale speed, delay and accuracy with the rally multiplier `ratio`.
    /// The curve runs on the unadjusted base; the score-gap offsets from
    /// `retune` are added on top so they survive the curve's caps.
    pub fn adapt(&mut self, ratio: f32, config: &Config) {
        let base = AiTuning::base(config);
        let tuning = self.tuning;
        let (accuracy, reaction_delay) = if ratio > EXTREME_RATIO {
            self.speed = tuning.speed + (ratio - 1.0) * EXTREME_SPEED_SCALE;
            (EXTREME_ACCURACY, EXTREME_REACTION_DELAY)
        } else {
            self.speed = tuning.speed + (ratio - 1.0) * SPEED_SCALE;
            (
                MAX_ADAPTED_ACCURACY.min(base.accuracy + ACCURACY_PER_RATIO * ratio),
                MIN_REACTION_DELAY.max(base.reaction_delay - 2.0 * ratio),
            )
        };
        self.accuracy = (accuracy + tuning.accuracy - base.accuracy).clamp(0.0, 1.0);
        self.reaction_delay = (reaction_delay + tuning.reaction_delay - base.reaction_delay).max(0.0);

        self.speed *= self.generosity.speed_factor();
        if self.perfect_mode {
            self.speed *= config.ai.perfect_speed_factor;
        }
    }

    /// Pick the target Y for this tick from a copy of the ball
    pub fn plan(&mut self, ball: &Ball, map: &GameMap, config: &Config, rng: &mut GameRng) {
        let centre = map.center().y;
        let face_x =
            map.paddle_face_x(Side::Ai) - config.ball.edge_buffer - map.ball_half();
        let (min_y, max_y) = map.ball_y_range();

        let predictor = if self.perfect_mode {
            PredictorKind::Stepwise
        } else {
            config.ai.predictor
        };
        let raw = match predictor {
            PredictorKind::Mirror => predict_mirror(ball.pos, ball.vel, face_x, min_y, max_y),
            PredictorKind::Stepwise => predict_stepwise(ball.pos, ball.vel, face_x, min_y, max_y),
        };

        match raw {
            Some(raw) => {
                self.tracking = true;
                self.predicted_y = raw;
                self.target_y = if self.perfect_mode {
                    raw
                } else {
                    apply_imperfection(raw, centre, self.accuracy)
                        + rng.centered(config.ai.jitter)
                };
                self.will_miss = (self.target_y - raw).abs() > config.paddle.height / 2.0;
            }
            None => {
                self.tracking = false;
                self.predicted_y = centre;
                self.target_y = centre;
                self.will_miss = false;
                self.speed *= config.ai.drift_factor;
            }
        }
    }

    /// Next paddle Y. Holds still inside the reaction-delay band.
    pub fn approach(&self, y: f32, frozen: bool, config: &Config) -> f32 {
        let diff = self.target_y - y;
        if diff.abs() <= self.reaction_delay {
            return y;
        }
        let factor = if frozen {
            config.paddle.frozen_speed_factor
        } else {
            1.0
        };
        y + diff.signum() * (self.speed * factor).min(diff.abs())
    }

    pub fn mistake_chance(&self, config: &Config) -> f32 {
        if self.generosity.is_generous() {
            config.ai.mistake_chance + config.ai.generous_mistake_bonus
        } else {
            config.ai.mistake_chance
        }
    }
}
