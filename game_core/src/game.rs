//! Match orchestrator: owns the world and every resource, paces ticks off
//! the host clock and forwards events to the collaborators.

use hecs::World;
use log::info;

use crate::ai::AiController;
use crate::components::*;
use crate::config::{Config, ConfigError};
use crate::difficulty::Difficulty;
use crate::events::RoundSummary;
use crate::hooks::Hooks;
use crate::map::GameMap;
use crate::resources::*;
use crate::snapshot::*;
use crate::systems::serve_ball;
use crate::{create_ball, create_paddle, step};

/// Match lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Title screen, nothing served yet
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// One human-vs-AI match
pub struct Match {
    pub world: World,
    pub time: Time,
    pub map: GameMap,
    pub config: Config,
    pub score: Score,
    pub difficulty: Difficulty,
    pub rally: RallyStats,
    pub ai: AiController,
    pub events: Events,
    pub input_queue: InputQueue,
    pub rng: GameRng,
    pub clock: FrameClock,
    pub hooks: Hooks,
    pub state: MatchState,
    pub last_summary: Option<RoundSummary>,
    held: PaddleInput,
}

impl Match {
    /// Validate `config` and build a match in the `Ready` state
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let map = GameMap::new(&config);
        let mut world = World::new();
        create_paddle(&mut world, &map, &config, Side::Player, Controller::Human);
        create_paddle(&mut world, &map, &config, Side::Ai, Controller::Ai);
        create_ball(&mut world, map.ball_spawn(), glam::Vec2::ZERO);

        Ok(Self {
            world,
            time: Time::new(config.match_rules.tick_rate),
            difficulty: Difficulty::new(&config),
            ai: AiController::new(&config, &map),
            clock: FrameClock::new(config.match_rules.frame_ms()),
            map,
            config,
            score: Score::new(),
            rally: RallyStats::new(),
            events: Events::new(),
            input_queue: InputQueue::new(),
            rng: GameRng::new(seed),
            hooks: Hooks::new(),
            state: MatchState::Ready,
            last_summary: None,
            held: PaddleInput::default(),
        })
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_practice(&self) -> bool {
        self.config.match_rules.practice_mode
    }

    /// Begin a fresh match from `Ready` or `GameOver`. Returns false otherwise.
    pub fn start(&mut self) -> bool {
        if !matches!(self.state, MatchState::Ready | MatchState::GameOver) {
            return false;
        }

        self.world.clear();
        create_paddle(&mut self.world, &self.map, &self.config, Side::Player, Controller::Human);
        create_paddle(&mut self.world, &self.map, &self.config, Side::Ai, Controller::Ai);
        create_ball(&mut self.world, self.map.ball_spawn(), glam::Vec2::ZERO);

        self.time = Time::new(self.config.match_rules.tick_rate);
        self.score = Score::new();
        self.difficulty = Difficulty::new(&self.config);
        self.rally = RallyStats::new();
        self.ai.reset_match(&self.config, &self.map);
        self.ai.retune(&self.score, &self.config);
        self.events.clear();
        self.input_queue.clear();
        self.held = PaddleInput::default();
        self.last_summary = None;

        serve_ball(
            &mut self.world,
            Side::Player,
            true,
            &self.map,
            &self.config,
            &mut self.difficulty,
            &mut self.rally,
            &mut self.rng,
            &mut self.events,
        );
        self.state = MatchState::Playing;
        info!(
            "match started (practice={}, handicap={})",
            self.is_practice(),
            self.ai.generosity.handicap
        );
        true
    }

    /// Flip between `Playing` and `Paused`
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            MatchState::Playing => MatchState::Paused,
            MatchState::Paused => MatchState::Playing,
            other => other,
        };
    }

    /// Practice mode can only change between matches
    pub fn set_practice_mode(&mut self, enabled: bool) -> bool {
        if self.state == MatchState::Playing {
            return false;
        }
        self.config.match_rules.practice_mode = enabled;
        true
    }

    /// Held movement keys, sampled at the next tick
    pub fn set_input(&mut self, up: bool, down: bool) {
        self.held.up = up;
        self.held.down = down;
    }

    /// Request an ice shot on the next tick
    pub fn trigger_fire(&mut self) {
        if self.state == MatchState::Playing {
            self.held.fire = true;
        }
    }

    /// Host frame callback. Advances at most one tick, and only once a full
    /// frame interval has passed. Returns true when a tick ran.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.clock.poll(now_ms) {
            return false;
        }
        self.tick()
    }

    /// Run one tick unconditionally on the clock. No-op unless playing.
    pub fn tick(&mut self) -> bool {
        if self.state != MatchState::Playing {
            return false;
        }

        self.input_queue.push_input(Side::Player, self.held);
        self.held.fire = false;

        let winner = step(
            &mut self.world,
            &mut self.time,
            &self.map,
            &self.config,
            &mut self.score,
            &mut self.difficulty,
            &mut self.rally,
            &mut self.ai,
            &mut self.events,
            &mut self.input_queue,
            &mut self.rng,
        );

        if let Some(winner) = winner {
            self.finish(winner == Side::Player);
        }

        self.hooks.dispatch(&self.events, self.config.effects.particles);
        true
    }

    fn finish(&mut self, player_won: bool) {
        self.state = MatchState::GameOver;
        let summary = self.summarize(player_won);
        self.ai
            .generosity
            .record_result(player_won, summary.player_score, &self.config);
        self.events.summary = Some(summary);
        self.last_summary = Some(summary);
        info!(
            "round summary: {}-{} longest rally {} accuracy {}%",
            summary.player_score, summary.ai_score, summary.longest_rally, summary.accuracy
        );
    }

    fn summarize(&self, player_won: bool) -> RoundSummary {
        let stats = self
            .world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == Side::Player)
            .map(|(_e, p)| p.stats)
            .unwrap_or_default();
        let max_ball_speed = self
            .world
            .query::<&Ball>()
            .iter()
            .next()
            .map_or(0.0, |(_e, b)| b.max_speed_reached);

        RoundSummary {
            player_score: self.score.player,
            ai_score: self.score.ai,
            survival_secs: self.time.ticks_to_secs(self.time.tick),
            longest_rally: self.rally.longest,
            accuracy: stats.accuracy(),
            max_streak: stats.max_streak,
            zone_secs: self.time.ticks_to_secs(self.rally.zone_ticks),
            max_ball_speed,
            rallies: stats.hits,
            player_won,
        }
    }

    fn paddle_view(&self, side: Side) -> PaddleView {
        let found = self
            .world
            .query::<(&Paddle, &Freeze, &IceShot)>()
            .iter()
            .find(|(_e, (p, _, _))| p.side == side)
            .map(|(_e, (p, f, s))| (*p, *f, *s));
        let (y, height, freeze, shot) = match found {
            Some((paddle, freeze, shot)) => (paddle.y, paddle.height, freeze, shot),
            None => (
                self.map.center().y,
                self.config.paddle.height,
                Freeze::default(),
                IceShot::default(),
            ),
        };
        PaddleView {
            side,
            x: self.map.paddle_x(side),
            y,
            width: self.config.paddle.width,
            height,
            frozen: freeze.is_frozen(),
            freeze_remaining: freeze.remaining,
            ice_ready: self.config.ice_shot.enabled && shot.is_ready(),
            ice_cooldown: shot.cooldown,
        }
    }

    /// Read-only state for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let ball = self
            .world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, b)| *b)
            .unwrap_or_else(|| Ball::new(self.map.ball_spawn(), glam::Vec2::ZERO));
        let projectiles = self
            .world
            .query::<&Projectile>()
            .iter()
            .map(|(_e, p)| ProjectileView {
                owner: p.owner,
                x: p.pos.x,
                y: p.pos.y,
                width: self.config.ice_shot.projectile_width,
                height: self.config.ice_shot.projectile_height,
            })
            .collect();

        Snapshot {
            tick: self.time.tick,
            player: self.paddle_view(Side::Player),
            ai: self.paddle_view(Side::Ai),
            ball: BallView {
                x: ball.pos.x,
                y: ball.pos.y,
                vx: ball.vel.x,
                vy: ball.vel.y,
                size: self.config.ball.size,
            },
            projectiles,
            player_score: self.score.player,
            ai_score: self.score.ai,
            rally: self.rally.length,
            longest_rally: self.rally.longest,
            speed_multiplier: self.difficulty.speed_multiplier,
            serve_speed: self.difficulty.serve_speed,
            serve_indicator: self.difficulty.serve_indicator_visible(),
            extreme_speed: ball.vel.x.abs() > self.config.ball.extreme_speed_threshold,
            in_zone: self.rally.in_zone,
            ai_debug: AiDebug {
                target_y: self.ai.target_y,
                predicted_y: self.ai.predicted_y,
                tracking: self.ai.tracking,
                will_miss: self.ai.will_miss,
                speed: self.ai.speed,
                accuracy: self.ai.accuracy,
                reaction_delay: self.ai.reaction_delay,
                perfect_mode: self.ai.perfect_mode,
            },
            state: self.state,
            winner: self.score.winner,
            practice: self.is_practice(),
        }
    }
}
