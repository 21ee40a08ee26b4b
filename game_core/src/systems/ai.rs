use hecs::World;
use log::trace;

use crate::ai::{fire_chance, AiController, FireContext};
use crate::components::*;
use crate::config::Config;
use crate::difficulty::Difficulty;
use crate::map::GameMap;
use crate::resources::*;
use crate::systems::ability::fire_ice_shot;

/// Drive AI paddles from the ball state left by the previous tick
#[allow(clippy::too_many_arguments)]
pub fn update_ai(
    world: &mut World,
    ai: &mut AiController,
    map: &GameMap,
    config: &Config,
    score: &Score,
    difficulty: &Difficulty,
    rally: &RallyStats,
    rng: &mut GameRng,
    events: &mut Events,
) {
    let Some(ball) = world.query::<&Ball>().iter().next().map(|(_e, b)| *b) else {
        return;
    };
    let player = world
        .query::<&Paddle>()
        .iter()
        .find(|(_e, p)| p.side == Side::Player)
        .map(|(_e, p)| *p);

    ai.check_perfect_mode(score, config);
    ai.adapt(difficulty.speed_multiplier, config);
    ai.plan(&ball, map, config, rng);

    let mistake_chance = ai.mistake_chance(config);
    let mut ready_to_fire = false;
    for (_e, (paddle, freeze, shot)) in world.query_mut::<(&mut Paddle, &Freeze, &IceShot)>() {
        if paddle.controller != Controller::Ai {
            continue;
        }
        let frozen = freeze.is_frozen();
        let half = paddle.half_height();
        paddle.y = map.clamp_y(ai.approach(paddle.y, frozen, config), half);

        if !frozen && rng.chance(mistake_chance) {
            paddle.y = map.clamp_y(paddle.y + rng.centered(config.ai.mistake_magnitude), half);
            trace!("ai mistake, paddle now at {:.1}", paddle.y);
        }
        ready_to_fire = shot.is_ready() && !frozen;
    }

    trace!(
        "ai target={:.1} predicted={:.1} speed={:.2} tracking={}",
        ai.target_y,
        ai.predicted_y,
        ai.speed,
        ai.tracking
    );

    if !config.ice_shot.enabled || !ready_to_fire {
        return;
    }
    let Some(player) = player else {
        return;
    };

    let ctx = FireContext {
        player_score: score.player,
        ai_score: score.ai,
        win_score: config.match_rules.win_score,
        ball_speed: ball.vel.length(),
        ball_toward_player: ball.moving_toward(Side::Player),
        ball_in_ai_half: ball.pos.x >= map.width * 0.5,
        rally: rally.length,
        player_offset: (player.y - ball.pos.y).abs(),
        player_height: player.height,
        speed_multiplier: difficulty.speed_multiplier,
    };
    if rng.chance(fire_chance(&ctx, config)) {
        fire_ice_shot(world, Side::Ai, map, config, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle};
    use glam::Vec2;

    struct Setup {
        world: World,
        ai: AiController,
        config: Config,
        map: GameMap,
        score: Score,
        difficulty: Difficulty,
        rally: RallyStats,
        rng: GameRng,
        events: Events,
    }

    impl Setup {
        fn new(config: Config) -> Self {
            let map = GameMap::new(&config);
            let mut world = World::new();
            create_paddle(&mut world, &map, &config, Side::Player, Controller::Human);
            create_paddle(&mut world, &map, &config, Side::Ai, Controller::Ai);
            Self {
                world,
                ai: AiController::new(&config, &map),
                difficulty: Difficulty::new(&config),
                config,
                map,
                score: Score::new(),
                rally: RallyStats::new(),
                rng: GameRng::new(12345),
                events: Events::new(),
            }
        }

        fn step(&mut self) {
            update_ai(
                &mut self.world,
                &mut self.ai,
                &self.map,
                &self.config,
                &self.score,
                &self.difficulty,
                &self.rally,
                &mut self.rng,
                &mut self.events,
            );
        }

        fn ai_y(&self) -> f32 {
            self.world
                .query::<&Paddle>()
                .iter()
                .find(|(_e, p)| p.side == Side::Ai)
                .map(|(_e, p)| p.y)
                .unwrap()
        }
    }

    fn calm_config() -> Config {
        let mut config = Config::new();
        config.ai.mistake_chance = 0.0;
        config.ai.generous_mistake_bonus = 0.0;
        config.ice_shot.enabled = false;
        config
    }

    #[test]
    fn test_ai_moves_toward_prediction() {
        let mut s = Setup::new(calm_config());
        create_ball(&mut s.world, Vec2::new(400.0, 300.0), Vec2::new(10.0, 0.0));

        s.step();

        assert!(s.ai.tracking);
        assert!(s.ai_y() > 200.0, "AI should move down toward the ball");
        assert!(s.ai_y() <= 200.0 + s.ai.speed);
    }

    #[test]
    fn test_ai_paddle_stays_in_arena() {
        let mut s = Setup::new(calm_config());
        create_ball(&mut s.world, Vec2::new(700.0, 395.0), Vec2::new(10.0, 0.0));

        for _ in 0..100 {
            s.step();
        }

        assert!(s.ai_y() <= s.map.height - s.config.paddle.height / 2.0);
    }

    #[test]
    fn test_frozen_ai_still_plans() {
        let mut s = Setup::new(calm_config());
        create_ball(&mut s.world, Vec2::new(400.0, 350.0), Vec2::new(10.0, 0.0));
        for (_e, (paddle, freeze)) in s.world.query_mut::<(&Paddle, &mut Freeze)>() {
            if paddle.side == Side::Ai {
                freeze.start(90);
            }
        }

        s.step();

        assert!(s.ai.tracking, "Target computation keeps running while frozen");
        let moved = s.ai_y() - 200.0;
        assert!(moved > 0.0 && moved <= s.ai.speed * 0.1 + 1e-4);
    }

    #[test]
    fn test_handicap_slows_ai() {
        let mut baseline = Setup::new(calm_config());
        let mut generous = Setup::new(calm_config());
        generous.ai.generosity.handicap = 0.10;
        for s in [&mut baseline, &mut generous] {
            create_ball(&mut s.world, Vec2::new(400.0, 390.0), Vec2::new(10.0, 0.0));
            s.step();
        }

        assert!(generous.ai.speed < baseline.ai.speed);
        assert!(generous.ai_y() < baseline.ai_y());
    }

    #[test]
    fn test_ai_fires_when_behind() {
        let mut config = calm_config();
        config.ice_shot.enabled = true;
        let mut s = Setup::new(config);
        s.score.player = 6;
        create_ball(&mut s.world, Vec2::new(400.0, 200.0), Vec2::new(-10.0, 0.0));

        let mut fired = false;
        for _ in 0..50 {
            s.step();
            if s.world.query::<&Projectile>().iter().count() > 0 {
                fired = true;
                break;
            }
        }
        assert!(fired, "A 40% per-tick chance fires within 50 ticks");
    }

    #[test]
    fn test_ai_holds_fire_while_ball_is_far() {
        let mut config = calm_config();
        config.ice_shot.enabled = true;
        let mut s = Setup::new(config);
        s.score.player = 6;
        create_ball(&mut s.world, Vec2::new(300.0, 200.0), Vec2::new(-2.0, 0.0));

        for _ in 0..50 {
            s.step();
        }
        assert_eq!(
            s.world.query::<&Projectile>().iter().count(),
            0,
            "Ball in the player's half should not draw fire"
        );
    }

    #[test]
    fn test_ai_never_fires_when_disabled() {
        let mut s = Setup::new(calm_config());
        s.score.player = 6;
        create_ball(&mut s.world, Vec2::new(400.0, 200.0), Vec2::new(-10.0, 0.0));
        for _ in 0..200 {
            s.step();
        }
        assert_eq!(s.world.query::<&Projectile>().iter().count(), 0);
    }
}
