use game_core::systems::*;
use game_core::*;
use glam::Vec2;
use hecs::World;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_ball_stays_in_bounds_and_under_caps(
        x in 40.0f32..760.0,
        y in 5.0f32..395.0,
        vx in -30.0f32..30.0,
        vy in -21.0f32..21.0,
        player_y in 40.0f32..360.0,
        ai_y in 40.0f32..360.0,
        seed in any::<u64>(),
    ) {
        let config = Config::new();
        let map = GameMap::new(&config);
        let mut world = World::new();
        create_paddle(&mut world, &map, &config, Side::Player, Controller::Human);
        create_paddle(&mut world, &map, &config, Side::Ai, Controller::Ai);
        for (_e, paddle) in world.query_mut::<&mut Paddle>() {
            paddle.y = match paddle.side {
                Side::Player => player_y,
                Side::Ai => ai_y,
            };
        }
        create_ball(&mut world, Vec2::new(x, y), Vec2::new(vx, vy));

        let score = Score::new();
        let mut difficulty = Difficulty::new(&config);
        let mut rally = RallyStats::new();
        let mut rng = GameRng::new(seed);
        let mut events = Events::new();

        for _ in 0..120 {
            let scorer = advance_ball(
                &mut world, &map, &config, &score, &mut difficulty,
                &mut rally, &mut rng, &mut events,
            );
            let ball = world.query::<&Ball>().iter().next().map(|(_e, b)| *b).unwrap();
            prop_assert!(ball.vel.x.abs() <= config.ball.max_speed + 1e-4);
            prop_assert!(ball.vel.y.abs() <= config.ball.max_vertical_speed() + 1e-4);
            prop_assert!(ball.pos.y >= map.ball_half() - 1e-3);
            prop_assert!(ball.pos.y <= map.height - map.ball_half() + 1e-3);
            if scorer.is_some() {
                break;
            }
        }
    }

    #[test]
    fn test_player_deflection_is_monotonic(a in -1.0f32..1.0, b in -1.0f32..1.0) {
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = deflection(Side::Player, lo, false, &config, &mut rng);
        let high = deflection(Side::Player, hi, false, &config, &mut rng);
        prop_assert!(low <= high);
        prop_assert!(high.abs() <= config.ball.player_angle_scale);
    }

    #[test]
    fn test_ai_deflection_is_monotonic_without_lead(a in -1.0f32..1.0, b in -1.0f32..1.0) {
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = deflection(Side::Ai, lo, false, &config, &mut rng);
        let high = deflection(Side::Ai, hi, false, &config, &mut rng);
        prop_assert!(low <= high, "{low} should not exceed {high}");
        prop_assert!(low.abs() <= config.ball.ai_angle_scale);
        prop_assert!(high.abs() <= config.ball.ai_angle_scale);
    }

    #[test]
    fn test_multiplier_never_decreases_within_rally(
        hits in proptest::collection::vec(any::<bool>(), 1..200),
    ) {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);
        let mut last = difficulty.speed_multiplier;
        for (rally, player_hit) in hits.into_iter().enumerate() {
            let side = if player_hit { Side::Player } else { Side::Ai };
            let speed = difficulty.on_paddle_hit(side, rally as u32, &config);
            prop_assert!(difficulty.speed_multiplier >= last);
            prop_assert!(difficulty.speed_multiplier <= config.difficulty.max_speed_multiplier);
            prop_assert!(speed <= config.ball.max_speed);
            last = difficulty.speed_multiplier;
        }
    }

    #[test]
    fn test_serve_speed_respects_ceiling(
        rallies in proptest::collection::vec(0u32..60, 1..30),
    ) {
        let config = Config::new();
        let mut difficulty = Difficulty::new(&config);
        for hits in rallies {
            for rally in 0..hits {
                difficulty.on_paddle_hit(Side::Player, rally, &config);
            }
            difficulty.on_point(&config);
            let serve = difficulty.next_serve(&config);
            prop_assert!(serve <= config.difficulty.max_serve_speed);
            prop_assert!(difficulty.overall <= config.difficulty.overall_cap);
        }
    }

    #[test]
    fn test_prediction_inside_wall_band(
        x in 0.0f32..700.0,
        y in 5.0f32..395.0,
        vx in 1.0f32..30.0,
        vy in -21.0f32..21.0,
    ) {
        let (min_y, max_y) = (5.0, 395.0);
        let pos = Vec2::new(x, y);
        let vel = Vec2::new(vx, vy);
        let mirror = predict_mirror(pos, vel, 762.0, min_y, max_y).unwrap();
        let stepwise = predict_stepwise(pos, vel, 762.0, min_y, max_y).unwrap();
        prop_assert!((min_y..=max_y).contains(&mirror));
        prop_assert!((min_y..=max_y).contains(&stepwise));
        prop_assert!((mirror - stepwise).abs() < 0.05, "{mirror} vs {stepwise}");
    }

    #[test]
    fn test_flat_ball_predicts_its_own_height(x in 0.0f32..700.0, y in 5.0f32..395.0, vx in 1.0f32..30.0) {
        let predicted = predict_mirror(Vec2::new(x, y), Vec2::new(vx, 0.0), 762.0, 5.0, 395.0).unwrap();
        prop_assert!((predicted - y).abs() < 1e-3);
    }
}
