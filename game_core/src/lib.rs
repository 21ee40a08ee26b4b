pub mod ai;
pub mod components;
pub mod config;
pub mod difficulty;
pub mod events;
pub mod game;
pub mod hooks;
pub mod map;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod systems;

pub use ai::*;
pub use components::*;
pub use config::*;
pub use difficulty::*;
pub use events::*;
pub use game::*;
pub use hooks::*;
pub use map::*;
pub use params::*;
pub use resources::*;
pub use snapshot::*;

use hecs::World;
use systems::*;

/// Advance the simulation one fixed tick.
///
/// Returns the winner when this tick ended the match; the steps after the
/// physics step are then skipped.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    map: &GameMap,
    config: &Config,
    score: &mut Score,
    difficulty: &mut Difficulty,
    rally: &mut RallyStats,
    ai: &mut AiController,
    events: &mut Events,
    input_queue: &mut InputQueue,
    rng: &mut GameRng,
) -> Option<Side> {
    // Clear events at start of tick
    events.clear();

    // 1. Human input, including the fire trigger
    ingest_inputs(world, input_queue, map, config, events);
    move_human_paddles(world, map, config);

    // 2. AI sees the ball as the previous tick left it
    update_ai(world, ai, map, config, score, difficulty, rally, rng, events);

    // 3. Ball physics and scoring
    if let Some(scorer) = advance_ball(world, map, config, score, difficulty, rally, rng, events) {
        if let Some(winner) = award_point(world, scorer, map, config, score, difficulty, rally, events)
        {
            return Some(winner);
        }
        ai.retune(score, config);
        let toward = serve_direction(scorer, config.match_rules.serve_rule);
        serve_ball(world, toward, false, map, config, difficulty, rally, rng, events);
    }

    // 4. Cooldowns and freeze timers tick before new hits so a fresh freeze
    // lasts its full duration
    update_cooldowns(world);
    update_freeze(world, events);
    update_projectiles(world, map, config, events);

    // 5. Time-based difficulty
    time.advance();
    difficulty.apply_time(time.elapsed_secs(), config);
    difficulty.tick_indicator();
    if rally.in_zone {
        rally.zone_ticks += 1;
    }

    None
}

/// Helper to create a paddle entity
pub fn create_paddle(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    side: Side,
    controller: Controller,
) -> hecs::Entity {
    let paddle = Paddle::new(
        side,
        controller,
        map.center().y,
        config.paddle.height,
        config.paddle.speed,
    );
    world.spawn((
        paddle,
        PaddleIntent::new(),
        Freeze::default(),
        IceShot::default(),
    ))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}
