use hecs::World;

use crate::components::*;
use crate::config::Config;
use crate::map::GameMap;
use crate::resources::*;
use crate::systems::ability::fire_ice_shot;

/// Apply queued input to human paddles. Fire is a one-shot trigger and is
/// consumed here; held directions persist in the paddle's intent.
pub fn ingest_inputs(
    world: &mut World,
    queue: &mut InputQueue,
    map: &GameMap,
    config: &Config,
    events: &mut Events,
) {
    for (side, input) in queue.pop_inputs() {
        let mut fire = false;
        for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
            if paddle.side != side || paddle.controller != Controller::Human {
                continue;
            }
            intent.up = input.up;
            intent.down = input.down;
            fire = input.fire;
        }

        if fire {
            fire_ice_shot(world, side, map, config, events);
        }
    }
}

/// Move human paddles by their held direction
pub fn move_human_paddles(world: &mut World, map: &GameMap, config: &Config) {
    for (_entity, (paddle, intent, freeze)) in
        world.query_mut::<(&mut Paddle, &PaddleIntent, &Freeze)>()
    {
        if paddle.controller != Controller::Human {
            continue;
        }
        let factor = if freeze.is_frozen() {
            config.paddle.frozen_speed_factor
        } else {
            1.0
        };
        let y = paddle.y + intent.dir() as f32 * paddle.speed * factor;
        paddle.y = map.clamp_y(y, paddle.half_height());
    }
}
