use glam::Vec2;
use hecs::World;
use log::debug;

use crate::components::*;
use crate::config::Config;
use crate::events::{EffectEvent, SoundEvent};
use crate::map::GameMap;
use crate::resources::Events;

/// Launch `side`'s ice shot if it is charged, idle and not frozen.
/// Returns true when a projectile was spawned.
pub fn fire_ice_shot(
    world: &mut World,
    side: Side,
    map: &GameMap,
    config: &Config,
    events: &mut Events,
) -> bool {
    if !config.ice_shot.enabled {
        return false;
    }

    let mut launch = None;
    for (_entity, (paddle, freeze, shot)) in world.query_mut::<(&Paddle, &Freeze, &mut IceShot)>() {
        if paddle.side != side || !shot.is_ready() || freeze.is_frozen() {
            continue;
        }
        shot.cooldown = config.ice_shot.cooldown_ticks;
        shot.in_flight = true;
        launch = Some(paddle.y);
    }

    let Some(y) = launch else {
        return false;
    };

    let dir = side.attack_dir();
    let x = map.paddle_x(side) + dir * (map.paddle_width() + config.ice_shot.projectile_width) / 2.0;
    world.spawn((Projectile {
        owner: side,
        pos: Vec2::new(x, y),
        vel_x: dir * config.ice_shot.projectile_speed,
    },));
    events.sound(SoundEvent::IceShot);
    debug!("{side:?} fired ice shot at y={y:.1}");
    true
}

/// Count down launcher cooldowns
pub fn update_cooldowns(world: &mut World) {
    for (_entity, shot) in world.query_mut::<&mut IceShot>() {
        shot.cooldown = shot.cooldown.saturating_sub(1);
    }
}

/// Count down freeze timers, emitting `thaw` when one expires
pub fn update_freeze(world: &mut World, events: &mut Events) {
    for (_entity, freeze) in world.query_mut::<&mut Freeze>() {
        if freeze.tick() {
            events.sound(SoundEvent::Thaw);
        }
    }
}

/// Move projectiles, freeze struck paddles and drop shots that left the arena
pub fn update_projectiles(world: &mut World, map: &GameMap, config: &Config, events: &mut Events) {
    let paddles: Vec<(Side, f32, f32)> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| (p.side, p.y, p.half_height()))
        .collect();

    let mut finished = Vec::new();
    let mut struck = Vec::new();
    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.pos.x += projectile.vel_x;

        let target = projectile.owner.opponent();
        let hit = paddles
            .iter()
            .find(|(side, _, _)| *side == target)
            .is_some_and(|&(side, y, half)| {
                let reach = (map.paddle_width() + config.ice_shot.projectile_width) / 2.0;
                (projectile.pos.x - map.paddle_x(side)).abs() <= reach
                    && (projectile.pos.y - y).abs() <= half
            });

        if hit {
            struck.push(target);
            finished.push((entity, projectile.owner));
        } else if projectile.pos.x < 0.0 || projectile.pos.x > map.width {
            finished.push((entity, projectile.owner));
        }
    }

    for (entity, owner) in finished {
        let _ = world.despawn(entity);
        for (_e, (paddle, shot)) in world.query_mut::<(&Paddle, &mut IceShot)>() {
            if paddle.side == owner {
                shot.in_flight = false;
            }
        }
    }

    for target in struck {
        for (_e, (paddle, freeze)) in world.query_mut::<(&Paddle, &mut Freeze)>() {
            if paddle.side != target {
                continue;
            }
            freeze.start(config.ice_shot.freeze_ticks);
            events.sound(SoundEvent::Freeze);
            events.effect(EffectEvent::Freeze {
                pos: Vec2::new(map.paddle_x(target), paddle.y),
            });
            debug!("{target:?} paddle frozen for {} ticks", config.ice_shot.freeze_ticks);
        }
    }
}
