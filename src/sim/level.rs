/// Level loading: teardown and atomic rebuild of a level session.
///
/// `load_level` is the only way platforms, capacitors and the boss come into
/// or go out of existence. Out-of-range indices are silently ignored — no
/// state changes, no error surfaces (the catalog itself never rejects).

use crate::domain::catalog::{self, PLATFORM_H, PLAYER_SPAWN};
use crate::domain::entity::Capacitor;
use crate::domain::physics::StaticRect;
use crate::sim::world::WorldState;

/// Load level `n` (1..=MAX_LEVELS), discarding the previous session.
///
/// Tears down all platform/capacitor/boss instances, bumps the level
/// generation (invalidating pending delayed actions from the old level),
/// rebuilds from the catalog and resets the collectible economy. The player
/// body is deliberately left alone — only the fall-out reset and the cheat
/// jump reposition it.
pub fn load_level(world: &mut WorldState, n: usize) {
    let def = match catalog::level(n) {
        Some(def) => def,
        None => return, // silently ignored
    };

    world.level = n;
    world.generation += 1;
    world.transition_scheduled = false;

    world.platforms.clear();
    world.capacitors.clear();
    world.boss = None;

    for plat in def.platforms {
        world.platforms.push(StaticRect::new(plat.x, plat.y, plat.w, PLATFORM_H));
    }
    for cap in def.capacitors {
        // Capacitors drop onto their platforms through normal physics.
        world.capacitors.push(Capacitor::new(cap.x, cap.y));
    }

    world.collected = 0;
    world.currency = 0;

    world.message.clear();
    world.message_timer = 0;
    world.shake_ticks = 0;
    world.player.flash_ticks = 0;
}

/// Put the player back at the level start, standing still.
pub fn reset_player(world: &mut WorldState) {
    let (sx, sy) = PLAYER_SPAWN;
    world.player.body.x = sx;
    world.player.body.y = sy;
    world.player.body.vx = 0.0;
    world.player.body.vy = 0.0;
    world.player.jumps_remaining = 2;
    world.player.flash_ticks = 0;
}

/// Debug/cheat affordance: jump straight to the boss level with the player
/// at the start position. Wired to a dedicated key, unreachable from the
/// normal movement/jump inputs.
pub fn cheat_jump_to_final(world: &mut WorldState) {
    load_level(world, catalog::MAX_LEVELS);
    reset_player(world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::MAX_LEVELS;

    #[test]
    fn load_resets_economy_and_boss_for_every_level() {
        let mut world = WorldState::new();
        for n in 1..=MAX_LEVELS {
            world.collected = 9;
            world.currency = 9000;
            load_level(&mut world, n);
            assert_eq!(world.collected, 0, "level {n}");
            assert_eq!(world.currency, 0, "level {n}");
            assert!(world.boss.is_none(), "level {n}");
            assert_eq!(world.level, n);
            assert!(!world.platforms.is_empty());
            assert!(!world.capacitors.is_empty());
        }
    }

    #[test]
    fn out_of_range_load_is_a_silent_noop() {
        let mut world = WorldState::new();
        load_level(&mut world, 3);
        let gen = world.generation;
        let caps = world.capacitors.len();

        load_level(&mut world, 0);
        load_level(&mut world, MAX_LEVELS + 1);

        assert_eq!(world.level, 3);
        assert_eq!(world.generation, gen);
        assert_eq!(world.capacitors.len(), caps);
    }

    #[test]
    fn reload_bumps_generation() {
        let mut world = WorldState::new();
        load_level(&mut world, 1);
        let g1 = world.generation;
        load_level(&mut world, 1);
        assert_eq!(world.generation, g1 + 1);
    }

    #[test]
    fn cheat_jump_lands_on_final_level_at_spawn() {
        let mut world = WorldState::new();
        load_level(&mut world, 1);
        world.player.body.x = 800.0;
        world.player.body.vy = 300.0;

        cheat_jump_to_final(&mut world);

        assert_eq!(world.level, MAX_LEVELS);
        assert_eq!(world.player.body.x, PLAYER_SPAWN.0);
        assert_eq!(world.player.body.y, PLAYER_SPAWN.1);
        assert_eq!(world.player.body.vy, 0.0);
    }
}
