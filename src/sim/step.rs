/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Timers (message, shake, hit flashes)
///   2. Delayed actions (level advance / boss spawn / return to title)
///   3. Player control (held movement, edge-triggered jumps)
///   4. Physics (player, capacitors, boss)
///   5. Boss patrol reversal
///   6. Capacitor pickup → economy → clear transition (once)
///   7. Boss contact resolution (stomp vs. side)
///   8. Fall-out-of-world guard
///
/// A collection or hit is fully processed — counters, currency, scheduled
/// transitions — within the tick it happens, so the next tick always
/// observes consistent cleared/defeated predicates.

use crate::config::TuningConfig;
use crate::domain::catalog::{self, PLATFORM_H};
use crate::domain::entity::{Boss, BossPhase, Facing, FrameInput};
use crate::domain::physics;
use super::event::GameEvent;
use super::level::{load_level, reset_player};
use super::world::{DelayedKind, Phase, WorldState};

/// Hit-flash duration for both the boss (stomp) and the player (side hit).
const FLASH_TICKS: u32 = 8;
/// Camera shake duration on side contact.
const SHAKE_TICKS: u32 = 8;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, input: FrameInput, tuning: &TuningConfig) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    resolve_timers(world);
    resolve_pending(world, &mut events);

    if world.phase != Phase::Playing {
        return events;
    }

    resolve_player_control(world, input, tuning, &mut events);
    resolve_physics(world, tuning);
    resolve_boss_patrol(world, tuning);
    resolve_collect(world, tuning, &mut events);
    resolve_boss_contact(world, tuning, &mut events);
    resolve_fall_out(world, tuning, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Timers
// ══════════════════════════════════════════════════════════════

fn resolve_timers(world: &mut WorldState) {
    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 {
            world.message.clear();
        }
    }
    if world.shake_ticks > 0 {
        world.shake_ticks -= 1;
    }
    if world.player.flash_ticks > 0 {
        world.player.flash_ticks -= 1;
    }
    if let Some(boss) = &mut world.boss {
        if boss.flash_ticks > 0 {
            boss.flash_ticks -= 1;
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Delayed actions (generation-tagged, fire-once)
// ══════════════════════════════════════════════════════════════

fn resolve_pending(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    for action in &mut world.pending {
        action.remaining = action.remaining.saturating_sub(1);
    }

    // Drain due actions first; executing one may bump the generation and
    // thereby invalidate the rest, so the generation check happens at
    // execution time, not collection time.
    let due: Vec<_> = world.pending.iter().filter(|a| a.remaining == 0).cloned().collect();
    world.pending.retain(|a| a.remaining > 0);

    for action in due {
        if action.generation != world.generation {
            continue; // stale: belongs to a torn-down level session
        }
        match action.kind {
            DelayedKind::AdvanceLevel(n) => {
                load_level(world, n);
                events.push(GameEvent::LevelLoaded { level: n });
            }
            DelayedKind::SpawnBoss => {
                spawn_boss(world, events);
            }
            DelayedKind::ReturnToTitle => {
                world.phase = Phase::Title;
                world.message.clear();
                world.message_timer = 0;
            }
        }
    }

    // A reload from inside this loop invalidated everything still queued.
    let generation = world.generation;
    world.pending.retain(|a| a.generation == generation);
}

// ══════════════════════════════════════════════════════════════
// Player control
// ══════════════════════════════════════════════════════════════

fn resolve_player_control(
    world: &mut WorldState,
    input: FrameInput,
    tuning: &TuningConfig,
    events: &mut Vec<GameEvent>,
) {
    let grounded = world.player.body.on_ground;

    // Touching ground restores the double-jump budget. Nothing else does.
    if grounded {
        world.player.jumps_remaining = 2;
    }

    if input.left_held {
        world.player.body.vx = -tuning.move_speed;
        world.player.facing = Facing::Left;
    } else if input.right_held {
        world.player.body.vx = tuning.move_speed;
        world.player.facing = Facing::Right;
    } else {
        world.player.body.vx = 0.0;
    }

    // Space: consumes one jump regardless of grounded state (double jump).
    if input.jump_pressed && world.player.jumps_remaining > 0 {
        world.player.body.vy = -tuning.jump_velocity;
        world.player.jumps_remaining -= 1;
        events.push(GameEvent::PlayerJumped);
    }

    // Up: a standard jump, only from the ground, spending the same budget.
    if input.up_pressed && grounded {
        world.player.body.vy = -tuning.jump_velocity;
        world.player.jumps_remaining = world.player.jumps_remaining.saturating_sub(1);
        events.push(GameEvent::PlayerJumped);
    }
}

// ══════════════════════════════════════════════════════════════
// Physics
// ══════════════════════════════════════════════════════════════

fn resolve_physics(world: &mut WorldState, tuning: &TuningConfig) {
    let dt = tuning.dt();

    physics::step_body(&mut world.player.body, &world.platforms, dt, tuning.gravity);

    for cap in &mut world.capacitors {
        physics::step_body(&mut cap.body, &world.platforms, dt, tuning.gravity);
    }

    if let Some(boss) = &mut world.boss {
        if boss.phase != BossPhase::Defeated {
            physics::step_body(&mut boss.body, &world.platforms, dt, tuning.gravity);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Boss patrol
// ══════════════════════════════════════════════════════════════

fn resolve_boss_patrol(world: &mut WorldState, tuning: &TuningConfig) {
    let boss = match &mut world.boss {
        Some(b) => b,
        None => return,
    };

    match boss.phase {
        BossPhase::Spawned => {
            boss.phase = BossPhase::Patrolling;
            boss.facing = Facing::Left;
            boss.body.vx = -tuning.boss_patrol_speed;
        }
        BossPhase::Patrolling => {
            if boss.body.x <= boss.patrol_min {
                boss.facing = Facing::Right;
            } else if boss.body.x >= boss.patrol_max {
                boss.facing = Facing::Left;
            }
            boss.body.vx = match boss.facing {
                Facing::Left => -tuning.boss_patrol_speed,
                Facing::Right => tuning.boss_patrol_speed,
            };
        }
        BossPhase::Defeated => {}
    }
}

/// Create the boss on the perch of the current level. At most one instance
/// per session — a second trigger is a no-op.
fn spawn_boss(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.boss.is_some() {
        return;
    }
    let def = match catalog::level(world.level) {
        Some(def) => def,
        None => return,
    };
    let perch = def.boss_perch();
    let perch_top = perch.y - PLATFORM_H / 2.0;
    world.boss = Some(Boss::new(perch.x, perch_top, perch.w));
    events.push(GameEvent::BossSpawned);
}

// ══════════════════════════════════════════════════════════════
// Capacitor pickup & clear transition
// ══════════════════════════════════════════════════════════════

fn resolve_collect(world: &mut WorldState, tuning: &TuningConfig, events: &mut Vec<GameEvent>) {
    let player_body = world.player.body;
    let mut picked_any = false;

    // Removal on pickup makes collection idempotent per item.
    let mut i = 0;
    while i < world.capacitors.len() {
        if player_body.overlaps(&world.capacitors[i].body) {
            let cap = world.capacitors.remove(i);
            world.collected += 1;
            world.currency = world.collected * tuning.capacitor_value;
            events.push(GameEvent::CapacitorCollected { x: cap.body.x, y: cap.body.y });
            picked_any = true;
        } else {
            i += 1;
        }
    }

    // The cleared predicate is evaluated once per collection event, not
    // polled: the scheduled flag guards against duplicate transitions.
    if picked_any && world.is_level_cleared() && !world.transition_scheduled {
        world.transition_scheduled = true;
        if world.level < catalog::MAX_LEVELS {
            world.set_message("Level Complete!", tuning.ticks_for_ms(tuning.level_clear_delay_ms));
            world.schedule(
                DelayedKind::AdvanceLevel(world.level + 1),
                tuning.ticks_for_ms(tuning.level_clear_delay_ms),
            );
            events.push(GameEvent::LevelCleared { level: world.level });
        } else {
            world.set_message("Boss Approaching!", tuning.ticks_for_ms(tuning.boss_intro_delay_ms));
            world.schedule(
                DelayedKind::SpawnBoss,
                tuning.ticks_for_ms(tuning.boss_intro_delay_ms),
            );
            events.push(GameEvent::BossApproaching);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Boss contact: stomp vs. side
// ══════════════════════════════════════════════════════════════

fn resolve_boss_contact(world: &mut WorldState, tuning: &TuningConfig, events: &mut Vec<GameEvent>) {
    let boss = match &mut world.boss {
        Some(b) => b,
        None => return,
    };
    if boss.phase != BossPhase::Patrolling {
        return;
    }
    if !world.player.body.overlaps(&boss.body) {
        return;
    }

    let falling_fast = world.player.body.vy > tuning.stomp_fall_speed;
    let from_above = world.player.body.bottom() <= boss.body.top() + tuning.stomp_gap;

    if falling_fast && from_above {
        // Stomp: damage the boss, bounce the player.
        boss.health = boss.health.saturating_sub(1);
        boss.flash_ticks = FLASH_TICKS;
        world.player.body.vy = -tuning.stomp_bounce;
        events.push(GameEvent::BossStomped { health_left: boss.health });

        if boss.health == 0 {
            boss.phase = BossPhase::Defeated;
            boss.body.vx = 0.0;
            world.phase = Phase::Victory;
            world.set_message("Boss Defeated!", tuning.ticks_for_ms(tuning.victory_delay_ms));
            world.schedule(
                DelayedKind::ReturnToTitle,
                tuning.ticks_for_ms(tuning.victory_delay_ms),
            );
            events.push(GameEvent::BossDefeated);
        }
    } else {
        // Side contact: knockback away from the boss plus a small upward
        // impulse, and one capacitor's worth of penalty (never below zero).
        let push = if world.player.body.x < boss.body.x {
            -tuning.knockback_x
        } else {
            tuning.knockback_x
        };
        world.player.body.vx = push;
        world.player.body.vy = -tuning.knockback_y;
        world.player.flash_ticks = FLASH_TICKS;
        world.shake_ticks = SHAKE_TICKS;

        if world.collected > 0 {
            world.collected -= 1;
            world.currency = world.collected * tuning.capacitor_value;
        }
        events.push(GameEvent::PlayerKnockedBack);
    }
}

// ══════════════════════════════════════════════════════════════
// Fall-out guard
// ══════════════════════════════════════════════════════════════

/// Falling past the world-depth threshold resets the whole level session,
/// not just the player. This discards in-progress boss/collectible state —
/// kept as the original product behavior.
fn resolve_fall_out(world: &mut WorldState, tuning: &TuningConfig, events: &mut Vec<GameEvent>) {
    if world.player.body.y > tuning.fall_out_depth {
        events.push(GameEvent::PlayerFellOut);
        let current = world.level;
        load_level(world, current);
        reset_player(world);
        events.push(GameEvent::LevelLoaded { level: current });
    }
}

// ══════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::catalog::MAX_LEVELS;

    fn setup(level: usize) -> (WorldState, TuningConfig) {
        let tuning = GameConfig::default().tuning;
        let mut world = WorldState::new();
        world.phase = Phase::Playing;
        load_level(&mut world, level);
        // Let the player and capacitors settle onto their platforms.
        settle(&mut world, &tuning, 120);
        (world, tuning)
    }

    fn settle(world: &mut WorldState, tuning: &TuningConfig, ticks: u32) {
        for _ in 0..ticks {
            step(world, FrameInput::default(), tuning);
        }
    }

    fn jump_input() -> FrameInput {
        FrameInput { jump_pressed: true, ..FrameInput::default() }
    }

    /// Teleport the player onto every remaining capacitor, one per tick.
    fn collect_all(world: &mut WorldState, tuning: &TuningConfig) -> Vec<GameEvent> {
        let mut all = vec![];
        while let Some(cap) = world.capacitors.first() {
            world.player.body.x = cap.body.x;
            world.player.body.y = cap.body.y;
            world.player.body.vy = 0.0;
            all.extend(step(world, FrameInput::default(), tuning));
        }
        all
    }

    fn force_boss(world: &mut WorldState, tuning: &TuningConfig) {
        let mut events = vec![];
        spawn_boss(world, &mut events);
        // One tick so the boss moves from Spawned into Patrolling.
        step(world, FrameInput::default(), tuning);
        assert_eq!(world.boss.as_ref().unwrap().phase, BossPhase::Patrolling);
    }

    /// Place the player so the next tick resolves as a stomp.
    fn place_for_stomp(world: &mut WorldState) {
        let boss = world.boss.as_ref().unwrap().body;
        world.player.body.x = boss.x;
        world.player.body.y = boss.top() + 4.0 - world.player.body.half_h;
        world.player.body.vy = 200.0;
    }

    /// Place the player flush against the boss's left side.
    fn place_for_side_hit(world: &mut WorldState) {
        let boss = world.boss.as_ref().unwrap().body;
        world.player.body.x = boss.left() - world.player.body.half_w + 4.0;
        world.player.body.y = boss.y;
        world.player.body.vx = 0.0;
        world.player.body.vy = 0.0;
    }

    // ── Level loading ──

    #[test]
    fn every_level_loads_with_zero_collected_and_dormant_boss() {
        for n in 1..=MAX_LEVELS {
            let (world, _) = setup(n);
            assert_eq!(world.collected, 0);
            assert_eq!(world.money_line(), "0€");
            assert!(world.boss.is_none());
        }
    }

    // ── Player movement & jumping ──

    #[test]
    fn held_keys_set_velocity_and_facing() {
        let (mut world, tuning) = setup(1);
        step(&mut world, FrameInput { left_held: true, ..Default::default() }, &tuning);
        assert_eq!(world.player.facing, Facing::Left);

        step(&mut world, FrameInput { right_held: true, ..Default::default() }, &tuning);
        assert_eq!(world.player.facing, Facing::Right);

        step(&mut world, FrameInput::default(), &tuning);
        assert_eq!(world.player.body.vx, 0.0);
    }

    #[test]
    fn ground_contact_restores_two_jumps() {
        let (world, _tuning) = setup(1);
        assert!(world.player.body.on_ground);
        assert_eq!(world.player.jumps_remaining, 2);
    }

    #[test]
    fn space_allows_exactly_two_jumps_before_landing() {
        let (mut world, tuning) = setup(1);

        let ev = step(&mut world, jump_input(), &tuning);
        assert!(matches!(ev.first(), Some(GameEvent::PlayerJumped)));
        assert_eq!(world.player.jumps_remaining, 1);
        assert!(world.player.body.vy < 0.0);

        // Second jump mid-air
        settle(&mut world, &tuning, 5);
        let ev = step(&mut world, jump_input(), &tuning);
        assert!(matches!(ev.first(), Some(GameEvent::PlayerJumped)));
        assert_eq!(world.player.jumps_remaining, 0);

        // Third press: budget exhausted, nothing happens
        let ev = step(&mut world, jump_input(), &tuning);
        assert!(ev.is_empty());
        assert_eq!(world.player.jumps_remaining, 0);
    }

    #[test]
    fn jump_budget_is_monotonic_between_ground_contacts() {
        let (mut world, tuning) = setup(1);
        step(&mut world, jump_input(), &tuning);
        let mut prev = world.player.jumps_remaining;
        for _ in 0..30 {
            step(&mut world, FrameInput::default(), &tuning);
            if world.player.body.on_ground {
                break;
            }
            assert!(world.player.jumps_remaining <= prev);
            prev = world.player.jumps_remaining;
        }
        // Back on the ground: budget refilled
        settle(&mut world, &tuning, 120);
        step(&mut world, FrameInput::default(), &tuning);
        assert_eq!(world.player.jumps_remaining, 2);
    }

    #[test]
    fn up_key_jumps_only_from_the_ground() {
        let (mut world, tuning) = setup(1);
        let up = FrameInput { up_pressed: true, ..Default::default() };

        let ev = step(&mut world, up, &tuning);
        assert!(matches!(ev.first(), Some(GameEvent::PlayerJumped)));
        assert_eq!(world.player.jumps_remaining, 1);

        // Airborne now: up does nothing
        settle(&mut world, &tuning, 3);
        assert!(!world.player.body.on_ground);
        let ev = step(&mut world, up, &tuning);
        assert!(ev.is_empty());
        assert_eq!(world.player.jumps_remaining, 1);
    }

    // ── Collectible economy & transitions ──

    #[test]
    fn collection_updates_count_and_currency() {
        let (mut world, tuning) = setup(2);
        let cap = world.capacitors[0].body;
        world.player.body.x = cap.x;
        world.player.body.y = cap.y;
        world.player.body.vy = 0.0;
        let ev = step(&mut world, FrameInput::default(), &tuning);

        assert!(ev.iter().any(|e| matches!(e, GameEvent::CapacitorCollected { .. })));
        assert_eq!(world.collected, 1);
        assert_eq!(world.money_line(), "1,000€");
        assert_eq!(world.capacitors.len(), 2);
    }

    #[test]
    fn clearing_a_mid_level_schedules_exactly_one_advance() {
        let (mut world, tuning) = setup(1);
        let ev = collect_all(&mut world, &tuning);

        assert!(ev.iter().any(|e| matches!(e, GameEvent::LevelCleared { level: 1 })));
        assert_eq!(world.message, "Level Complete!");
        assert_eq!(world.pending.len(), 1);
        assert!(world.transition_scheduled);

        // Extra ticks before the delay elapses must not add transitions.
        for _ in 0..5 {
            step(&mut world, FrameInput::default(), &tuning);
        }
        assert!(world.pending.len() <= 1);

        // After the full delay, level 2 is live with a reset economy.
        settle(&mut world, &tuning, tuning.ticks_for_ms(tuning.level_clear_delay_ms));
        assert_eq!(world.level, 2);
        assert_eq!(world.collected, 0);
        assert_eq!(world.money_line(), "0€");
    }

    #[test]
    fn clearing_the_final_level_spawns_one_boss_with_three_health() {
        let (mut world, tuning) = setup(5);
        let ev = collect_all(&mut world, &tuning);

        assert!(ev.iter().any(|e| matches!(e, GameEvent::BossApproaching)));
        assert_eq!(world.message, "Boss Approaching!");
        assert!(world.boss.is_none(), "boss waits out the intro delay");

        settle(&mut world, &tuning, tuning.ticks_for_ms(tuning.boss_intro_delay_ms) + 1);
        let boss = world.boss.as_ref().expect("boss spawned after the delay");
        assert_eq!(boss.health, 3);

        // A re-triggered spawn is a no-op: still exactly one boss.
        world.schedule(DelayedKind::SpawnBoss, 1);
        settle(&mut world, &tuning, 3);
        assert!(world.boss.is_some());
        assert_eq!(world.boss.as_ref().unwrap().health, 3);
    }

    // ── Boss patrol ──

    #[test]
    fn boss_patrols_between_bounds() {
        let (mut world, tuning) = setup(5);
        world.capacitors.clear();
        force_boss(&mut world, &tuning);

        let (min, max) = {
            let b = world.boss.as_ref().unwrap();
            (b.patrol_min, b.patrol_max)
        };
        let mut seen_left = false;
        let mut seen_right = false;
        // Long enough to cross the perch both ways at patrol speed.
        for _ in 0..1200 {
            step(&mut world, FrameInput::default(), &tuning);
            let b = world.boss.as_ref().unwrap();
            assert!(b.body.x >= min - 1.0 && b.body.x <= max + 1.0);
            match b.facing {
                Facing::Left => seen_left = true,
                Facing::Right => seen_right = true,
            }
        }
        assert!(seen_left && seen_right, "boss reversed at both bounds");
    }

    // ── Hit resolution ──

    #[test]
    fn stomp_damages_boss_and_bounces_player() {
        let (mut world, tuning) = setup(5);
        world.capacitors.clear();
        world.collected = 3;
        world.currency = 3000;
        force_boss(&mut world, &tuning);

        place_for_stomp(&mut world);
        let ev = step(&mut world, FrameInput::default(), &tuning);

        assert!(ev.iter().any(|e| matches!(e, GameEvent::BossStomped { health_left: 2 })));
        assert_eq!(world.boss.as_ref().unwrap().health, 2);
        assert_eq!(world.player.body.vy, -tuning.stomp_bounce);
        // A stomp never costs capacitors.
        assert_eq!(world.collected, 3);
    }

    #[test]
    fn side_contact_knocks_back_and_costs_one_capacitor() {
        let (mut world, tuning) = setup(5);
        world.capacitors.clear();
        world.collected = 2;
        world.currency = 2000;
        force_boss(&mut world, &tuning);

        place_for_side_hit(&mut world);
        let ev = step(&mut world, FrameInput::default(), &tuning);

        assert!(ev.iter().any(|e| matches!(e, GameEvent::PlayerKnockedBack)));
        assert_eq!(world.boss.as_ref().unwrap().health, 3, "side hits never damage the boss");
        assert_eq!(world.collected, 1);
        assert_eq!(world.money_line(), "1,000€");
        assert_eq!(world.player.body.vx, -tuning.knockback_x);
        assert_eq!(world.player.body.vy, -tuning.knockback_y);
        assert!(world.shake_ticks > 0);
    }

    #[test]
    fn side_contact_penalty_floors_at_zero() {
        let (mut world, tuning) = setup(5);
        world.capacitors.clear();
        force_boss(&mut world, &tuning);

        place_for_side_hit(&mut world);
        step(&mut world, FrameInput::default(), &tuning);
        assert_eq!(world.collected, 0);
        assert_eq!(world.money_line(), "0€");
    }

    #[test]
    fn three_stomps_defeat_the_boss_exactly_once() {
        let (mut world, tuning) = setup(5);
        world.capacitors.clear();
        force_boss(&mut world, &tuning);

        let mut defeats = 0;
        for _ in 0..3 {
            place_for_stomp(&mut world);
            let ev = step(&mut world, FrameInput::default(), &tuning);
            defeats += ev.iter().filter(|e| matches!(e, GameEvent::BossDefeated)).count();
        }

        assert_eq!(defeats, 1);
        let boss = world.boss.as_ref().unwrap();
        assert_eq!(boss.health, 0);
        assert_eq!(boss.phase, BossPhase::Defeated);
        assert_eq!(world.phase, Phase::Victory);
        assert_eq!(world.message, "Boss Defeated!");

        // A stomp after defeat changes nothing.
        place_for_stomp(&mut world);
        let ev = step(&mut world, FrameInput::default(), &tuning);
        assert!(!ev.iter().any(|e| matches!(e, GameEvent::BossStomped { .. })));
        assert_eq!(world.boss.as_ref().unwrap().health, 0);

        // The win sequence hands control back to the title screen.
        settle(&mut world, &tuning, tuning.ticks_for_ms(tuning.victory_delay_ms) + 1);
        assert_eq!(world.phase, Phase::Title);
    }

    // ── Delayed actions & generations ──

    #[test]
    fn stale_delayed_actions_never_fire_after_a_reload() {
        let (mut world, tuning) = setup(1);
        world.schedule(DelayedKind::AdvanceLevel(2), 5);

        // Reload before the action fires: generation bump invalidates it.
        load_level(&mut world, 1);
        settle(&mut world, &tuning, 10);

        assert_eq!(world.level, 1);
        assert!(world.pending.is_empty());
    }

    // ── Fall-out guard ──

    #[test]
    fn falling_out_resets_the_whole_session() {
        let (mut world, tuning) = setup(5);
        world.capacitors.clear();
        world.collected = 4;
        world.currency = 4000;
        force_boss(&mut world, &tuning);

        world.player.body.x = 512.0;
        world.player.body.y = tuning.fall_out_depth + 10.0;
        let ev = step(&mut world, FrameInput::default(), &tuning);

        assert!(ev.iter().any(|e| matches!(e, GameEvent::PlayerFellOut)));
        assert_eq!(world.level, 5);
        assert_eq!(world.collected, 0);
        assert!(world.boss.is_none(), "session reset discards the boss");
        assert_eq!(world.player.body.x, catalog::PLAYER_SPAWN.0);
    }

    // ── Full-game scenario ──

    #[test]
    fn level_one_scenario_two_capacitors_then_advance() {
        let (mut world, tuning) = setup(1);
        assert_eq!(world.capacitors.len(), 2);

        collect_all(&mut world, &tuning);
        assert_eq!(world.collected, 2);
        assert_eq!(world.money_line(), "2,000€");

        settle(&mut world, &tuning, tuning.ticks_for_ms(tuning.level_clear_delay_ms) + 1);
        assert_eq!(world.level, 2);
        assert_eq!(world.collected, 0);
        assert_eq!(world.money_line(), "0€");
        assert_eq!(world.capacitors.len(), 3);
    }
}
