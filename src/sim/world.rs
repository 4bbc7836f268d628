/// WorldState: the complete level session of a running game.
///
/// Everything that belongs to one loaded level — platform colliders,
/// capacitors, the boss, the collected counter and the HUD values derived
/// from it — lives here and is rebuilt wholesale by `sim::level::load_level`.
/// No component mutates these fields directly; all mutation goes through the
/// simulation step and the level loader.
///
/// ## Delayed actions
///
/// Scene transitions ("Level Complete" → next level, "Boss Approaching" →
/// spawn, victory → title) are scheduled as fire-once `DelayedAction`s
/// tagged with the level generation. A reload bumps `generation`, so a
/// stale action scheduled against the previous level can never execute
/// against the new session.

use crate::domain::entity::{Boss, BossPhase, Capacitor, Player};
use crate::domain::physics::StaticRect;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Playing,
    Victory,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DelayedKind {
    /// Load the given level after the "Level Complete!" banner.
    AdvanceLevel(usize),
    /// Spawn the boss after the "Boss Approaching!" banner.
    SpawnBoss,
    /// Hand control back to the title screen after the win banner.
    ReturnToTitle,
}

#[derive(Clone, Copy, Debug)]
pub struct DelayedAction {
    pub generation: u64,
    pub remaining: u32,
    pub kind: DelayedKind,
}

pub struct WorldState {
    pub phase: Phase,

    // ── Level session ──
    /// Active level index, 1..=MAX_LEVELS.
    pub level: usize,
    pub platforms: Vec<StaticRect>,
    pub capacitors: Vec<Capacitor>,
    pub player: Player,
    pub boss: Option<Boss>,

    // ── Collectible economy ──
    /// Capacitors collected this level. Resets to 0 on every load.
    pub collected: u32,
    /// Derived money value (collected × capacitor value), kept in sync by
    /// every mutation of `collected`.
    pub currency: u32,

    // ── Transition bookkeeping ──
    /// Set once the clear transition (advance or boss intro) is scheduled;
    /// guards against a duplicate overlap event double-firing it.
    pub transition_scheduled: bool,
    /// Bumped on every level (re)load; stale delayed actions are dropped.
    pub generation: u64,
    pub pending: Vec<DelayedAction>,

    // ── Presentation hints ──
    pub message: String,
    pub message_timer: u32,
    /// Camera shake ticks left (side-contact feedback).
    pub shake_ticks: u32,
    pub debug_bodies: bool,

    pub tick: u64,
}

impl WorldState {
    pub fn new() -> Self {
        WorldState {
            phase: Phase::Title,
            level: 1,
            platforms: vec![],
            capacitors: vec![],
            player: Player::new(
                crate::domain::catalog::PLAYER_SPAWN.0,
                crate::domain::catalog::PLAYER_SPAWN.1,
            ),
            boss: None,
            collected: 0,
            currency: 0,
            transition_scheduled: false,
            generation: 0,
            pending: vec![],
            message: String::new(),
            message_timer: 0,
            shake_ticks: 0,
            debug_bodies: false,
            tick: 0,
        }
    }

    /// Are all capacitors of the current level gone?
    pub fn is_level_cleared(&self) -> bool {
        self.capacitors.is_empty()
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Schedule a fire-once action `delay` ticks from now, tagged with the
    /// current level generation.
    pub fn schedule(&mut self, kind: DelayedKind, delay: u32) {
        self.pending.push(DelayedAction {
            generation: self.generation,
            remaining: delay.max(1),
            kind,
        });
    }

    // ── HUD values (exposed to the presentation layer as plain strings) ──

    pub fn score_line(&self) -> String {
        format!("Capacitors: {}", self.collected)
    }

    pub fn level_line(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn money_line(&self) -> String {
        format_money(self.currency)
    }

    /// HUD line for the boss, hidden once it is defeated.
    pub fn boss_line(&self) -> Option<String> {
        self.boss
            .as_ref()
            .filter(|b| b.phase != BossPhase::Defeated)
            .map(|b| format!("Boss HP: {}", b.health))
    }
}

/// Render a money amount with thousands separators and the euro suffix,
/// e.g. `format_money(5000)` → `"5,000€"`.
pub fn format_money(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('€');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(0), "0€");
        assert_eq!(format_money(1000), "1,000€");
        assert_eq!(format_money(5000), "5,000€");
        assert_eq!(format_money(123), "123€");
        assert_eq!(format_money(1234567), "1,234,567€");
    }

    #[test]
    fn fresh_world_starts_on_title_with_empty_session() {
        let w = WorldState::new();
        assert_eq!(w.phase, Phase::Title);
        assert!(w.is_level_cleared()); // no level loaded yet
        assert_eq!(w.collected, 0);
        assert!(w.boss.is_none());
        assert_eq!(w.money_line(), "0€");
    }

    #[test]
    fn scheduled_actions_carry_the_current_generation() {
        let mut w = WorldState::new();
        w.generation = 7;
        w.schedule(DelayedKind::SpawnBoss, 10);
        assert_eq!(w.pending.len(), 1);
        assert_eq!(w.pending[0].generation, 7);
        assert_eq!(w.pending[0].remaining, 10);
    }
}
