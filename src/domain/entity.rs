/// Entities: Player, Capacitor, Boss.
///
/// All three share the same physics capability (a `Body`) but differ in
/// behavior; controllers in `sim::step` dispatch on the concrete type rather
/// than through an inheritance hierarchy.

use super::physics::Body;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Facing {
    Left,
    Right,
}

/// Frame input: held movement is continuous, jumps are edge-triggered
/// (fire on the initial press only, never while held).
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub left_held: bool,
    pub right_held: bool,
    /// Primary jump key (Space): consumes a jump from any state.
    pub jump_pressed: bool,
    /// Directional Up: jumps only while grounded, spends the same budget.
    pub up_pressed: bool,
}

const PLAYER_W: f32 = 20.0;
const PLAYER_H: f32 = 40.0;

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    /// Double-jump budget: 0..=2, refilled only by touching ground.
    pub jumps_remaining: u8,
    /// Ticks of hit-flash left (side contact feedback).
    pub flash_ticks: u32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            body: Body::new(x, y, PLAYER_W, PLAYER_H),
            facing: Facing::Right,
            jumps_remaining: 2,
            flash_ticks: 0,
        }
    }
}

const CAPACITOR_W: f32 = 28.0;
const CAPACITOR_H: f32 = 28.0;

/// A collectible capacitor. Removed from the level on first pickup, which
/// makes collection idempotent — a removed capacitor cannot overlap again.
#[derive(Clone, Debug)]
pub struct Capacitor {
    pub body: Body,
}

impl Capacitor {
    pub fn new(x: f32, y: f32) -> Self {
        Capacitor { body: Body::new(x, y, CAPACITOR_W, CAPACITOR_H) }
    }
}

/// Boss lifecycle after spawning. "Dormant" is the absence of a Boss
/// instance; a level reload destroys the instance and thus returns the
/// encounter to dormant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BossPhase {
    /// Just created, starts patrolling on its first simulation tick.
    Spawned,
    /// Pacing between the patrol bounds; hits resolve in this phase.
    Patrolling,
    /// Terminal: health reached zero. Ignores all further contact.
    Defeated,
}

const BOSS_W: f32 = 40.0;
const BOSS_H: f32 = 74.0;

pub const BOSS_START_HEALTH: u32 = 3;

/// Patrol bounds are inset from the perch edges by this much so the boss
/// never walks off its platform.
pub const PATROL_MARGIN: f32 = 20.0;

#[derive(Clone, Debug)]
pub struct Boss {
    pub body: Body,
    pub phase: BossPhase,
    /// Starts at 3, only ever decreases.
    pub health: u32,
    pub patrol_min: f32,
    pub patrol_max: f32,
    pub facing: Facing,
    /// Ticks of stomp-flash left.
    pub flash_ticks: u32,
}

impl Boss {
    /// Spawn on the perch: `x` centered on the platform, feet on its top
    /// edge, patrol bounds from the platform extent inset by the margin.
    pub fn new(perch_x: f32, perch_top: f32, perch_w: f32) -> Self {
        let patrol_min = (perch_x - perch_w / 2.0 + PATROL_MARGIN).max(0.0);
        let patrol_max = (perch_x + perch_w / 2.0 - PATROL_MARGIN).min(super::catalog::WORLD_W);
        let mut body = Body::new(perch_x, perch_top - BOSS_H / 2.0, BOSS_W, BOSS_H);
        body.on_ground = true;
        Boss {
            body,
            phase: BossPhase::Spawned,
            health: BOSS_START_HEALTH,
            patrol_min,
            patrol_max,
            facing: Facing::Left,
            flash_ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_player_has_full_jump_budget() {
        let p = Player::new(100.0, 600.0);
        assert_eq!(p.jumps_remaining, 2);
        assert_eq!(p.facing, Facing::Right);
    }

    #[test]
    fn boss_spawns_with_three_health_on_perch() {
        let b = Boss::new(720.0, 244.0, 240.0);
        assert_eq!(b.health, BOSS_START_HEALTH);
        assert_eq!(b.phase, BossPhase::Spawned);
        // Feet rest on the perch top
        assert!((b.body.bottom() - 244.0).abs() < 0.001);
    }

    #[test]
    fn patrol_bounds_are_inset_from_perch_edges() {
        let b = Boss::new(720.0, 244.0, 240.0);
        assert_eq!(b.patrol_min, 720.0 - 120.0 + PATROL_MARGIN);
        assert_eq!(b.patrol_max, 720.0 + 120.0 - PATROL_MARGIN);
        assert!(b.patrol_min < b.patrol_max);
    }

    #[test]
    fn patrol_bounds_clamp_to_world() {
        // Perch wider than its position allows on the left
        let b = Boss::new(50.0, 244.0, 300.0);
        assert_eq!(b.patrol_min, 0.0);
    }
}
