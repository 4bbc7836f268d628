/// Level catalog: the five fixed level layouts.
///
/// Pure data with no side effects — a lookup table. Callers are responsible
/// for rejecting out-of-range indices; `level()` just answers `None`.
///
/// Coordinates are world units in a 1024×768 world. Platform `x`/`y` are the
/// rect center (matching the physics bodies built from them); width varies,
/// height is fixed at 32. Every level starts with a full-width ground
/// platform, and the LAST platform in each list is the boss perch — the boss
/// spawns on it and patrols its extent on the final level.

pub const MAX_LEVELS: usize = 5;

pub const WORLD_W: f32 = 1024.0;
pub const WORLD_H: f32 = 768.0;

pub const PLATFORM_H: f32 = 32.0;

/// Where the player starts (and is reset to by the cheat jump).
pub const PLAYER_SPAWN: (f32, f32) = (100.0, 600.0);

#[derive(Clone, Copy, Debug)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct CapacitorSpec {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct LevelDef {
    pub platforms: &'static [PlatformSpec],
    pub capacitors: &'static [CapacitorSpec],
}

impl LevelDef {
    /// The boss perch: the last platform of the level.
    pub fn boss_perch(&self) -> PlatformSpec {
        *self.platforms.last().expect("every level has at least one platform")
    }
}

const fn p(x: f32, y: f32, w: f32) -> PlatformSpec {
    PlatformSpec { x, y, w }
}

const fn c(x: f32, y: f32) -> CapacitorSpec {
    CapacitorSpec { x, y }
}

static LEVEL_1: LevelDef = LevelDef {
    platforms: &[
        p(512.0, 720.0, 1024.0),
        p(300.0, 560.0, 300.0),
        p(520.0, 420.0, 300.0),
    ],
    capacitors: &[c(300.0, 520.0), c(520.0, 380.0)],
};

static LEVEL_2: LevelDef = LevelDef {
    platforms: &[
        p(512.0, 720.0, 1024.0),
        p(200.0, 600.0, 250.0),
        p(430.0, 480.0, 240.0),
        p(700.0, 360.0, 300.0),
    ],
    capacitors: &[c(200.0, 560.0), c(430.0, 440.0), c(700.0, 320.0)],
};

static LEVEL_3: LevelDef = LevelDef {
    platforms: &[
        p(512.0, 720.0, 1024.0),
        p(150.0, 520.0, 220.0),
        p(360.0, 420.0, 200.0),
        p(580.0, 320.0, 200.0),
        p(820.0, 240.0, 240.0),
    ],
    capacitors: &[c(150.0, 480.0), c(360.0, 380.0), c(580.0, 260.0), c(820.0, 200.0)],
};

static LEVEL_4: LevelDef = LevelDef {
    platforms: &[
        p(512.0, 720.0, 1024.0),
        p(300.0, 560.0, 300.0),
        p(750.0, 480.0, 300.0),
        p(200.0, 380.0, 200.0),
        p(520.0, 300.0, 200.0),
    ],
    capacitors: &[c(300.0, 520.0), c(750.0, 440.0), c(200.0, 340.0), c(520.0, 260.0)],
};

/// Boss level — capacitors spread out, boss enters on the top platform.
static LEVEL_5: LevelDef = LevelDef {
    platforms: &[
        p(512.0, 720.0, 1024.0),
        p(180.0, 560.0, 220.0),
        p(360.0, 460.0, 220.0),
        p(540.0, 360.0, 220.0),
        p(720.0, 260.0, 240.0),
    ],
    capacitors: &[
        c(180.0, 520.0),
        c(360.0, 420.0),
        c(540.0, 320.0),
        c(720.0, 220.0),
        c(900.0, 180.0),
    ],
};

/// Look up a level definition. Valid for `1 ≤ n ≤ MAX_LEVELS`.
pub fn level(n: usize) -> Option<&'static LevelDef> {
    match n {
        1 => Some(&LEVEL_1),
        2 => Some(&LEVEL_2),
        3 => Some(&LEVEL_3),
        4 => Some(&LEVEL_4),
        5 => Some(&LEVEL_5),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_five_levels() {
        for n in 1..=MAX_LEVELS {
            assert!(level(n).is_some(), "level {n} missing");
        }
        assert!(level(0).is_none());
        assert!(level(6).is_none());
    }

    #[test]
    fn every_level_has_a_ground_platform() {
        for n in 1..=MAX_LEVELS {
            let def = level(n).unwrap();
            let ground = def.platforms.iter()
                .find(|p| p.w >= WORLD_W)
                .expect("level needs a full-width ground platform");
            assert!(ground.y > WORLD_H - 100.0, "ground sits near the bottom");
        }
    }

    #[test]
    fn boss_perch_is_last_platform() {
        let def = level(5).unwrap();
        let perch = def.boss_perch();
        assert_eq!(perch.x, 720.0);
        assert_eq!(perch.y, 260.0);
        assert_eq!(perch.w, 240.0);
    }

    #[test]
    fn capacitor_counts() {
        assert_eq!(level(1).unwrap().capacitors.len(), 2);
        assert_eq!(level(5).unwrap().capacitors.len(), 5);
    }

    #[test]
    fn capacitors_sit_inside_the_world() {
        for n in 1..=MAX_LEVELS {
            for cap in level(n).unwrap().capacitors {
                assert!(cap.x > 0.0 && cap.x < WORLD_W);
                assert!(cap.y > 0.0 && cap.y < WORLD_H);
            }
        }
    }
}
