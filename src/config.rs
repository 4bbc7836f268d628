/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tuning: TuningConfig,
    pub gamepad: GamepadConfig,
}

/// Gameplay tuning. All velocities are world units per second;
/// the world is 1024×768 units regardless of terminal size.
#[derive(Clone, Debug)]
pub struct TuningConfig {
    pub tick_rate_ms: u64,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub boss_patrol_speed: f32,
    pub stomp_fall_speed: f32,     // min downward speed for a stomp
    pub stomp_gap: f32,            // max player-bottom-to-boss-top distance
    pub stomp_bounce: f32,         // upward bounce after a stomp
    pub knockback_x: f32,          // horizontal push on side contact
    pub knockback_y: f32,          // upward push on side contact
    pub fall_out_depth: f32,       // below this the level session resets
    pub level_clear_delay_ms: u64,
    pub boss_intro_delay_ms: u64,
    pub victory_delay_ms: u64,
    pub capacitor_value: u32,      // money per capacitor
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub jump: Vec<String>,
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub restart: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    tuning: TomlTuning,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlTuning {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_move_speed")]
    move_speed: f32,
    #[serde(default = "default_jump_velocity")]
    jump_velocity: f32,
    #[serde(default = "default_gravity")]
    gravity: f32,
    #[serde(default = "default_boss_patrol")]
    boss_patrol_speed: f32,
    #[serde(default = "default_stomp_fall")]
    stomp_fall_speed: f32,
    #[serde(default = "default_stomp_gap")]
    stomp_gap: f32,
    #[serde(default = "default_stomp_bounce")]
    stomp_bounce: f32,
    #[serde(default = "default_knockback_x")]
    knockback_x: f32,
    #[serde(default = "default_knockback_y")]
    knockback_y: f32,
    #[serde(default = "default_fall_out")]
    fall_out_depth: f32,
    #[serde(default = "default_clear_delay")]
    level_clear_delay_ms: u64,
    #[serde(default = "default_boss_intro_delay")]
    boss_intro_delay_ms: u64,
    #[serde(default = "default_victory_delay")]
    victory_delay_ms: u64,
    #[serde(default = "default_capacitor_value")]
    capacitor_value: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_jump_btns")]
    jump: Vec<String>,
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_restart")]
    restart: Vec<String>,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 16 }
fn default_move_speed() -> f32 { 220.0 }
fn default_jump_velocity() -> f32 { 520.0 }
fn default_gravity() -> f32 { 900.0 }
fn default_boss_patrol() -> f32 { 50.0 }
fn default_stomp_fall() -> f32 { 80.0 }
fn default_stomp_gap() -> f32 { 12.0 }
fn default_stomp_bounce() -> f32 { 320.0 }
fn default_knockback_x() -> f32 { 160.0 }
fn default_knockback_y() -> f32 { 200.0 }
fn default_fall_out() -> f32 { 900.0 }
fn default_clear_delay() -> u64 { 1200 }
fn default_boss_intro_delay() -> u64 { 1000 }
fn default_victory_delay() -> u64 { 1500 }
fn default_capacitor_value() -> u32 { 1000 }

fn default_jump_btns() -> Vec<String> { vec!["A".into(), "B".into()] }
fn default_confirm() -> Vec<String> { vec!["Start".into(), "A".into()] }
fn default_cancel() -> Vec<String> { vec!["Select".into()] }
fn default_restart() -> Vec<String> { vec!["Start".into()] }

impl Default for TomlTuning {
    fn default() -> Self {
        TomlTuning {
            tick_rate_ms: default_tick_rate(),
            move_speed: default_move_speed(),
            jump_velocity: default_jump_velocity(),
            gravity: default_gravity(),
            boss_patrol_speed: default_boss_patrol(),
            stomp_fall_speed: default_stomp_fall(),
            stomp_gap: default_stomp_gap(),
            stomp_bounce: default_stomp_bounce(),
            knockback_x: default_knockback_x(),
            knockback_y: default_knockback_y(),
            fall_out_depth: default_fall_out(),
            level_clear_delay_ms: default_clear_delay(),
            boss_intro_delay_ms: default_boss_intro_delay(),
            victory_delay_ms: default_victory_delay(),
            capacitor_value: default_capacitor_value(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            jump: default_jump_btns(),
            confirm: default_confirm(),
            cancel: default_cancel(),
            restart: default_restart(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        Self::from_toml(toml_cfg)
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            tuning: TuningConfig {
                tick_rate_ms: toml_cfg.tuning.tick_rate_ms.max(1),
                move_speed: toml_cfg.tuning.move_speed,
                jump_velocity: toml_cfg.tuning.jump_velocity,
                gravity: toml_cfg.tuning.gravity,
                boss_patrol_speed: toml_cfg.tuning.boss_patrol_speed,
                stomp_fall_speed: toml_cfg.tuning.stomp_fall_speed,
                stomp_gap: toml_cfg.tuning.stomp_gap,
                stomp_bounce: toml_cfg.tuning.stomp_bounce,
                knockback_x: toml_cfg.tuning.knockback_x,
                knockback_y: toml_cfg.tuning.knockback_y,
                fall_out_depth: toml_cfg.tuning.fall_out_depth,
                level_clear_delay_ms: toml_cfg.tuning.level_clear_delay_ms,
                boss_intro_delay_ms: toml_cfg.tuning.boss_intro_delay_ms,
                victory_delay_ms: toml_cfg.tuning.victory_delay_ms,
                capacitor_value: toml_cfg.tuning.capacitor_value,
            },
            gamepad: GamepadConfig {
                jump: toml_cfg.gamepad.jump,
                confirm: toml_cfg.gamepad.confirm,
                cancel: toml_cfg.gamepad.cancel,
                restart: toml_cfg.gamepad.restart,
            },
        }
    }
}

impl Default for GameConfig {
    /// Built-in defaults without touching the filesystem (used by tests).
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

impl TuningConfig {
    /// Seconds advanced per simulation tick.
    pub fn dt(&self) -> f32 {
        self.tick_rate_ms as f32 / 1000.0
    }

    /// Convert a duration in milliseconds into whole ticks (at least 1).
    pub fn ticks_for_ms(&self, ms: u64) -> u32 {
        ((ms + self.tick_rate_ms - 1) / self.tick_rate_ms).max(1) as u32
    }
}

/// Candidate directories to search: exe dir + CWD + system paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable (resolve symlinks)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/voltrun)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/voltrun");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory (/usr/share/voltrun)
    let sys = PathBuf::from("/usr/share/voltrun");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    // 5. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gameplay_constants() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.tuning.move_speed, 220.0);
        assert_eq!(cfg.tuning.jump_velocity, 520.0);
        assert_eq!(cfg.tuning.boss_patrol_speed, 50.0);
        assert_eq!(cfg.tuning.capacitor_value, 1000);
    }

    #[test]
    fn ticks_for_ms_rounds_up_and_never_zero() {
        let cfg = GameConfig::default();
        // 1200ms at 16ms/tick = 75 ticks
        assert_eq!(cfg.tuning.ticks_for_ms(1200), 75);
        assert_eq!(cfg.tuning.ticks_for_ms(1), 1);
        assert_eq!(cfg.tuning.ticks_for_ms(17), 2);
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let cfg: TomlConfig = toml::from_str("[tuning]\nmove_speed = 300.0\n").unwrap();
        assert_eq!(cfg.tuning.move_speed, 300.0);
        assert_eq!(cfg.tuning.jump_velocity, 520.0);
        assert_eq!(cfg.tuning.tick_rate_ms, 16);
    }
}
