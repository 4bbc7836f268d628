/// Events emitted during a simulation step.
/// The presentation/audio layers consume these for effects; the core never
/// reads them back, so a dropped event can only cost a sound or a flash.

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum GameEvent {
    PlayerJumped,
    CapacitorCollected { x: f32, y: f32 },
    LevelCleared { level: usize },
    BossApproaching,
    BossSpawned,
    BossStomped { health_left: u32 },
    BossDefeated,
    PlayerKnockedBack,
    PlayerFellOut,
    LevelLoaded { level: usize },
}
