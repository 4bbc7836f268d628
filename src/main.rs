/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::entity::FrameInput;
use sim::event::GameEvent;
use sim::level::{cheat_jump_to_final, load_level, reset_player};
use sim::step;
use sim::world::{Phase, WorldState};
use ui::gamepad::GamepadState;
use ui::input::{Keyboard, KEYS_CONFIRM};
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();
    let mut world = WorldState::new();

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut world, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Volt Runner!");
    println!("Last payout: {}", world.money_line());
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = Keyboard::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.tuning.tick_rate_ms);

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(world, sound, &kb, &gp) {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            let input = if world.phase == Phase::Playing {
                merge_input(&kb, &gp)
            } else {
                FrameInput::default()
            };
            let events = step::step(world, input, &config.tuning);
            process_sound_events(sound, &events);
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn merge_input(kb: &Keyboard, gp: &GamepadState) -> FrameInput {
    let mut input = kb.frame_input();
    input.left_held = input.left_held || gp.left_held();
    input.right_held = input.right_held || gp.right_held();
    input.jump_pressed = input.jump_pressed || gp.jump_pressed();
    input.up_pressed = input.up_pressed || gp.up_pressed();
    input
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::PlayerJumped => sfx.play_jump(),
            GameEvent::CapacitorCollected { .. } => sfx.play_pickup(),
            GameEvent::LevelCleared { .. } => sfx.play_clear(),
            GameEvent::BossApproaching => sfx.play_clear(),
            GameEvent::BossSpawned => sfx.start_boss_music(),
            GameEvent::BossStomped { .. } => sfx.play_stomp(),
            GameEvent::BossDefeated => {
                sfx.stop_boss_music();
                sfx.play_victory();
            }
            GameEvent::PlayerKnockedBack => sfx.play_hit(),
            GameEvent::PlayerFellOut => {
                sfx.stop_boss_music();
                sfx.play_fall();
            }
            GameEvent::LevelLoaded { .. } => {}
        }
    }
}

/// Reset to the title screen, discarding the running session.
fn return_to_title(world: &mut WorldState, sound: Option<&SoundEngine>) {
    if let Some(sfx) = sound {
        sfx.stop_boss_music();
    }
    *world = WorldState::new();
}

fn start_game(world: &mut WorldState) {
    load_level(world, 1);
    reset_player(world);
    world.phase = Phase::Playing;
}

fn handle_meta(
    world: &mut WorldState,
    sound: Option<&SoundEngine>,
    kb: &Keyboard,
    gp: &GamepadState,
) -> bool {
    let confirm = kb.any_pressed(KEYS_CONFIRM) || gp.confirm_pressed();
    let esc = kb.was_pressed(KeyCode::Esc) || gp.cancel_pressed();

    match world.phase {
        Phase::Title => {
            if confirm {
                start_game(world);
            } else if kb.any_pressed(&[KeyCode::Char('q'), KeyCode::Char('Q')]) || esc {
                return true;
            }
        }

        Phase::Playing => {
            if esc {
                return_to_title(world, sound);
            } else if kb.any_pressed(ui::input::KEYS_RESTART) || gp.restart_pressed() {
                if let Some(sfx) = sound {
                    sfx.stop_boss_music();
                }
                let current = world.level;
                load_level(world, current);
                reset_player(world);
                world.set_message("Level Restarted", 30);
            } else if kb.was_pressed(KeyCode::Char('5')) {
                // Shortcut straight to the boss site.
                if let Some(sfx) = sound {
                    sfx.stop_boss_music();
                }
                cheat_jump_to_final(world);
            } else if kb.any_pressed(&[KeyCode::Char('b'), KeyCode::Char('B')]) {
                world.debug_bodies = !world.debug_bodies;
            }
        }

        Phase::Victory => {
            // The win banner returns to the title on its own; ESC skips the wait.
            if esc {
                return_to_title(world, sound);
            }
        }
    }

    false
}
