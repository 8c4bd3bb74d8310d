/// Entry point and game loop.

mod config;
mod domain;
mod rng;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use config::GameConfig;
use domain::entity::Command;
use rng::SeededSource;
use sim::event::GameEvent;
use sim::step;
use sim::view::frame_view;
use sim::world::RoundContext;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(2);

fn main() {
    let config = GameConfig::load();

    let mut ctx = RoundContext::new(&config);
    let mut rng = SeededSource::new(config.tuning.seed);

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut ctx, &mut rng, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Jumping Frog!");
    println!("Highscore: {}", ctx.round.highscore.max(ctx.round.score));
}

fn game_loop(
    ctx: &mut RoundContext,
    rng: &mut SeededSource,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    kb.honor_release = renderer.reports_key_release();
    let mut gp = GamepadState::new(&config.gamepad);
    let tick_rate = Duration::from_millis(config.tuning.tick_rate_ms);
    let mut last_tick = Instant::now();

    // One-shot commands seen between ticks, held until the next step.
    let mut pending: Option<Command> = None;

    renderer.render(&frame_view(ctx))?;

    loop {
        kb.drain_events();
        gp.update();

        match detect_command(&kb, &gp) {
            Command::Quit => break,
            cmd @ (Command::SkipRound | Command::TogglePickup) => pending = Some(cmd),
            _ => {}
        }

        if last_tick.elapsed() >= tick_rate {
            let command = pending.take().unwrap_or_else(|| detect_command(&kb, &gp));
            let events = step::step(ctx, rng, command);
            process_sound_events(sound, &events);
            renderer.render(&frame_view(ctx))?;
            last_tick = Instant::now();
        }

        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

/// Keyboard first, gamepad when the keyboard is idle.
fn detect_command(kb: &InputState, gp: &GamepadState) -> Command {
    match kb.command() {
        Command::Idle => gp.command(),
        cmd => cmd,
    }
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for ev in events {
        match ev {
            GameEvent::Scored { .. } => sfx.play_score(),
            GameEvent::FrogSquashed { .. } => sfx.play_squash(),
            GameEvent::FrogBoarded { .. } => sfx.play_board(),
            GameEvent::FrogDismounted { .. } => sfx.play_hop_off(),
            GameEvent::RoundReset { .. } => sfx.play_round_over(),
            GameEvent::PickupToggled { .. }
            | GameEvent::CarRetired { .. }
            | GameEvent::SpeedsRerolled => {}
        }
    }
}
