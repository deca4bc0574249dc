//! Terminal falling-block runner (default binary).
//!
//! Owns the single engine instance and passes it to input handling, the
//! gravity clock and the framebuffer renderer each frame.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::config::GameConfig;
use blockfall::core::{GameSnapshot, GameState, RandomPicker};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::journal::Journal;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = GameConfig::load(&args)?;
    let seed = config.seed.unwrap_or_else(clock_seed);

    let mut journal = match config.log_path.as_deref() {
        Some(path) => Journal::open(path)?,
        None => Journal::disabled(),
    };

    let mut term = TerminalRenderer::new();
    term.enter().context("enter terminal")?;

    let result = run(&mut term, &config, seed, &mut journal);

    // Always try to restore terminal state.
    let _ = term.exit();
    journal.flush()?;

    let game = result?;
    println!(
        "[Blockfall] seed {} | score {} | level {} | lines {}",
        seed,
        game.score(),
        game.level(),
        game.lines()
    );
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    seed: u32,
    journal: &mut Journal,
) -> Result<GameState> {
    let dims = config.board_dims()?;
    let mut game = GameState::with_source(dims, RandomPicker::new(seed));
    game.start();

    let started_at = Instant::now();
    journal.start(0, game.episode_id(), seed, dims);

    let view = GameView::default();
    let mut snap = GameSnapshot::new(dims);
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(TICK_MS as u64);
    let mut next_frame = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next frame is due.
        next_frame += frame;
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(game);
                    }
                    if let Some(action) = handle_key_event(key) {
                        let now_ms = started_at.elapsed().as_millis() as u64;
                        game.apply_action(action);
                        if action == GameAction::Restart {
                            journal.restart(now_ms, game.episode_id());
                        }
                        if let Some(ev) = game.take_last_event() {
                            journal.lock(now_ms, game.episode_id(), &ev);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now_ms = started_at.elapsed().as_millis() as u64;
        game.tick(now_ms);
        if let Some(ev) = game.take_last_event() {
            journal.lock(now_ms, game.episode_id(), &ev);
        }

        // Never try to catch up on frames missed while suspended.
        let now = Instant::now();
        if next_frame < now {
            next_frame = now;
        }
    }
}

/// Seed from the wall clock when none was configured.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
