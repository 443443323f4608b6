//! Terminal runner (default binary).
//!
//! Owns the frame loop: read input, advance the gravity clock by the real
//! elapsed time, render. Rendering goes through a framebuffer that is only
//! rewritten where it changed.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use block_drop::apply_player_action;
use block_drop::config::RunConfig;
use block_drop::core::{GameSnapshot, GameState};
use block_drop::input::{map_key_event, should_quit};
use block_drop::logging;
use block_drop::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    logging::init(&config)?;
    info!(
        "starting: seed={} frame_ms={}",
        config.seed, config.frame_ms
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let mut game = GameState::new(config.seed);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(config.frame_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        info!("quit: score={} lines={}", game.score(), game.lines());
                        return Ok(());
                    }
                    if let Some(action) = map_key_event(key) {
                        apply_player_action(&mut game, action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with whole elapsed milliseconds; the remainder carries into the next frame.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            let ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            last_tick += Duration::from_millis(ms as u64);
            game.tick(ms);
        }
    }
}
