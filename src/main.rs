//! Terminal runner (default binary).
//!
//! Fixed-timestep loop: each frame collects key events until the frame
//! deadline, feeds the resulting commands and soft drop flag to the session in
//! one `step`, then draws the snapshot.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tower_tetris::core::{GameSnapshot, Session};
use tower_tetris::input::{should_quit, InputFrame};
use tower_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tower_tetris::GameConfig;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;
    info!(seed = config.seed, frame_ms = config.frame_ms, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only; stdout belongs to the game screen.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let mut session = Session::new(config.seed);
    let view = GameView::default();
    let frame = config.frame_duration();

    let mut input = InputFrame::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut next_frame = Instant::now() + frame;

    loop {
        // Collect input until this frame's deadline.
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = session.score(), lines = session.lines(), "quit");
                        return Ok(());
                    }
                    input.handle_key(key);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        input.drain(|commands, soft_drop| session.step(commands, soft_drop));

        let now = Instant::now();
        next_frame += frame;
        if next_frame < now {
            // Fell behind (suspended terminal, slow draw); don't try to catch up.
            next_frame = now + frame;
        }

        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;
    }
}
