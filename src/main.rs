//! blockfall runner (default binary).
//!
//! Without a subcommand this plays in the terminal: crossterm for input and
//! the framebuffer renderer for output. `blockfall headless` drives a session
//! over stdin/stdout instead.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use blockfall::adapter::run_headless;
use blockfall::cli::{Cli, Command};
use blockfall::core::{FrameClock, GameSnapshot, Session};
use blockfall::input::{handle_key_event, is_press, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let seed = cli.resolve_seed();

    match cli.command {
        Some(Command::Headless { autostart }) => headless(seed, autostart),
        None => terminal(seed, cli.tick_ms),
    }
}

fn headless(seed: u64, autostart: bool) -> Result<()> {
    let mut session = Session::new(seed);
    if autostart {
        session.start();
    }

    let summary = run_headless(&mut session, io::stdin().lock(), io::stdout().lock())?;
    eprintln!(
        "[headless] done seed={} accepted={} rejected={} quit={} phase={} score={} level={} lines={} episode={}",
        seed,
        summary.accepted,
        summary.rejected,
        summary.quit,
        summary.phase.as_str(),
        summary.score,
        summary.level,
        summary.lines,
        summary.episode_id,
    );
    Ok(())
}

fn terminal(seed: u64, tick_ms: u32) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = play(&mut term, seed, tick_ms);

    // Always try to restore terminal state.
    let _ = term.exit();

    let session = result?;
    eprintln!(
        "[blockfall] seed={} phase={} score={} level={} lines={}",
        seed,
        session.phase().as_str(),
        session.score(),
        session.level(),
        session.lines(),
    );
    Ok(())
}

/// Frame loop: drain input until the next frame is due, advance the session by
/// the measured elapsed time, then draw. Returns when a quit key is pressed.
fn play(term: &mut TerminalRenderer, seed: u64, tick_ms: u32) -> Result<Session> {
    let mut session = Session::new(seed);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(tick_ms as u64);
    let mut clock = FrameClock::new();
    let mut next_frame = Instant::now();
    clock.lap(next_frame);

    loop {
        // Input with timeout until the next frame.
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        return Ok(session);
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        next_frame += frame;
        if next_frame < now {
            // Fell behind (suspended terminal, slow draw): don't try to catch up.
            next_frame = now + frame;
        }

        session.tick(clock.lap(now));

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;
    }
}
