//! Headless driver loop.
//!
//! Reads one message per line, applies it to the session and answers with an
//! observation (or an error). Synchronous and single-threaded: the session is
//! only advanced by `tick` messages, so a run is fully reproducible from its
//! seed and input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{GameSnapshot, Session};
use crate::protocol::{
    create_error, create_observation, create_welcome, parse_message, ErrorCode, InboundMessage,
};
use crate::types::SessionPhase;

/// What a headless run did, for the caller's exit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadlessSummary {
    /// Lines accepted and answered with an observation
    pub accepted: u64,
    /// Lines answered with an error
    pub rejected: u64,
    /// True when the run ended on `quit` rather than end of input
    pub quit: bool,
    pub phase: SessionPhase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub episode_id: u32,
}

/// Drive `session` from `input`, writing replies to `output`.
///
/// Returns on `quit` or end of input. Malformed lines are answered with an
/// error message and do not end the run; I/O failures do.
pub fn run_headless<R, W>(session: &mut Session, mut input: R, mut output: W) -> Result<HeadlessSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = HeadlessSummary::default();
    let mut snap = GameSnapshot::default();

    write_line(&mut output, &create_welcome(session.seed()))?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .context("reading headless input")?;
        if n == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(err) => {
                eprintln!("[headless] rejected line: {}", err);
                summary.rejected += 1;
                let message = format!("invalid UTF-8: {}", err);
                write_line(&mut output, &create_error(None, ErrorCode::InvalidJson, message))?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let msg = match parse_message(line) {
            Ok(msg) => msg,
            Err(err) => {
                eprintln!("[headless] rejected line: {}", err.message);
                summary.rejected += 1;
                write_line(&mut output, &create_error(err.seq, err.code, err.message))?;
                continue;
            }
        };

        let seq = msg.seq();
        let quit = apply(session, &msg);

        session.snapshot_into(&mut snap);
        let obs = create_observation(seq, &snap, session.take_last_event());
        write_line(&mut output, &obs)?;
        summary.accepted += 1;

        if quit {
            summary.quit = true;
            break;
        }
    }

    summary.phase = session.phase();
    summary.score = session.score();
    summary.level = session.level();
    summary.lines = session.lines();
    summary.episode_id = session.episode_id();
    Ok(summary)
}

/// Apply one message. Returns true when the run should end.
fn apply(session: &mut Session, msg: &InboundMessage) -> bool {
    match msg {
        InboundMessage::Command(cmd) => {
            for action in cmd.actions.iter() {
                session.apply_action(action);
            }
            false
        }
        InboundMessage::Tick(tick) => {
            session.tick(tick.elapsed_ms);
            false
        }
        InboundMessage::Observe(_) => false,
        InboundMessage::Quit(_) => true,
    }
}

fn write_line<W: Write, T: Serialize>(out: &mut W, msg: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, msg).context("encoding headless message")?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
