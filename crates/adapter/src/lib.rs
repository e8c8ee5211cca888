//! Headless driver - play the game over line-delimited JSON
//!
//! Lets scripts, bots and test harnesses drive a session through stdin and
//! stdout instead of a terminal.
//!
//! # Protocol Overview
//!
//! 1. **Welcome**: the game writes one `welcome` line (protocol version,
//!    board size, seed).
//! 2. **Messages**: the driver writes `command`, `tick`, `observe` or `quit`
//!    lines, each with a `seq`.
//! 3. **Replies**: every accepted line is answered with an `observation`
//!    echoing its `seq`; a rejected line is answered with an `error`.
//! 4. **End**: `quit` or end of input finishes the run.
//!
//! Time only advances through `tick`, so a transcript replays identically for
//! the same seed.
//!
//! # Example Protocol Flow
//!
//! ```text
//! Game   -> Driver: {"type":"welcome","protocol_version":"1.0.0","board":{"width":10,"height":20},"seed":7}
//! Driver -> Game:   {"type":"command","seq":1,"actions":["start","moveLeft","rotate"]}
//! Game   -> Driver: {"type":"observation","seq":1,"phase":"running","episode_id":0,"board":{...},...}
//! Driver -> Game:   {"type":"tick","seq":2,"elapsed_ms":1000}
//! Game   -> Driver: {"type":"observation","seq":2,...}
//! Driver -> Game:   {"type":"quit","seq":3}
//! ```
//!
//! See [`protocol`] for message structures and [`runner`] for the loop.

pub mod protocol;
pub mod runner;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use protocol::{parse_message, InboundMessage, ParseError, PROTOCOL_VERSION};
pub use runner::{run_headless, HeadlessSummary};
