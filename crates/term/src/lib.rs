//! Terminal front-end for the game.
//!
//! A small game-style rendering layer: views draw into a framebuffer of
//! styled glyphs, and the renderer flushes it to the terminal. No widget
//! toolkit is involved, which keeps the 2x1 cell aspect exact.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport, WellOrigin};
pub use renderer::{encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer};
