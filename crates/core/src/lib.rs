//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is free of terminal, network and file I/O. A session is
//! driven by elapsed-time ticks and discrete actions and exposes its state
//! through queries and [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of settled cells, merge and line clearing
//! - [`collision`]: the single oracle every move and rotation consults
//! - [`pieces`]: shape catalog, shape matrices and wall-kick rotation
//! - [`factory`]: seeded uniform piece generation
//! - [`scoring`]: line-clear rewards, levels and drop speed
//! - [`session`]: lifecycle, gravity timer and player actions
//! - [`snapshot`]: read-only copy of the state for renderers and drivers
//! - [`clock`]: monotonic frame timer feeding `Session::tick`
//!
//! # Example
//!
//! ```
//! use blockfall_core::Session;
//! use blockfall_types::GameAction;
//!
//! let mut session = Session::new(12345);
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! session.apply_action(GameAction::SoftDrop);
//!
//! assert_eq!(session.score(), 1); // one point per soft-dropped row
//! ```

pub mod board;
pub mod clock;
pub mod collision;
pub mod factory;
pub mod pieces;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use clock::FrameClock;
pub use collision::{collides, fits};
pub use factory::PieceFactory;
pub use pieces::{catalog_entry, try_rotate, Piece, ShapeMatrix, CATALOG};
pub use scoring::{drop_interval_for_level, level_for_lines, line_clear_points, Progress};
pub use session::{Session, StepOutcome};
pub use snapshot::GameSnapshot;
