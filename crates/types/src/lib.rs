//! Shared types and constants.
//!
//! Everything here is plain data with no dependencies, so it can be used from the
//! core engine, the terminal front-end and the headless driver alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing
//!
//! All durations are milliseconds. The drop interval starts at
//! [`BASE_DROP_MS`] and shrinks by [`DROP_INTERVAL_STEP_MS`] per level, never
//! going below [`DROP_INTERVAL_MIN_MS`]:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert_eq!(Color::from_hex(0x00f0f0).to_string(), "#00f0f0");
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame cadence of the terminal run loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Drop interval reduction per level above 1
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Drop interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Level a fresh session starts at
pub const STARTING_LEVEL: u32 = 1;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per line-clear count, before the level multiplier.
///
/// Indexed by the number of rows cleared by one lock (0-4).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Flat reward for each row of player-initiated soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Largest shape matrix side in the catalog
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupied cells in every catalog shape
pub const PIECE_CELLS: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_constants() {
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_INTERVAL_STEP_MS, 100);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn color_hex_formatting() {
        let c = Color::from_hex(0xf0a000);
        assert_eq!(c.rgb(), (0xf0, 0xa0, 0x00));
        assert_eq!(c.to_string(), "#f0a000");
    }

    #[test]
    fn phase_names() {
        assert_eq!(SessionPhase::Idle.as_str(), "idle");
        assert_eq!(SessionPhase::GameOver.as_str(), "game_over");
    }
}

/// The seven catalog shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Lowercase name, as used by the headless protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Opaque color tag stored in settled board cells.
///
/// Packs a 24-bit `0xrrggbb` value and displays as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Build from a packed `0xrrggbb` value (upper byte ignored)
    pub const fn from_hex(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// Packed `0xrrggbb` value
    pub const fn hex(self) -> u32 {
        self.0
    }

    /// Split into (r, g, b)
    pub const fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// A cell on the board: `None` when empty, otherwise the color of the piece
/// that settled there.
pub type Cell = Option<Color>;

/// Session lifecycle.
///
/// `Idle → Running ⇄ Paused`, `Running → GameOver`. Only a reset leaves
/// `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "running",
            SessionPhase::Paused => "paused",
            SessionPhase::GameOver => "game_over",
        }
    }
}

/// Player/driver actions applied to a session
///
/// Each one maps 1:1 onto a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down (+1 point on success)
    SoftDrop,
    /// Drop piece as far as it goes and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with wall kicks
    Rotate,
    /// Toggle pause
    Pause,
    /// Start a session from idle or after game over
    Start,
    /// Reset and start over at any time
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive, camelCase in the protocol)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// camelCase protocol name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
            GameAction::Restart => "restart",
        }
    }

    /// Whether the action is honoured while paused or after game over
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            GameAction::Pause | GameAction::Start | GameAction::Restart
        )
    }
}

/// Outcome of the last lock, consumed by score sinks and observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// Rows removed by this lock
    pub lines_cleared: u32,
    /// Line-clear points awarded (already multiplied by level)
    pub points: u32,
    /// The next piece could not spawn; the session is over
    pub topped_out: bool,
}
