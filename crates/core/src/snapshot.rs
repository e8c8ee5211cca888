use crate::types::{Cell, SessionPhase, BOARD_HEIGHT, BOARD_WIDTH};
use crate::Piece;

/// Read-only copy of everything a renderer or score sink needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub ghost_y: Option<i8>,
    pub phase: SessionPhase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub final_score: Option<u32>,
    pub episode_id: u32,
    pub seed: u64,
}

impl GameSnapshot {
    /// Running and accepting moves
    pub fn playable(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }
}
