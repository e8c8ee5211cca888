//! Session module - owns the complete game state
//!
//! Ties together board, factory, collision and scoring, and drives the
//! lifecycle:
//!
//! ```text
//! Idle --start--> Running <--pause/resume--> Paused
//!                    |
//!              spawn blocked
//!                    v
//!                 GameOver --reset--> Running
//! ```
//!
//! Every mutating operation consults the collision oracle first and either
//! applies completely or leaves the state untouched.

use crate::collision::{collides, fits};
use crate::pieces::try_rotate;
use crate::types::{GameAction, LockEvent, SessionPhase};
use crate::{Board, GameSnapshot, Piece, PieceFactory, Progress};

/// What a single `step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing happened
    Ignored,
    /// The current piece moved down one row
    Fell,
    /// The current piece locked and the next one spawned
    Locked(LockEvent),
    /// The current piece locked and the next one could not spawn
    ToppedOut(LockEvent),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    factory: PieceFactory,
    current: Option<Piece>,
    next: Option<Piece>,
    progress: Progress,
    phase: SessionPhase,
    drop_accumulator_ms: u32,
    /// Increments on every reset after the first start.
    episode_id: u32,
    started_once: bool,
    /// Last lock outcome (consumed by observers).
    last_event: Option<LockEvent>,
}

impl Session {
    /// Create an idle session with the given factory seed
    pub fn new(seed: u64) -> Self {
        Self {
            board: Board::new(),
            factory: PieceFactory::new(seed),
            current: None,
            next: None,
            progress: Progress::new(),
            phase: SessionPhase::Idle,
            drop_accumulator_ms: 0,
            episode_id: 0,
            started_once: false,
            last_event: None,
        }
    }

    /// Start playing. Same as [`Session::reset`].
    pub fn start(&mut self) {
        self.reset();
    }

    /// Reinitialize board and progress, spawn current and next, enter Running.
    pub fn reset(&mut self) {
        if self.started_once {
            self.episode_id = self.episode_id.wrapping_add(1);
        }
        self.started_once = true;

        self.board.clear();
        self.progress = Progress::new();
        self.drop_accumulator_ms = 0;
        self.last_event = None;
        self.current = Some(self.factory.create());
        self.next = Some(self.factory.create());
        self.phase = SessionPhase::Running;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progress.drop_interval_ms()
    }

    pub fn drop_accumulator_ms(&self) -> u32 {
        self.drop_accumulator_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u64 {
        self.factory.seed()
    }

    /// Score at the end of the game, once the session is over
    pub fn final_score(&self) -> Option<u32> {
        self.is_game_over().then(|| self.progress.score())
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Pause a running session. Returns false in any other phase.
    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Paused;
        true
    }

    /// Resume a paused session. Returns false in any other phase.
    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.phase = SessionPhase::Running;
        true
    }

    /// Pause when running, resume when paused; no effect otherwise.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            SessionPhase::Idle | SessionPhase::GameOver => false,
        }
    }

    /// Advance the fall timer. Runs at most one `step` per call.
    ///
    /// Returns true when a step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(elapsed_ms);
        if self.drop_accumulator_ms < self.drop_interval_ms() {
            return false;
        }

        self.step();
        self.drop_accumulator_ms = 0;
        true
    }

    /// One row of gravity: fall if possible, otherwise lock, clear, spawn and
    /// check for a blocked spawn.
    pub fn step(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Ignored;
        }
        let Some(current) = self.current else {
            return StepOutcome::Ignored;
        };

        if self.try_shift(0, 1) {
            return StepOutcome::Fell;
        }

        self.lock(current)
    }

    fn lock(&mut self, piece: Piece) -> StepOutcome {
        self.board.merge(&piece);
        let lines_cleared = self.board.clear_full_lines();
        let points = if lines_cleared > 0 {
            self.progress.apply_line_clear(lines_cleared)
        } else {
            0
        };

        let spawned = match self.next.take() {
            Some(next) => next,
            None => self.factory.create(),
        };
        self.current = Some(spawned);
        self.next = Some(self.factory.create());

        let topped_out = !fits(&spawned, &self.board);
        let event = LockEvent {
            lines_cleared: lines_cleared as u32,
            points,
            topped_out,
        };
        self.last_event = Some(event);

        if topped_out {
            self.phase = SessionPhase::GameOver;
            StepOutcome::ToppedOut(event)
        } else {
            StepOutcome::Locked(event)
        }
    }

    /// Move the current piece by (dx, dy) if the oracle allows it.
    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        if collides(&current, &self.board, dx, dy) {
            return false;
        }
        self.current = Some(current.shifted(dx, dy));
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.is_running() && self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.is_running() && self.try_shift(1, 0)
    }

    /// Player-initiated one-row descent: +1 point on success, never locks.
    pub fn soft_drop(&mut self) -> bool {
        if !(self.is_running() && self.try_shift(0, 1)) {
            return false;
        }
        self.progress.award_soft_drop();
        true
    }

    /// Drop the current piece as far as it goes, then lock it.
    pub fn hard_drop(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Ignored;
        }
        while self.try_shift(0, 1) {}
        self.drop_accumulator_ms = 0;
        self.step()
    }

    /// Rotate clockwise with the 3-probe wall kick; unchanged on failure.
    pub fn rotate_current(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };
        match try_rotate(&current, &self.board) {
            Some(rotated) => {
                self.current = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Apply a game action.
    ///
    /// While paused or over, only pause/start/restart are honoured.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if !self.is_running() && !action.is_control() {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop() != StepOutcome::Ignored,
            GameAction::Rotate => self.rotate_current(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => match self.phase {
                SessionPhase::Idle | SessionPhase::GameOver => {
                    self.start();
                    true
                }
                SessionPhase::Running | SessionPhase::Paused => false,
            },
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Row the current piece would land on if dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        let current = self.current?;
        if !fits(&current, &self.board) {
            return None;
        }
        let mut dy: i8 = 0;
        while !collides(&current, &self.board, 0, dy + 1) {
            dy += 1;
        }
        Some(current.y + dy)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = self.current;
        out.next = self.next;
        out.ghost_y = self.ghost_y();
        out.phase = self.phase;
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
        out.drop_interval_ms = self.drop_interval_ms();
        out.final_score = self.final_score();
        out.episode_id = self.episode_id;
        out.seed = self.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
