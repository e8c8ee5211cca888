//! Scoring module - line-clear rewards and level/speed progression
//!
//! - Line clears pay `LINE_SCORES[lines] * level`.
//! - Level is `floor(total_lines / 10) + 1`.
//! - Drop interval is `max(100, 1000 - (level - 1) * 100)` milliseconds.
//! - Soft drop pays a flat point per row and goes through [`Progress::award_soft_drop`].

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS, STARTING_LEVEL,
};

/// Points for clearing `lines` rows at `level`.
///
/// # Panics
///
/// Panics when `lines` is outside the reward table (more than 4).
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    assert!(
        lines < LINE_SCORES.len(),
        "{} lines is outside the reward table",
        lines
    );
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level for a running line total
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + STARTING_LEVEL
}

/// Drop interval for a level, in milliseconds
pub fn drop_interval_for_level(level: u32) -> u32 {
    let reduction = level
        .saturating_sub(STARTING_LEVEL)
        .saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Score, level, line total and the derived drop interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Apply a line clear at the current level and return the points awarded.
    ///
    /// Levels only move up; the drop interval is recomputed when they do.
    pub fn apply_line_clear(&mut self, lines_cleared: usize) -> u32 {
        let points = line_clear_points(lines_cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared as u32);

        let new_level = level_for_lines(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.drop_interval_ms = drop_interval_for_level(new_level);
        }
        points
    }

    /// One row of player soft drop
    pub fn award_soft_drop(&mut self) {
        self.score = self.score.saturating_add(SOFT_DROP_POINTS);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_points_level_one() {
        assert_eq!(line_clear_points(0, 1), 0);
        assert_eq!(line_clear_points(1, 1), 100);
        assert_eq!(line_clear_points(2, 1), 300);
        assert_eq!(line_clear_points(3, 1), 500);
        assert_eq!(line_clear_points(4, 1), 800);
    }

    #[test]
    fn test_line_points_scale_with_level() {
        assert_eq!(line_clear_points(1, 2), 200);
        assert_eq!(line_clear_points(4, 2), 1600);
        assert_eq!(line_clear_points(2, 7), 2100);
    }

    #[test]
    #[should_panic(expected = "outside the reward table")]
    fn test_line_points_out_of_table() {
        let _ = line_clear_points(5, 1);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_for_level(1), 1000);
        assert_eq!(drop_interval_for_level(2), 900);
        assert_eq!(drop_interval_for_level(9), 200);
        assert_eq!(drop_interval_for_level(10), 100);
        assert_eq!(drop_interval_for_level(25), 100);
        assert_eq!(drop_interval_for_level(0), 1000);
    }

    #[test]
    fn test_progress_starts_fresh() {
        let p = Progress::new();
        assert_eq!(p.score(), 0);
        assert_eq!(p.level(), 1);
        assert_eq!(p.lines(), 0);
        assert_eq!(p.drop_interval_ms(), 1000);
    }

    #[test]
    fn test_zero_line_clear_changes_nothing() {
        let mut p = Progress::new();
        assert_eq!(p.apply_line_clear(0), 0);
        assert_eq!(p, Progress::new());
    }

    #[test]
    fn test_level_up_uses_old_level_for_points() {
        let mut p = Progress::new();
        for _ in 0..2 {
            p.apply_line_clear(4);
        }
        assert_eq!((p.score(), p.lines(), p.level()), (1600, 8, 1));

        // Crossing 10 lines pays at level 1, then levels up.
        assert_eq!(p.apply_line_clear(2), 300);
        assert_eq!((p.lines(), p.level()), (10, 2));
        assert_eq!(p.drop_interval_ms(), 900);

        assert_eq!(p.apply_line_clear(1), 200);
    }

    #[test]
    fn test_soft_drop_points() {
        let mut p = Progress::new();
        p.award_soft_drop();
        p.award_soft_drop();
        assert_eq!(p.score(), 2);
        assert_eq!(p.lines(), 0);
    }
}
