//! Scoring module - classic line-clear scoring, leveling and gravity speed
//!
//! - Each lock scores `LINE_SCORES[rows] * (level + 1)`, using the level in
//!   effect before the rows are counted.
//! - Level is recomputed as `lines / 10` after every clear.
//! - Gravity interval is `max(2, 30 - 2 * level)` frames.

use crate::types::{
    GRAVITY_BASE_FRAMES, GRAVITY_FRAMES_PER_LEVEL, GRAVITY_MIN_FRAMES, LINES_PER_LEVEL,
    LINE_SCORES,
};

/// Points for clearing `lines` rows with one piece at `level`.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level.saturating_add(1)),
        None => 0,
    }
}

/// Frames between automatic one-row drops at `level`.
pub fn gravity_frames(level: u32) -> u32 {
    GRAVITY_BASE_FRAMES
        .saturating_sub(level.saturating_mul(GRAVITY_FRAMES_PER_LEVEL))
        .max(GRAVITY_MIN_FRAMES)
}

/// Score, cleared lines and derived level for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Scoring {
    score: u32,
    lines: u32,
    level: u32,
}

impl Scoring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current gravity interval in frames.
    pub fn gravity_frames(&self) -> u32 {
        gravity_frames(self.level)
    }

    /// Account for one `clear_full_rows` result. Returns the points awarded.
    pub fn record_clear(&mut self, rows: usize) -> u32 {
        let points = calculate_line_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows as u32);
        self.level = self.lines / LINES_PER_LEVEL;
        points
    }
}
