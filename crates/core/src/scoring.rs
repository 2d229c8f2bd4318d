//! Scoring module - line-clear points, levels and the high-score table

use arrayvec::ArrayVec;

use crate::types::{HIGH_SCORE_CAPACITY, LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of lines cleared at once (1-4)
/// level: current level (0-based)
///
/// Clears of more than four rows can only come from constructed boards and are
/// worth nothing, matching an out-of-table lookup.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines] * (level + 1)
}

/// Running score of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub points: u32,
    pub level: u32,
    pub lines: u32,
    /// Set when the player picks a name on the game-over screen
    pub player: Option<&'static str>,
}

impl Score {
    pub fn new(start_level: u32) -> Self {
        Self {
            level: start_level,
            ..Self::default()
        }
    }

    /// Zero points and lines, back to the starting level
    pub fn reset(&mut self, start_level: u32) {
        *self = Self::new(start_level);
    }

    /// Apply one clear event. Returns the points awarded.
    ///
    /// The level goes up by one when the cumulative line count crosses a multiple
    /// of ten, and by at most one per event.
    pub fn record_clear(&mut self, lines: usize) -> u32 {
        if lines == 0 {
            return 0;
        }
        let awarded = calculate_line_score(lines, self.level);
        let before = self.lines / LINES_PER_LEVEL;
        self.points = self.points.saturating_add(awarded);
        self.lines = self.lines.saturating_add(lines as u32);
        if self.lines / LINES_PER_LEVEL > before {
            self.level += 1;
        }
        awarded
    }
}

/// Best scores of the process lifetime, descending by points
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: ArrayVec<Score, HIGH_SCORE_CAPACITY>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a finished score. Returns its rank, or `None` when it doesn't place.
    ///
    /// The score goes before the first entry with strictly fewer points, so ties
    /// keep the earlier entry ahead. Zero-point games never place.
    pub fn insert(&mut self, score: Score) -> Option<usize> {
        if score.points == 0 {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| score.points > e.points)
            .unwrap_or(self.entries.len());
        if rank >= HIGH_SCORE_CAPACITY {
            return None;
        }
        if self.entries.is_full() {
            self.entries.pop();
        }
        self.entries.insert(rank, score);
        Some(rank)
    }

    /// Attach a player name to an entry
    pub fn rename(&mut self, rank: usize, name: &'static str) -> bool {
        match self.entries.get_mut(rank) {
            Some(entry) => {
                entry.player = Some(name);
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> &[Score] {
        &self.entries
    }
}
