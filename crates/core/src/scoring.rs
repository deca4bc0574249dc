//! Scoring module - line-clear points and speed progression
//!
//! Points are linear in the number of lines cleared by one lock: there is no
//! bonus for clearing several lines at once beyond the per-line multiplier.
//! Level is a pure function of score, and gravity speeds up by a fixed step per
//! level until it reaches a floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, POINTS_PER_LEVEL, POINTS_PER_LINE,
    START_LEVEL,
};

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for this lock
    pub line_clear_score: u32,
    /// Total score after this lock
    pub score: u32,
    /// Level after this lock
    pub level: u32,
    /// Gravity interval after this lock
    pub drop_interval_ms: u32,
}

/// Points for clearing `lines` lines at `level`: `lines * 100 * level`
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(POINTS_PER_LINE)
        .saturating_mul(level)
}

/// Level reached at a given score: `score / 1000 + 1`
pub fn calculate_level(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + START_LEVEL
}

/// Gravity interval for a level: `max(100, 1000 - (level - 1) * 100)`
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(START_LEVEL).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Apply one lock that cleared `lines` lines.
///
/// Returns None when nothing was cleared: score, level and gravity are only
/// recomputed after an actual clear.
pub fn calculate_score(lines: u32, score: u32, level: u32) -> Option<ScoreResult> {
    if lines == 0 {
        return None;
    }

    let line_clear_score = calculate_line_score(lines, level);
    let score = score.saturating_add(line_clear_score);
    let level = calculate_level(score);

    Some(ScoreResult {
        line_clear_score,
        score,
        level,
        drop_interval_ms: get_drop_interval_ms(level),
    })
}
