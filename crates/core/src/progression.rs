//! Progression module - score, level and gravity speed
//!
//! Scoring is flat: every cleared row is worth `SCORE_PER_LINE` points with no
//! multi-line or back-to-back bonus. Level `n` is reached once the score passes
//! `(n - 1) * LEVEL_UP_SCORE`, but a single clear event never raises the level
//! by more than one. Each level-up multiplies the drop interval by
//! `SPEED_INCREASE_FACTOR`; there is no lower bound on the interval.

use crate::types::{
    INITIAL_DROP_MS, LEVEL_UP_SCORE, SCORE_PER_LINE, SPEED_INCREASE_FACTOR, START_LEVEL,
};

/// Pure progression step for one clear event.
///
/// Returns `(new_score, new_level, new_drop_interval_ms)`. A count of zero
/// changes nothing.
pub fn on_lines_cleared(
    cleared: usize,
    score: u32,
    level: u32,
    drop_interval_ms: f64,
) -> (u32, u32, f64) {
    if cleared == 0 {
        return (score, level, drop_interval_ms);
    }

    let new_score = score.saturating_add((cleared as u32).saturating_mul(SCORE_PER_LINE));
    if new_score / LEVEL_UP_SCORE > level.saturating_sub(1) {
        (
            new_score,
            level + 1,
            drop_interval_ms * SPEED_INCREASE_FACTOR,
        )
    } else {
        (new_score, level, drop_interval_ms)
    }
}

/// Result of applying a clear event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressionUpdate {
    pub points: u32,
    pub leveled_up: bool,
}

/// Running score/level/speed of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression {
    score: u32,
    level: u32,
    drop_interval_ms: f64,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: START_LEVEL,
            drop_interval_ms: INITIAL_DROP_MS,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> f64 {
        self.drop_interval_ms
    }

    /// Apply one clear event of `cleared` rows
    pub fn apply_lines(&mut self, cleared: usize) -> ProgressionUpdate {
        let (score, level, interval) =
            on_lines_cleared(cleared, self.score, self.level, self.drop_interval_ms);
        let update = ProgressionUpdate {
            points: score - self.score,
            leveled_up: level > self.level,
        };
        self.score = score;
        self.level = level;
        self.drop_interval_ms = interval;
        update
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let p = Progression::new();
        assert_eq!(p.score(), 0);
        assert_eq!(p.level(), 1);
        assert_eq!(p.drop_interval_ms(), 800.0);
    }

    #[test]
    fn test_flat_score_per_line() {
        for cleared in 1..=4 {
            let (score, _, _) = on_lines_cleared(cleared, 0, 1, 800.0);
            assert_eq!(score, 100 * cleared as u32);
        }
    }

    #[test]
    fn test_level_up_at_threshold() {
        let (score, level, interval) = on_lines_cleared(1, 480, 1, 800.0);
        assert_eq!(score, 580);
        assert_eq!(level, 2);
        assert!((interval - 760.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let (score, level, interval) = on_lines_cleared(3, 100, 1, 800.0);
        assert_eq!(score, 400);
        assert_eq!(level, 1);
        assert_eq!(interval, 800.0);
    }

    #[test]
    fn test_at_most_one_level_per_event() {
        // Score jumps past two thresholds at once.
        let (score, level, _) = on_lines_cleared(12, 0, 1, 800.0);
        assert_eq!(score, 1200);
        assert_eq!(level, 2);
    }

    #[test]
    fn test_zero_lines_is_noop() {
        assert_eq!(on_lines_cleared(0, 900, 1, 800.0), (900, 1, 800.0));
    }

    #[test]
    fn test_interval_keeps_shrinking() {
        let mut p = Progression::new();
        let mut last = p.drop_interval_ms();
        for _ in 0..40 {
            let update = p.apply_lines(4);
            assert_eq!(update.points, 400);
            assert!(p.drop_interval_ms() <= last);
            last = p.drop_interval_ms();
        }
        assert!(p.drop_interval_ms() > 0.0);
        assert!(p.level() > 10);
    }
}
