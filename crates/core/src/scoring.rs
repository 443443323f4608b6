//! Scoring module - line clear points and gravity progression
//!
//! A batch of `n` rows cleared by one lock is worth `n² × 100`, so multi-line
//! clears pay superlinearly. Gravity speeds up by 20ms per cleared line from
//! 800ms, never going below 150ms. The interval depends only on the running
//! line total, not on how the lines were batched.

use crate::types::{DROP_INTERVAL_FLOOR_MS, DROP_STEP_PER_LINE_MS, INITIAL_DROP_MS, LINE_CLEAR_BASE};

/// Points for clearing `lines` rows in one batch
pub fn line_clear_score(lines: u32) -> u32 {
    lines.saturating_mul(lines).saturating_mul(LINE_CLEAR_BASE)
}

/// Gravity interval after `total_lines` lines have been cleared in the session
pub fn drop_interval_ms(total_lines: u32) -> u32 {
    INITIAL_DROP_MS
        .saturating_sub(total_lines.saturating_mul(DROP_STEP_PER_LINE_MS))
        .max(DROP_INTERVAL_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 400);
        assert_eq!(line_clear_score(3), 900);
        assert_eq!(line_clear_score(4), 1600);
    }

    #[test]
    fn test_batching_pays_more_than_singles() {
        assert!(line_clear_score(4) > 4 * line_clear_score(1));
    }

    #[test]
    fn test_drop_interval_progression() {
        assert_eq!(drop_interval_ms(0), 800);
        assert_eq!(drop_interval_ms(1), 780);
        assert_eq!(drop_interval_ms(10), 600);
        assert_eq!(drop_interval_ms(32), 160);
        assert_eq!(drop_interval_ms(33), 150);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert_eq!(drop_interval_ms(40), 150);
        assert_eq!(drop_interval_ms(1_000), 150);
        assert_eq!(drop_interval_ms(u32::MAX), 150);
    }
}
