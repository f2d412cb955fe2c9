//! Scoring module - drop points, material bonus, round summary
//!
//! Score has no floor or ceiling. The only sources of change are:
//! - `+1` for a correct drop
//! - `-1` for a wrong drop
//! - `+5` when the last item of a material is sorted

use crate::types::{MaterialMap, CORRECT_POINTS, MATERIAL_BONUS_POINTS, WRONG_POINTS};

/// Score calculation result for one drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// `+1` or `-1`.
    pub drop_points: i32,
    /// `+5` when the drop completed its material, else `0`.
    pub bonus_points: i32,
    pub total: i32,
    pub bonus_awarded: bool,
}

/// Points for the drop itself.
pub fn drop_points(matched: bool) -> i32 {
    if matched {
        CORRECT_POINTS
    } else {
        WRONG_POINTS
    }
}

/// Whether `sorted_after` items of a material complete it.
pub fn completes_material(sorted_after: u32, total: u32) -> bool {
    total > 0 && sorted_after == total
}

/// Calculate the score delta for a correct drop that leaves `sorted_after`
/// of `total` items of its material sorted.
pub fn calculate_match_score(sorted_after: u32, total: u32) -> ScoreResult {
    let bonus_awarded = completes_material(sorted_after, total);
    let bonus_points = if bonus_awarded { MATERIAL_BONUS_POINTS } else { 0 };
    let drop_points = drop_points(true);
    ScoreResult {
        drop_points,
        bonus_points,
        total: drop_points + bonus_points,
        bonus_awarded,
    }
}

/// Score delta for a wrong drop.
pub fn calculate_mismatch_score() -> ScoreResult {
    let drop_points = drop_points(false);
    ScoreResult {
        drop_points,
        bonus_points: 0,
        total: drop_points,
        bonus_awarded: false,
    }
}

/// End-of-round (or in-progress) totals for the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundSummary {
    pub score: i32,
    pub sorted_counts: MaterialMap<u32>,
    pub total_counts: MaterialMap<u32>,
    pub correct_drops: u32,
    pub mistakes: u32,
    pub bonuses: u32,
}

impl RoundSummary {
    pub fn items_sorted(&self) -> u32 {
        self.sorted_counts.iter().map(|(_, n)| *n).sum()
    }

    pub fn items_total(&self) -> u32 {
        self.total_counts.iter().map(|(_, n)| *n).sum()
    }

    /// Score recomputed from the counters alone.
    pub fn expected_score(&self) -> i32 {
        self.correct_drops as i32 * CORRECT_POINTS
            + self.mistakes as i32 * WRONG_POINTS
            + self.bonuses as i32 * MATERIAL_BONUS_POINTS
    }
}
