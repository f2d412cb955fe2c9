//! Drop resolver - decides what a drop does before anything changes
//!
//! [`decide_drop`] is a pure function of the current round and the drop. It
//! returns a [`DropDecision`] holding every value the commit step needs (item
//! slot, new count, fact text, score delta, whether the round ends).
//! [`RoundState::commit`](crate::RoundState::commit) then applies the decision
//! in one step, so a drop is either fully applied or not at all.

use crate::catalog::fact_for;
use crate::round_state::RoundState;
use crate::scoring::{calculate_match_score, calculate_mismatch_score, ScoreResult};
use crate::types::{ItemId, Material, RoundPhase};

/// Outcome of an accepted drop, consumed by the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropOutcome {
    Matched {
        material: Material,
        bonus_awarded: bool,
    },
    Mismatched {
        material: Material,
    },
}

impl DropOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropOutcome::Matched { .. } => "matched",
            DropOutcome::Mismatched { .. } => "mismatched",
        }
    }
}

/// Why a drop was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// Every item is sorted; only restart is accepted.
    RoundOver,
    /// The id is not an unsorted item of this round (stale drag).
    StaleItem,
}

/// Everything needed to commit a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDecision {
    Ignored(IgnoreReason),
    Match {
        slot: usize,
        item: ItemId,
        sorted_after: u32,
        fact: &'static str,
        score: ScoreResult,
        completes_round: bool,
    },
    Mismatch {
        item: ItemId,
        target: Material,
        score: ScoreResult,
    },
}

impl DropDecision {
    pub fn outcome(&self) -> Option<DropOutcome> {
        match *self {
            DropDecision::Ignored(_) => None,
            DropDecision::Match { item, score, .. } => Some(DropOutcome::Matched {
                material: item.material,
                bonus_awarded: score.bonus_awarded,
            }),
            DropDecision::Mismatch { target, .. } => {
                Some(DropOutcome::Mismatched { material: target })
            }
        }
    }

    /// Score change the decision carries (0 when ignored).
    pub fn score_delta(&self) -> i32 {
        match self {
            DropDecision::Ignored(_) => 0,
            DropDecision::Match { score, .. } | DropDecision::Mismatch { score, .. } => score.total,
        }
    }
}

/// Decide a drop of `item` onto the bin for `target`.
pub fn decide_drop(state: &RoundState, item: ItemId, target: Material) -> DropDecision {
    if state.phase() == RoundPhase::Terminal {
        return DropDecision::Ignored(IgnoreReason::RoundOver);
    }

    let Some(slot) = state
        .items()
        .iter()
        .position(|i| i.id == item && !i.sorted)
    else {
        return DropDecision::Ignored(IgnoreReason::StaleItem);
    };

    let actual = state.items()[slot].material();
    if actual != target {
        return DropDecision::Mismatch {
            item,
            target,
            score: calculate_mismatch_score(),
        };
    }

    let sorted_after = state.sorted_counts()[actual] + 1;
    let total = state.total_counts()[actual];
    let unsorted_left = state.items().iter().filter(|i| !i.sorted).count();

    DropDecision::Match {
        slot,
        item,
        sorted_after,
        fact: fact_for(actual, (sorted_after - 1) as usize),
        score: calculate_match_score(sorted_after, total),
        completes_round: unsorted_left == 1,
    }
}

/// Resolve a drop against a round without touching it.
///
/// Returns the outcome (if the drop was accepted) and the round as it looks
/// after the drop.
pub fn resolve_drop(
    state: &RoundState,
    item: ItemId,
    target: Material,
) -> (Option<DropOutcome>, RoundState) {
    let mut next = state.clone();
    let outcome = next.drop_item(item, target);
    (outcome, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(m: Material, i: u8) -> ItemId {
        ItemId::new(m, i)
    }

    #[test]
    fn test_decide_match_first_of_material() {
        let state = RoundState::new();
        let d = decide_drop(&state, id(Material::Plastic, 1), Material::Plastic);
        match d {
            DropDecision::Match {
                slot,
                sorted_after,
                fact,
                score,
                completes_round,
                ..
            } => {
                assert_eq!(slot, 0);
                assert_eq!(sorted_after, 1);
                assert_eq!(fact, "Plastic takes hundreds of years to decompose.");
                assert_eq!(score.total, 1);
                assert!(!completes_round);
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn test_decide_mismatch_targets_receiving_bin() {
        let state = RoundState::new();
        let d = decide_drop(&state, id(Material::Plastic, 1), Material::Metal);
        assert_eq!(
            d.outcome(),
            Some(DropOutcome::Mismatched {
                material: Material::Metal
            })
        );
        assert_eq!(d.score_delta(), -1);
    }

    #[test]
    fn test_decide_does_not_mutate() {
        let state = RoundState::new();
        let before = state.clone();
        let _ = decide_drop(&state, id(Material::Glass, 2), Material::Glass);
        assert_eq!(state, before);
    }

    #[test]
    fn test_decide_stale_for_sorted_or_unknown_item() {
        let mut state = RoundState::new();
        state.drop_item(id(Material::Paper, 1), Material::Paper);

        assert_eq!(
            decide_drop(&state, id(Material::Paper, 1), Material::Paper),
            DropDecision::Ignored(IgnoreReason::StaleItem)
        );
        assert_eq!(
            decide_drop(&state, id(Material::Paper, 9), Material::Paper),
            DropDecision::Ignored(IgnoreReason::StaleItem)
        );
    }

    #[test]
    fn test_resolve_drop_leaves_input_untouched() {
        let state = RoundState::new();
        let (outcome, next) = resolve_drop(&state, id(Material::Metal, 1), Material::Metal);

        assert_eq!(
            outcome,
            Some(DropOutcome::Matched {
                material: Material::Metal,
                bonus_awarded: false
            })
        );
        assert_eq!(state.score(), 0);
        assert_eq!(next.score(), 1);
    }

    #[test]
    fn test_outcome_as_str() {
        assert_eq!(
            DropOutcome::Mismatched {
                material: Material::Glass
            }
            .as_str(),
            "mismatched"
        );
    }
}
