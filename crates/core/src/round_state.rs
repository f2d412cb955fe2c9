//! Round state module - owns everything about one round
//!
//! This module ties together the catalog, the drop resolver, scoring and the
//! feedback scheduler. It handles drop commits, feedback timing, round
//! completion and restart.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::catalog::{initial_items, total_counts, TrashItem};
use crate::events::RoundEvent;
use crate::feedback::{Feedback, FeedbackScheduler};
use crate::resolver::{decide_drop, DropDecision, DropOutcome};
use crate::scoring::RoundSummary;
use crate::snapshot::RoundSnapshot;
use crate::types::*;

/// Upper bound on events a single action can produce
/// (correct cue, bonus, round complete).
pub const MAX_ACTION_EVENTS: usize = 4;

/// Complete round state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    items: ArrayVec<TrashItem, ROUND_ITEM_COUNT>,
    score: i32,
    sorted_counts: MaterialMap<u32>,
    /// Catalog counts per material, fixed at round start.
    total_counts: MaterialMap<u32>,
    feedback: FeedbackScheduler,
    phase: RoundPhase,
    /// Monotonic round id (increments on restart).
    round_id: u32,
    correct_drops: u32,
    mistakes: u32,
    bonuses: u32,
    /// Events of the most recent committed action (consumed by the shell).
    events: ArrayVec<RoundEvent, MAX_ACTION_EVENTS>,
}

impl RoundState {
    /// Create a fresh round from the catalog
    pub fn new() -> Self {
        Self {
            items: initial_items(),
            score: 0,
            sorted_counts: MaterialMap::default(),
            total_counts: total_counts(),
            feedback: FeedbackScheduler::new(),
            phase: RoundPhase::Playing,
            round_id: 0,
            correct_drops: 0,
            mistakes: 0,
            bonuses: 0,
            events: ArrayVec::new(),
        }
    }

    pub fn items(&self) -> &[TrashItem] {
        &self.items
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn sorted_counts(&self) -> &MaterialMap<u32> {
        &self.sorted_counts
    }

    pub fn total_counts(&self) -> &MaterialMap<u32> {
        &self.total_counts
    }

    pub fn feedback(&self) -> &FeedbackScheduler {
        &self.feedback
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == RoundPhase::Terminal
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn bin_signal(&self, material: Material) -> BinSignal {
        self.feedback.glow(material)
    }

    pub fn bin_info(&self, material: Material) -> Option<&'static str> {
        self.feedback.info(material)
    }

    pub fn item(&self, id: ItemId) -> Option<&TrashItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Unsorted items, in display order.
    pub fn remaining(&self) -> impl Iterator<Item = &TrashItem> {
        self.items.iter().filter(|i| !i.sorted)
    }

    pub fn all_sorted(&self) -> bool {
        self.items.iter().all(|i| i.sorted)
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            score: self.score,
            sorted_counts: self.sorted_counts,
            total_counts: self.total_counts,
            correct_drops: self.correct_drops,
            mistakes: self.mistakes,
            bonuses: self.bonuses,
        }
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.items.clear();
        out.items.extend(self.items.iter().copied());
        out.round_id = self.round_id;
        out.phase = self.phase;
        out.score = self.score;
        out.sorted_counts = self.sorted_counts;
        out.total_counts = self.total_counts;
        out.bin_signal = MaterialMap::from_fn(|m| self.feedback.glow(m));
        out.bin_info = MaterialMap::from_fn(|m| self.feedback.info(m));
        out.correct_drops = self.correct_drops;
        out.mistakes = self.mistakes;
        out.bonuses = self.bonuses;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Drop `item` onto the bin for `target`.
    ///
    /// Returns `None` when the drop is a no-op (stale item or finished round).
    pub fn drop_item(&mut self, item: ItemId, target: Material) -> Option<DropOutcome> {
        let decision = decide_drop(self, item, target);
        self.commit(decision)
    }

    /// Apply a decision produced by [`decide_drop`] against this state.
    ///
    /// A decision that no longer matches this state (already committed, or
    /// decided against another round) is ignored.
    pub fn commit(&mut self, decision: DropDecision) -> Option<DropOutcome> {
        let current = match decision {
            DropDecision::Ignored(_) => decision,
            DropDecision::Match { item, .. } => decide_drop(self, item, item.material),
            DropDecision::Mismatch { item, target, .. } => decide_drop(self, item, target),
        };
        if current != decision {
            debug!(round = self.round_id, "stale drop decision ignored");
            return None;
        }

        let outcome = decision.outcome();

        match decision {
            DropDecision::Ignored(reason) => {
                debug!(round = self.round_id, ?reason, "drop ignored");
                return None;
            }
            DropDecision::Match {
                slot,
                item,
                sorted_after,
                fact,
                score,
                completes_round,
            } => {
                let material = item.material;
                self.events.clear();

                self.items[slot].sorted = true;
                self.sorted_counts[material] = sorted_after;
                self.score += score.total;
                self.correct_drops += 1;

                self.feedback.arm(Feedback::Info(material, fact), INFO_TEXT_MS);
                self.feedback
                    .arm(Feedback::Glow(material, BinSignal::Success), SUCCESS_GLOW_MS);
                self.events.push(RoundEvent::Correct(material));

                debug!(
                    round = self.round_id,
                    %item,
                    sorted = sorted_after,
                    total = self.total_counts[material],
                    score = self.score,
                    "sorted item"
                );

                if score.bonus_awarded {
                    self.bonuses += 1;
                    self.events.push(RoundEvent::Bonus(material));
                    info!(round = self.round_id, %material, "all items of material sorted");
                }

                if completes_round {
                    self.phase = RoundPhase::Terminal;
                    self.events.push(RoundEvent::RoundComplete { score: self.score });
                    info!(
                        round = self.round_id,
                        score = self.score,
                        mistakes = self.mistakes,
                        "round complete"
                    );
                }
            }
            DropDecision::Mismatch {
                item,
                target,
                score,
            } => {
                self.events.clear();

                self.score += score.total;
                self.mistakes += 1;

                self.feedback
                    .arm(Feedback::Glow(target, BinSignal::Error), ERROR_GLOW_MS);
                self.events.push(RoundEvent::Wrong(target));

                debug!(
                    round = self.round_id,
                    %item,
                    %target,
                    score = self.score,
                    "wrong bin"
                );
            }
        }

        outcome
    }

    /// Take the events of the most recent action.
    pub fn take_events(&mut self) -> ArrayVec<RoundEvent, MAX_ACTION_EVENTS> {
        std::mem::take(&mut self.events)
    }

    /// Advance feedback timers. Returns the number of signals that expired.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        self.feedback.tick(elapsed_ms)
    }

    /// Start over from the catalog. Allowed in any phase.
    pub fn restart(&mut self) {
        let next_round = self.round_id.wrapping_add(1);
        *self = Self::new();
        self.round_id = next_round;
        info!(round = self.round_id, "round restarted");
    }

    /// Apply a round action. Returns whether the state changed.
    pub fn apply_action(&mut self, action: RoundAction) -> bool {
        match action {
            RoundAction::Drop { item, target } => self.drop_item(item, target).is_some(),
            RoundAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Recount sorted items per material from the item flags.
    pub fn recount_sorted(&self) -> MaterialMap<u32> {
        let mut counts = MaterialMap::default();
        for item in self.items.iter().filter(|i| i.sorted) {
            counts[item.material()] += 1;
        }
        counts
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FALLBACK_FACT;
    use crate::resolver::IgnoreReason;

    fn id(m: Material, i: u8) -> ItemId {
        ItemId::new(m, i)
    }

    fn sort_all(state: &mut RoundState) {
        for m in Material::ALL {
            for i in 1..=ITEMS_PER_MATERIAL as u8 {
                state.drop_item(id(m, i), m);
            }
        }
    }

    #[test]
    fn test_new_round_state() {
        let state = RoundState::new();

        assert_eq!(state.score, 0);
        assert_eq!(state.phase, RoundPhase::Playing);
        assert_eq!(state.round_id, 0);
        assert_eq!(state.items.len(), ROUND_ITEM_COUNT);
        assert!(state.feedback.is_idle());
        assert!(state.events.is_empty());
        for m in Material::ALL {
            assert_eq!(state.sorted_counts[m], 0);
            assert_eq!(state.total_counts[m], 2);
        }
    }

    #[test]
    fn test_correct_drop_flags_item_in_place() {
        let mut state = RoundState::new();
        let outcome = state.drop_item(id(Material::Plastic, 1), Material::Plastic);

        assert_eq!(
            outcome,
            Some(DropOutcome::Matched {
                material: Material::Plastic,
                bonus_awarded: false
            })
        );
        assert_eq!(state.items.len(), ROUND_ITEM_COUNT);
        assert!(state.item(id(Material::Plastic, 1)).unwrap().sorted);
        assert_eq!(state.score, 1);
        assert_eq!(state.sorted_counts[Material::Plastic], 1);
        assert_eq!(state.bin_signal(Material::Plastic), BinSignal::Success);
        assert_eq!(
            state.bin_info(Material::Plastic),
            Some("Plastic takes hundreds of years to decompose.")
        );
    }

    #[test]
    fn test_wrong_drop_only_touches_score_and_glow() {
        let mut state = RoundState::new();
        let outcome = state.drop_item(id(Material::Plastic, 1), Material::Metal);

        assert_eq!(
            outcome,
            Some(DropOutcome::Mismatched {
                material: Material::Metal
            })
        );
        assert_eq!(state.score, -1);
        assert_eq!(state.mistakes, 1);
        assert!(!state.item(id(Material::Plastic, 1)).unwrap().sorted);
        assert_eq!(state.bin_signal(Material::Metal), BinSignal::Error);
        assert_eq!(state.bin_signal(Material::Plastic), BinSignal::None);
        assert_eq!(state.bin_info(Material::Metal), None);
        assert_eq!(state.sorted_counts, MaterialMap::default());
    }

    #[test]
    fn test_second_fact_on_second_sort() {
        let mut state = RoundState::new();
        state.drop_item(id(Material::Paper, 2), Material::Paper);
        state.drop_item(id(Material::Paper, 1), Material::Paper);
        assert_eq!(
            state.bin_info(Material::Paper),
            Some("Recycling saves forests and reduces waste.")
        );
        assert_ne!(state.bin_info(Material::Paper), Some(FALLBACK_FACT));
    }

    #[test]
    fn test_bonus_on_completing_material() {
        let mut state = RoundState::new();
        state.drop_item(id(Material::Plastic, 1), Material::Plastic);
        let _ = state.take_events();

        let outcome = state.drop_item(id(Material::Plastic, 2), Material::Plastic);
        assert_eq!(
            outcome,
            Some(DropOutcome::Matched {
                material: Material::Plastic,
                bonus_awarded: true
            })
        );
        assert_eq!(state.score, 7);
        assert_eq!(state.bonuses, 1);

        let events = state.take_events();
        assert_eq!(
            events.as_slice(),
            &[
                RoundEvent::Correct(Material::Plastic),
                RoundEvent::Bonus(Material::Plastic)
            ]
        );
    }

    #[test]
    fn test_stale_drop_is_noop() {
        let mut state = RoundState::new();
        state.drop_item(id(Material::Glass, 1), Material::Glass);
        let _ = state.take_events();
        let before = state.clone();

        assert_eq!(state.drop_item(id(Material::Glass, 1), Material::Glass), None);
        assert_eq!(state.drop_item(id(Material::Glass, 1), Material::Paper), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_round_becomes_terminal_after_last_item() {
        let mut state = RoundState::new();
        sort_all(&mut state);

        assert!(state.is_terminal());
        assert!(state.all_sorted());
        assert_eq!(state.score, 8 + 4 * 5);
        assert!(state
            .take_events()
            .contains(&RoundEvent::RoundComplete { score: 28 }));
    }

    #[test]
    fn test_terminal_rejects_drops() {
        let mut state = RoundState::new();
        sort_all(&mut state);
        let before = state.clone();

        assert_eq!(
            decide_drop(&state, id(Material::Plastic, 1), Material::Metal),
            DropDecision::Ignored(IgnoreReason::RoundOver)
        );
        assert!(!state.apply_action(RoundAction::Drop {
            item: id(Material::Plastic, 1),
            target: Material::Metal
        }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_restart_resets_and_increments_round_id() {
        let mut state = RoundState::new();
        sort_all(&mut state);
        state.drop_item(id(Material::Metal, 1), Material::Glass);

        assert!(state.apply_action(RoundAction::Restart));
        assert_eq!(state.round_id, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, RoundPhase::Playing);
        assert!(state.items.iter().all(|i| !i.sorted));
        assert!(state.feedback.is_idle());
        assert_eq!(state.summary().mistakes, 0);
    }

    #[test]
    fn test_tick_expires_feedback_but_keeps_score() {
        let mut state = RoundState::new();
        state.drop_item(id(Material::Metal, 2), Material::Metal);

        state.tick(SUCCESS_GLOW_MS);
        assert_eq!(state.bin_signal(Material::Metal), BinSignal::None);
        assert!(state.bin_info(Material::Metal).is_some());

        state.tick(INFO_TEXT_MS);
        assert_eq!(state.bin_info(Material::Metal), None);
        assert_eq!(state.score, 1);
        assert_eq!(state.sorted_counts[Material::Metal], 1);
    }

    #[test]
    fn test_commit_same_decision_twice() {
        let mut state = RoundState::new();
        let decision = decide_drop(&state, id(Material::Plastic, 1), Material::Plastic);

        assert!(state.commit(decision).is_some());
        assert_eq!(state.commit(decision), None);
        assert_eq!(state.score, 1);
        assert_eq!(state.correct_drops, 1);
        assert_eq!(state.sorted_counts[Material::Plastic], 1);
        assert_eq!(state.recount_sorted(), state.sorted_counts);
    }

    #[test]
    fn test_commit_decision_from_other_round() {
        let mut nearly_done = RoundState::new();
        sort_all(&mut nearly_done);
        nearly_done.restart();
        for m in Material::ALL {
            for i in 1..=ITEMS_PER_MATERIAL as u8 {
                if (m, i) != (Material::Glass, 2) {
                    nearly_done.drop_item(id(m, i), m);
                }
            }
        }
        let last = decide_drop(&nearly_done, id(Material::Glass, 2), Material::Glass);
        assert!(matches!(
            last,
            DropDecision::Match {
                completes_round: true,
                ..
            }
        ));

        let mut fresh = RoundState::new();
        fresh.drop_item(id(Material::Glass, 1), Material::Glass);
        assert_eq!(fresh.commit(last), None);
        assert!(!fresh.is_terminal());
        assert_eq!(fresh.score, 1);
        assert_eq!(fresh.remaining().count(), ROUND_ITEM_COUNT - 1);
    }

    #[test]
    fn test_events_replaced_per_action() {
        let mut state = RoundState::new();
        state.drop_item(id(Material::Metal, 2), Material::Paper);
        state.drop_item(id(Material::Metal, 2), Material::Glass);

        let events = state.take_events();
        assert_eq!(events.as_slice(), &[RoundEvent::Wrong(Material::Glass)]);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_recount_matches_sorted_counts() {
        let mut state = RoundState::new();
        state.drop_item(id(Material::Paper, 1), Material::Paper);
        state.drop_item(id(Material::Glass, 2), Material::Glass);
        state.drop_item(id(Material::Glass, 1), Material::Metal);
        assert_eq!(state.recount_sorted(), state.sorted_counts);
    }

    #[test]
    fn test_snapshot_projection() {
        let mut state = RoundState::new();
        state.drop_item(id(Material::Plastic, 1), Material::Plastic);
        let snap = state.snapshot();

        assert_eq!(snap.score, 1);
        assert!(!snap.is_terminal());
        assert_eq!(snap.bin_signal[Material::Plastic], BinSignal::Success);
        assert_eq!(snap.items.len(), ROUND_ITEM_COUNT);
        assert_eq!(snap.remaining().count(), ROUND_ITEM_COUNT - 1);
    }
}
