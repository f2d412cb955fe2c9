//! Property tests: round invariants hold for any sequence of drops, ticks
//! and restarts.

use proptest::prelude::*;

use trash_sorter::core::{RoundEvent, RoundState};
use trash_sorter::types::{
    ItemId, Material, RoundAction, CORRECT_POINTS, MATERIAL_BONUS_POINTS, ROUND_ITEM_COUNT,
    WRONG_POINTS,
};

#[derive(Debug, Clone)]
enum Step {
    Drop(ItemId, Material),
    Tick(u32),
    Restart,
}

fn material() -> impl Strategy<Value = Material> {
    prop::sample::select(Material::ALL.to_vec())
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        // Index 3 is never in the catalog and exercises stale drops.
        8 => (material(), 1u8..=3, material())
            .prop_map(|(m, i, target)| Step::Drop(ItemId::new(m, i), target)),
        3 => (0u32..2_000).prop_map(Step::Tick),
        1 => Just(Step::Restart),
    ]
}

/// Score bookkeeping kept beside the round, from the events alone.
#[derive(Debug, Default)]
struct Ledger {
    score: i32,
    bonuses_this_round: Vec<Material>,
}

impl Ledger {
    fn record(&mut self, ev: RoundEvent) {
        match ev {
            RoundEvent::Correct(_) => self.score += CORRECT_POINTS,
            RoundEvent::Wrong(_) => self.score += WRONG_POINTS,
            RoundEvent::Bonus(m) => {
                self.score += MATERIAL_BONUS_POINTS;
                self.bonuses_this_round.push(m);
            }
            RoundEvent::RoundComplete { .. } => {}
        }
    }
}

proptest! {
    #[test]
    fn sorted_counts_match_item_flags(steps in prop::collection::vec(step(), 0..64)) {
        let mut round = RoundState::new();
        for s in steps {
            match s {
                Step::Drop(item, target) => { round.drop_item(item, target); }
                Step::Tick(ms) => { round.tick(ms); }
                Step::Restart => round.restart(),
            }
            prop_assert_eq!(round.recount_sorted(), *round.sorted_counts());
            for m in Material::ALL {
                prop_assert!(round.sorted_counts()[m] <= round.total_counts()[m]);
            }
        }
    }

    #[test]
    fn score_comes_only_from_drop_events(steps in prop::collection::vec(step(), 0..64)) {
        let mut round = RoundState::new();
        let mut ledger = Ledger::default();
        for s in steps {
            match s {
                Step::Drop(item, target) => {
                    round.apply_action(RoundAction::Drop { item, target });
                }
                Step::Tick(ms) => { round.tick(ms); }
                Step::Restart => {
                    round.apply_action(RoundAction::Restart);
                    ledger = Ledger::default();
                }
            }
            for ev in round.take_events() {
                ledger.record(ev);
            }
            prop_assert_eq!(round.score(), ledger.score);
            prop_assert_eq!(round.summary().expected_score(), round.score());

            // Each material pays its bonus at most once per round.
            let mut seen = ledger.bonuses_this_round.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), ledger.bonuses_this_round.len());
        }
    }

    #[test]
    fn terminal_iff_everything_sorted(steps in prop::collection::vec(step(), 0..96)) {
        let mut round = RoundState::new();
        for s in steps {
            let was_terminal = round.is_terminal();
            let before = round.score();
            match s {
                Step::Drop(item, target) => {
                    let outcome = round.drop_item(item, target);
                    if was_terminal {
                        prop_assert!(outcome.is_none());
                        prop_assert_eq!(round.score(), before);
                    }
                }
                Step::Tick(ms) => { round.tick(ms); }
                Step::Restart => round.restart(),
            }
            let sorted = round.items().iter().filter(|i| i.sorted).count();
            prop_assert_eq!(round.is_terminal(), sorted == ROUND_ITEM_COUNT);
        }
    }

    #[test]
    fn feedback_clears_after_longest_duration(steps in prop::collection::vec(step(), 0..32)) {
        let mut round = RoundState::new();
        for s in steps {
            match s {
                Step::Drop(item, target) => { round.drop_item(item, target); }
                Step::Tick(ms) => { round.tick(ms); }
                Step::Restart => round.restart(),
            }
        }
        round.tick(trash_sorter::types::INFO_TEXT_MS);
        prop_assert!(round.feedback().is_idle());
    }
}
