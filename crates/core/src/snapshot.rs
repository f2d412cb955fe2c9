//! Read-only round projection handed to views and the replay output.

use arrayvec::ArrayVec;

use crate::catalog::TrashItem;
use crate::scoring::RoundSummary;
use crate::types::{BinSignal, ItemId, MaterialMap, RoundPhase, ROUND_ITEM_COUNT};

/// Read-only projection of a round for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundSnapshot {
    pub items: ArrayVec<TrashItem, ROUND_ITEM_COUNT>,
    pub round_id: u32,
    pub phase: RoundPhase,
    pub score: i32,
    pub sorted_counts: MaterialMap<u32>,
    pub total_counts: MaterialMap<u32>,
    pub bin_signal: MaterialMap<BinSignal>,
    pub bin_info: MaterialMap<Option<&'static str>>,
    pub correct_drops: u32,
    pub mistakes: u32,
    pub bonuses: u32,
}

impl RoundSnapshot {
    pub fn is_terminal(&self) -> bool {
        self.phase == RoundPhase::Terminal
    }

    /// Unsorted items, in display order.
    pub fn remaining(&self) -> impl Iterator<Item = &TrashItem> {
        self.items.iter().filter(|i| !i.sorted)
    }

    pub fn is_remaining(&self, id: ItemId) -> bool {
        self.remaining().any(|i| i.id == id)
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

    /// Cheap fingerprint for render throttling.
    pub fn fingerprint(&self) -> u64 {
        use std::hash::{Hash, Hasher};

        let mut h = std::collections::hash_map::DefaultHasher::new();
        self.round_id.hash(&mut h);
        self.phase.hash(&mut h);
        self.score.hash(&mut h);
        for item in self.items.iter() {
            item.sorted.hash(&mut h);
        }
        self.bin_signal.hash(&mut h);
        self.bin_info.hash(&mut h);
        h.finish()
    }
}
