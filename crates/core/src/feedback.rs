//! Feedback scheduler - transient, auto-expiring bin signals
//!
//! Each bin carries two independent slots: a glow (success/error) and an info
//! text. Arming a slot sets its value and a countdown; [`FeedbackScheduler::tick`]
//! advances every countdown by the elapsed time and clears the slots that reach
//! zero. Re-arming a slot before it expires replaces both the value and the
//! countdown, so an older clear can never wipe a newer value.
//!
//! The scheduler runs on the same loop as drop handling and only ever touches
//! its own slots.

use crate::types::{BinSignal, Material, MaterialMap};

/// A value with a remaining lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimedSlot<T> {
    pub value: T,
    pub remaining_ms: u32,
}

impl<T: Copy> TimedSlot<T> {
    /// `None` for a zero duration.
    pub fn new(value: T, duration_ms: u32) -> Option<Self> {
        (duration_ms > 0).then_some(Self {
            value,
            remaining_ms: duration_ms,
        })
    }

    /// Advance by `elapsed_ms`. Returns `None` once the slot has expired.
    pub fn advance(self, elapsed_ms: u32) -> Option<Self> {
        let remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        (remaining_ms > 0).then_some(Self {
            value: self.value,
            remaining_ms,
        })
    }
}

/// Slot key: which kind of signal on which bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKey {
    Glow(Material),
    Info(Material),
}

/// A transient value to arm. Carries its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Glow(Material, BinSignal),
    Info(Material, &'static str),
}

impl Feedback {
    pub fn key(&self) -> SignalKey {
        match *self {
            Feedback::Glow(m, _) => SignalKey::Glow(m),
            Feedback::Info(m, _) => SignalKey::Info(m),
        }
    }
}

/// Per-bin glow and info slots with last-arm-wins expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FeedbackScheduler {
    glow: MaterialMap<Option<TimedSlot<BinSignal>>>,
    info: MaterialMap<Option<TimedSlot<&'static str>>>,
}

impl FeedbackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a transient value, replacing any pending value and clear for its key.
    ///
    /// A zero duration clears the slot immediately.
    pub fn arm(&mut self, feedback: Feedback, duration_ms: u32) {
        match feedback {
            Feedback::Glow(m, BinSignal::None) => self.glow[m] = None,
            Feedback::Glow(m, signal) => {
                self.glow[m] = TimedSlot::new(signal, duration_ms);
            }
            Feedback::Info(m, text) => {
                self.info[m] = TimedSlot::new(text, duration_ms);
            }
        }
    }

    /// Advance all countdowns. Returns the number of slots that expired.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        let mut expired = 0;
        for slot in self.glow.values_mut() {
            if let Some(s) = *slot {
                *slot = s.advance(elapsed_ms);
                expired += u32::from(slot.is_none());
            }
        }
        for slot in self.info.values_mut() {
            if let Some(s) = *slot {
                *slot = s.advance(elapsed_ms);
                expired += u32::from(slot.is_none());
            }
        }
        expired
    }

    /// Drop every pending signal.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn glow(&self, material: Material) -> BinSignal {
        self.glow[material].map(|s| s.value).unwrap_or_default()
    }

    pub fn info(&self, material: Material) -> Option<&'static str> {
        self.info[material].map(|s| s.value)
    }

    /// Remaining lifetime of a slot, if armed.
    pub fn remaining_ms(&self, key: SignalKey) -> Option<u32> {
        match key {
            SignalKey::Glow(m) => self.glow[m].map(|s| s.remaining_ms),
            SignalKey::Info(m) => self.info[m].map(|s| s.remaining_ms),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.glow.iter().all(|(_, s)| s.is_none()) && self.info.iter().all(|(_, s)| s.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_expires_after_duration() {
        let mut fb = FeedbackScheduler::new();
        fb.arm(Feedback::Glow(Material::Plastic, BinSignal::Success), 500);
        assert_eq!(fb.glow(Material::Plastic), BinSignal::Success);

        assert_eq!(fb.tick(499), 0);
        assert_eq!(fb.glow(Material::Plastic), BinSignal::Success);

        assert_eq!(fb.tick(1), 1);
        assert_eq!(fb.glow(Material::Plastic), BinSignal::None);
        assert!(fb.is_idle());
    }

    #[test]
    fn test_rearm_replaces_pending_clear() {
        let mut fb = FeedbackScheduler::new();
        fb.arm(Feedback::Glow(Material::Metal, BinSignal::Error), 1000);
        fb.tick(900);

        // New arm before expiry: the old 100ms remainder must not clear it.
        fb.arm(Feedback::Glow(Material::Metal, BinSignal::Success), 500);
        fb.tick(100);
        assert_eq!(fb.glow(Material::Metal), BinSignal::Success);
        assert_eq!(fb.remaining_ms(SignalKey::Glow(Material::Metal)), Some(400));

        fb.tick(400);
        assert_eq!(fb.glow(Material::Metal), BinSignal::None);
    }

    #[test]
    fn test_info_and_glow_are_independent_keys() {
        let mut fb = FeedbackScheduler::new();
        fb.arm(Feedback::Info(Material::Paper, "Paper is made from trees."), 3000);
        fb.arm(Feedback::Glow(Material::Paper, BinSignal::Success), 500);

        fb.tick(500);
        assert_eq!(fb.glow(Material::Paper), BinSignal::None);
        assert_eq!(fb.info(Material::Paper), Some("Paper is made from trees."));

        fb.tick(2500);
        assert_eq!(fb.info(Material::Paper), None);
    }

    #[test]
    fn test_materials_do_not_share_slots() {
        let mut fb = FeedbackScheduler::new();
        fb.arm(Feedback::Glow(Material::Glass, BinSignal::Error), 1000);
        assert_eq!(fb.glow(Material::Plastic), BinSignal::None);
        assert_eq!(fb.glow(Material::Glass), BinSignal::Error);
    }

    #[test]
    fn test_arm_none_or_zero_duration_clears() {
        let mut fb = FeedbackScheduler::new();
        fb.arm(Feedback::Glow(Material::Glass, BinSignal::Error), 1000);
        fb.arm(Feedback::Glow(Material::Glass, BinSignal::None), 1000);
        assert!(fb.is_idle());

        fb.arm(Feedback::Info(Material::Glass, "x"), 0);
        assert!(fb.is_idle());
    }

    #[test]
    fn test_feedback_key() {
        assert_eq!(
            Feedback::Info(Material::Metal, "x").key(),
            SignalKey::Info(Material::Metal)
        );
    }
}
