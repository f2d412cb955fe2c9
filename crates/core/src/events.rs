//! Round events and the notification sink seam.
//!
//! The round never calls audio or UI code directly. Each committed action
//! leaves its events in the round state; the shell drains them with
//! [`RoundState::take_events`](crate::RoundState::take_events) and forwards them
//! to a [`NotificationSink`]. Sink methods return nothing, so a slow or broken
//! sink cannot hold up scoring.

use crate::types::Material;

/// One-shot notification produced by a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundEvent {
    /// Item landed in its own bin.
    Correct(Material),
    /// Item landed in a foreign bin (the receiving bin's material).
    Wrong(Material),
    /// Every item of the material is now sorted.
    Bonus(Material),
    /// Every item of the round is now sorted.
    RoundComplete { score: i32 },
}

impl RoundEvent {
    pub fn dispatch<S: NotificationSink + ?Sized>(self, sink: &mut S) {
        match self {
            RoundEvent::Correct(_) => sink.play_correct(),
            RoundEvent::Wrong(_) => sink.play_wrong(),
            RoundEvent::Bonus(m) => sink.announce_bonus(m),
            RoundEvent::RoundComplete { score } => sink.round_complete(score),
        }
    }
}

/// Fire-and-forget receiver for cues and announcements.
pub trait NotificationSink {
    fn play_correct(&mut self);
    fn play_wrong(&mut self);
    fn announce_bonus(&mut self, material: Material);
    fn round_complete(&mut self, _score: i32) {}
}

/// Forward every event, in order.
pub fn dispatch_all<S, I>(events: I, sink: &mut S)
where
    S: NotificationSink + ?Sized,
    I: IntoIterator<Item = RoundEvent>,
{
    for ev in events {
        ev.dispatch(sink);
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn play_correct(&mut self) {}
    fn play_wrong(&mut self) {}
    fn announce_bonus(&mut self, _material: Material) {}
}

/// Counting sink, handy for headless runs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueCounter {
    pub correct: u32,
    pub wrong: u32,
    pub bonuses: u32,
    pub completed: u32,
}

impl NotificationSink for CueCounter {
    fn play_correct(&mut self) {
        self.correct += 1;
    }

    fn play_wrong(&mut self) {
        self.wrong += 1;
    }

    fn announce_bonus(&mut self, _material: Material) {
        self.bonuses += 1;
    }

    fn round_complete(&mut self, _score: i32) {
        self.completed += 1;
    }
}
