//! Core round logic - pure, deterministic, and testable
//!
//! This crate contains the rules of one trash-sorting round: the catalog, the
//! round state, the drop resolver, scoring and the feedback scheduler. It does
//! not depend on terminals, input devices or audio, making it:
//!
//! - **Deterministic**: The same drops and ticks always produce the same round
//! - **Testable**: Every rule is covered by unit tests next to the code
//! - **Portable**: Runs behind the terminal frontend or the headless replay
//!
//! # Module Structure
//!
//! - [`catalog`]: Park level items, bin handles and per-material facts
//! - [`round_state`]: Round state, drop commits, restart and feedback ticks
//! - [`resolver`]: Pure drop decision (item, bin) → outcome
//! - [`feedback`]: Auto-expiring bin glow and info text
//! - [`scoring`]: Drop points, material bonus and round summary
//! - [`events`]: One-shot events and the notification sink seam
//! - [`snapshot`]: Read-only projection for presentation
//!
//! # Game Rules
//!
//! - **Correct bin**: +1, the item is flagged sorted, the bin glows green for
//!   500ms and shows a fact about the material for 3000ms
//! - **Wrong bin**: -1, the receiving bin glows red for 1000ms
//! - **Material complete**: +5 once every item of a material is sorted
//! - **Round complete**: once every item is sorted; only restart is accepted
//!
//! # Example
//!
//! ```
//! use trash_sorter_core::RoundState;
//! use trash_sorter_types::{BinSignal, ItemId, Material, RoundAction};
//!
//! let mut round = RoundState::new();
//!
//! round.apply_action(RoundAction::Drop {
//!     item: ItemId::new(Material::Plastic, 1),
//!     target: Material::Plastic,
//! });
//! assert_eq!(round.score(), 1);
//! assert_eq!(round.bin_signal(Material::Plastic), BinSignal::Success);
//!
//! // Feedback expires with elapsed time
//! round.tick(500);
//! assert_eq!(round.bin_signal(Material::Plastic), BinSignal::None);
//! ```
//!
//! # Timing
//!
//! Nothing in this crate reads a clock. Call
//! [`RoundState::tick`](round_state::RoundState::tick) from the event loop with
//! the elapsed milliseconds; drops and expiries then run on the same queue.

pub mod catalog;
pub mod error;
pub mod events;
pub mod feedback;
pub mod resolver;
pub mod round_state;
pub mod scoring;
pub mod snapshot;

pub use trash_sorter_types as types;

// Re-export commonly used types for convenience
pub use catalog::{fact_for, initial_items, total_counts, DisplayHandle, TrashItem, FALLBACK_FACT};
pub use error::{parse_item_id, parse_material, SorterError};
pub use events::{dispatch_all, CueCounter, NotificationSink, NullSink, RoundEvent};
pub use feedback::{Feedback, FeedbackScheduler, SignalKey, TimedSlot};
pub use resolver::{decide_drop, resolve_drop, DropDecision, DropOutcome, IgnoreReason};
pub use round_state::RoundState;
pub use scoring::{calculate_match_score, RoundSummary, ScoreResult};
pub use snapshot::RoundSnapshot;
