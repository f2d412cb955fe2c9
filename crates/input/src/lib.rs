//! Terminal input module (drag-drop capability).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`KeyInput`]s and provides a drag controller
//! that reports completed drops as [`crate::types::RoundAction`]s, for both
//! keyboard play and mouse dragging.

pub mod drag;
pub mod map;

pub use trash_sorter_types as types;

pub use drag::{DragController, DragSource, DragState};
pub use map::{handle_key_event, should_quit, KeyInput};
