//! Trash Sorter (workspace facade crate).
//!
//! Re-exports the member crates as `trash_sorter::{core,input,term,types}` and
//! holds the shell pieces shared by the binary and the integration tests:
//! configuration, logging setup, the interactive app and the headless replay.

pub use trash_sorter_core as core;
pub use trash_sorter_input as input;
pub use trash_sorter_term as term;
pub use trash_sorter_types as types;

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod replay;
