//! Runtime configuration read from the environment.

use std::env;

/// Shell settings. Round timing and scoring are fixed constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Write logs here while the TUI owns the terminal.
    pub log_path: Option<String>,
    /// Ring the terminal bell on correct/wrong drops.
    pub sound: bool,
    /// Start directly in the park level.
    pub skip_menu: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            sound: true,
            skip_menu: false,
        }
    }
}

impl AppConfig {
    /// Create from `TRASH_SORTER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_path = lookup("TRASH_SORTER_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let sound = lookup("TRASH_SORTER_SOUND")
            .map(|v| !is_false(&v))
            .unwrap_or(true);

        let skip_menu = lookup("TRASH_SORTER_SKIP_MENU")
            .map(|v| is_true(&v))
            .unwrap_or(false);

        Self {
            log_path,
            sound,
            skip_menu,
        }
    }
}

fn is_true(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn is_false(v: &str) -> bool {
    let v = v.trim();
    v == "0" || v.eq_ignore_ascii_case("false")
}
