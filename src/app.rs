//! Interactive shell around a round.
//!
//! Owns the screen flow (level select, coming-soon placeholder, play, summary),
//! wires the drag controller to the round and turns round events into
//! terminal cues. Everything here is synchronous and free of I/O; the binary
//! feeds it terminal events and ticks and flushes what it renders.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::{dispatch_all, NotificationSink, RoundSnapshot, RoundState, TimedSlot};
use crate::input::{handle_key_event, should_quit, DragController, KeyInput};
use crate::term::{DragIndicator, FrameBuffer, GameView, MenuEntry, MenuView, Panel, Viewport};
use crate::types::{ItemId, Material, RoundAction, BONUS_TOAST_MS, ROUND_ITEM_COUNT};

/// Selectable levels. Only the park has a round; the others are placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Park,
    Ocean,
    Reef,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Park, Level::Ocean, Level::Reef];

    pub fn name(&self) -> &'static str {
        match self {
            Level::Park => "Park Cleanup",
            Level::Ocean => "Ocean Cleanup",
            Level::Reef => "Reef Rescue",
        }
    }

    pub fn is_playable(&self) -> bool {
        matches!(self, Level::Park)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    LevelSelect { selected: usize },
    ComingSoon(Level),
    Playing,
    Summary { selected: usize },
}

const LEVEL_ENTRIES: [MenuEntry<'static>; 3] = [
    MenuEntry::new("Park Cleanup"),
    MenuEntry::disabled("Ocean Cleanup", "coming soon"),
    MenuEntry::disabled("Reef Rescue", "coming soon"),
];
const LEVEL_LINES: [&str; 1] = ["Help clean up the world, one bin at a time."];

const COMING_SOON_ENTRIES: [MenuEntry<'static>; 1] = [MenuEntry::new("Back to Levels")];
const COMING_SOON_LINES: [&str; 2] = [
    "This level is coming soon!",
    "Check back later for more cleanup.",
];

pub const SUMMARY_PLAY_AGAIN: usize = 0;
pub const SUMMARY_LEVELS: usize = 1;
const SUMMARY_ENTRIES: [MenuEntry<'static>; 2] =
    [MenuEntry::new("Play Again"), MenuEntry::new("Levels")];

/// Notification sink for the terminal: bell cues and the bonus toast.
#[derive(Debug, Clone, Default)]
pub struct TerminalSink {
    sound: bool,
    bells: u32,
    toast: Option<TimedSlot<Material>>,
}

impl TerminalSink {
    pub fn new(sound: bool) -> Self {
        Self {
            sound,
            bells: 0,
            toast: None,
        }
    }

    /// Bells requested since the last call.
    pub fn take_bells(&mut self) -> u32 {
        std::mem::take(&mut self.bells)
    }

    /// Material of the bonus currently announced.
    pub fn toast(&self) -> Option<Material> {
        self.toast.map(|t| t.value)
    }

    pub fn toast_text(&self) -> Option<String> {
        self.toast()
            .map(|m| format!("Bonus! You sorted all {m} items!"))
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.toast = self.toast.and_then(|t| t.advance(elapsed_ms));
    }

    pub fn clear_toast(&mut self) {
        self.toast = None;
    }

    fn ring(&mut self) {
        if self.sound {
            self.bells += 1;
        }
    }
}

impl NotificationSink for TerminalSink {
    fn play_correct(&mut self) {
        self.ring();
    }

    fn play_wrong(&mut self) {
        self.ring();
    }

    fn announce_bonus(&mut self, material: Material) {
        self.toast = TimedSlot::new(material, BONUS_TOAST_MS);
    }

    fn round_complete(&mut self, score: i32) {
        info!(score, "showing round summary");
    }
}

pub struct App {
    screen: Screen,
    round: RoundState,
    snapshot: RoundSnapshot,
    drag: DragController,
    sink: TerminalSink,
    game_view: GameView,
    menu_view: MenuView,
    quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let round = RoundState::new();
        let snapshot = round.snapshot();
        let screen = if config.skip_menu {
            Screen::Playing
        } else {
            Screen::LevelSelect { selected: 0 }
        };
        Self {
            screen,
            round,
            snapshot,
            drag: DragController::new(),
            sink: TerminalSink::new(config.sound),
            game_view: GameView::new(),
            menu_view: MenuView::new(),
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn snapshot(&self) -> &RoundSnapshot {
        &self.snapshot
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn sink(&self) -> &TerminalSink {
        &self.sink
    }

    pub fn take_bells(&mut self) -> u32 {
        self.sink.take_bells()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        let Some(input) = handle_key_event(key) else {
            return;
        };
        match self.screen {
            Screen::Playing => self.handle_play_input(input),
            _ => self.handle_menu_input(input),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, viewport: Viewport) {
        let (x, y) = (mouse.column, mouse.row);
        if self.screen == Screen::Playing {
            self.handle_play_mouse(mouse.kind, x, y, viewport);
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let hit = self
            .with_panel(|panel| self.menu_view.hit_test(panel, viewport, x, y))
            .flatten();
        if let Some(index) = hit {
            self.select(index);
            self.handle_menu_input(KeyInput::Activate);
        }
    }

    /// Advance round feedback and the bonus toast.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.round.tick(elapsed_ms) > 0 {
            self.refresh();
        }
        self.sink.tick(elapsed_ms);
    }

    /// Apply a round action and forward its events to the sink.
    pub fn apply(&mut self, action: RoundAction) -> bool {
        debug!(action = action.as_str(), "round action");
        let changed = self.round.apply_action(action);
        if action == RoundAction::Restart {
            self.drag.reset();
            self.sink.clear_toast();
        }
        dispatch_all(self.round.take_events(), &mut self.sink);
        self.refresh();
        changed
    }

    pub fn drag_indicator(&self) -> DragIndicator {
        DragIndicator {
            cursor: self.drag.cursor_item(&self.remaining_ids()),
            held: self.drag.held(),
            hover: self.drag.hover_bin(),
        }
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        let drew_panel = self
            .with_panel(|panel| self.menu_view.render_into(panel, viewport, fb))
            .is_some();
        if drew_panel {
            return;
        }
        let toast = self.sink.toast_text();
        self.game_view.render_into(
            &self.snapshot,
            &self.drag_indicator(),
            toast.as_deref(),
            viewport,
            fb,
        );
    }

    /// Changes whenever the next frame would look different.
    pub fn frame_fingerprint(&self) -> u64 {
        use std::hash::{Hash, Hasher};

        let mut h = std::collections::hash_map::DefaultHasher::new();
        self.screen.hash(&mut h);
        self.snapshot.fingerprint().hash(&mut h);
        self.drag_indicator().hash(&mut h);
        self.sink.toast().hash(&mut h);
        h.finish()
    }

    fn handle_play_input(&mut self, input: KeyInput) {
        if self.snapshot.is_terminal() {
            match input {
                KeyInput::Activate => self.show_summary(),
                KeyInput::Restart => {
                    self.apply(RoundAction::Restart);
                }
                _ => {}
            }
            return;
        }

        if input == KeyInput::Cancel && self.drag.held().is_none() {
            self.go_to_levels();
            return;
        }

        let remaining = self.remaining_ids();
        if let Some(action) = self.drag.handle_key(input, &remaining) {
            self.apply(action);
        }
    }

    fn handle_play_mouse(&mut self, kind: MouseEventKind, x: u16, y: u16, viewport: Viewport) {
        if self.snapshot.is_terminal() {
            if kind == MouseEventKind::Down(MouseButton::Left) {
                self.show_summary();
            }
            return;
        }

        let hit = self.game_view.hit_test(&self.snapshot, viewport, x, y);
        match kind {
            MouseEventKind::Down(MouseButton::Left) => self.drag.pointer_down(hit),
            MouseEventKind::Drag(MouseButton::Left) => self.drag.pointer_moved(hit),
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(action) = self.drag.pointer_up(hit) {
                    self.apply(action);
                }
            }
            _ => {}
        }
    }

    fn handle_menu_input(&mut self, input: KeyInput) {
        match self.screen {
            Screen::LevelSelect { selected } => match input {
                KeyInput::Prev | KeyInput::Next => {
                    self.select(step(selected, Level::ALL.len(), input));
                }
                KeyInput::Activate => self.choose_level(Level::ALL[selected]),
                _ => {}
            },
            Screen::ComingSoon(_) => {
                if matches!(input, KeyInput::Activate | KeyInput::Cancel) {
                    self.go_to_levels();
                }
            }
            Screen::Summary { selected } => match input {
                KeyInput::Prev | KeyInput::Next => {
                    self.select(step(selected, SUMMARY_ENTRIES.len(), input));
                }
                KeyInput::Activate => self.activate_summary(selected),
                KeyInput::Restart => self.activate_summary(SUMMARY_PLAY_AGAIN),
                KeyInput::Cancel => self.activate_summary(SUMMARY_LEVELS),
                KeyInput::ReleaseOnto(_) => {}
            },
            Screen::Playing => {}
        }
    }

    fn select(&mut self, index: usize) {
        match &mut self.screen {
            Screen::LevelSelect { selected } | Screen::Summary { selected } => *selected = index,
            Screen::ComingSoon(_) | Screen::Playing => {}
        }
    }

    fn choose_level(&mut self, level: Level) {
        info!(level = level.name(), "level chosen");
        if !level.is_playable() {
            self.screen = Screen::ComingSoon(level);
            return;
        }
        self.apply(RoundAction::Restart);
        self.screen = Screen::Playing;
    }

    fn go_to_levels(&mut self) {
        self.drag.reset();
        self.screen = Screen::LevelSelect { selected: 0 };
    }

    fn show_summary(&mut self) {
        self.drag.reset();
        self.screen = Screen::Summary {
            selected: SUMMARY_PLAY_AGAIN,
        };
    }

    fn activate_summary(&mut self, selected: usize) {
        self.apply(RoundAction::Restart);
        if selected == SUMMARY_LEVELS {
            self.go_to_levels();
        } else {
            self.screen = Screen::Playing;
        }
    }

    fn refresh(&mut self) {
        self.round.snapshot_into(&mut self.snapshot);
    }

    fn remaining_ids(&self) -> ArrayVec<ItemId, ROUND_ITEM_COUNT> {
        self.snapshot.remaining().map(|i| i.id).collect()
    }

    /// Build the panel for the current screen, if it is a menu screen.
    fn with_panel<R>(&self, f: impl FnOnce(&Panel<'_>) -> R) -> Option<R> {
        match self.screen {
            Screen::Playing => None,
            Screen::LevelSelect { selected } => Some(f(&Panel {
                title: "Choose a Level",
                lines: &LEVEL_LINES,
                entries: &LEVEL_ENTRIES,
                selected,
            })),
            Screen::ComingSoon(level) => Some(f(&Panel {
                title: level.name(),
                lines: &COMING_SOON_LINES,
                entries: &COMING_SOON_ENTRIES,
                selected: 0,
            })),
            Screen::Summary { selected } => {
                let summary = self.snapshot.summary();
                let score = format!("Final score: {}", summary.score);
                let sorted = format!(
                    "Items sorted: {}/{}",
                    summary.items_sorted(),
                    summary.items_total()
                );
                let mistakes = format!("Mistakes made: {}", summary.mistakes);
                let bonuses = format!("Bonuses earned: {}", summary.bonuses);
                let lines = [
                    score.as_str(),
                    sorted.as_str(),
                    mistakes.as_str(),
                    bonuses.as_str(),
                ];
                Some(f(&Panel {
                    title: "Well Done!",
                    lines: &lines,
                    entries: &SUMMARY_ENTRIES,
                    selected,
                }))
            }
        }
    }
}

fn step(selected: usize, len: usize, input: KeyInput) -> usize {
    match input {
        KeyInput::Prev => (selected + len - 1) % len,
        _ => (selected + 1) % len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoundPhase;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn playing_app() -> App {
        App::new(&AppConfig {
            skip_menu: true,
            ..AppConfig::default()
        })
    }

    fn sort_everything(app: &mut App) {
        for item in crate::core::catalog::PARK_ITEMS.iter() {
            app.apply(RoundAction::Drop {
                item: item.id,
                target: item.id.material,
            });
        }
    }

    #[test]
    fn test_starts_on_level_select() {
        let app = App::new(&AppConfig::default());
        assert_eq!(app.screen(), Screen::LevelSelect { selected: 0 });
        assert!(!app.should_quit());
    }

    #[test]
    fn test_locked_level_shows_placeholder_and_back() {
        let mut app = App::new(&AppConfig::default());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::ComingSoon(Level::Ocean));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::LevelSelect { selected: 0 });
    }

    #[test]
    fn test_park_starts_a_fresh_round() {
        let mut app = App::new(&AppConfig::default());
        let first_round = app.round().round_id();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.round().round_id(), first_round + 1);
        assert_eq!(app.snapshot().score, 0);
    }

    #[test]
    fn test_keyboard_drop_rings_and_scores() {
        let mut app = playing_app();
        // Cursor starts on the plastic bottle; key 1 releases it over plastic.
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.snapshot().score, 1);
        assert_eq!(app.take_bells(), 1);
        assert_eq!(app.take_bells(), 0);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.snapshot().score, 0);
        assert_eq!(app.snapshot().mistakes, 1);
    }

    #[test]
    fn test_sound_off_suppresses_bells() {
        let mut app = App::new(&AppConfig {
            skip_menu: true,
            sound: false,
            ..AppConfig::default()
        });
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.snapshot().score, 1);
        assert_eq!(app.take_bells(), 0);
    }

    #[test]
    fn test_bonus_toast_expires() {
        let mut app = playing_app();
        app.apply(RoundAction::Drop {
            item: ItemId::new(Material::Metal, 1),
            target: Material::Metal,
        });
        assert_eq!(app.sink().toast(), None);
        app.apply(RoundAction::Drop {
            item: ItemId::new(Material::Metal, 2),
            target: Material::Metal,
        });
        assert_eq!(
            app.sink().toast_text().as_deref(),
            Some("Bonus! You sorted all metal items!")
        );

        app.tick(BONUS_TOAST_MS - 1);
        assert_eq!(app.sink().toast(), Some(Material::Metal));
        app.tick(1);
        assert_eq!(app.sink().toast(), None);
    }

    #[test]
    fn test_feedback_ticks_refresh_snapshot() {
        let mut app = playing_app();
        press(&mut app, KeyCode::Char('1'));
        assert!(app.snapshot().bin_info[Material::Plastic].is_some());
        app.tick(crate::types::INFO_TEXT_MS);
        assert_eq!(app.snapshot().bin_info[Material::Plastic], None);
    }

    #[test]
    fn test_round_end_then_summary_then_play_again() {
        let mut app = playing_app();
        sort_everything(&mut app);
        assert_eq!(app.round().phase(), RoundPhase::Terminal);
        assert_eq!(app.screen(), Screen::Playing);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Summary { selected: 0 });

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.snapshot().score, 0);
        assert!(!app.snapshot().is_terminal());
    }

    #[test]
    fn test_summary_levels_goes_back_to_menu() {
        let mut app = playing_app();
        sort_everything(&mut app);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.screen(), Screen::Summary { selected: 1 });
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::LevelSelect { selected: 0 });
    }

    #[test]
    fn test_escape_while_idle_leaves_round() {
        let mut app = playing_app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.drag().held().is_some());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Playing);
        assert!(app.drag().held().is_none());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::LevelSelect { selected: 0 });
    }

    #[test]
    fn test_quit_key() {
        let mut app = playing_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_mouse_drag_onto_bin() {
        let mut app = playing_app();
        let vp = Viewport::new(100, 40);
        let layout = GameView::new().layout(app.snapshot(), vp);
        let glass_jar = ItemId::new(Material::Glass, 2);
        let from = layout.item_rect(glass_jar).unwrap();
        let to = layout.bin_rect(Material::Glass);

        let mouse = |kind, column, row| MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        let left = MouseButton::Left;

        app.handle_mouse(mouse(MouseEventKind::Down(left), from.x + 1, from.y + 1), vp);
        assert_eq!(app.drag().held(), Some(glass_jar));
        app.handle_mouse(mouse(MouseEventKind::Drag(left), to.x + 2, to.y + 2), vp);
        assert_eq!(app.drag().hover_bin(), Some(Material::Glass));
        app.handle_mouse(mouse(MouseEventKind::Up(left), to.x + 2, to.y + 2), vp);

        assert_eq!(app.snapshot().score, 1);
        assert!(!app.snapshot().is_remaining(glass_jar));
    }

    #[test]
    fn test_render_switches_with_screen() {
        let vp = Viewport::new(90, 32);
        let mut fb = FrameBuffer::new(vp.width, vp.height);

        let mut app = App::new(&AppConfig::default());
        app.render_into(vp, &mut fb);
        assert!(fb.text().contains("Choose a Level"));

        press(&mut app, KeyCode::Enter);
        app.render_into(vp, &mut fb);
        assert!(fb.text().contains("PARK CLEANUP"));
    }

    #[test]
    fn test_fingerprint_tracks_drag_state() {
        let mut app = playing_app();
        let before = app.frame_fingerprint();
        assert_eq!(before, app.frame_fingerprint());
        press(&mut app, KeyCode::Right);
        assert_ne!(before, app.frame_fingerprint());
    }

    #[test]
    fn test_snapshot_matches_round() {
        let mut app = playing_app();
        press(&mut app, KeyCode::Char('1'));
        app.tick(200);
        assert_eq!(app.snapshot(), &app.round().snapshot());
    }
}
