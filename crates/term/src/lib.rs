//! Terminal rendering for the trash sorter.
//!
//! A small, game-oriented rendering layer: views draw into a plain
//! framebuffer that the renderer diffs and flushes to the terminal. It avoids
//! widget/layout libraries so the same layout code can drive pointer hit
//! testing.
//!
//! - [`game_view`]: the round itself (items, bins, glow, facts, drag state)
//! - [`menu_view`]: level select, placeholder and summary panels
//! - [`renderer`]: crossterm output with mouse capture
//! - [`render_throttle`]: redraw only when the frame changes

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod render_throttle;
pub mod renderer;

pub use trash_sorter_core as core;
pub use trash_sorter_types as types;

pub use fb::{BorderKind, Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{material_color, DragIndicator, GameView, PlayLayout, Viewport};
pub use menu_view::{MenuEntry, MenuView, Panel, PanelLayout};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
