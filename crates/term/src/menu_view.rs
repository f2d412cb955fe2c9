//! MenuView: centered panels for the screens around a round.
//!
//! Level select, the "coming soon" placeholder and the end-of-round summary
//! are all a title, a few lines of text and a vertical list of buttons. The
//! view is pure and shares its layout with pointer hit testing, like
//! [`GameView`](crate::game_view::GameView).

use arrayvec::ArrayVec;

use crate::fb::{BorderKind, CellStyle, FrameBuffer, Rect, Rgb};
use crate::game_view::Viewport;

/// Most buttons a panel can hold.
pub const MAX_ENTRIES: usize = 4;

const PANEL_W: u16 = 44;
const BUTTON_H: u16 = 3;

const BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_BG: Rgb = Rgb::new(18, 32, 24);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const ACCENT: Rgb = Rgb::new(120, 220, 140);

/// One button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry<'a> {
    pub label: &'a str,
    /// Small suffix such as "coming soon".
    pub note: Option<&'a str>,
    pub enabled: bool,
}

impl<'a> MenuEntry<'a> {
    pub const fn new(label: &'a str) -> Self {
        Self {
            label,
            note: None,
            enabled: true,
        }
    }

    pub const fn disabled(label: &'a str, note: &'a str) -> Self {
        Self {
            label,
            note: Some(note),
            enabled: false,
        }
    }
}

/// Content of a panel screen.
#[derive(Debug, Clone, Copy)]
pub struct Panel<'a> {
    pub title: &'a str,
    pub lines: &'a [&'a str],
    pub entries: &'a [MenuEntry<'a>],
    pub selected: usize,
}

/// Computed panel regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub frame: Rect,
    pub first_line_y: u16,
    pub buttons: ArrayVec<Rect, MAX_ENTRIES>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MenuView;

impl MenuView {
    pub fn new() -> Self {
        Self
    }

    pub fn layout(&self, panel: &Panel<'_>, viewport: Viewport) -> PanelLayout {
        let count = panel.entries.len().min(MAX_ENTRIES) as u16;
        let w = PANEL_W.min(viewport.width);
        // border + title + blank + lines + blank + buttons + border
        let h = 2 + 2 + panel.lines.len() as u16 + 1 + count * BUTTON_H + 1;
        let frame = Rect::new(
            viewport.width.saturating_sub(w) / 2,
            viewport.height.saturating_sub(h) / 2,
            w,
            h,
        );

        let first_line_y = frame.y + 3;
        let buttons_y = first_line_y + panel.lines.len() as u16 + 1;
        let button_w = w.saturating_sub(8);
        let buttons = (0..count)
            .map(|i| {
                Rect::new(
                    frame.x + (w - button_w) / 2,
                    buttons_y + i * BUTTON_H,
                    button_w,
                    BUTTON_H,
                )
            })
            .collect();

        PanelLayout {
            frame,
            first_line_y,
            buttons,
        }
    }

    /// Index of the button under a pointer position.
    pub fn hit_test(&self, panel: &Panel<'_>, viewport: Viewport, x: u16, y: u16) -> Option<usize> {
        self.layout(panel, viewport)
            .buttons
            .iter()
            .position(|r| r.contains(x, y))
    }

    pub fn render_into(&self, panel: &Panel<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, BG).into_cell(' '));

        let layout = self.layout(panel, viewport);
        let frame = layout.frame;
        let base = CellStyle::new(TEXT, PANEL_BG);
        fb.fill_rect(frame, ' ', base);
        fb.draw_box(frame, BorderKind::Double, CellStyle::new(ACCENT, PANEL_BG));
        fb.put_str_centered(
            frame.x,
            frame.y + 1,
            frame.w,
            panel.title,
            CellStyle::new(ACCENT, PANEL_BG).bold(),
        );

        for (i, line) in panel.lines.iter().enumerate() {
            fb.put_str_centered(frame.x, layout.first_line_y + i as u16, frame.w, line, base);
        }

        for (i, (entry, rect)) in panel.entries.iter().zip(layout.buttons.iter()).enumerate() {
            let selected = i == panel.selected;
            let fg = if entry.enabled {
                TEXT
            } else {
                Rgb::new(130, 130, 130)
            };
            let mut style = CellStyle::new(fg, PANEL_BG);
            if selected {
                style = style.bold();
            }
            let kind = if selected {
                BorderKind::Heavy
            } else {
                BorderKind::Light
            };
            fb.draw_box(*rect, kind, style);

            let inner_w = rect.w.saturating_sub(2);
            match entry.note {
                Some(note) => {
                    let len = (entry.label.chars().count() + note.chars().count() + 3) as u16;
                    let x = rect.x + 1 + inner_w.saturating_sub(len) / 2;
                    let x = fb.put_str(x, rect.y + 1, entry.label, style);
                    fb.put_str(x, rect.y + 1, &format!(" ({note})"), style.dim());
                }
                None => fb.put_str_centered(rect.x + 1, rect.y + 1, inner_w, entry.label, style),
            }
        }

        fb.put_str(
            1,
            viewport.height.saturating_sub(1),
            "↑/↓ choose  Enter select  Esc back  q quit",
            CellStyle::new(TEXT, BG).dim(),
        );
    }

    pub fn render(&self, panel: &Panel<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(panel, viewport, &mut fb);
        fb
    }
}
