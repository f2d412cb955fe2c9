//! GameView: maps a [`RoundSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Rendering and pointer hit testing share one
//! layout computation, so whatever is drawn under a cell is what a mouse
//! press on that cell resolves to.

use arrayvec::ArrayVec;

use crate::core::catalog::bin_display;
use crate::core::{RoundSnapshot, TrashItem};
use crate::fb::{BorderKind, CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{BinSignal, HitTarget, ItemId, Material, MATERIAL_COUNT, ROUND_ITEM_COUNT};

/// Item card size in cells.
pub const ITEM_W: u16 = 16;
pub const ITEM_H: u16 = 3;

/// Bin box size in cells.
pub const BIN_W: u16 = 18;
pub const BIN_H: u16 = 5;

/// Rows reserved under each bin for its fact text.
pub const INFO_H: u16 = 3;

const GAP: u16 = 2;
const ITEMS_TOP: u16 = 3;

const BG: Rgb = Rgb::new(0, 0, 0);
const TEXT: Rgb = Rgb::new(220, 220, 220);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Drag-and-drop state shown on top of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DragIndicator {
    /// Item under the keyboard cursor (idle only).
    pub cursor: Option<ItemId>,
    /// Item currently being dragged.
    pub held: Option<ItemId>,
    /// Bin the held item would land in.
    pub hover: Option<Material>,
}

/// Screen regions for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayLayout {
    /// Unsorted items only, in display order.
    pub items: ArrayVec<(ItemId, Rect), ROUND_ITEM_COUNT>,
    pub bins: [(Material, Rect); MATERIAL_COUNT],
    pub toast_y: u16,
    pub status_y: u16,
}

impl PlayLayout {
    pub fn bin_rect(&self, material: Material) -> Rect {
        self.bins[material.index()].1
    }

    pub fn item_rect(&self, id: ItemId) -> Option<Rect> {
        self.items.iter().find(|(i, _)| *i == id).map(|(_, r)| *r)
    }
}

/// A lightweight terminal renderer for the sorting round.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Compute item and bin regions.
    ///
    /// Bins are placed below room for the full item set, so they stay put as
    /// items get sorted away.
    pub fn layout(&self, snap: &RoundSnapshot, viewport: Viewport) -> PlayLayout {
        let items_per_row = per_row(viewport.width, ITEM_W);
        let mut items = ArrayVec::new();
        let remaining: ArrayVec<&TrashItem, ROUND_ITEM_COUNT> = snap.remaining().collect();
        for (row, chunk) in remaining.chunks(items_per_row as usize).enumerate() {
            let y = ITEMS_TOP + row as u16 * (ITEM_H + 1);
            let mut x = row_start(viewport.width, chunk.len() as u16, ITEM_W);
            for item in chunk {
                items.push((item.id, Rect::new(x, y, ITEM_W, ITEM_H)));
                x += ITEM_W + GAP;
            }
        }

        let item_rows = (ROUND_ITEM_COUNT as u16).div_ceil(items_per_row);
        let bins_top = ITEMS_TOP + item_rows * (ITEM_H + 1) + 1;
        let bins_per_row = per_row(viewport.width, BIN_W);
        let bins = Material::ALL.map(|m| {
            let i = m.index() as u16;
            let row = i / bins_per_row;
            let col = i % bins_per_row;
            let in_row = (MATERIAL_COUNT as u16 - row * bins_per_row).min(bins_per_row);
            let x = row_start(viewport.width, in_row, BIN_W) + col * (BIN_W + GAP);
            let y = bins_top + row * (BIN_H + INFO_H + 1);
            (m, Rect::new(x, y, BIN_W, BIN_H))
        });

        let bin_rows = (MATERIAL_COUNT as u16).div_ceil(bins_per_row);
        let toast_y = bins_top + bin_rows * (BIN_H + INFO_H + 1);
        PlayLayout {
            items,
            bins,
            toast_y,
            status_y: viewport.height.saturating_sub(1),
        }
    }

    /// Resolve a pointer position to an item or bin.
    ///
    /// Anything inside a bin's box (name, art, counter) resolves to the bin.
    pub fn hit_test(
        &self,
        snap: &RoundSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<HitTarget> {
        let layout = self.layout(snap, viewport);
        if let Some((id, _)) = layout.items.iter().find(|(_, r)| r.contains(x, y)) {
            return Some(HitTarget::Item(*id));
        }
        layout
            .bins
            .iter()
            .find(|(_, r)| r.contains(x, y))
            .map(|(m, _)| HitTarget::Bin(*m))
    }

    /// Render the round into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &RoundSnapshot,
        drag: &DragIndicator,
        toast: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, BG).into_cell(' '));

        let layout = self.layout(snap, viewport);
        self.draw_header(fb, snap, viewport);

        for (id, rect) in layout.items.iter() {
            if let Some(item) = snap.items.iter().find(|i| i.id == *id) {
                self.draw_item(fb, item, *rect, drag);
            }
        }

        for (m, rect) in layout.bins.iter() {
            self.draw_bin(fb, snap, *m, *rect, drag.hover == Some(*m));
            if let Some(text) = snap.bin_info[*m] {
                let style = CellStyle::new(material_color(*m), BG);
                fb.put_wrapped(rect.x, rect.bottom(), rect.w, INFO_H, text, style);
            }
        }

        if let Some(text) = toast {
            let style = CellStyle::new(Rgb::new(255, 215, 0), BG).bold();
            fb.put_str_centered(0, layout.toast_y, viewport.width, text, style);
        }

        self.draw_status(fb, snap, drag, layout.status_y);

        if snap.is_terminal() {
            self.draw_overlay(fb, snap, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &RoundSnapshot,
        drag: &DragIndicator,
        toast: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, drag, toast, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &RoundSnapshot, viewport: Viewport) {
        let title = CellStyle::new(Rgb::new(120, 220, 140), BG).bold();
        fb.put_str_centered(0, 0, viewport.width, "PARK CLEANUP", title);
        fb.put_str_centered(
            0,
            1,
            viewport.width,
            "Drag each piece of trash into the matching bin",
            CellStyle::new(TEXT, BG).dim(),
        );

        // "Score: -12" right-aligned.
        let digits = score_width(snap.score);
        let x = viewport.width.saturating_sub(7 + digits + 1);
        let label = CellStyle::new(TEXT, BG).bold();
        let end = fb.put_str(x, 0, "Score: ", label);
        fb.put_i32(end, 0, snap.score, label);
    }

    fn draw_item(&self, fb: &mut FrameBuffer, item: &TrashItem, rect: Rect, drag: &DragIndicator) {
        let color = material_color(item.material());
        let (kind, style) = if drag.held == Some(item.id) {
            (BorderKind::Double, CellStyle::new(color, BG).dim())
        } else if drag.cursor == Some(item.id) {
            (BorderKind::Heavy, CellStyle::new(color, BG).bold())
        } else {
            (BorderKind::Light, CellStyle::new(color, BG))
        };
        fb.draw_box(rect, kind, style);
        fb.put_str_centered(
            rect.x + 1,
            rect.y + 1,
            rect.w - 2,
            item.display.label,
            CellStyle::new(TEXT, BG),
        );
    }

    fn draw_bin(
        &self,
        fb: &mut FrameBuffer,
        snap: &RoundSnapshot,
        material: Material,
        rect: Rect,
        hovered: bool,
    ) {
        let color = material_color(material);
        let bg = match snap.bin_signal[material] {
            BinSignal::None => BG,
            BinSignal::Success => Rgb::new(20, 90, 40),
            BinSignal::Error => Rgb::new(120, 25, 25),
        };
        let inner = Rect::new(rect.x + 1, rect.y + 1, rect.w - 2, rect.h - 2);
        fb.fill_rect(inner, ' ', CellStyle::new(TEXT, bg));

        let border = if hovered {
            (BorderKind::Double, CellStyle::new(color, bg).bold())
        } else {
            (BorderKind::Heavy, CellStyle::new(color, bg))
        };
        fb.draw_box(rect, border.0, border.1);

        let key = char::from(b'1' + material.index() as u8);
        let name = CellStyle::new(color, bg).bold();
        fb.put_char(inner.x, inner.y, key, CellStyle::new(TEXT, bg).dim());
        fb.put_str_centered(inner.x, inner.y, inner.w, bin_display(material).label, name);
        fb.put_str_centered(inner.x, inner.y + 1, inner.w, "\\_♻_/", CellStyle::new(color, bg));

        let counter = CellStyle::new(TEXT, bg).dim();
        let sorted = snap.sorted_counts[material];
        let total = snap.total_counts[material];
        let x = inner.x + inner.w.saturating_sub(3 + digit_count(sorted) + digit_count(total)) / 2;
        let x = fb.put_u32(x, inner.y + 2, sorted, counter);
        let x = fb.put_str(x, inner.y + 2, " / ", counter);
        fb.put_u32(x, inner.y + 2, total, counter);
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &RoundSnapshot, drag: &DragIndicator, y: u16) {
        let style = CellStyle::new(TEXT, BG).dim();
        let held = drag
            .held
            .and_then(|id| snap.items.iter().find(|i| i.id == id));
        match held {
            Some(item) => {
                let bold = CellStyle::new(material_color(item.material()), BG).bold();
                let x = fb.put_str(1, y, "Holding ", style);
                let x = fb.put_str(x, y, item.display.label, bold);
                match drag.hover {
                    Some(m) => {
                        let x = fb.put_str(x, y, " over the ", style);
                        let x = fb.put_str(x, y, bin_display(m).label, bold);
                        fb.put_str(x, y, "  (release: Space/Enter  cancel: Esc)", style);
                    }
                    None => {
                        fb.put_str(x, y, "  (drop it on a bin)", style);
                    }
                }
            }
            None if snap.is_terminal() => {
                fb.put_str(1, y, "Enter: see summary   r: play again   q: quit", style);
            }
            None => {
                fb.put_str(
                    1,
                    y,
                    "←/→ choose  Space grab  1-4 drop into bin  r restart  Esc levels  q quit",
                    style,
                );
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, snap: &RoundSnapshot, viewport: Viewport) {
        let w = 28.min(viewport.width);
        let h = 5.min(viewport.height);
        let rect = Rect::new(
            viewport.width.saturating_sub(w) / 2,
            viewport.height.saturating_sub(h) / 2,
            w,
            h,
        );
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(20, 60, 30));
        fb.fill_rect(rect, ' ', style);
        fb.draw_box(rect, BorderKind::Double, style.bold());
        fb.put_str_centered(rect.x, rect.y + 1, rect.w, "Well Done!", style.bold());

        let digits = score_width(snap.score);
        let x = rect.x + rect.w.saturating_sub(13 + digits) / 2;
        let x = fb.put_str(x, rect.y + 3, "Final score: ", style);
        fb.put_i32(x, rect.y + 3, snap.score, style.bold());
    }
}

/// Display color for a material.
pub fn material_color(material: Material) -> Rgb {
    match material {
        Material::Plastic => Rgb::new(240, 200, 60),
        Material::Paper => Rgb::new(90, 150, 235),
        Material::Metal => Rgb::new(180, 180, 195),
        Material::Glass => Rgb::new(80, 200, 130),
    }
}

fn per_row(width: u16, cell_w: u16) -> u16 {
    ((width + GAP) / (cell_w + GAP)).max(1)
}

fn row_start(width: u16, count: u16, cell_w: u16) -> u16 {
    let used = count * cell_w + count.saturating_sub(1) * GAP;
    width.saturating_sub(used) / 2
}

fn digit_count(v: u32) -> u16 {
    v.checked_ilog10().unwrap_or(0) as u16 + 1
}

fn score_width(score: i32) -> u16 {
    digit_count(score.unsigned_abs()) + u16::from(score < 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoundState;

    fn snap() -> RoundSnapshot {
        RoundState::new().snapshot()
    }

    #[test]
    fn layout_keeps_bins_in_place_as_items_go() {
        let view = GameView::new();
        let vp = Viewport::new(80, 30);

        let mut round = RoundState::new();
        let before = view.layout(&round.snapshot(), vp);
        round.drop_item(ItemId::new(Material::Plastic, 1), Material::Plastic);
        let after = view.layout(&round.snapshot(), vp);

        assert_eq!(before.items.len(), 8);
        assert_eq!(after.items.len(), 7);
        assert_eq!(before.bins, after.bins);
    }

    #[test]
    fn regions_do_not_overlap() {
        let view = GameView::new();
        let layout = view.layout(&snap(), Viewport::new(80, 30));
        for (_, item) in layout.items.iter() {
            for (_, bin) in layout.bins.iter() {
                assert!(item.bottom() <= bin.y);
            }
        }
        for pair in layout.bins.windows(2) {
            assert!(pair[0].1.x + pair[0].1.w <= pair[1].1.x);
        }
    }

    #[test]
    fn digit_helpers() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(score_width(-3), 2);
        assert_eq!(score_width(28), 2);
    }

    #[test]
    fn narrow_viewport_wraps_bins() {
        let view = GameView::new();
        let layout = view.layout(&snap(), Viewport::new(40, 40));
        let plastic = layout.bin_rect(Material::Plastic);
        let metal = layout.bin_rect(Material::Metal);
        assert!(metal.y > plastic.y);
    }
}
