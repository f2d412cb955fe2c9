//! Drag controller for terminal environments.
//!
//! Turns key presses and mouse events into completed drops. A drop is only
//! reported once the held item is released over a bin; the controller never
//! looks at scoring or round state beyond the list of items still on the
//! ground.

use crate::map::KeyInput;
use crate::types::{HitTarget, ItemId, Material, RoundAction};

/// What started the current drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Keyboard,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Holding {
        item: ItemId,
        hover: Option<Material>,
        source: DragSource,
    },
}

/// Tracks the keyboard cursor and the item being dragged.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    /// Index into the remaining (unsorted) items.
    item_cursor: usize,
    /// Index into [`Material::ALL`].
    bin_cursor: usize,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            item_cursor: 0,
            bin_cursor: 0,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn held(&self) -> Option<ItemId> {
        match self.state {
            DragState::Holding { item, .. } => Some(item),
            DragState::Idle => None,
        }
    }

    /// Bin the held item would land in if released now.
    pub fn hover_bin(&self) -> Option<Material> {
        match self.state {
            DragState::Holding { hover, .. } => hover,
            DragState::Idle => None,
        }
    }

    /// Item under the keyboard cursor while idle.
    pub fn cursor_item(&self, remaining: &[ItemId]) -> Option<ItemId> {
        match self.state {
            DragState::Idle if !remaining.is_empty() => {
                Some(remaining[self.item_cursor.min(remaining.len() - 1)])
            }
            _ => None,
        }
    }

    /// Handle a key press. Returns a round action when the key completes one.
    pub fn handle_key(&mut self, input: KeyInput, remaining: &[ItemId]) -> Option<RoundAction> {
        if input == KeyInput::Restart {
            self.reset();
            return Some(RoundAction::Restart);
        }

        match self.state {
            DragState::Idle => match input {
                KeyInput::Prev => {
                    self.item_cursor = step(self.item_cursor, remaining.len(), -1);
                    None
                }
                KeyInput::Next => {
                    self.item_cursor = step(self.item_cursor, remaining.len(), 1);
                    None
                }
                KeyInput::Activate => {
                    let item = self.cursor_item(remaining)?;
                    self.state = DragState::Holding {
                        item,
                        hover: Some(Material::ALL[self.bin_cursor]),
                        source: DragSource::Keyboard,
                    };
                    None
                }
                KeyInput::ReleaseOnto(target) => {
                    let item = self.cursor_item(remaining)?;
                    Some(RoundAction::Drop { item, target })
                }
                KeyInput::Cancel | KeyInput::Restart => None,
            },
            DragState::Holding { item, source, .. } => match input {
                KeyInput::Prev | KeyInput::Next => {
                    let dir = if input == KeyInput::Prev { -1 } else { 1 };
                    self.bin_cursor = step(self.bin_cursor, Material::ALL.len(), dir);
                    self.state = DragState::Holding {
                        item,
                        hover: Some(Material::ALL[self.bin_cursor]),
                        source,
                    };
                    None
                }
                KeyInput::Activate => {
                    let target = Material::ALL[self.bin_cursor];
                    self.release(item, target)
                }
                KeyInput::ReleaseOnto(target) => self.release(item, target),
                KeyInput::Cancel | KeyInput::Restart => {
                    self.state = DragState::Idle;
                    None
                }
            },
        }
    }

    /// Mouse button pressed over `hit`.
    pub fn pointer_down(&mut self, hit: Option<HitTarget>) {
        if let Some(HitTarget::Item(item)) = hit {
            self.state = DragState::Holding {
                item,
                hover: None,
                source: DragSource::Pointer,
            };
        }
    }

    /// Mouse moved (with the button held) over `hit`.
    pub fn pointer_moved(&mut self, hit: Option<HitTarget>) {
        if let DragState::Holding { item, source, .. } = self.state {
            let hover = match hit {
                Some(HitTarget::Bin(m)) => Some(m),
                _ => None,
            };
            self.state = DragState::Holding {
                item,
                hover,
                source,
            };
        }
    }

    /// Mouse button released over `hit`. Releasing anywhere but a bin cancels.
    pub fn pointer_up(&mut self, hit: Option<HitTarget>) -> Option<RoundAction> {
        let DragState::Holding { item, .. } = self.state else {
            return None;
        };
        match hit {
            Some(HitTarget::Bin(target)) => self.release(item, target),
            _ => {
                self.state = DragState::Idle;
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.item_cursor = 0;
        self.bin_cursor = 0;
    }

    fn release(&mut self, item: ItemId, target: Material) -> Option<RoundAction> {
        self.state = DragState::Idle;
        Some(RoundAction::Drop { item, target })
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

fn step(cursor: usize, len: usize, dir: i32) -> usize {
    if len == 0 {
        return 0;
    }
    let cursor = cursor.min(len - 1) as i32;
    (cursor + dir).rem_euclid(len as i32) as usize
}
