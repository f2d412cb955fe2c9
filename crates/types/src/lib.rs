//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (round logic, terminal rendering, headless replay).
//!
//! # Materials
//!
//! Every trash item and every bin belongs to exactly one of four materials:
//! plastic, paper, metal and glass. The set is closed; per-material state is
//! stored in a [`MaterialMap`] indexed by [`Material`].
//!
//! # Feedback Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Event loop tick (~60 FPS) |
//! | `SUCCESS_GLOW_MS` | 500 | Green bin glow after a correct drop |
//! | `ERROR_GLOW_MS` | 1000 | Red bin glow after a wrong drop |
//! | `INFO_TEXT_MS` | 3000 | Material fact shown under a bin |
//! | `BONUS_TOAST_MS` | 3000 | Bonus banner shown by the shell |
//!
//! # Scoring
//!
//! | Event | Points |
//! |-------|--------|
//! | Correct drop | +1 |
//! | Wrong drop | -1 |
//! | Every item of one material sorted | +5 |
//!
//! # Examples
//!
//! ```
//! use trash_sorter_types::{BinSignal, Material, MaterialMap, RoundAction};
//!
//! // Parse from string (case-insensitive)
//! let material = Material::from_str("Plastic").unwrap();
//! assert_eq!(material, Material::Plastic);
//! assert_eq!(material.as_str(), "plastic");
//!
//! // Per-material storage
//! let mut counts = MaterialMap::<u32>::default();
//! counts[Material::Glass] += 1;
//! assert_eq!(counts[Material::Glass], 1);
//!
//! // Bin glow defaults to none
//! assert_eq!(BinSignal::default(), BinSignal::None);
//!
//! let action = RoundAction::Restart;
//! assert_eq!(action.as_str(), "restart");
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Success glow on the receiving bin after a correct drop (500ms)
pub const SUCCESS_GLOW_MS: u32 = 500;

/// Error glow on the receiving bin after a wrong drop (1000ms)
pub const ERROR_GLOW_MS: u32 = 1000;

/// Material fact text shown under the bin after a correct drop (3000ms)
pub const INFO_TEXT_MS: u32 = 3000;

/// Bonus toast shown by the shell when a material is completed (3000ms)
pub const BONUS_TOAST_MS: u32 = 3000;

/// Points for dropping an item into its own bin
pub const CORRECT_POINTS: i32 = 1;

/// Points for dropping an item into a foreign bin
pub const WRONG_POINTS: i32 = -1;

/// Extra points once every item of a material has been sorted
pub const MATERIAL_BONUS_POINTS: i32 = 5;

/// Number of materials (and bins)
pub const MATERIAL_COUNT: usize = 4;

/// Items per material in the park round
pub const ITEMS_PER_MATERIAL: usize = 2;

/// Facts defined per material
pub const FACTS_PER_MATERIAL: usize = 2;

/// Total items in one round (2 per material x 4 materials)
pub const ROUND_ITEM_COUNT: usize = ITEMS_PER_MATERIAL * MATERIAL_COUNT;

/// The four recycling materials
///
/// Each material has its own bin:
/// - **Plastic**: bottles and bags
/// - **Paper**: paper bags
/// - **Metal**: cans
/// - **Glass**: bottles and jars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Material {
    Plastic,
    Paper,
    Metal,
    Glass,
}

impl Material {
    /// All materials in bin order (left to right).
    pub const ALL: [Material; MATERIAL_COUNT] = [
        Material::Plastic,
        Material::Paper,
        Material::Metal,
        Material::Glass,
    ];

    /// Parse material from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use trash_sorter_types::Material;
    ///
    /// assert_eq!(Material::from_str("paper"), Some(Material::Paper));
    /// assert_eq!(Material::from_str("METAL"), Some(Material::Metal));
    /// assert_eq!(Material::from_str("wood"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plastic" => Some(Material::Plastic),
            "paper" => Some(Material::Paper),
            "metal" => Some(Material::Metal),
            "glass" => Some(Material::Glass),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Plastic => "plastic",
            Material::Paper => "paper",
            Material::Metal => "metal",
            Material::Glass => "glass",
        }
    }

    /// Position in [`Material::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Material::Plastic => 0,
            Material::Paper => 1,
            Material::Metal => 2,
            Material::Glass => 3,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-size per-material storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialMap<T> {
    slots: [T; MATERIAL_COUNT],
}

impl<T> MaterialMap<T> {
    pub fn from_fn(mut f: impl FnMut(Material) -> T) -> Self {
        Self {
            slots: Material::ALL.map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Material, &T)> {
        Material::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }
}

impl<T> Index<Material> for MaterialMap<T> {
    type Output = T;

    fn index(&self, material: Material) -> &T {
        &self.slots[material.index()]
    }
}

impl<T> IndexMut<Material> for MaterialMap<T> {
    fn index_mut(&mut self, material: Material) -> &mut T {
        &mut self.slots[material.index()]
    }
}

/// Glow state of a bin
///
/// - **None**: No feedback shown
/// - **Success**: Green glow after a correct drop
/// - **Error**: Red glow after a wrong drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BinSignal {
    #[default]
    None,
    Success,
    Error,
}

impl BinSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinSignal::None => "none",
            BinSignal::Success => "success",
            BinSignal::Error => "error",
        }
    }
}

/// Round phase
///
/// `Playing` accepts drops; `Terminal` (every item sorted) only accepts restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    #[default]
    Playing,
    Terminal,
}

/// Identity of a trash item: `<material>_<index>` with a 1-based index.
///
/// Items are identified by value so they can be copied freely between the
/// drag controller, the view and the round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    pub material: Material,
    pub index: u8,
}

impl ItemId {
    pub const fn new(material: Material, index: u8) -> Self {
        Self { material, index }
    }

    /// Parse an id such as `plastic_1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trash_sorter_types::{ItemId, Material};
    ///
    /// assert_eq!(ItemId::parse("glass_2"), Some(ItemId::new(Material::Glass, 2)));
    /// assert_eq!(ItemId::parse("glass"), None);
    /// assert_eq!(ItemId::parse("wood_1"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (material, index) = s.split_once('_')?;
        let material = Material::from_str(material)?;
        let index = index.parse::<u8>().ok()?;
        if index == 0 {
            return None;
        }
        Some(Self { material, index })
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.material.as_str(), self.index)
    }
}

/// What sits under a pointer position in the play area.
///
/// Resolved by the view's hit testing; an image or label inside a bin resolves
/// to the bin itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Item(ItemId),
    Bin(Material),
}

/// Actions that can be applied to a round
///
/// Both the terminal drag controller and the headless replay produce these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    /// An item was released over the bin for `target`
    Drop { item: ItemId, target: Material },
    /// Start a fresh round from the catalog
    Restart,
}

impl RoundAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundAction::Drop { .. } => "drop",
            RoundAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_timing_defaults() {
        assert_eq!(SUCCESS_GLOW_MS, 500);
        assert_eq!(ERROR_GLOW_MS, 1000);
        assert_eq!(INFO_TEXT_MS, 3000);
        assert_eq!(CORRECT_POINTS + MATERIAL_BONUS_POINTS, 6);
        assert_eq!(ROUND_ITEM_COUNT, 8);
    }

    #[test]
    fn material_index_matches_all_order() {
        for (i, m) in Material::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn material_map_from_fn_and_iter() {
        let map = MaterialMap::from_fn(|m| m.index() as u32 * 10);
        let collected: Vec<_> = map.iter().collect();
        assert_eq!(
            collected,
            vec![
                (Material::Plastic, &0),
                (Material::Paper, &10),
                (Material::Metal, &20),
                (Material::Glass, &30),
            ]
        );
    }
}
