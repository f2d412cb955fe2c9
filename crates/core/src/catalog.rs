//! Catalog module - the static park round
//!
//! Defines the eight items of the park level (two per material), their display
//! handles, and the two facts revealed for each material. Everything here is
//! immutable data; rounds copy what they need at start.

use arrayvec::ArrayVec;

use crate::types::{
    ItemId, Material, MaterialMap, FACTS_PER_MATERIAL, ITEMS_PER_MATERIAL, ROUND_ITEM_COUNT,
};

/// Shown when a material is sorted more often than it has facts.
pub const FALLBACK_FACT: &str = "Every sorted item helps!";

/// Opaque display handle for an item. The round logic never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle {
    pub asset: &'static str,
    pub label: &'static str,
}

/// A catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub display: DisplayHandle,
}

/// A trash item inside a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrashItem {
    pub id: ItemId,
    pub display: DisplayHandle,
    pub sorted: bool,
}

impl TrashItem {
    pub fn material(&self) -> Material {
        self.id.material
    }
}

const fn entry(material: Material, index: u8, asset: &'static str, label: &'static str) -> CatalogItem {
    CatalogItem {
        id: ItemId::new(material, index),
        display: DisplayHandle { asset, label },
    }
}

/// Park level items, in display order.
pub const PARK_ITEMS: [CatalogItem; ROUND_ITEM_COUNT] = [
    entry(Material::Plastic, 1, "images/plastic_bottle.png", "Plastic bottle"),
    entry(Material::Plastic, 2, "images/plastic_bag.png", "Plastic bag"),
    entry(Material::Paper, 1, "images/paper_bag_1.png", "Paper bag 1"),
    entry(Material::Paper, 2, "images/paper_bag_2.png", "Paper bag 2"),
    entry(Material::Metal, 1, "images/metal_can_1.png", "Metal can 1"),
    entry(Material::Metal, 2, "images/metal_can_2.png", "Metal can 2"),
    entry(Material::Glass, 1, "images/glass_bottle.png", "Glass bottle"),
    entry(Material::Glass, 2, "images/glass_jar.png", "Glass jar"),
];

fn facts(material: Material) -> &'static [&'static str; FACTS_PER_MATERIAL] {
    match material {
        Material::Plastic => &[
            "Plastic takes hundreds of years to decompose.",
            "Recycling helps reduce pollution!",
        ],
        Material::Paper => &[
            "Paper is made from trees.",
            "Recycling saves forests and reduces waste.",
        ],
        Material::Metal => &[
            "Metal is highly recyclable.",
            "It can be melted and reused many times.",
        ],
        Material::Glass => &[
            "Glass is 100% recyclable.",
            "It can be reused without losing quality.",
        ],
    }
}

/// Fresh, unsorted item set for a new round.
pub fn initial_items() -> ArrayVec<TrashItem, ROUND_ITEM_COUNT> {
    PARK_ITEMS
        .iter()
        .map(|c| TrashItem {
            id: c.id,
            display: c.display,
            sorted: false,
        })
        .collect()
}

/// The `occurrence`-th (0-based) fact for a material.
///
/// Falls back to [`FALLBACK_FACT`] past the defined facts.
pub fn fact_for(material: Material, occurrence: usize) -> &'static str {
    facts(material)
        .get(occurrence)
        .copied()
        .unwrap_or(FALLBACK_FACT)
}

/// Number of catalog items per material (the bonus threshold).
pub fn total_counts() -> MaterialMap<u32> {
    let mut counts = MaterialMap::default();
    for item in PARK_ITEMS.iter() {
        counts[item.id.material] += 1;
    }
    counts
}

/// Display handle for a bin.
pub fn bin_display(material: Material) -> DisplayHandle {
    match material {
        Material::Plastic => DisplayHandle {
            asset: "images/plastic-bin.png",
            label: "plastic bin",
        },
        Material::Paper => DisplayHandle {
            asset: "images/paper-bin.png",
            label: "paper bin",
        },
        Material::Metal => DisplayHandle {
            asset: "images/metal-bin.png",
            label: "metal bin",
        },
        Material::Glass => DisplayHandle {
            asset: "images/glass-bin.png",
            label: "glass bin",
        },
    }
}
