//! Boundary errors.
//!
//! The round logic itself never fails: stale drops are ignored and missing
//! facts fall back to a placeholder. These errors only arise when untyped
//! input (replay lines, config) is turned into round types.

use thiserror::Error;

use crate::types::{ItemId, Material};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SorterError {
    #[error("unknown material: {0:?}")]
    UnknownMaterial(String),

    #[error("malformed item id: {0:?} (expected <material>_<index>)")]
    MalformedItemId(String),

    #[error("item {0} is not part of the catalog")]
    UnknownItem(ItemId),
}

pub type Result<T> = std::result::Result<T, SorterError>;

/// Parse a bin/material name.
pub fn parse_material(s: &str) -> Result<Material> {
    Material::from_str(s.trim()).ok_or_else(|| SorterError::UnknownMaterial(s.to_string()))
}

/// Parse an item id and check it against the catalog.
pub fn parse_item_id(s: &str) -> Result<ItemId> {
    let id = ItemId::parse(s.trim()).ok_or_else(|| SorterError::MalformedItemId(s.to_string()))?;
    if !crate::catalog::PARK_ITEMS.iter().any(|c| c.id == id) {
        return Err(SorterError::UnknownItem(id));
    }
    Ok(id)
}
