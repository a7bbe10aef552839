use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted form of the whole palette. It is written as a single document
/// after every mutation and read back once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaletteEntity {
    /// Swatches in display order.
    pub swatches: Vec<SwatchEntity>,
}

/// Persisted form of a single pigment swatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwatchEntity {
    /// Stable identifier, generated when the swatch is created.
    pub id: Uuid,
    /// Display name; empty while a name lookup is pending or failed.
    pub label: String,
    /// Canonical `rgb(r, g, b)` string for the swatch's own color.
    pub rgb: String,
    /// Parts of this pigment currently in the mix.
    pub parts_in_mix: u32,
    /// Provenance snapshot captured when the swatch was saved from a mix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Vec<RecipeEntryEntity>>,
}

/// One line of a saved recipe: a value copy, never a reference back into
/// the palette.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeEntryEntity {
    /// Label of the contributing swatch at capture time.
    pub label: String,
    /// Canonical `rgb(r, g, b)` string of the contributing swatch.
    pub rgb: String,
    /// Parts the contributing swatch had in the mix at capture time.
    pub parts_in_mix: u32,
}
