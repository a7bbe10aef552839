use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::validation::validate_color_string,
    state::{Palette, PigmentSwatch, RecipeEntry},
};

/// Payload used to add a color to the palette.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddSwatchRequest {
    /// The color to add, in any supported string form.
    #[validate(custom(function = validate_color_string))]
    pub color: String,
    /// Snapshot the current mix proportions as the new swatch's recipe.
    #[serde(default)]
    pub include_recipe: bool,
}

/// Payload used to rename a swatch.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RenameSwatchRequest {
    /// New display name.
    #[validate(length(max = 64))]
    pub label: String,
}

/// Snapshot of one recipe line for DTO use.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeEntrySnapshot {
    /// Label of the contributing swatch at capture time.
    pub label: String,
    /// Canonical `rgb(r, g, b)` string of the contributing swatch.
    pub rgb: String,
    /// Parts the contributing swatch had in the mix at capture time.
    pub parts_in_mix: u32,
}

impl From<&RecipeEntry> for RecipeEntrySnapshot {
    fn from(entry: &RecipeEntry) -> Self {
        Self {
            label: entry.label.clone(),
            rgb: entry.color.to_string(),
            parts_in_mix: entry.parts_in_mix,
        }
    }
}

/// Snapshot of one palette swatch.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SwatchSummary {
    /// Stable identifier used by every swatch operation.
    pub id: Uuid,
    /// Display name; empty while a name lookup is pending.
    pub label: String,
    /// Canonical `rgb(r, g, b)` string.
    pub rgb: String,
    /// Canonical `#rrggbb` form.
    pub hex: String,
    /// Parts of this pigment in the active mix.
    pub parts_in_mix: u32,
    /// This swatch's share of the total parts, 0 when nothing is mixed.
    pub share: f64,
    /// Provenance snapshot, present for swatches saved from a mix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Vec<RecipeEntrySnapshot>>,
}

impl SwatchSummary {
    fn from_swatch(swatch: &PigmentSwatch, total_parts: u64) -> Self {
        let share = if total_parts == 0 {
            0.0
        } else {
            f64::from(swatch.parts_in_mix) / total_parts as f64
        };
        Self {
            id: swatch.id,
            label: swatch.label.clone(),
            rgb: swatch.color.to_string(),
            hex: swatch.color.to_hex(),
            parts_in_mix: swatch.parts_in_mix,
            share,
            recipe: swatch
                .recipe
                .as_ref()
                .map(|entries| entries.iter().map(RecipeEntrySnapshot::from).collect()),
        }
    }
}

/// Snapshot of the whole palette in display order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaletteSnapshot {
    /// Swatches in display order.
    pub swatches: Vec<SwatchSummary>,
    /// Sum of all parts currently in the mix.
    pub total_parts: u64,
    /// Whether any swatch contributes to the mix.
    pub has_parts_in_mix: bool,
    /// Whether the current mixed color could be saved as a new swatch.
    pub is_savable: bool,
}

impl PaletteSnapshot {
    /// Capture the palette along with the savability of the given mix.
    pub fn capture(palette: &Palette, is_savable: bool) -> Self {
        let total_parts = palette.total_parts();
        Self {
            swatches: palette
                .iter()
                .map(|swatch| SwatchSummary::from_swatch(swatch, total_parts))
                .collect(),
            total_parts,
            has_parts_in_mix: palette.has_parts_in_mix(),
            is_savable,
        }
    }
}
