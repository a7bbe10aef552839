use serde::{Deserialize, Serialize};

use crate::dao::models::{PaletteEntity, SwatchEntity};

/// Identifier of the single document the palette lives under.
pub const PALETTE_DOC_ID: &str = "palette::current";

/// CouchDB envelope around the persisted palette.
///
/// The `_rev` field is read back before every save so the upsert replaces
/// the current revision instead of conflicting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchPaletteDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    pub swatches: Vec<SwatchEntity>,
}

impl CouchPaletteDocument {
    /// Wrap a palette entity for storage, with an optional known revision.
    pub fn from_entity(palette: PaletteEntity, rev: Option<String>) -> Self {
        Self {
            id: PALETTE_DOC_ID.to_string(),
            rev,
            swatches: palette.swatches,
        }
    }

    /// Unwrap the stored document back into the plain entity.
    pub fn into_entity(self) -> PaletteEntity {
        PaletteEntity {
            swatches: self.swatches,
        }
    }
}
