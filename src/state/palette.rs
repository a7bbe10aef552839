//! Pigment palette: the ordered swatch collection and every mutation on it.
//!
//! Swatches are keyed by a generated id, not by position. Insertion order is
//! display order and survives removal of earlier entries; an id stays valid
//! until its swatch is removed, so there is no stale-index hazard when edits
//! and removals interleave.

use indexmap::IndexMap;
use thiserror::Error;
use uuid::Uuid;

use crate::color::{MixedColor, Rgb};
use crate::dao::models::{PaletteEntity, RecipeEntryEntity, SwatchEntity};

/// A named, owned entry in the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PigmentSwatch {
    /// Stable identifier, generated at creation.
    pub id: Uuid,
    /// Display name; empty while a name lookup is pending or failed.
    pub label: String,
    /// The swatch's own (unmixed) color.
    pub color: Rgb,
    /// How many parts of this pigment are in the active mix.
    pub parts_in_mix: u32,
    /// Provenance snapshot captured when this swatch was saved from a mix.
    /// Value copies only; removing a contributing swatch later does not
    /// touch the recipe.
    pub recipe: Option<Vec<RecipeEntry>>,
}

/// One line of a recipe: which pigment, at how many parts, at capture time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeEntry {
    /// Label of the contributing swatch when the recipe was captured.
    pub label: String,
    /// Color of the contributing swatch.
    pub color: Rgb,
    /// Parts the contributing swatch had in the mix.
    pub parts_in_mix: u32,
}

/// Palette mutations that can be refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// The requested swatch is not (or no longer) in the palette.
    #[error("no swatch `{0}` in the palette")]
    SwatchNotFound(Uuid),
    /// An equivalent color (same canonical hex) is already present.
    #[error("color `{0}` is already in the palette")]
    DuplicateColor(String),
}

/// The ordered swatch collection. Owned exclusively by the application
/// state; every edit goes through the methods here.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    swatches: IndexMap<Uuid, PigmentSwatch>,
}

impl Palette {
    /// Build a palette from seed pigments, all starting at zero parts.
    pub fn from_seeds<'a, I>(seeds: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Rgb)>,
    {
        let mut palette = Self::default();
        for (label, color) in seeds {
            // Seeds come from trusted config; duplicates are simply skipped.
            if palette.contains_color(color) {
                continue;
            }
            let swatch = PigmentSwatch {
                id: Uuid::new_v4(),
                label: label.to_string(),
                color,
                parts_in_mix: 0,
                recipe: None,
            };
            palette.swatches.insert(swatch.id, swatch);
        }
        palette
    }

    /// Number of swatches in the palette.
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Whether the palette holds no swatches at all.
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Swatches in display order.
    pub fn iter(&self) -> impl Iterator<Item = &PigmentSwatch> {
        self.swatches.values()
    }

    /// Look up one swatch by id.
    pub fn get(&self, id: Uuid) -> Option<&PigmentSwatch> {
        self.swatches.get(&id)
    }

    /// Sum of all parts currently in the mix.
    pub fn total_parts(&self) -> u64 {
        self.swatches
            .values()
            .map(|swatch| u64::from(swatch.parts_in_mix))
            .sum()
    }

    /// Whether any swatch contributes to the mix.
    pub fn has_parts_in_mix(&self) -> bool {
        self.swatches.values().any(|swatch| swatch.parts_in_mix > 0)
    }

    /// Whether an equivalent color (canonical hex) is already present.
    pub fn contains_color(&self, color: Rgb) -> bool {
        // Rgb is canonical by construction, so hex equality is value
        // equality; the hex form is what the duplicate rule is specified in.
        self.swatches.values().any(|swatch| swatch.color == color)
    }

    /// Whether the given mix result could be saved as a new swatch.
    ///
    /// The empty mix is never savable; an existing equivalent color makes
    /// the save a duplicate.
    pub fn is_savable(&self, mixed: &MixedColor) -> bool {
        match mixed.rgb() {
            Some(rgb) => !self.contains_color(rgb),
            None => false,
        }
    }

    /// Weighted colors for the mixer: every swatch with its parts as `f64`.
    pub fn mix_weights(&self) -> impl Iterator<Item = (Rgb, f64)> + '_ {
        self.swatches
            .values()
            .map(|swatch| (swatch.color, f64::from(swatch.parts_in_mix)))
    }

    /// Add one part of the given swatch to the mix.
    pub fn increment(&mut self, id: Uuid) -> Result<(), PaletteError> {
        let swatch = self
            .swatches
            .get_mut(&id)
            .ok_or(PaletteError::SwatchNotFound(id))?;
        swatch.parts_in_mix = swatch.parts_in_mix.saturating_add(1);
        Ok(())
    }

    /// Take one part of the given swatch out of the mix, flooring at zero.
    pub fn decrement(&mut self, id: Uuid) -> Result<(), PaletteError> {
        let swatch = self
            .swatches
            .get_mut(&id)
            .ok_or(PaletteError::SwatchNotFound(id))?;
        swatch.parts_in_mix = swatch.parts_in_mix.saturating_sub(1);
        Ok(())
    }

    /// Remove a swatch, preserving the order of the survivors.
    pub fn remove(&mut self, id: Uuid) -> Result<PigmentSwatch, PaletteError> {
        self.swatches
            .shift_remove(&id)
            .ok_or(PaletteError::SwatchNotFound(id))
    }

    /// Relabel a swatch; no other field is touched.
    pub fn rename(&mut self, id: Uuid, label: impl Into<String>) -> Result<(), PaletteError> {
        let swatch = self
            .swatches
            .get_mut(&id)
            .ok_or(PaletteError::SwatchNotFound(id))?;
        swatch.label = label.into();
        Ok(())
    }

    /// Append a new swatch for `color` with zero parts and an empty label.
    ///
    /// When `include_recipe` is set, the current nonzero swatches are
    /// snapshot as the new swatch's recipe. Returns the new swatch's id, or
    /// [`PaletteError::DuplicateColor`] without mutating anything if an
    /// equivalent color is already present.
    pub fn add_swatch(&mut self, color: Rgb, include_recipe: bool) -> Result<Uuid, PaletteError> {
        if self.contains_color(color) {
            return Err(PaletteError::DuplicateColor(color.to_hex()));
        }

        let recipe = include_recipe.then(|| {
            self.swatches
                .values()
                .filter(|swatch| swatch.parts_in_mix > 0)
                .map(|swatch| RecipeEntry {
                    label: swatch.label.clone(),
                    color: swatch.color,
                    parts_in_mix: swatch.parts_in_mix,
                })
                .collect()
        });

        let swatch = PigmentSwatch {
            id: Uuid::new_v4(),
            label: String::new(),
            color,
            parts_in_mix: 0,
            recipe,
        };
        let id = swatch.id;
        self.swatches.insert(id, swatch);
        Ok(id)
    }

    /// Set every swatch's parts to zero without changing membership.
    pub fn reset_mix(&mut self) {
        for swatch in self.swatches.values_mut() {
            swatch.parts_in_mix = 0;
        }
    }
}

impl From<&Palette> for PaletteEntity {
    fn from(palette: &Palette) -> Self {
        PaletteEntity {
            swatches: palette
                .iter()
                .map(|swatch| SwatchEntity {
                    id: swatch.id,
                    label: swatch.label.clone(),
                    rgb: swatch.color.to_string(),
                    parts_in_mix: swatch.parts_in_mix,
                    recipe: swatch.recipe.as_ref().map(|entries| {
                        entries
                            .iter()
                            .map(|entry| RecipeEntryEntity {
                                label: entry.label.clone(),
                                rgb: entry.color.to_string(),
                                parts_in_mix: entry.parts_in_mix,
                            })
                            .collect()
                    }),
                })
                .collect(),
        }
    }
}

impl TryFrom<PaletteEntity> for Palette {
    type Error = crate::color::ParseColorError;

    /// Rebuild the runtime palette from its persisted form. Any unparsable
    /// color makes the whole document malformed; the caller falls back to
    /// the default pigment set.
    fn try_from(entity: PaletteEntity) -> Result<Self, Self::Error> {
        let mut swatches = IndexMap::with_capacity(entity.swatches.len());
        for stored in entity.swatches {
            let color = Rgb::parse(&stored.rgb)?;
            let recipe = stored
                .recipe
                .map(|entries| {
                    entries
                        .into_iter()
                        .map(|entry| {
                            Ok(RecipeEntry {
                                label: entry.label,
                                color: Rgb::parse(&entry.rgb)?,
                                parts_in_mix: entry.parts_in_mix,
                            })
                        })
                        .collect::<Result<Vec<_>, Self::Error>>()
                })
                .transpose()?;

            swatches.insert(
                stored.id,
                PigmentSwatch {
                    id: stored.id,
                    label: stored.label,
                    color,
                    parts_in_mix: stored.parts_in_mix,
                    recipe,
                },
            );
        }
        Ok(Palette { swatches })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YELLOW: Rgb = Rgb::new(254, 236, 0);
    const BLUE: Rgb = Rgb::new(25, 0, 89);
    const RED: Rgb = Rgb::new(255, 39, 2);

    fn starter() -> Palette {
        Palette::from_seeds([("Cadmium Yellow", YELLOW), ("Ultramarine Blue", BLUE)])
    }

    fn id_at(palette: &Palette, position: usize) -> Uuid {
        palette.iter().nth(position).unwrap().id
    }

    #[test]
    fn seeds_start_with_zero_parts() {
        let palette = starter();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.total_parts(), 0);
        assert!(!palette.has_parts_in_mix());
    }

    #[test]
    fn increment_and_decrement_adjust_parts() {
        let mut palette = starter();
        let yellow = id_at(&palette, 0);

        palette.increment(yellow).unwrap();
        palette.increment(yellow).unwrap();
        assert_eq!(palette.get(yellow).unwrap().parts_in_mix, 2);
        assert_eq!(palette.total_parts(), 2);
        assert!(palette.has_parts_in_mix());

        palette.decrement(yellow).unwrap();
        assert_eq!(palette.get(yellow).unwrap().parts_in_mix, 1);
    }

    #[test]
    fn decrement_at_zero_stays_at_zero() {
        let mut palette = starter();
        let yellow = id_at(&palette, 0);

        palette.decrement(yellow).unwrap();
        assert_eq!(palette.get(yellow).unwrap().parts_in_mix, 0);
    }

    #[test]
    fn unknown_id_is_reported_without_mutation() {
        let mut palette = starter();
        let ghost = Uuid::new_v4();

        assert_eq!(
            palette.increment(ghost),
            Err(PaletteError::SwatchNotFound(ghost))
        );
        assert_eq!(
            palette.decrement(ghost),
            Err(PaletteError::SwatchNotFound(ghost))
        );
        assert_eq!(
            palette.rename(ghost, "x"),
            Err(PaletteError::SwatchNotFound(ghost))
        );
        assert!(palette.remove(ghost).is_err());
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.total_parts(), 0);
    }

    #[test]
    fn removing_first_swatch_preserves_order_of_rest() {
        let mut palette =
            Palette::from_seeds([("A", YELLOW), ("B", BLUE), ("C", RED)]);
        let first = id_at(&palette, 0);

        palette.remove(first).unwrap();

        let labels: Vec<&str> = palette.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["B", "C"]);
    }

    #[test]
    fn duplicate_color_is_rejected_without_growth() {
        let mut palette = starter();
        let before = palette.len();

        let result = palette.add_swatch(YELLOW, false);
        assert_eq!(
            result,
            Err(PaletteError::DuplicateColor("#feec00".to_string()))
        );
        assert_eq!(palette.len(), before);
    }

    #[test]
    fn added_swatch_starts_empty_and_unnamed() {
        let mut palette = starter();
        let id = palette.add_swatch(RED, false).unwrap();

        let swatch = palette.get(id).unwrap();
        assert_eq!(swatch.label, "");
        assert_eq!(swatch.parts_in_mix, 0);
        assert!(swatch.recipe.is_none());
        // Appended at the end: display order is insertion order.
        assert_eq!(id_at(&palette, 2), id);
    }

    #[test]
    fn recipe_snapshots_only_nonzero_swatches() {
        let mut palette = starter();
        let yellow = id_at(&palette, 0);
        palette.increment(yellow).unwrap();
        palette.increment(yellow).unwrap();

        let id = palette.add_swatch(RED, true).unwrap();
        let recipe = palette.get(id).unwrap().recipe.clone().unwrap();

        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe[0].label, "Cadmium Yellow");
        assert_eq!(recipe[0].color, YELLOW);
        assert_eq!(recipe[0].parts_in_mix, 2);
    }

    #[test]
    fn recipe_survives_removal_of_its_source() {
        let mut palette = starter();
        let yellow = id_at(&palette, 0);
        palette.increment(yellow).unwrap();

        let saved = palette.add_swatch(RED, true).unwrap();
        palette.remove(yellow).unwrap();

        let recipe = palette.get(saved).unwrap().recipe.clone().unwrap();
        assert_eq!(recipe[0].color, YELLOW);
    }

    #[test]
    fn reset_mix_zeroes_parts_but_keeps_membership() {
        let mut palette = starter();
        let yellow = id_at(&palette, 0);
        let blue = id_at(&palette, 1);
        palette.increment(yellow).unwrap();
        palette.increment(blue).unwrap();

        palette.reset_mix();

        assert_eq!(palette.len(), 2);
        assert_eq!(palette.total_parts(), 0);
        assert!(!palette.has_parts_in_mix());
    }

    #[test]
    fn savable_only_when_mix_is_new() {
        let mut palette = starter();
        assert!(!palette.is_savable(&MixedColor::EMPTY));
        assert!(palette.is_savable(&MixedColor::opaque(RED)));
        assert!(!palette.is_savable(&MixedColor::opaque(YELLOW)));

        palette.add_swatch(RED, false).unwrap();
        assert!(!palette.is_savable(&MixedColor::opaque(RED)));
    }

    #[test]
    fn entity_round_trip_preserves_everything() {
        let mut palette = starter();
        let yellow = id_at(&palette, 0);
        palette.increment(yellow).unwrap();
        let saved = palette.add_swatch(RED, true).unwrap();
        palette.rename(saved, "Mix of the day").unwrap();

        let entity = PaletteEntity::from(&palette);
        let restored = Palette::try_from(entity).unwrap();

        assert_eq!(restored.len(), palette.len());
        let restored_saved = restored.get(saved).unwrap();
        assert_eq!(restored_saved.label, "Mix of the day");
        assert_eq!(restored_saved.color, RED);
        assert_eq!(
            restored_saved.recipe,
            palette.get(saved).unwrap().recipe
        );
        let labels: Vec<&str> = restored.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Cadmium Yellow", "Ultramarine Blue", "Mix of the day"]);
    }

    #[test]
    fn malformed_entity_color_is_an_error() {
        let entity = PaletteEntity {
            swatches: vec![SwatchEntity {
                id: Uuid::new_v4(),
                label: "bad".into(),
                rgb: "rgb(banana)".into(),
                parts_in_mix: 0,
                recipe: None,
            }],
        };
        assert!(Palette::try_from(entity).is_err());
    }
}
