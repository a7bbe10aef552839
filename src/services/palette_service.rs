//! Orchestration of every palette edit.
//!
//! Each operation follows the same causal order while holding the palette
//! write lock: mutate the palette, recompute the mixed color from the
//! post-edit palette, rescore against the target. Only then is the edit
//! persisted, broadcast, and (for colors that need one) a name lookup
//! scheduled. A mix computed from a stale palette is therefore impossible
//! to observe.
//!
//! Lock order everywhere: palette → target → mix.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    color::{Rgb, match_percentage, mix_palette},
    dao::models::PaletteEntity,
    dto::palette::AddSwatchRequest,
    dto::sse::StudioUpdate,
    error::ServiceError,
    services::{
        naming::{self, NameSlot},
        sse_events,
    },
    state::{Palette, PaletteError, SharedState},
};

/// Current studio view for the REST surface.
pub async fn snapshot(state: &SharedState) -> StudioUpdate {
    sse_events::studio_update(state).await
}

/// Add a color to the palette with zero parts and a pending name.
pub async fn add_swatch(
    state: &SharedState,
    request: AddSwatchRequest,
) -> Result<Uuid, ServiceError> {
    let color = Rgb::parse(&request.color)
        .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;

    let id = match apply_edit(state, |palette| {
        palette.add_swatch(color, request.include_recipe)
    })
    .await
    {
        Ok(id) => id,
        Err(err @ ServiceError::DuplicateColor(_)) => {
            // The duplicate rule is a silent no-op for the palette itself,
            // but the caller is told so the UI can react.
            info!(color = %color.to_hex(), "rejected duplicate palette color");
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    naming::schedule_lookup(state, NameSlot::Swatch(id), color);
    Ok(id)
}

/// Save the current mixed color into the palette, capturing its recipe.
pub async fn save_mix(state: &SharedState) -> Result<Uuid, ServiceError> {
    let mixed_rgb = {
        let mix = state.mix().read().await;
        mix.color.rgb().ok_or_else(|| {
            ServiceError::InvalidInput("nothing is mixed; add parts before saving".into())
        })?
    };

    let id = apply_edit(state, |palette| palette.add_swatch(mixed_rgb, true)).await?;
    naming::schedule_lookup(state, NameSlot::Swatch(id), mixed_rgb);
    Ok(id)
}

/// Add one part of a swatch to the mix.
pub async fn increment(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    apply_edit(state, |palette| palette.increment(id)).await
}

/// Take one part of a swatch out of the mix; already-zero stays zero.
pub async fn decrement(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    apply_edit(state, |palette| palette.decrement(id)).await
}

/// Remove a swatch from the palette entirely.
pub async fn remove(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    apply_edit(state, |palette| palette.remove(id).map(|_| ())).await?;
    // A lookup racing the removal must not resurrect the label.
    naming::cancel_lookup(state, NameSlot::Swatch(id));
    Ok(())
}

/// Rename a swatch. The manual label wins over any in-flight lookup.
pub async fn rename(state: &SharedState, id: Uuid, label: String) -> Result<(), ServiceError> {
    naming::cancel_lookup(state, NameSlot::Swatch(id));
    apply_edit(state, |palette| palette.rename(id, label)).await
}

/// Set every swatch's parts back to zero without touching membership.
pub async fn reset_mix(state: &SharedState) -> Result<(), ServiceError> {
    apply_edit(state, |palette| {
        palette.reset_mix();
        Ok(())
    })
    .await
}

/// Replace the in-memory palette with the persisted one, once, right after
/// the first storage connection. A missing document seeds the store with
/// the current (default) palette instead; a malformed one is ignored.
pub async fn hydrate_from_store(state: &SharedState) {
    let Some(store) = state.palette_store().await else {
        return;
    };

    match store.load_palette().await {
        Ok(Some(entity)) => match Palette::try_from(entity) {
            Ok(palette) => {
                {
                    let mut slot = state.palette().write().await;
                    *slot = palette;
                }
                refresh_mix(state).await;
                info!("palette hydrated from storage");
                sse_events::broadcast_studio_update(state).await;
            }
            Err(err) => {
                warn!(error = %err, "stored palette is malformed; keeping the seed palette");
            }
        },
        Ok(None) => {
            info!("no stored palette; seeding storage with the default set");
            let entity = {
                let palette = state.palette().read().await;
                PaletteEntity::from(&*palette)
            };
            persist(state, entity).await;
        }
        Err(err) => {
            warn!(error = %err, "failed to load stored palette");
        }
    }
}

/// Run one mutation through the full edit pipeline.
async fn apply_edit<T, F>(state: &SharedState, edit: F) -> Result<T, ServiceError>
where
    F: FnOnce(&mut Palette) -> Result<T, PaletteError>,
{
    let (value, entity, mix_change) = {
        let mut palette = state.palette().write().await;
        let value = edit(&mut palette)?;
        let mix_change = rescore_locked(state, &palette).await;
        (value, PaletteEntity::from(&*palette), mix_change)
    };

    persist(state, entity).await;

    match mix_change {
        MixChange::Unchanged => {}
        MixChange::NowEmpty => naming::cancel_lookup(state, NameSlot::Mix),
        MixChange::NewColor(rgb) => naming::schedule_lookup(state, NameSlot::Mix, rgb),
    }

    sse_events::broadcast_studio_update(state).await;
    Ok(value)
}

/// What happened to the mixed color during an edit.
enum MixChange {
    Unchanged,
    NowEmpty,
    NewColor(Rgb),
}

/// Recompute mix and match from the palette the caller has locked.
async fn rescore_locked(state: &SharedState, palette: &Palette) -> MixChange {
    let mixed = mix_palette(state.pigment_space(), palette.mix_weights());

    let target_rgb = {
        let target = state.target().read().await;
        target.as_ref().map(|target| target.rgb)
    };
    let score = match_percentage(mixed.rgb(), target_rgb);

    let mut mix = state.mix().write().await;
    let changed = mix.color != mixed;
    mix.color = mixed;
    mix.match_percentage = score;
    if !changed {
        return MixChange::Unchanged;
    }

    // The old name belongs to the old color.
    mix.name.clear();
    match mixed.rgb() {
        Some(rgb) => MixChange::NewColor(rgb),
        None => MixChange::NowEmpty,
    }
}

/// Recompute mix and match without a pending palette mutation (hydration,
/// target changes).
pub(crate) async fn refresh_mix(state: &SharedState) {
    let palette = state.palette().write().await;
    let mix_change = rescore_locked(state, &palette).await;
    drop(palette);

    match mix_change {
        MixChange::Unchanged => {}
        MixChange::NowEmpty => naming::cancel_lookup(state, NameSlot::Mix),
        MixChange::NewColor(rgb) => naming::schedule_lookup(state, NameSlot::Mix, rgb),
    }
}

/// Write the palette to storage; a failure never rolls back the edit.
async fn persist(state: &SharedState, entity: PaletteEntity) {
    match state.palette_store().await {
        Some(store) => {
            if let Err(err) = store.save_palette(entity).await {
                warn!(error = %err, "failed to persist palette; in-memory state kept");
            }
        }
        None => {
            debug!("no palette store installed; edit kept in memory only");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{
        color::PigmentSpace,
        config::AppConfig,
        dao::palette_store::{PaletteStore, file::FilePaletteStore},
    };

    /// Deterministic subtractive double standing in for the pretrained
    /// model: the latent vector is per-channel absorption.
    struct AbsorptionSpace;

    impl PigmentSpace for AbsorptionSpace {
        fn rgb_to_latent(&self, rgb: Rgb) -> Vec<f32> {
            vec![
                1.0 - f32::from(rgb.r) / 255.0,
                1.0 - f32::from(rgb.g) / 255.0,
                1.0 - f32::from(rgb.b) / 255.0,
            ]
        }

        fn latent_to_rgb(&self, latent: &[f32]) -> Rgb {
            let channel = |absorption: f32| ((1.0 - absorption) * 255.0).round() as u8;
            Rgb::new(channel(latent[0]), channel(latent[1]), channel(latent[2]))
        }
    }

    fn test_state() -> SharedState {
        crate::state::AppState::with_pigment_space(
            AppConfig::default(),
            Arc::new(AbsorptionSpace),
        )
    }

    async fn id_of(state: &SharedState, label: &str) -> Uuid {
        let palette = state.palette().read().await;
        palette
            .iter()
            .find(|swatch| swatch.label == label)
            .unwrap_or_else(|| panic!("no seed swatch `{label}`"))
            .id
    }

    #[tokio::test]
    async fn edits_recompute_the_mix_in_causal_order() {
        let state = test_state();
        let yellow = id_of(&state, "Cadmium Yellow").await;
        let blue = id_of(&state, "Ultramarine Blue").await;

        assert!(state.mix().read().await.color.is_empty());

        increment(&state, yellow).await.unwrap();
        increment(&state, blue).await.unwrap();

        let mix = state.mix().read().await;
        let rgb = mix.color.rgb().expect("two pigments mixed");
        assert_ne!(rgb, Rgb::new(254, 236, 0));
        assert_ne!(rgb, Rgb::new(25, 0, 89));
    }

    #[tokio::test]
    async fn reset_empties_the_mix_again() {
        let state = test_state();
        let yellow = id_of(&state, "Cadmium Yellow").await;

        increment(&state, yellow).await.unwrap();
        assert!(!state.mix().read().await.color.is_empty());

        reset_mix(&state).await.unwrap();
        assert!(state.mix().read().await.color.is_empty());
        assert_eq!(state.palette().read().await.len(), AppConfig::default().seed_palette().len());
    }

    #[tokio::test]
    async fn duplicate_add_is_rejected_and_reported() {
        let state = test_state();
        let before = state.palette().read().await.len();

        let result = add_swatch(
            &state,
            AddSwatchRequest {
                color: "rgb(254, 236, 0)".into(),
                include_recipe: false,
            },
        )
        .await;

        assert!(matches!(result, Err(ServiceError::DuplicateColor(_))));
        assert_eq!(state.palette().read().await.len(), before);
    }

    #[tokio::test]
    async fn unknown_swatch_is_reported_not_ignored() {
        let state = test_state();
        let ghost = Uuid::new_v4();
        let result = increment(&state, ghost).await;
        assert!(matches!(result, Err(ServiceError::SwatchNotFound(id)) if id == ghost));
    }

    #[tokio::test]
    async fn save_mix_captures_the_recipe() {
        let state = test_state();
        let yellow = id_of(&state, "Cadmium Yellow").await;
        let blue = id_of(&state, "Ultramarine Blue").await;

        increment(&state, yellow).await.unwrap();
        increment(&state, blue).await.unwrap();

        let saved = save_mix(&state).await.unwrap();

        let palette = state.palette().read().await;
        let recipe = palette.get(saved).unwrap().recipe.clone().unwrap();
        assert_eq!(recipe.len(), 2);
        assert!(recipe.iter().all(|entry| entry.parts_in_mix == 1));
    }

    #[tokio::test]
    async fn save_mix_with_empty_mix_is_invalid_input() {
        let state = test_state();
        let result = save_mix(&state).await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn edits_persist_through_the_installed_store() {
        let state = test_state();
        let dir = std::env::temp_dir().join(format!("paint-mixer-svc-{}", Uuid::new_v4()));
        let store = FilePaletteStore::connect(dir.join("palette.json"))
            .await
            .unwrap();
        state.install_palette_store(Arc::new(store.clone())).await;

        let yellow = id_of(&state, "Cadmium Yellow").await;
        increment(&state, yellow).await.unwrap();

        let stored = store.load_palette().await.unwrap().unwrap();
        let stored_yellow = stored
            .swatches
            .iter()
            .find(|swatch| swatch.id == yellow)
            .unwrap();
        assert_eq!(stored_yellow.parts_in_mix, 1);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn hydration_replaces_the_seed_palette_once() {
        let state = test_state();
        let dir = std::env::temp_dir().join(format!("paint-mixer-hyd-{}", Uuid::new_v4()));
        let store = FilePaletteStore::connect(dir.join("palette.json"))
            .await
            .unwrap();

        // Persist a one-swatch palette, then hydrate a fresh state from it.
        let mut palette = Palette::default();
        palette.add_swatch(Rgb::new(1, 2, 3), false).unwrap();
        store
            .save_palette(PaletteEntity::from(&palette))
            .await
            .unwrap();

        state.install_palette_store(Arc::new(store)).await;
        hydrate_from_store(&state).await;

        assert_eq!(state.palette().read().await.len(), 1);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
