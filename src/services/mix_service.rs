//! Mix/match read models and the target color lifecycle.
//!
//! The target is independent of the palette: it is set from a picker,
//! compared against whatever is currently mixed, and can be cleared without
//! touching any swatch.

use crate::{
    color::{hsva_to_rgb, match_percentage},
    dto::mix::{MixSnapshot, TargetColorInput, TargetSnapshot},
    services::{
        naming::{self, NameSlot},
        sse_events,
    },
    state::{SharedState, TargetState},
};

/// The current mix outcome.
pub async fn mix_snapshot(state: &SharedState) -> MixSnapshot {
    let mix = state.mix().read().await;
    MixSnapshot::from(&*mix)
}

/// The current target, if one is set.
pub async fn target_snapshot(state: &SharedState) -> Option<TargetSnapshot> {
    let target = state.target().read().await;
    target.as_ref().map(TargetSnapshot::from)
}

/// Set (or replace) the target color and rescore the current mix against
/// it. The target's display name resolves asynchronously.
pub async fn set_target(state: &SharedState, input: TargetColorInput) {
    let hsva = input.into();
    let rgb = hsva_to_rgb(hsva);

    {
        let mut target = state.target().write().await;
        *target = Some(TargetState {
            hsva,
            rgb,
            name: String::new(),
        });

        // Same mix, new opponent: only the score moves. Lock order is
        // target → mix, as everywhere else.
        let mut mix = state.mix().write().await;
        mix.match_percentage = match_percentage(mix.color.rgb(), Some(rgb));
    }

    naming::schedule_lookup(state, NameSlot::Target, rgb);
    sse_events::broadcast_studio_update(state).await;
}

/// Drop the target; the match score falls back to the defined 0.
pub async fn clear_target(state: &SharedState) {
    {
        let mut target = state.target().write().await;
        target.take();

        let mut mix = state.mix().write().await;
        mix.match_percentage = match_percentage(mix.color.rgb(), None);
    }

    naming::cancel_lookup(state, NameSlot::Target);
    sse_events::broadcast_studio_update(state).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{
        color::{PigmentSpace, Rgb},
        config::AppConfig,
        services::palette_service,
        state::{AppState, SharedState},
    };

    /// Identity-on-singles double: latent is the raw channel triple.
    struct LinearSpace;

    impl PigmentSpace for LinearSpace {
        fn rgb_to_latent(&self, rgb: Rgb) -> Vec<f32> {
            vec![f32::from(rgb.r), f32::from(rgb.g), f32::from(rgb.b)]
        }

        fn latent_to_rgb(&self, latent: &[f32]) -> Rgb {
            Rgb::new(
                latent[0].round() as u8,
                latent[1].round() as u8,
                latent[2].round() as u8,
            )
        }
    }

    fn test_state() -> SharedState {
        AppState::with_pigment_space(AppConfig::default(), Arc::new(LinearSpace))
    }

    async fn white_id(state: &SharedState) -> uuid::Uuid {
        let palette = state.palette().read().await;
        palette
            .iter()
            .find(|swatch| swatch.label == "Titanium White")
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn matching_target_scores_a_perfect_100() {
        let state = test_state();
        let white = white_id(&state).await;
        palette_service::increment(&state, white).await.unwrap();

        // Zero saturation at full value is white, same as the mix.
        set_target(
            &state,
            TargetColorInput {
                h: 0.0,
                s: 0.0,
                v: 1.0,
                a: 1.0,
            },
        )
        .await;

        let mix = state.mix().read().await;
        assert_eq!(mix.match_percentage, 100.0);
    }

    #[tokio::test]
    async fn empty_mix_scores_zero_against_any_target() {
        let state = test_state();
        set_target(
            &state,
            TargetColorInput {
                h: 214.0,
                s: 0.43,
                v: 0.9,
                a: 1.0,
            },
        )
        .await;

        let mix = state.mix().read().await;
        assert!(mix.color.is_empty());
        assert_eq!(mix.match_percentage, 0.0);
    }

    #[tokio::test]
    async fn clearing_the_target_resets_the_score() {
        let state = test_state();
        let white = white_id(&state).await;
        palette_service::increment(&state, white).await.unwrap();
        set_target(
            &state,
            TargetColorInput {
                h: 0.0,
                s: 0.0,
                v: 1.0,
                a: 1.0,
            },
        )
        .await;
        assert_eq!(state.mix().read().await.match_percentage, 100.0);

        clear_target(&state).await;
        assert!(target_snapshot(&state).await.is_none());
        assert_eq!(state.mix().read().await.match_percentage, 0.0);
    }

    #[tokio::test]
    async fn palette_edits_rescore_against_the_standing_target() {
        let state = test_state();
        set_target(
            &state,
            TargetColorInput {
                h: 0.0,
                s: 0.0,
                v: 1.0,
                a: 1.0,
            },
        )
        .await;
        assert_eq!(state.mix().read().await.match_percentage, 0.0);

        // Mutation → mix → match: adding white must lift the score to 100.
        let white = white_id(&state).await;
        palette_service::increment(&state, white).await.unwrap();
        assert_eq!(state.mix().read().await.match_percentage, 100.0);
    }
}
