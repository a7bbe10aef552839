//! Debounced, supersedable resolution of human color names.
//!
//! Every color shown to the user (swatches added from the picker, the mixed
//! color, the target) gets its display name from an external reverse-lookup
//! API. The API is slow and unreliable compared to palette edits, so each
//! logical field keeps a generation counter: a scheduled lookup only lands
//! if no newer lookup for the same field was scheduled while it slept or
//! was in flight. Failures always resolve to an empty name.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    color::Rgb,
    services::sse_events,
    state::SharedState,
};

/// Logical field a name lookup resolves into. Lookups for different slots
/// never supersede each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameSlot {
    /// The label of a specific swatch.
    Swatch(Uuid),
    /// The display name of the current mixed color.
    Mix,
    /// The display name of the target color.
    Target,
}

/// Response shape of the name API: `{"name": {"value": "..."}}`.
#[derive(Debug, Deserialize)]
struct NameResponse {
    name: NameValue,
}

#[derive(Debug, Deserialize)]
struct NameValue {
    value: String,
}

/// Ask the external API for the display name of a color.
///
/// `hex_digits` is the canonical hex form without the leading `#`. Any
/// network error, timeout, non-success status or unparsable payload
/// resolves to an empty string; the caller never sees a failure.
pub async fn fetch_color_name(
    client: &Client,
    base_url: &str,
    hex_digits: &str,
    timeout: Duration,
) -> String {
    let url = format!("{}/id?hex={}", base_url.trim_end_matches('/'), hex_digits);

    let response = match client.get(&url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, hex = hex_digits, "color name request failed");
            return String::new();
        }
    };

    if !response.status().is_success() {
        warn!(status = %response.status(), hex = hex_digits, "color name request rejected");
        return String::new();
    }

    match response.json::<NameResponse>().await {
        Ok(payload) => payload.name.value,
        Err(err) => {
            warn!(error = %err, hex = hex_digits, "color name response unparsable");
            String::new()
        }
    }
}

/// Schedule a name resolution for `slot`, superseding any pending one.
///
/// The lookup fires after the configured debounce window, so a burst of
/// palette edits produces a single request for the final color. A stale
/// response (older generation) is dropped on arrival and never overwrites
/// the field.
pub fn schedule_lookup(state: &SharedState, slot: NameSlot, rgb: Rgb) {
    let generation = bump_generation(state, slot);
    let state = state.clone();

    tokio::spawn(async move {
        sleep(state.config().naming().debounce()).await;
        if !is_current(&state, slot, generation) {
            // Superseded while debouncing; skip the request entirely.
            return;
        }

        let naming = state.config().naming();
        let name = fetch_color_name(
            state.naming_client(),
            &naming.base_url,
            &rgb.hex_digits(),
            naming.timeout(),
        )
        .await;

        if !is_current(&state, slot, generation) {
            debug!(?slot, "dropping name for superseded lookup");
            return;
        }
        if name.is_empty() {
            return;
        }

        apply_name(&state, slot, name).await;
        sse_events::broadcast_studio_update(&state).await;
    });
}

/// Drop any pending lookup for `slot` without scheduling a new one. Used
/// when the field itself goes away (swatch removed, target cleared).
pub fn cancel_lookup(state: &SharedState, slot: NameSlot) {
    bump_generation(state, slot);
    if let NameSlot::Swatch(_) = slot {
        state.name_generations().remove(&slot);
    }
}

fn bump_generation(state: &SharedState, slot: NameSlot) -> u64 {
    let mut entry = state.name_generations().entry(slot).or_insert(0);
    *entry += 1;
    *entry
}

fn is_current(state: &SharedState, slot: NameSlot, generation: u64) -> bool {
    state
        .name_generations()
        .get(&slot)
        .is_some_and(|current| *current == generation)
}

pub(crate) async fn apply_name(state: &SharedState, slot: NameSlot, name: String) {
    match slot {
        NameSlot::Swatch(id) => {
            let mut palette = state.palette().write().await;
            // Only fill a label the user has not touched; a manual rename
            // wins over a late lookup. A removed swatch is simply gone.
            let still_unnamed = palette.get(id).is_some_and(|swatch| swatch.label.is_empty());
            if still_unnamed {
                let _ = palette.rename(id, name);
            }
        }
        NameSlot::Mix => {
            let mut mix = state.mix().write().await;
            mix.name = name;
        }
        NameSlot::Target => {
            let mut target = state.target().write().await;
            if let Some(target) = target.as_mut() {
                target.name = name;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[tokio::test]
    async fn unreachable_api_resolves_to_empty_name() {
        let client = Client::new();
        let name = fetch_color_name(
            &client,
            "http://127.0.0.1:9",
            "feec00",
            Duration::from_millis(200),
        )
        .await;
        assert_eq!(name, "");
    }

    #[tokio::test]
    async fn newer_lookup_supersedes_older_generation() {
        let state = AppState::new(AppConfig::default());
        let slot = NameSlot::Mix;

        let first = bump_generation(&state, slot);
        assert!(is_current(&state, slot, first));

        let second = bump_generation(&state, slot);
        assert!(!is_current(&state, slot, first));
        assert!(is_current(&state, slot, second));
    }

    #[tokio::test]
    async fn cancel_invalidates_pending_lookup() {
        let state = AppState::new(AppConfig::default());
        let slot = NameSlot::Target;

        let pending = bump_generation(&state, slot);
        cancel_lookup(&state, slot);
        assert!(!is_current(&state, slot, pending));
    }

    #[tokio::test]
    async fn manual_label_wins_over_late_lookup() {
        let state = AppState::new(AppConfig::default());
        let id = {
            let palette = state.palette().read().await;
            palette.iter().next().unwrap().id
        };

        // The seed swatch already has a label; a late lookup must not
        // overwrite it.
        apply_name(&state, NameSlot::Swatch(id), "Lemon Fizz".to_string()).await;

        let palette = state.palette().read().await;
        assert_eq!(palette.get(id).unwrap().label, "Cadmium Yellow");
    }
}
