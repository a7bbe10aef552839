use std::time::SystemTime;

use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        format_system_time,
        mix::{MixSnapshot, TargetSnapshot},
        palette::PaletteSnapshot,
        sse::{ServerEvent, StudioUpdate, SystemStatus},
    },
    state::SharedState,
};

const EVENT_STUDIO: &str = "studio";
const EVENT_SYSTEM_STATUS: &str = "system_status";

/// Capture the full studio view: palette, mix outcome and target.
///
/// Locks are taken in palette → target → mix order, the same order the
/// mutation path uses, so snapshotting can never deadlock against an edit.
pub async fn studio_update(state: &SharedState) -> StudioUpdate {
    let palette = state.palette().read().await;
    let target = state.target().read().await;
    let mix = state.mix().read().await;

    let is_savable = palette.is_savable(&mix.color);
    StudioUpdate {
        at: format_system_time(SystemTime::now()),
        palette: PaletteSnapshot::capture(&palette, is_savable),
        mix: MixSnapshot::from(&*mix),
        target: target.as_ref().map(TargetSnapshot::from),
    }
}

/// Broadcast the current studio view to every SSE subscriber.
pub async fn broadcast_studio_update(state: &SharedState) {
    let update = studio_update(state).await;
    send_public_event(state, EVENT_STUDIO, &update);
}

/// Broadcast a degraded-mode flip.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    send_public_event(state, EVENT_SYSTEM_STATUS, &SystemStatus { degraded });
}

fn send_public_event<T: Serialize>(state: &SharedState, event: &str, payload: &T) {
    match ServerEvent::json(event.to_string(), payload) {
        Ok(event) => state.sse().broadcast(event),
        Err(err) => warn!(error = %err, event, "failed to serialize SSE payload"),
    }
}
