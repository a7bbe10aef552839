use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::{mix::MixSnapshot, mix::TargetSnapshot, palette::PaletteSnapshot};

#[derive(Clone, Debug)]
/// Dispatched payload carried across the SSE channel.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Whether the backend is running without a storage backend connection.
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the backend enters or leaves degraded mode.
pub struct SystemStatus {
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast after every palette, mix or target change: the full studio
/// view a presentation client needs to re-render.
pub struct StudioUpdate {
    /// When this update was emitted (RFC 3339).
    pub at: String,
    /// The palette in display order.
    pub palette: PaletteSnapshot,
    /// The current mix outcome and match score.
    pub mix: MixSnapshot,
    /// The target color, when one is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetSnapshot>,
}
