use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{services::sse_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/sse/studio",
    tag = "sse",
    responses((status = 200, description = "Studio SSE stream", content_type = "text/event-stream", body = String))
)]
/// Stream realtime studio updates to connected frontends.
pub async fn studio_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe(&state);
    info!("New studio SSE connection");
    sse_service::broadcast_handshake(state.sse(), state.is_degraded());
    sse_service::to_sse_stream(receiver)
}

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/studio", get(studio_stream))
}
