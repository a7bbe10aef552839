use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use validator::Validate;

use crate::{
    dto::mix::{MixSnapshot, TargetColorInput, TargetSnapshot},
    dto::sse::StudioUpdate,
    error::AppError,
    services::{mix_service, palette_service},
    state::SharedState,
};

/// Routes exposing the mix outcome and the target color lifecycle.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/mix", get(get_mix))
        .route(
            "/target",
            get(get_target).put(set_target).delete(clear_target),
        )
}

/// Return the current mix outcome and match score.
#[utoipa::path(
    get,
    path = "/mix",
    tag = "mix",
    responses((status = 200, description = "Current mix outcome", body = MixSnapshot))
)]
pub async fn get_mix(State(state): State<SharedState>) -> Json<MixSnapshot> {
    Json(mix_service::mix_snapshot(&state).await)
}

/// Return the current target color, when one is set.
#[utoipa::path(
    get,
    path = "/target",
    tag = "mix",
    responses(
        (status = 200, description = "Current target color", body = TargetSnapshot),
        (status = 204, description = "No target set")
    )
)]
pub async fn get_target(
    State(state): State<SharedState>,
) -> Result<Json<TargetSnapshot>, StatusCode> {
    match mix_service::target_snapshot(&state).await {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Err(StatusCode::NO_CONTENT),
    }
}

/// Set or replace the target color.
#[utoipa::path(
    put,
    path = "/target",
    tag = "mix",
    request_body = TargetColorInput,
    responses((status = 200, description = "Target set", body = StudioUpdate))
)]
pub async fn set_target(
    State(state): State<SharedState>,
    Json(payload): Json<TargetColorInput>,
) -> Result<Json<StudioUpdate>, AppError> {
    payload.validate()?;
    mix_service::set_target(&state, payload).await;
    Ok(Json(palette_service::snapshot(&state).await))
}

/// Clear the target color.
#[utoipa::path(
    delete,
    path = "/target",
    tag = "mix",
    responses((status = 200, description = "Target cleared", body = StudioUpdate))
)]
pub async fn clear_target(State(state): State<SharedState>) -> Json<StudioUpdate> {
    mix_service::clear_target(&state).await;
    Json(palette_service::snapshot(&state).await)
}
