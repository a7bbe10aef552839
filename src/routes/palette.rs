use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::palette::{AddSwatchRequest, RenameSwatchRequest},
    dto::sse::StudioUpdate,
    error::AppError,
    services::palette_service,
    state::SharedState,
};

/// Routes handling palette swatch operations.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/studio", get(get_studio))
        .route("/palette/swatches", post(add_swatch))
        .route("/palette/save-mix", post(save_mix))
        .route("/palette/swatches/{id}/increment", post(increment_swatch))
        .route("/palette/swatches/{id}/decrement", post(decrement_swatch))
        .route("/palette/swatches/{id}", delete(remove_swatch))
        .route("/palette/swatches/{id}/label", put(rename_swatch))
        .route("/palette/reset", post(reset_mix))
}

/// Return the full studio view: palette, mix outcome and target.
#[utoipa::path(
    get,
    path = "/studio",
    tag = "palette",
    responses((status = 200, description = "Current studio state", body = StudioUpdate))
)]
pub async fn get_studio(State(state): State<SharedState>) -> Json<StudioUpdate> {
    Json(palette_service::snapshot(&state).await)
}

/// Add a color to the palette.
#[utoipa::path(
    post,
    path = "/palette/swatches",
    tag = "palette",
    request_body = AddSwatchRequest,
    responses(
        (status = 200, description = "Swatch added", body = StudioUpdate),
        (status = 409, description = "Color already in the palette")
    )
)]
pub async fn add_swatch(
    State(state): State<SharedState>,
    Json(payload): Json<AddSwatchRequest>,
) -> Result<Json<StudioUpdate>, AppError> {
    payload.validate()?;
    palette_service::add_swatch(&state, payload).await?;
    Ok(Json(palette_service::snapshot(&state).await))
}

/// Save the current mixed color as a new swatch, with its recipe.
#[utoipa::path(
    post,
    path = "/palette/save-mix",
    tag = "palette",
    responses(
        (status = 200, description = "Mixed color saved", body = StudioUpdate),
        (status = 400, description = "Nothing is mixed"),
        (status = 409, description = "Mixed color already in the palette")
    )
)]
pub async fn save_mix(
    State(state): State<SharedState>,
) -> Result<Json<StudioUpdate>, AppError> {
    palette_service::save_mix(&state).await?;
    Ok(Json(palette_service::snapshot(&state).await))
}

/// Add one part of a swatch to the mix.
#[utoipa::path(
    post,
    path = "/palette/swatches/{id}/increment",
    tag = "palette",
    params(("id" = Uuid, Path, description = "Swatch identifier")),
    responses(
        (status = 200, description = "Part added", body = StudioUpdate),
        (status = 404, description = "Unknown swatch")
    )
)]
pub async fn increment_swatch(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudioUpdate>, AppError> {
    palette_service::increment(&state, id).await?;
    Ok(Json(palette_service::snapshot(&state).await))
}

/// Take one part of a swatch out of the mix.
#[utoipa::path(
    post,
    path = "/palette/swatches/{id}/decrement",
    tag = "palette",
    params(("id" = Uuid, Path, description = "Swatch identifier")),
    responses(
        (status = 200, description = "Part removed", body = StudioUpdate),
        (status = 404, description = "Unknown swatch")
    )
)]
pub async fn decrement_swatch(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudioUpdate>, AppError> {
    palette_service::decrement(&state, id).await?;
    Ok(Json(palette_service::snapshot(&state).await))
}

/// Remove a swatch from the palette.
#[utoipa::path(
    delete,
    path = "/palette/swatches/{id}",
    tag = "palette",
    params(("id" = Uuid, Path, description = "Swatch identifier")),
    responses(
        (status = 200, description = "Swatch removed", body = StudioUpdate),
        (status = 404, description = "Unknown swatch")
    )
)]
pub async fn remove_swatch(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudioUpdate>, AppError> {
    palette_service::remove(&state, id).await?;
    Ok(Json(palette_service::snapshot(&state).await))
}

/// Rename a swatch.
#[utoipa::path(
    put,
    path = "/palette/swatches/{id}/label",
    tag = "palette",
    params(("id" = Uuid, Path, description = "Swatch identifier")),
    request_body = RenameSwatchRequest,
    responses(
        (status = 200, description = "Swatch renamed", body = StudioUpdate),
        (status = 404, description = "Unknown swatch")
    )
)]
pub async fn rename_swatch(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RenameSwatchRequest>,
) -> Result<Json<StudioUpdate>, AppError> {
    payload.validate()?;
    palette_service::rename(&state, id, payload.label).await?;
    Ok(Json(palette_service::snapshot(&state).await))
}

/// Set every swatch's parts back to zero.
#[utoipa::path(
    post,
    path = "/palette/reset",
    tag = "palette",
    responses((status = 200, description = "Mix reset", body = StudioUpdate))
)]
pub async fn reset_mix(State(state): State<SharedState>) -> Result<Json<StudioUpdate>, AppError> {
    palette_service::reset_mix(&state).await?;
    Ok(Json(palette_service::snapshot(&state).await))
}
