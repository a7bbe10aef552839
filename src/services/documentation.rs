use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Paint Mixer Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::palette::get_studio,
        crate::routes::palette::add_swatch,
        crate::routes::palette::save_mix,
        crate::routes::palette::increment_swatch,
        crate::routes::palette::decrement_swatch,
        crate::routes::palette::remove_swatch,
        crate::routes::palette::rename_swatch,
        crate::routes::palette::reset_mix,
        crate::routes::mix::get_mix,
        crate::routes::mix::get_target,
        crate::routes::mix::set_target,
        crate::routes::mix::clear_target,
        crate::routes::sse::studio_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::palette::AddSwatchRequest,
            crate::dto::palette::RenameSwatchRequest,
            crate::dto::palette::PaletteSnapshot,
            crate::dto::palette::SwatchSummary,
            crate::dto::palette::RecipeEntrySnapshot,
            crate::dto::mix::MixSnapshot,
            crate::dto::mix::TargetColorInput,
            crate::dto::mix::TargetSnapshot,
            crate::dto::sse::Handshake,
            crate::dto::sse::SystemStatus,
            crate::dto::sse::StudioUpdate,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "palette", description = "Palette swatch operations"),
        (name = "mix", description = "Mix outcome and target color"),
        (name = "sse", description = "Server-sent events stream"),
    )
)]
pub struct ApiDoc;
