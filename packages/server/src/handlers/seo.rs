use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::seo::SeoSettingsResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "SEO",
    operation_id = "getSeoSettings",
    summary = "Current site-wide SEO settings",
    description = "Returns the cached SEO settings, creating the defaults on first use, \
        together with the resolved default Open Graph image URL.",
    responses(
        (status = 200, description = "SEO settings", body = SeoSettingsResponse),
        (status = 500, description = "Settings could not be loaded (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_seo_settings(
    State(state): State<AppState>,
) -> Result<Json<SeoSettingsResponse>, AppError> {
    let settings = state
        .seo_cache
        .current(&*state.seo_store, &state.config.app.name)
        .await?;

    let default_og_image_url = settings.default_og_image_url(&state.resolver).await;

    Ok(Json(SeoSettingsResponse {
        settings: (*settings).clone(),
        default_og_image_url,
    }))
}
