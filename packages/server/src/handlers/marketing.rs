use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::marketing::MarketingUrlResponse;
use crate::state::AppState;
use crate::utils::path::contains_parent_segment;

#[utoipa::path(
    get,
    path = "/{*path}",
    tag = "Marketing",
    operation_id = "marketingAssetUrl",
    summary = "Resolve a marketing image URL",
    description = "Returns the local URL when the image is bundled under the public root, \
        otherwise the URL on the configured marketing asset host.",
    params(("path" = String, Path, description = "Path relative to the marketing image directory")),
    responses(
        (status = 200, description = "Resolved URL", body = MarketingUrlResponse),
        (status = 400, description = "Invalid path (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn marketing_asset_url(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<MarketingUrlResponse>, AppError> {
    if contains_parent_segment(&path.replace('\\', "/")) || path.contains('\0') {
        return Err(AppError::Validation("Invalid marketing asset path".into()));
    }

    let url = state.marketing.url(&path).await;
    Ok(Json(MarketingUrlResponse { url }))
}
