use axum::Json;
use axum::extract::State;
use common::media::{BlogMedia, BlogMediaUrls};
use tracing::instrument;

use crate::error::ErrorBody;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/urls",
    tag = "Media",
    operation_id = "resolveMediaUrls",
    summary = "Resolve the public URLs of a blog post's media",
    description = "Takes the stored media references of a blog post and returns the URLs \
        clients should use: thumbnail, playable video, video host embed and Open Graph image. \
        References that cannot be resolved come back as null.",
    request_body = BlogMedia,
    responses(
        (status = 200, description = "Resolved URLs", body = BlogMediaUrls),
        (status = 400, description = "Malformed body", body = ErrorBody),
    ),
)]
#[instrument(skip(state, media))]
pub async fn resolve_media_urls(
    State(state): State<AppState>,
    Json(media): Json<BlogMedia>,
) -> Json<BlogMediaUrls> {
    Json(media.urls(&state.resolver).await)
}
