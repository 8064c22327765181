use axum::body::Body;
use axum::extract::{OriginalUri, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use common::assets::STORAGE_ROUTE_PREFIX;
use tokio_util::io::ReaderStream;
use tracing::{debug, instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::utils::path::decode_request_path;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

fn not_found() -> AppError {
    AppError::NotFound("File not found".into())
}

/// Raw, still percent-encoded tail of a `/storage/...` request path.
fn raw_storage_tail(path: &str) -> &str {
    path.trim_start_matches('/')
        .strip_prefix(STORAGE_ROUTE_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or("")
}

#[utoipa::path(
    get,
    path = "/storage/{*path}",
    tag = "Storage",
    operation_id = "serveStorageFile",
    summary = "Stream a file from the storage disk",
    description = "Streams the bytes of a file stored on the configured storage disk. \
        The path is percent-decoded once; any `..` segment or null byte is rejected. \
        Every failure (unsafe path, missing file, unreadable file) is reported as 404.",
    params(("path" = String, Path, description = "Disk-relative file path")),
    responses(
        (status = 200, description = "File contents streamed with its MIME type and length"),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, uri), fields(path = %uri.path()))]
pub async fn serve_storage_file(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    let path = decode_request_path(raw_storage_tail(uri.path())).map_err(|e| {
        warn!(reason = e.message(), "Rejected storage request path");
        not_found()
    })?;

    if path.is_empty() {
        return Err(not_found());
    }

    match state.disk.exists(&path).await {
        Ok(true) => {}
        Ok(false) => {
            debug!(%path, "Storage file does not exist");
            return Err(not_found());
        }
        Err(e) => {
            debug!(%path, error = %e, "Storage existence check failed");
            return Err(not_found());
        }
    }

    let opened = state.disk.open_sized(&path).await.map_err(|e| {
        debug!(%path, error = %e, "Failed to open storage file");
        not_found()
    })?;

    let content_type = match state.disk.mime_type(&path).await {
        Ok(Some(mime)) => mime,
        Ok(None) => DEFAULT_CONTENT_TYPE.to_string(),
        Err(e) => {
            debug!(%path, error = %e, "MIME lookup failed");
            DEFAULT_CONTENT_TYPE.to_string()
        }
    };

    // The body owns the reader; dropping the body closes the file.
    let body = Body::from_stream(ReaderStream::new(opened.reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, opened.size.to_string())
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
