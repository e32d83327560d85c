use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, Path},
    http::{Response, StatusCode, header},
    response::IntoResponse,
};

use crate::library::Library;

/// Serve a file below the library root verbatim. The catalog never links
/// anything but images here, but the route itself does no extension
/// filtering.
pub async fn fetch_image(
    Path(path): Path<String>,
    Extension(library): Extension<Arc<Library>>,
) -> Result<impl IntoResponse, StatusCode> {
    let file_path = library.root().join(&path);

    let data = tokio::fs::read(&file_path).await.map_err(|e| {
        warn!("error read {}: {e}", file_path.display());
        StatusCode::NOT_FOUND
    })?;

    let mime = mime_guess::from_path(&file_path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, data.len())
        .header(header::CACHE_CONTROL, "max-age=864000")
        .body(Body::from(data))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
