use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use hlsvault_common::{Error, Result};
use hlsvault_media::hls::rewrite_playlist;
use std::path::Path;

/// MIME type for M3U8 playlists.
pub const PLAYLIST_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";

/// Read a stored playlist and serve it with its segment references pointing
/// at `base_segment_url`.
///
/// The playlist is handled as raw bytes, so text that is not valid UTF-8
/// (e.g. a Latin-1 title) is passed through untouched. Playlists are never
/// cached by clients, since live playlists change under the same name.
pub async fn playlist_response(path: &Path, base_segment_url: &str) -> Result<Response> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| Error::storage(format!("reading playlist {:?}", path), e))?;

    let body = rewrite_playlist(&content, base_segment_url);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(body))
        .map_err(|e| Error::internal(format!("building playlist response: {e}")))
}
