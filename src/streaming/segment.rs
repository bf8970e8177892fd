//! Segment serving.
//!
//! Segments are streamed from disk in chunks via `ReaderStream`, so memory use
//! per request stays flat regardless of segment size.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use hlsvault_common::{AssetKind, Error, Result};
use std::path::Path;
use tokio_util::io::ReaderStream;

/// MIME type for MPEG transport stream segments.
pub const SEGMENT_CONTENT_TYPE: &str = "video/mp2t";

/// Stream a segment file with the given `Cache-Control` value.
///
/// VOD segments never change once encoded and carry a `Content-Length`.
/// Live segments may be rewritten by the producer while they are read, so
/// they are sent chunked without one.
pub async fn segment_response(
    path: &Path,
    kind: AssetKind,
    cache_control: &str,
) -> Result<Response> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| Error::storage(format!("opening segment {:?}", path), e))?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, SEGMENT_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, cache_control);

    if kind == AssetKind::Vod {
        let metadata = file
            .metadata()
            .await
            .map_err(|e| Error::storage(format!("stat segment {:?}", path), e))?;
        builder = builder.header(header::CONTENT_LENGTH, metadata.len());
    }

    builder
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| Error::internal(format!("building segment response: {e}")))
}
