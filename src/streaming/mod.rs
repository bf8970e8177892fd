//! HLS streaming handlers.
//!
//! Serves index playlists and MPEG-TS segments straight from the storage
//! roots. No state is held between requests.
//!
//! # Routes
//!
//! For each asset kind (`assets` for VOD, `live` for live):
//! - `GET /{kind}/:name/stream` - Index playlist, segment references rewritten
//! - `GET /{kind}/:name/segment/:segment` - Media segment (`.ts` optional)

mod playlist;
mod segment;

pub use playlist::{playlist_response, PLAYLIST_CONTENT_TYPE};
pub use segment::{segment_response, SEGMENT_CONTENT_TYPE};

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use hlsvault_common::paths::safe_component;
use hlsvault_common::AssetKind;
use hlsvault_media::hls::segment_base_url;

use crate::library;
use crate::server::{AppContext, AppError, API_PREFIX};

/// Create the streaming router for one asset kind.
pub fn stream_router(kind: AssetKind) -> Router<AppContext> {
    let route = kind.route();
    Router::new()
        .route(
            &format!("/{route}/:name/stream"),
            get(
                move |State(ctx): State<AppContext>, Path(name): Path<String>| async move {
                    serve_playlist(ctx, kind, name).await
                },
            ),
        )
        .route(
            &format!("/{route}/:name/segment/:segment"),
            get(
                move |State(ctx): State<AppContext>,
                      Path((name, segment)): Path<(String, String)>| async move {
                    serve_segment(ctx, kind, name, segment).await
                },
            ),
        )
}

/// Serve the rewritten index playlist of an asset.
pub async fn serve_playlist(
    ctx: AppContext,
    kind: AssetKind,
    name: String,
) -> Result<Response, AppError> {
    let root = ctx.config.storage.root(kind);
    let path = library::resolve_playlist(root, &name).await?;
    let base = segment_base_url(API_PREFIX, kind, &safe_component(&name));
    Ok(playlist_response(&path, &base).await?)
}

/// Serve one segment of an asset.
pub async fn serve_segment(
    ctx: AppContext,
    kind: AssetKind,
    name: String,
    segment: String,
) -> Result<Response, AppError> {
    let root = ctx.config.storage.root(kind);
    let path = library::resolve_segment(root, &name, &segment).await?;
    let cache_control = ctx.config.cache.segment_cache_control(kind);
    Ok(segment_response(&path, kind, &cache_control).await?)
}
