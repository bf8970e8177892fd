//! Asset listing and upload routes.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use hlsvault_common::{AssetKind, Error};
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{AppContext, AppError, API_PREFIX};
use crate::{ingest, library};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub asset: String,
    pub playlist: String,
}

/// URL the playlist of a VOD asset is served at.
pub fn playlist_url(asset: &str) -> String {
    format!("{}/{}/{}/stream", API_PREFIX, AssetKind::Vod.route(), asset)
}

pub async fn list_vod(State(ctx): State<AppContext>) -> Result<Json<Value>, AppError> {
    list(&ctx, AssetKind::Vod).await
}

pub async fn list_live(State(ctx): State<AppContext>) -> Result<Json<Value>, AppError> {
    list(&ctx, AssetKind::Live).await
}

async fn list(ctx: &AppContext, kind: AssetKind) -> Result<Json<Value>, AppError> {
    let names = library::list_assets(ctx.config.storage.root(kind)).await?;

    let mut body = Map::new();
    body.insert(kind.listing_key().to_string(), json!(names));
    Ok(Json(Value::Object(body)))
}

/// Accept a multipart upload and transcode it into a new VOD asset.
pub async fn upload(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut multipart = multipart.map_err(|e| Error::bad_input(e.body_text()))?;

    let received = ingest::receive_upload(&mut multipart, &ctx.config.storage.vod_root).await?;
    let asset = ingest::ingest_upload(&ctx.config, &ctx.cancel, received).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            playlist: playlist_url(&asset.name),
            asset: asset.name,
        }),
    ))
}
