//! Upload ingest.
//!
//! Receives a source video (over HTTP multipart or from a local file), places
//! it under `<vod_root>/<asset>/source.<ext>` and transcodes it to HLS next to
//! it. The encoder writes into a hidden staging directory inside the asset
//! directory; its output is moved into place only after a successful encode,
//! so a failed run never touches a previously encoded asset of the same name.

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use hlsvault_av::actions::{encode_hls, HlsEncodeOptions};
use hlsvault_av::tools::get_tool_path;
use hlsvault_common::paths::{safe_component, sanitize_name, INDEX_PLAYLIST};
use hlsvault_common::{Error, Result};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, EncoderConfig};

/// Multipart field carrying the video.
pub const FILE_FIELD: &str = "file";
/// Optional multipart field carrying the requested asset name.
pub const NAME_FIELD: &str = "name";

const SOURCE_STEM: &str = "source";
const FALLBACK_EXTENSION: &str = "bin";

/// An upload spooled to disk but not yet placed in an asset directory.
///
/// The temp file is removed if this is dropped before being placed.
#[derive(Debug)]
pub struct ReceivedUpload {
    temp: TempPath,
    /// Client-side file name of the `file` field, if sent.
    pub file_name: Option<String>,
    /// Value of the `name` field, if sent.
    pub name: Option<String>,
}

/// A successfully encoded asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedAsset {
    pub name: String,
    pub playlist: PathBuf,
    /// The retained source file, `None` when sources are not kept.
    pub source: Option<PathBuf>,
}

/// Read the multipart form, spooling the `file` field into a hidden temp
/// file inside `vod_root`.
pub async fn receive_upload(multipart: &mut Multipart, vod_root: &Path) -> Result<ReceivedUpload> {
    tokio::fs::create_dir_all(vod_root)
        .await
        .map_err(|e| Error::storage(format!("creating {:?}", vod_root), e))?;

    let mut received: Option<(TempPath, Option<String>)> = None;
    let mut name = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::bad_input(format!("malformed multipart form: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some(FILE_FIELD) if received.is_none() => {
                let file_name = field.file_name().map(str::to_string);
                let temp = tempfile::Builder::new()
                    .prefix(".upload-")
                    .tempfile_in(vod_root)
                    .map_err(|e| Error::storage("creating upload temp file", e))?;
                let (file, temp) = temp.into_parts();
                let mut out = tokio::fs::File::from_std(file);

                let mut bytes = 0usize;
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| Error::bad_input(format!("reading upload: {e}")))?
                {
                    bytes += chunk.len();
                    out.write_all(&chunk)
                        .await
                        .map_err(|e| Error::storage("writing upload", e))?;
                }
                out.flush()
                    .await
                    .map_err(|e| Error::storage("writing upload", e))?;

                tracing::debug!("Received upload {:?} ({} bytes)", file_name, bytes);
                received = Some((temp, file_name));
            }
            Some(NAME_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::bad_input(format!("reading name field: {e}")))?;
                name = Some(text);
            }
            _ => {}
        }
    }

    let (temp, file_name) =
        received.ok_or_else(|| Error::bad_input("missing 'file' field in upload"))?;

    Ok(ReceivedUpload {
        temp,
        file_name,
        name,
    })
}

/// Pick the asset name for an upload.
///
/// Uses the trimmed `name` field when present, otherwise the stem of the
/// uploaded file name. Falls back to `upload-<unix seconds>` when neither
/// yields a usable name.
pub fn asset_name(requested: Option<&str>, file_name: Option<&str>) -> String {
    let requested = requested.map(str::trim).filter(|n| !n.is_empty());

    let candidate = match requested {
        Some(name) => sanitize_name(name),
        None => file_name
            .map(safe_component)
            .and_then(|f| {
                Path::new(&f)
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
            })
            .map(|stem| sanitize_name(&stem))
            .unwrap_or_default(),
    };

    if candidate.is_empty() {
        fallback_asset_name()
    } else {
        candidate
    }
}

fn fallback_asset_name() -> String {
    format!("upload-{}", chrono::Utc::now().timestamp())
}

/// `source.<ext>` with the extension of the uploaded file, or `source.bin`.
pub fn source_file_name(file_name: Option<&str>) -> String {
    let ext = file_name
        .map(safe_component)
        .and_then(|f| {
            Path::new(&f)
                .extension()
                .map(|e| e.to_string_lossy().to_string())
        })
        .map(|e| sanitize_name(&e))
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

    format!("{SOURCE_STEM}.{ext}")
}

/// Locate the encoder, honouring `tools.ffmpeg_path`.
pub fn resolve_encoder(config: &Config) -> Result<PathBuf> {
    Ok(get_tool_path("ffmpeg", config.tools.ffmpeg_path.as_deref())?)
}

/// Encoder settings from configuration.
pub fn encode_options(encoder: &EncoderConfig) -> HlsEncodeOptions {
    HlsEncodeOptions {
        video_codec: encoder.video_codec.clone(),
        audio_codec: encoder.audio_codec.clone(),
        segment_duration_secs: encoder.segment_duration_secs,
        timeout: encoder.timeout(),
    }
}

/// Place a received upload into the VOD root and encode it.
pub async fn ingest_upload(
    config: &Config,
    cancel: &CancellationToken,
    upload: ReceivedUpload,
) -> Result<IngestedAsset> {
    let name = asset_name(upload.name.as_deref(), upload.file_name.as_deref());
    let ffmpeg = resolve_encoder(config)?;

    let asset_dir = create_asset_dir(config, &name).await?;
    let source = asset_dir.join(source_file_name(upload.file_name.as_deref()));
    upload
        .temp
        .persist(&source)
        .map_err(|e| Error::storage(format!("moving upload to {:?}", source), e.error))?;

    tracing::info!("Stored upload for asset '{}' at {:?}", name, source);

    encode_asset(config, cancel, &ffmpeg, &name, &source).await
}

/// Copy a local file into the VOD root and encode it.
pub async fn import_file(
    config: &Config,
    cancel: &CancellationToken,
    file: &Path,
    requested_name: Option<&str>,
) -> Result<IngestedAsset> {
    match tokio::fs::metadata(file).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(Error::bad_input("input is not a file")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::bad_input("input file does not exist"))
        }
        Err(e) => return Err(Error::storage(format!("stat {:?}", file), e)),
    }

    let file_name = file.file_name().map(|n| n.to_string_lossy().to_string());
    let name = asset_name(requested_name, file_name.as_deref());
    let ffmpeg = resolve_encoder(config)?;

    let asset_dir = create_asset_dir(config, &name).await?;
    let source = asset_dir.join(source_file_name(file_name.as_deref()));
    tokio::fs::copy(file, &source)
        .await
        .map_err(|e| Error::storage(format!("copying {:?} to {:?}", file, source), e))?;

    tracing::info!("Imported {:?} as asset '{}'", file, name);

    encode_asset(config, cancel, &ffmpeg, &name, &source).await
}

async fn create_asset_dir(config: &Config, name: &str) -> Result<PathBuf> {
    let asset_dir = config.storage.vod_root.join(name);
    tokio::fs::create_dir_all(&asset_dir)
        .await
        .map_err(|e| Error::storage(format!("creating {:?}", asset_dir), e))?;
    Ok(asset_dir)
}

/// Transcode `source` into HLS inside its asset directory.
///
/// On failure the staging directory is dropped and the asset directory is
/// left as it was. The source is deleted after success unless
/// `upload.keep_source` is set.
pub async fn encode_asset(
    config: &Config,
    cancel: &CancellationToken,
    ffmpeg: &Path,
    name: &str,
    source: &Path,
) -> Result<IngestedAsset> {
    let asset_dir = config.storage.vod_root.join(name);
    let options = encode_options(&config.encoder);

    let staging = tempfile::Builder::new()
        .prefix(".encode-")
        .tempdir_in(&asset_dir)
        .map_err(|e| Error::storage(format!("creating staging dir in {:?}", asset_dir), e))?;

    if let Err(e) = encode_hls(ffmpeg, source, staging.path(), &options, cancel).await {
        let err = Error::from(e);
        if let Error::EncodeFailure { message, output } = &err {
            tracing::error!("Encoding '{}' failed: {}\n{}", name, message, output);
        }
        return Err(err);
    }

    let playlist = publish_encoded(staging.path(), &asset_dir).await?;

    let source = if config.upload.keep_source {
        Some(source.to_path_buf())
    } else {
        if let Err(e) = tokio::fs::remove_file(source).await {
            tracing::warn!("Failed to remove source {:?}: {}", source, e);
        }
        None
    };

    tracing::info!("Asset '{}' ready at {:?}", name, playlist);

    Ok(IngestedAsset {
        name: name.to_string(),
        playlist,
        source,
    })
}

/// Move encoder output from `staging` into `asset_dir`.
///
/// Segments go first and the playlist last, so a listed asset always has
/// the segments its playlist references.
async fn publish_encoded(staging: &Path, asset_dir: &Path) -> Result<PathBuf> {
    let mut entries = tokio::fs::read_dir(staging)
        .await
        .map_err(|e| Error::storage(format!("reading {:?}", staging), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::storage(format!("reading {:?}", staging), e))?
    {
        let file_name = entry.file_name();
        if file_name == INDEX_PLAYLIST {
            continue;
        }
        let target = asset_dir.join(&file_name);
        tokio::fs::rename(entry.path(), &target)
            .await
            .map_err(|e| Error::storage(format!("moving {:?} into place", target), e))?;
    }

    let playlist = asset_dir.join(INDEX_PLAYLIST);
    tokio::fs::rename(staging.join(INDEX_PLAYLIST), &playlist)
        .await
        .map_err(|e| Error::storage(format!("moving {:?} into place", playlist), e))?;

    Ok(playlist)
}
