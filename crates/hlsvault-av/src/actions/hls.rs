//! HLS transcoding with ffmpeg.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hlsvault_common::paths::{INDEX_PLAYLIST, SEGMENT_FILENAME_PATTERN};
use tokio_util::sync::CancellationToken;

use crate::command::ToolCommand;
use crate::{Error, Result};

/// Encoder settings for HLS output.
#[derive(Debug, Clone)]
pub struct HlsEncodeOptions {
    /// ffmpeg video encoder (`-c:v`).
    pub video_codec: String,
    /// ffmpeg audio encoder (`-c:a`).
    pub audio_codec: String,
    /// Target segment length in seconds (`-hls_time`).
    pub segment_duration_secs: u32,
    /// Upper bound on the whole encode.
    pub timeout: Duration,
}

impl Default for HlsEncodeOptions {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            segment_duration_secs: 6,
            timeout: Duration::from_secs(3600),
        }
    }
}

/// Files produced by a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HlsOutput {
    /// Directory holding the playlist and segments.
    pub output_dir: PathBuf,
    /// `<output_dir>/index.m3u8`.
    pub playlist: PathBuf,
}

/// Build the ffmpeg argument list for an HLS encode.
///
/// Produces a VOD-style playlist (`-hls_list_size 0` keeps every segment)
/// with segments named `segment000.ts`, `segment001.ts`, …
pub fn hls_args(input: &Path, output_dir: &Path, options: &HlsEncodeOptions) -> Vec<String> {
    let segment_pattern = output_dir.join(SEGMENT_FILENAME_PATTERN);
    let playlist = output_dir.join(INDEX_PLAYLIST);

    vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-c:v".to_string(),
        options.video_codec.clone(),
        "-c:a".to_string(),
        options.audio_codec.clone(),
        "-hls_time".to_string(),
        options.segment_duration_secs.to_string(),
        "-hls_list_size".to_string(),
        "0".to_string(),
        "-hls_segment_filename".to_string(),
        segment_pattern.to_string_lossy().to_string(),
        playlist.to_string_lossy().to_string(),
    ]
}

/// Transcode `input` into an HLS playlist and segments inside `output_dir`.
///
/// The encode runs as a child process bounded by `options.timeout` and is
/// killed if `cancel` fires first.
pub async fn encode_hls(
    ffmpeg: &Path,
    input: &Path,
    output_dir: &Path,
    options: &HlsEncodeOptions,
    cancel: &CancellationToken,
) -> Result<HlsOutput> {
    if options.segment_duration_secs == 0 {
        return Err(Error::InvalidInput(
            "segment duration must be at least one second".to_string(),
        ));
    }

    tokio::fs::create_dir_all(output_dir).await?;

    tracing::info!(
        "HLS encode: {:?} -> {:?} (segment_duration={}s, timeout={:?})",
        input,
        output_dir,
        options.segment_duration_secs,
        options.timeout
    );

    let output = ToolCommand::new(ffmpeg.to_path_buf())
        .args(hls_args(input, output_dir, options))
        .timeout(options.timeout)
        .cancel_on(cancel.clone())
        .execute()
        .await?;

    let playlist = output_dir.join(INDEX_PLAYLIST);
    if !matches!(tokio::fs::try_exists(&playlist).await, Ok(true)) {
        return Err(Error::tool_failed(
            "ffmpeg",
            "finished without writing a playlist",
            output.combined(),
        ));
    }

    tracing::info!("HLS encode complete: {:?}", playlist);

    Ok(HlsOutput {
        output_dir: output_dir.to_path_buf(),
        playlist,
    })
}
