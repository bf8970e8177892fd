use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use hlsvault_common::AssetKind;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root holding video-on-demand assets (uploads land here)
    #[serde(default = "default_vod_root")]
    pub vod_root: PathBuf,

    /// Root holding externally produced live streams
    #[serde(default = "default_live_root")]
    pub live_root: PathBuf,

    /// Create both roots at startup if missing (default: true)
    #[serde(default = "default_create_roots")]
    pub create_roots: bool,
}

fn default_vod_root() -> PathBuf {
    PathBuf::from("./videos")
}

fn default_live_root() -> PathBuf {
    PathBuf::from("./videos/live")
}

fn default_create_roots() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            vod_root: default_vod_root(),
            live_root: default_live_root(),
            create_roots: default_create_roots(),
        }
    }
}

impl StorageConfig {
    pub fn root(&self, kind: AssetKind) -> &PathBuf {
        match kind {
            AssetKind::Vod => &self.vod_root,
            AssetKind::Live => &self.live_root,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_vod_segment_max_age")]
    pub vod_segment_max_age_secs: u64,

    #[serde(default = "default_live_segment_max_age")]
    pub live_segment_max_age_secs: u64,
}

fn default_vod_segment_max_age() -> u64 {
    AssetKind::Vod.default_segment_max_age_secs()
}

fn default_live_segment_max_age() -> u64 {
    AssetKind::Live.default_segment_max_age_secs()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            vod_segment_max_age_secs: default_vod_segment_max_age(),
            live_segment_max_age_secs: default_live_segment_max_age(),
        }
    }
}

impl CacheConfig {
    /// `Cache-Control` value for segments of the given kind.
    pub fn segment_cache_control(&self, kind: AssetKind) -> String {
        let max_age = match kind {
            AssetKind::Vod => self.vod_segment_max_age_secs,
            AssetKind::Live => self.live_segment_max_age_secs,
        };
        format!("public, max-age={}", max_age)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Largest accepted upload body in bytes (default: 1 GiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,

    /// Keep the uploaded source file next to the HLS output (default: true)
    #[serde(default = "default_keep_source")]
    pub keep_source: bool,
}

fn default_max_upload_bytes() -> usize {
    1 << 30
}

fn default_keep_source() -> bool {
    true
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_upload_bytes(),
            keep_source: default_keep_source(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncoderConfig {
    /// ffmpeg video encoder (default: "libx264")
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// ffmpeg audio encoder (default: "aac")
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Target HLS segment length in seconds (default: 6)
    #[serde(default = "default_segment_duration")]
    pub segment_duration_secs: u32,

    /// Kill the encoder after this many seconds (default: 3600)
    #[serde(default = "default_encode_timeout")]
    pub timeout_secs: u64,
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_segment_duration() -> u32 {
    6
}

fn default_encode_timeout() -> u64 {
    3600
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            segment_duration_secs: default_segment_duration(),
            timeout_secs: default_encode_timeout(),
        }
    }
}

impl EncoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Explicit ffmpeg location; must exist when set
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}
