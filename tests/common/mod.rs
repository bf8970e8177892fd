//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates temporary VOD and live roots, a
//! matching config, and an [`AppContext`]. The [`TestHarness::serve`] method
//! starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use hlsvault::config::Config;
use hlsvault::server::{create_router, AppContext};
use hlsvault_common::AssetKind;
use tempfile::TempDir;

/// Encoder stand-in that writes one segment and a VOD playlist, the way
/// ffmpeg does for `-hls_segment_filename <dir>/segment%03d.ts <dir>/index.m3u8`.
pub const FAKE_ENCODER: &str = r#"for last; do :; done
dir=$(dirname "$last")
printf 'TSDATA' > "$dir/segment000.ts"
printf '#EXTM3U\n#EXT-X-TARGETDURATION:6\n#EXTINF:6.0,\nsegment000.ts\n#EXT-X-ENDLIST\n' > "$last""#;

/// Encoder stand-in that fails after writing a partial playlist.
pub const FAILING_ENCODER: &str = r#"for last; do :; done
printf '#EXTM3U\n' > "$last"
echo "Invalid data found when processing input" >&2
exit 1"#;

/// Test harness owning temporary storage roots.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with default settings and empty roots.
    pub fn new() -> Self {
        Self::with_config(|_, _| {})
    }

    /// Create a harness, letting the caller adjust the config first.
    ///
    /// Storage roots are always pointed into the harness temp dir.
    pub fn with_config(adjust: impl FnOnce(&mut Config, &Path)) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");

        let mut config = Config::default();
        config.storage.vod_root = dir.path().join("videos");
        config.storage.live_root = dir.path().join("videos").join("live");
        adjust(&mut config, dir.path());

        Self {
            ctx: AppContext::new(config),
            dir,
        }
    }

    /// A harness whose encoder is a shell script with the given body.
    #[cfg(unix)]
    pub fn with_encoder_script(body: &str) -> Self {
        Self::with_config(|config, dir| {
            config.tools.ffmpeg_path = Some(write_script(dir, "ffmpeg", body));
        })
    }

    pub fn root(&self, kind: AssetKind) -> PathBuf {
        self.ctx.config.storage.root(kind).clone()
    }

    /// Create an asset directory with a playlist and the given segments.
    pub fn add_asset(&self, kind: AssetKind, name: &str, playlist: &str, segments: &[(&str, &[u8])]) {
        let dir = self.root(kind).join(name);
        std::fs::create_dir_all(&dir).expect("failed to create asset dir");
        std::fs::write(dir.join("index.m3u8"), playlist).expect("failed to write playlist");
        for (file, data) in segments {
            std::fs::write(dir.join(file), data).expect("failed to write segment");
        }
    }

    /// Start an Axum server on a random port and return the bound address.
    pub async fn serve(&self) -> SocketAddr {
        let app = create_router(self.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }
}

/// Write an executable `#!/bin/sh` script.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("failed to write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod script");
    path
}

/// A playlist referencing `count` segments named per the encoder convention.
pub fn vod_playlist(count: usize) -> String {
    let mut out = String::from("#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:6\n");
    for i in 0..count {
        out.push_str(&format!("#EXTINF:6.000000,\nsegment{i:03}.ts\n"));
    }
    out.push_str("#EXT-X-ENDLIST\n");
    out
}
