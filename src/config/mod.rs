mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./hlsvault.toml",
        "~/.config/hlsvault/config.toml",
        "/etc/hlsvault/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Apply `PORT` from the environment, if set, and validate the result.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid PORT value: {:?}", port))?;
        validate_config(config)?;
    }
    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.encoder.segment_duration_secs == 0 {
        anyhow::bail!("Encoder segment duration cannot be 0");
    }

    if config.encoder.timeout_secs == 0 {
        anyhow::bail!("Encoder timeout cannot be 0");
    }

    if config.upload.max_bytes == 0 {
        anyhow::bail!("Upload size limit cannot be 0");
    }

    if config.storage.vod_root == config.storage.live_root {
        tracing::warn!(
            "VOD and live roots are the same directory: {:?}",
            config.storage.vod_root
        );
    }

    if let Some(ref ffmpeg) = config.tools.ffmpeg_path {
        if !ffmpeg.exists() {
            tracing::warn!("Configured ffmpeg path does not exist: {:?}", ffmpeg);
        }
    }

    Ok(())
}
