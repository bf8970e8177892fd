//! External tool detection and management.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available using a custom version argument.
///
/// `program` may be a bare name (looked up on `PATH`) or a path.
///
/// # Example
///
/// ```no_run
/// use hlsvault_av::check_tool_with_arg;
///
/// let info = check_tool_with_arg("ffmpeg", "-version");
/// if info.available {
///     println!("ffmpeg version: {:?}", info.version);
/// }
/// ```
pub fn check_tool_with_arg(program: &str, version_arg: &str) -> ToolInfo {
    let name = Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| program.to_string());

    let result = Command::new(program).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            let path = which::which(program).ok();

            ToolInfo {
                name,
                available: true,
                version,
                path,
            }
        }
        _ => ToolInfo {
            name,
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check the encoder, honouring a configured path.
pub fn check_encoder(config_path: Option<&Path>) -> ToolInfo {
    match get_tool_path("ffmpeg", config_path) {
        Ok(path) => {
            let mut info = check_tool_with_arg(&path.to_string_lossy(), "-version");
            info.path.get_or_insert(path);
            info
        }
        Err(_) => ToolInfo {
            name: "ffmpeg".to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Require that a tool is available on `PATH`, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool.
///
/// A configured path is used as-is and must exist; without one the tool is
/// looked up on `PATH`.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) if path.exists() => Ok(path.to_path_buf()),
        Some(path) => {
            tracing::warn!("Configured {} path does not exist: {:?}", name, path);
            Err(Error::tool_not_found(name))
        }
        None => require_tool(name),
    }
}
