//! # hlsvault-av
//!
//! External encoder handling for hlsvault.
//!
//! This crate provides functionality for:
//! - Locating external tools (ffmpeg) on `PATH` or at a configured location
//! - Running a tool as a bounded-time, cancellable child process with its
//!   output captured for diagnostics
//! - Transcoding a source file into an HLS playlist plus MPEG-TS segments
//!
//! ## Example
//!
//! ```no_run
//! use hlsvault_av::actions::{encode_hls, HlsEncodeOptions};
//! use hlsvault_av::tools::get_tool_path;
//! use std::path::Path;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> hlsvault_av::Result<()> {
//! let ffmpeg = get_tool_path("ffmpeg", None)?;
//! let out = encode_hls(
//!     &ffmpeg,
//!     Path::new("/videos/intro/source.mp4"),
//!     Path::new("/videos/intro"),
//!     &HlsEncodeOptions::default(),
//!     &CancellationToken::new(),
//! )
//! .await?;
//! println!("playlist at {}", out.playlist.display());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod command;
mod error;
pub mod tools;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use tools::{check_tool_with_arg, get_tool_path, require_tool, ToolInfo};
