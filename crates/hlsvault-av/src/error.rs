//! Error types for hlsvault-av.

use std::time::Duration;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running external tools.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool ran and reported failure.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed {
        tool: String,
        message: String,
        /// Combined stdout and stderr of the failed run.
        output: String,
    },

    /// The tool did not finish within its time budget and was killed.
    #[error("{tool} timed out after {after:?}")]
    Timeout { tool: String, after: Duration },

    /// The run was cancelled and the tool was killed.
    #[error("{tool} was cancelled")]
    Cancelled { tool: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(
        tool: impl Into<String>,
        message: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
            output: output.into(),
        }
    }
}

impl From<Error> for hlsvault_common::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::ToolNotFound { tool } => {
                hlsvault_common::Error::dependency_unavailable(format!("{tool} is not installed"))
            }
            Error::ToolFailed { ref output, .. } => {
                let output = output.clone();
                hlsvault_common::Error::encode_failure(err.to_string(), output)
            }
            Error::Timeout { .. } | Error::Cancelled { .. } => {
                hlsvault_common::Error::encode_failure(err.to_string(), String::new())
            }
            Error::Io(source) => hlsvault_common::Error::storage("running encoder", source),
            Error::InvalidInput(msg) => hlsvault_common::Error::internal(msg),
        }
    }
}
