//! Common error types used throughout hlsvault.
//!
//! Every filesystem or dependency failure is mapped onto one of these kinds at
//! the boundary of the operation that produced it. The `Display` output may
//! carry paths and tool output for the logs; [`Error::public_message`] is what
//! clients get to see.

/// Common error type for hlsvault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested asset, playlist, or segment does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request was malformed or lacked a required field.
    #[error("Bad input: {0}")]
    BadInput(String),

    /// A required external dependency (the encoder) is not available.
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// The encoder ran but did not produce a usable result.
    #[error("Encode failed: {message}")]
    EncodeFailure {
        message: String,
        /// Combined diagnostic output of the encoder.
        output: String,
    },

    /// Reading, writing, or listing storage failed.
    #[error("Storage error: {context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new BadInput error.
    pub fn bad_input<S: Into<String>>(msg: S) -> Self {
        Self::BadInput(msg.into())
    }

    /// Create a new DependencyUnavailable error.
    pub fn dependency_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::DependencyUnavailable(msg.into())
    }

    /// Create a new EncodeFailure error.
    pub fn encode_failure(message: impl Into<String>, output: impl Into<String>) -> Self {
        Self::EncodeFailure {
            message: message.into(),
            output: output.into(),
        }
    }

    /// Create a new Storage error, describing what was being done.
    pub fn storage(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::BadInput(_) => 400,
            Self::DependencyUnavailable(_)
            | Self::EncodeFailure { .. }
            | Self::Storage { .. }
            | Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadInput(_) => "bad_input",
            Self::DependencyUnavailable(_) => "dependency_unavailable",
            Self::EncodeFailure { .. } => "encode_failure",
            Self::Storage { .. } => "storage_failure",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message safe to return to clients. Never contains filesystem paths.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadInput(msg) => msg.clone(),
            Self::DependencyUnavailable(_) => "encoder not available".to_string(),
            Self::EncodeFailure { .. } => "failed to convert video to HLS".to_string(),
            Self::Storage { .. } => "storage error".to_string(),
            Self::Internal(_) => "internal server error".to_string(),
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
