//! Error types for extidx-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for "nothing to install" outcomes.
pub const EXIT_NO_CANDIDATES: i32 = 2;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from extidx-core
    #[error(transparent)]
    Core(#[from] extidx_core::Error),

    /// Error from extidx-meta
    #[error(transparent)]
    Meta(#[from] extidx_meta::Error),

    /// JSON output error
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging setup error
    #[error("failed to initialise logging: {0}")]
    Logging(String),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) if e.is_no_candidates() => EXIT_NO_CANDIDATES,
            _ => 1,
        }
    }
}
