//! Error types for dm-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from dm-config
    #[error(transparent)]
    Config(#[from] dm_config::Error),

    /// Output could not be rendered as JSON
    #[error("Failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),

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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_convert_with_context() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CliError::from(source);
        assert!(matches!(err, CliError::Json(_)));
        assert!(err.to_string().starts_with("Failed to render JSON output"));
    }
}
