//! Error types for dm-config
//!
//! Every variant is a configuration error: none are transient, so callers
//! should surface them to an operator rather than retry.

use std::path::PathBuf;

/// Result type for dm-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving study configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No environment profile matched the host (or the requested name)
    #[error(
        "No system profile matches host '{host}'{} (available: {})",
        .requested.as_deref().map(|r| format!(" or requested name '{r}'")).unwrap_or_default(),
        .available.join(", ")
    )]
    NoMatchingProfile {
        host: String,
        requested: Option<String>,
        available: Vec<String>,
    },

    /// A path template is absolute or escapes the study folder
    #[error("Invalid path template for project '{project}', tag '{tag}': '{fragment}' {reason}")]
    InvalidPathTemplate {
        project: String,
        tag: String,
        fragment: String,
        reason: String,
    },

    /// Project id is not listed under `Projects`
    #[error("Unknown project '{project}': not listed in the site config Projects index")]
    UnknownProject { project: String },

    /// The study settings file referenced by `Projects` does not exist
    #[error("Study settings for project '{project}' not found at {path}")]
    StudyFileNotFound { project: String, path: PathBuf },

    /// The study settings file does not have the expected shape
    #[error("Malformed study settings for project '{project}' at {path}: {message}")]
    MalformedStudySettings {
        project: String,
        path: PathBuf,
        message: String,
    },

    /// A pipeline name is neither built in nor registered
    #[error("Unknown pipeline '{pipeline}' for project '{project}' (known: {})", .known.join(", "))]
    UnknownPipeline {
        project: String,
        pipeline: String,
        known: Vec<String>,
    },

    /// A required path tag is not defined for the project
    #[error("Path '{tag}' is not defined for project '{project}'")]
    MissingPath { project: String, tag: String },

    /// The site config file could not be found
    #[error("Site configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// The site config file is unparseable or violates an invariant
    #[error("Invalid site configuration at {path}: {message}")]
    InvalidGlobalConfig { path: PathBuf, message: String },

    /// The host identity provider could not determine a hostname
    #[error("Could not determine host identity: {message}")]
    HostIdentityUnavailable { message: String },

    /// A resolved configuration could not be rendered as JSON
    #[error("Failed to render resolved configuration as JSON: {0}")]
    Render(#[from] serde_json::Error),

    /// Filesystem error from dm-fs
    #[error(transparent)]
    Fs(#[from] dm_fs::Error),
}
