//! Format-agnostic configuration document loading

use crate::{Error, NormalizedPath, Result, io};
use serde::de::DeserializeOwned;
use std::fmt;

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Toml,
    Json,
}

impl DocumentFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "yml" | "yaml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Detect the format from the extension of `path`.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        Self::from_extension(path.extension().unwrap_or(""))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Yaml => write!(f, "YAML"),
            DocumentFormat::Toml => write!(f, "TOML"),
            DocumentFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Format-agnostic document store.
///
/// Detects format from file extension and handles deserialization
/// transparently. Site configs and study settings are normally YAML,
/// but TOML and JSON documents of the same shape are accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentStore;

impl DocumentStore {
    /// Create a new DocumentStore.
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file.
    ///
    /// Format is detected from file extension:
    /// - `.yml`, `.yaml` -> YAML
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = DocumentFormat::from_path(path)?;
        let content = io::read_text(path)?;
        tracing::debug!(%path, %format, "Loaded document");
        self.parse(&content, format, path)
    }

    /// Parse document content already read into memory.
    ///
    /// `origin` is only used for error reporting.
    pub fn parse<T: DeserializeOwned>(
        &self,
        content: &str,
        format: DocumentFormat,
        origin: &NormalizedPath,
    ) -> Result<T> {
        let parsed = match format {
            DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| Error::DocumentParse {
            path: origin.to_native(),
            format: format.to_string(),
            message,
        })
    }
}
