//! Study settings overlay (`<STUDY>_settings.yml`)
//!
//! A study document has the same shape as the site config with every field
//! optional. Site-wide keys (`Projects`, `SystemSettings`, `FTPSERVER`,
//! `XNATSERVER`, `XNATPORT`) are accepted so that existing study files keep
//! parsing, but they are never merged.

use super::format::FormatSet;
use super::keyed;
use super::pipeline::PipelineDescriptor;
use super::site::SiteSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level keys a study document may not override.
pub const IMMUTABLE_KEYS: [&str; 5] = [
    "Projects",
    "SystemSettings",
    "FTPSERVER",
    "XNATSERVER",
    "XNATPORT",
];

/// Partial configuration loaded from a study settings file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudyOverlay {
    #[serde(
        default,
        deserialize_with = "keyed::unique_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub paths: Option<BTreeMap<String, String>>,

    #[serde(
        rename = "ExportSettings",
        default,
        deserialize_with = "keyed::unique_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub export_settings: Option<BTreeMap<String, FormatSet>>,

    #[serde(rename = "PipelineSettings", default, skip_serializing_if = "Option::is_none")]
    pub pipeline_settings: Option<Vec<PipelineDescriptor>>,

    #[serde(
        rename = "PipelineSettings_torun",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pipelines_to_run: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipelines: Option<Vec<String>>,

    #[serde(rename = "to_load_quarantine", default, skip_serializing_if = "Option::is_none")]
    pub quarantine: Option<String>,

    #[serde(rename = "Sites", default, skip_serializing_if = "Option::is_none")]
    pub sites: Option<BTreeMap<String, SiteSettings>>,

    /// Remaining top-level keys, including any immutable ones
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl StudyOverlay {
    /// Immutable site-wide keys present in this overlay.
    pub fn immutable_keys(&self) -> impl Iterator<Item = &str> {
        IMMUTABLE_KEYS
            .into_iter()
            .filter(|key| self.extra.contains_key(*key))
    }

    /// Free-form keys that may override the site config.
    pub fn overridable_extra(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.extra
            .iter()
            .filter(|(key, _)| !IMMUTABLE_KEYS.contains(&key.as_str()))
    }

    /// True when the overlay changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == StudyOverlay::default()
    }
}
