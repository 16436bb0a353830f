//! Site-wide configuration document (`site_config.yml`)
//!
//! ```yaml
//! FTPSERVER: ''
//! XNATSERVER: 'xnat.example.org'
//! XNATPORT: 443
//! LOGSERVER: 'logs.example.org'
//!
//! Projects:
//!   SPINS: SPINS_settings.yml
//!
//! SystemSettings:
//!   local:
//!     DATMAN_PROJECTSDIR: 'tests/'
//!     DATMAN_ASSETSDIR: ''
//!     ARCHIVEDIR: ''
//!     CONFIG_DIR: 'tests/'
//!
//! paths:
//!   dcm: 'data/dcm/'
//!   nii: 'data/nii/'
//!
//! ExportSettings:
//!   T1: [nii, dcm, mnc]
//!   Software:
//!
//! PipelineSettings: []
//! PipelineSettings_torun: []
//! pipelines: []
//! to_load_quarantine: ''
//! ```
//!
//! Keys not listed above are kept verbatim in [`GlobalConfig::extra`] and
//! exposed through key lookup on the resolved project.

use super::format::FormatSet;
use super::keyed;
use super::pipeline::PipelineDescriptor;
use super::profile::EnvironmentProfile;
use super::site::SiteSettings;
use crate::{Error, Result};
use dm_fs::{DocumentStore, NormalizedPath, validate_relative_fragment};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Connection parameters handed to the XNAT and FTP fetch clients.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoteEndpoints {
    /// FTP server; empty means unset
    pub ftp_server: String,
    pub xnat_server: String,
    pub xnat_port: Option<u16>,
}

impl RemoteEndpoints {
    /// The FTP server, or `None` when unset.
    pub fn ftp_server(&self) -> Option<&str> {
        Some(self.ftp_server.as_str()).filter(|s| !s.is_empty())
    }
}

/// Global default configuration, loaded once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(rename = "FTPSERVER", default)]
    pub ftp_server: String,

    #[serde(rename = "XNATSERVER", default)]
    pub xnat_server: String,

    #[serde(rename = "XNATPORT", default, skip_serializing_if = "Option::is_none")]
    pub xnat_port: Option<u16>,

    /// Project id -> study settings file, relative to the profile's config root
    #[serde(rename = "Projects", default, deserialize_with = "keyed::unique")]
    pub projects: BTreeMap<String, String>,

    /// Environment profiles, tried in declaration order
    #[serde(rename = "SystemSettings", deserialize_with = "keyed::ordered")]
    pub system_profiles: IndexMap<String, EnvironmentProfile>,

    /// Data-type tag -> directory fragment relative to the project folder
    #[serde(default, deserialize_with = "keyed::unique")]
    pub paths: BTreeMap<String, String>,

    /// Series identifier -> formats to export
    #[serde(rename = "ExportSettings", default, deserialize_with = "keyed::unique")]
    pub export_settings: BTreeMap<String, FormatSet>,

    /// Ordered pipeline descriptors
    #[serde(rename = "PipelineSettings", default)]
    pub pipeline_settings: Vec<PipelineDescriptor>,

    /// Names from `PipelineSettings` staged to run; empty means all
    #[serde(rename = "PipelineSettings_torun", default)]
    pub pipelines_to_run: Vec<String>,

    /// External pipeline names accepted in addition to the built-ins
    #[serde(default)]
    pub pipelines: Vec<String>,

    /// Quarantine flag; empty means disabled
    #[serde(rename = "to_load_quarantine", default)]
    pub quarantine: String,

    #[serde(rename = "Sites", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sites: BTreeMap<String, SiteSettings>,

    /// Any other top-level keys (e.g. `LOGSERVER`)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GlobalConfig {
    /// Load and validate the site configuration from `path`.
    ///
    /// The format follows the file extension (YAML, TOML or JSON).
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }

        tracing::debug!(%path, "Loading site config");
        let config: GlobalConfig = DocumentStore::new().load(path).map_err(|e| match e {
            dm_fs::Error::DocumentParse { message, .. } => Error::InvalidGlobalConfig {
                path: path.to_native(),
                message,
            },
            other => Error::Fs(other),
        })?;

        config.validate().map_err(|message| Error::InvalidGlobalConfig {
            path: path.to_native(),
            message,
        })?;
        Ok(config)
    }

    /// Check the invariants that serde cannot express.
    ///
    /// Returns a human-readable description of the first violation.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.system_profiles.is_empty() {
            return Err("SystemSettings must define at least one profile".into());
        }

        for (tag, fragment) in &self.paths {
            validate_relative_fragment(fragment).map_err(|e| format!("paths.{tag}: {e}"))?;
        }

        if let Some(project) = self.projects.keys().find(|p| p.trim().is_empty()) {
            return Err(format!("Projects contains an empty project id ({project:?})"));
        }

        Ok(())
    }

    /// Remote endpoints as a read-only view.
    pub fn remote(&self) -> RemoteEndpoints {
        RemoteEndpoints {
            ftp_server: self.ftp_server.clone(),
            xnat_server: self.xnat_server.clone(),
            xnat_port: self.xnat_port,
        }
    }

    /// Project ids in sorted order.
    pub fn project_ids(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }
}
