//! The effective configuration of one project

use crate::export::ExportPolicy;
use crate::schema::{FormatSet, PipelineDescriptor, RemoteEndpoints};
use crate::selector::SelectedProfile;
use crate::sites::SiteExportInfo;
use crate::{Error, Result};
use dm_fs::NormalizedPath;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Site config merged with one study's settings, under one profile.
///
/// Instances are shared read-only through the resolver cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedProjectConfig {
    pub project_id: String,

    /// Profile the paths were resolved under
    pub profile: SelectedProfile,

    /// Study settings file that was applied
    pub study_settings: NormalizedPath,

    /// Tag -> `<projects_root>/<project>/<fragment>`
    pub effective_paths: BTreeMap<String, NormalizedPath>,

    pub effective_export_policy: ExportPolicy,

    /// Pipeline descriptors in execution order, not yet validated
    pub effective_pipelines: Vec<PipelineDescriptor>,

    pub pipelines_to_run: Vec<String>,
    pub registered_pipelines: Vec<String>,

    /// Raw `to_load_quarantine` value; see [`Self::quarantine`]
    #[serde(rename = "to_load_quarantine")]
    pub quarantine: String,

    pub remote: RemoteEndpoints,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sites: BTreeMap<String, SiteExportInfo>,

    /// Free-form keys after study overrides
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl ResolvedProjectConfig {
    /// The resolved path for `tag`.
    ///
    /// # Errors
    ///
    /// `MissingPath` when the tag is not defined for this project.
    pub fn path(&self, tag: &str) -> Result<&NormalizedPath> {
        self.effective_paths.get(tag).ok_or_else(|| Error::MissingPath {
            project: self.project_id.clone(),
            tag: tag.to_string(),
        })
    }

    /// Check that every tag in `tags` is defined, reporting the first missing one.
    pub fn require_paths(&self, tags: &[&str]) -> Result<()> {
        for tag in tags {
            self.path(tag)?;
        }
        Ok(())
    }

    /// Formats to export for `series`; empty for unknown series.
    pub fn export_formats(&self, series: &str) -> &FormatSet {
        self.effective_export_policy.lookup(series)
    }

    /// Effective value of a free-form top-level key such as `LOGSERVER`.
    pub fn key(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// The quarantine flag, or `None` when it is empty.
    pub fn quarantine(&self) -> Option<&str> {
        Some(self.quarantine.as_str()).filter(|q| !q.is_empty())
    }

    pub fn site_export_info(&self, site: &str) -> Option<&SiteExportInfo> {
        self.sites.get(site)
    }

    /// Pretty-printed JSON rendering, used by the CLI.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
