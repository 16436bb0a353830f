//! Field-by-field merge of a study overlay over the site defaults
//!
//! Precedence, per field:
//!
//! | field                    | rule                                          |
//! |--------------------------|-----------------------------------------------|
//! | `paths`                  | per tag; overlay wins, other tags inherit     |
//! | `ExportSettings`         | per series; overlay set replaces, `[]` disables |
//! | `PipelineSettings`       | whole list, only when the overlay list is non-empty |
//! | `PipelineSettings_torun` | whole list, only when non-empty               |
//! | `pipelines`              | whole list, only when non-empty               |
//! | `to_load_quarantine`     | overlay wins when present                     |
//! | `Sites`                  | per site; overlay entry replaces              |
//! | other free-form keys     | per key; overlay wins                         |
//! | `Projects`, `SystemSettings`, `FTPSERVER`, `XNATSERVER`, `XNATPORT` | never overridden |
//!
//! The global config is only read; merging produces a new value.

use crate::schema::{FormatSet, GlobalConfig, PipelineDescriptor, SiteSettings, StudyOverlay};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Settings after merging, before path expansion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedSettings {
    pub path_templates: BTreeMap<String, String>,
    pub export_policy: BTreeMap<String, FormatSet>,
    pub pipelines: Vec<PipelineDescriptor>,
    pub pipelines_to_run: Vec<String>,
    pub registered_pipelines: Vec<String>,
    pub quarantine: String,
    pub sites: BTreeMap<String, SiteSettings>,
    pub extra: BTreeMap<String, Value>,
}

impl MergedSettings {
    /// The site defaults with no study applied.
    pub fn from_global(global: &GlobalConfig) -> Self {
        Self {
            path_templates: global.paths.clone(),
            export_policy: global.export_settings.clone(),
            pipelines: global.pipeline_settings.clone(),
            pipelines_to_run: global.pipelines_to_run.clone(),
            registered_pipelines: global.pipelines.clone(),
            quarantine: global.quarantine.clone(),
            sites: global.sites.clone(),
            extra: global.extra.clone(),
        }
    }

    /// Apply a study overlay on top of these settings.
    ///
    /// `project` is only used for log context.
    pub fn apply(&mut self, overlay: &StudyOverlay, project: &str) {
        if let Some(paths) = &overlay.paths {
            for (tag, fragment) in paths {
                self.path_templates.insert(tag.clone(), fragment.clone());
            }
        }

        if let Some(export) = &overlay.export_settings {
            for (series, formats) in export {
                self.export_policy.insert(series.clone(), formats.clone());
            }
        }

        replace_if_non_empty(&mut self.pipelines, overlay.pipeline_settings.as_ref());
        replace_if_non_empty(&mut self.pipelines_to_run, overlay.pipelines_to_run.as_ref());
        replace_if_non_empty(&mut self.registered_pipelines, overlay.pipelines.as_ref());

        if let Some(quarantine) = &overlay.quarantine {
            self.quarantine = quarantine.clone();
        }

        if let Some(sites) = &overlay.sites {
            for (site, settings) in sites {
                self.sites.insert(site.clone(), settings.clone());
            }
        }

        for (key, value) in overlay.overridable_extra() {
            self.extra.insert(key.clone(), value.clone());
        }

        for key in overlay.immutable_keys() {
            tracing::warn!(project, key, "Study settings cannot override site-wide key; ignoring");
        }
    }
}

fn replace_if_non_empty<T: Clone>(target: &mut Vec<T>, overlay: Option<&Vec<T>>) {
    if let Some(list) = overlay.filter(|list| !list.is_empty()) {
        *target = list.clone();
    }
}

/// Merge `overlay` over the defaults in `global`.
pub fn merge(global: &GlobalConfig, overlay: &StudyOverlay, project: &str) -> MergedSettings {
    let mut merged = MergedSettings::from_global(global);
    merged.apply(overlay, project);
    merged
}
