//! Path template expansion
//!
//! Each `paths` fragment is nested below `<projects_root>/<project>/`:
//!
//! ```text
//! projects_root = "tests/", project = "demo", dcm = "data/dcm/"
//!   -> tests/demo/data/dcm/
//! ```
//!
//! Expansion is pure; whether the directories exist is left to the tools
//! that consume the paths.

use crate::{Error, Result};
use dm_fs::{NormalizedPath, validate_relative_fragment};
use std::collections::BTreeMap;

/// Expand every path template for `project` below `projects_root`.
///
/// # Errors
///
/// `InvalidPathTemplate` if a fragment is absolute or contains a `..`
/// segment, or if the project id itself is not a single plain segment.
pub fn resolve_paths(
    projects_root: &str,
    project: &str,
    templates: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, NormalizedPath>> {
    validate_project_segment(project)?;
    let project_dir = NormalizedPath::new(projects_root).join(project);

    let mut resolved = BTreeMap::new();
    for (tag, fragment) in templates {
        validate_relative_fragment(fragment).map_err(|e| invalid(project, tag, fragment, e))?;
        resolved.insert(tag.clone(), project_dir.join(fragment));
    }
    Ok(resolved)
}

fn validate_project_segment(project: &str) -> Result<()> {
    validate_relative_fragment(project).map_err(|e| invalid(project, "<project>", project, e))?;

    let normalized = NormalizedPath::new(project);
    if project.is_empty() || normalized.components().count() != 1 || project == "." {
        return Err(Error::InvalidPathTemplate {
            project: project.to_string(),
            tag: "<project>".into(),
            fragment: project.to_string(),
            reason: "project id must be a single directory name".into(),
        });
    }
    Ok(())
}

fn invalid(project: &str, tag: &str, fragment: &str, cause: dm_fs::Error) -> Error {
    let reason = match cause {
        dm_fs::Error::UnsafeFragment { reason, .. } => reason,
        other => other.to_string(),
    };
    Error::InvalidPathTemplate {
        project: project.to_string(),
        tag: tag.to_string(),
        fragment: fragment.to_string(),
        reason,
    }
}
