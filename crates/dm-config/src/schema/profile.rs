//! Environment profiles from the `SystemSettings` section
//!
//! ```yaml
//! SystemSettings:
//!   kimel:
//!     HOSTNAME: 'kimel-srv1'
//!     DATMAN_PROJECTSDIR: '/archive/data/'
//!     DATMAN_ASSETSDIR: '/archive/code/datman/assets/'
//!     ARCHIVEDIR: '/archive/data-2.0/'
//!     CONFIG_DIR: '/archive/code/config/'
//!   local:
//!     DATMAN_PROJECTSDIR: 'tests/'
//!     DATMAN_ASSETSDIR: ''
//!     ARCHIVEDIR: ''
//!     CONFIG_DIR: 'tests/'
//! ```

use serde::{Deserialize, Serialize};

/// Filesystem roots and host-matching rule for one deployment target.
///
/// All four roots must be present; an empty string marks a root as unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    /// Exact hostname this profile applies to. Empty means the profile is
    /// only selected when requested by name.
    #[serde(rename = "HOSTNAME", alias = "hostname", default)]
    pub hostname_pattern: String,

    /// Root directory containing one folder per project
    #[serde(rename = "DATMAN_PROJECTSDIR", alias = "projects_root")]
    pub projects_root: String,

    /// Directory with shared assets (templates, standards)
    #[serde(rename = "DATMAN_ASSETSDIR", alias = "assets_root")]
    pub assets_root: String,

    /// Long-term archive root
    #[serde(rename = "ARCHIVEDIR", alias = "archive_root")]
    pub archive_root: String,

    /// Directory holding study settings files
    #[serde(rename = "CONFIG_DIR", alias = "config_root")]
    pub config_root: String,
}

impl EnvironmentProfile {
    /// Whether this profile matches `host` on its own, without being requested.
    pub fn matches_host(&self, host: &str) -> bool {
        !self.hostname_pattern.is_empty() && self.hostname_pattern == host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(pattern: &str) -> EnvironmentProfile {
        EnvironmentProfile {
            hostname_pattern: pattern.to_string(),
            projects_root: "tests/".into(),
            assets_root: String::new(),
            archive_root: String::new(),
            config_root: "tests/".into(),
        }
    }

    #[test]
    fn empty_pattern_never_matches_host() {
        assert!(!profile("").matches_host(""));
        assert!(!profile("").matches_host("srv1"));
    }

    #[test]
    fn match_is_exact() {
        assert!(profile("srv1").matches_host("srv1"));
        assert!(!profile("srv1").matches_host("SRV1"));
        assert!(!profile("srv1").matches_host("srv10"));
    }

    #[test]
    fn missing_root_is_rejected() {
        let yaml = "DATMAN_PROJECTSDIR: tests/\nDATMAN_ASSETSDIR: ''\nARCHIVEDIR: ''\n";
        let result: Result<EnvironmentProfile, _> = serde_yaml::from_str(yaml);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("CONFIG_DIR"), "got: {err}");
    }
}
