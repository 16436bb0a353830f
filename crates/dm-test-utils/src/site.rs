//! [`TestSite`] builder for configuration test scenarios.
//!
//! Layout inside the temporary directory:
//!
//! ```text
//! <root>/config/site_config.yml
//! <root>/config/<PROJECT>_settings.yml
//! <root>/projects/
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Host name matched by the `local` profile.
pub const TEST_HOST: &str = "testhost";

/// Site defaults shared by most scenarios.
pub const STANDARD_DEFAULTS: &str = r#"
XNATSERVER: 'xnat.example.org'
XNATPORT: 443
FTPSERVER: ''
LOGSERVER: 'logs.example.org'

paths:
  dcm: 'data/dcm/'
  nii: 'data/nii/'
  qc: 'qc/'

ExportSettings:
  T1: [nii, dcm, mnc]
  DTI: [nii, dcm]
  Software:

PipelineSettings:
  - fmri
  - hcp
"#;

/// A temporary site with a global config, study files and a projects root.
///
/// Two profiles are always declared: `local` (host [`TEST_HOST`], roots
/// inside the temp dir) and `archive` (host `srv1`, roots under `/archive`).
///
/// # Example
///
/// ```rust,no_run
/// use dm_test_utils::TestSite;
///
/// let mut site = TestSite::standard();
/// site.add_project("SPINS", "paths:\n  nii: niftis/\n");
/// let config = site.write();
/// ```
pub struct TestSite {
    temp_dir: TempDir,
    projects: Vec<(String, String)>,
    sections: Vec<String>,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    /// An empty site: profiles only, no defaults.
    pub fn new() -> Self {
        let site = Self {
            temp_dir: TempDir::new().unwrap(),
            projects: Vec::new(),
            sections: Vec::new(),
        };
        fs::create_dir_all(site.config_dir()).unwrap();
        fs::create_dir_all(site.projects_dir()).unwrap();
        site
    }

    /// A site carrying [`STANDARD_DEFAULTS`].
    pub fn standard() -> Self {
        Self::new().with_section(STANDARD_DEFAULTS)
    }

    /// Append raw YAML to the global config.
    pub fn with_section(mut self, yaml: &str) -> Self {
        self.sections.push(yaml.to_string());
        self
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root().join("projects")
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir().join("site_config.yml")
    }

    /// Register `project` and write its study settings file.
    pub fn add_project(&mut self, project: &str, overlay: &str) -> &mut Self {
        let file = format!("{project}_settings.yml");
        fs::write(self.config_dir().join(&file), overlay).unwrap();
        self.projects.push((project.to_string(), file));
        self
    }

    /// Register `project` under `Projects` without writing its study file.
    pub fn add_project_without_file(&mut self, project: &str) -> &mut Self {
        self.projects
            .push((project.to_string(), format!("{project}_settings.yml")));
        self
    }

    /// Register `project` with a study file of an arbitrary name and content.
    pub fn add_project_file(&mut self, project: &str, file: &str, content: &str) -> &mut Self {
        fs::write(self.config_dir().join(file), content).unwrap();
        self.projects.push((project.to_string(), file.to_string()));
        self
    }

    /// Render and write `site_config.yml`, returning its path.
    pub fn write(&self) -> PathBuf {
        let mut yaml = String::from("Projects:\n");
        if self.projects.is_empty() {
            yaml = String::from("Projects: {}\n");
        }
        for (project, file) in &self.projects {
            yaml.push_str(&format!("  {project}: '{file}'\n"));
        }

        yaml.push_str(&format!(
            "\nSystemSettings:\n  local:\n    HOSTNAME: '{TEST_HOST}'\n    DATMAN_PROJECTSDIR: '{}/'\n    DATMAN_ASSETSDIR: '{}/assets/'\n    ARCHIVEDIR: '{}/archive/'\n    CONFIG_DIR: '{}/'\n",
            slashes(&self.projects_dir()),
            slashes(self.root()),
            slashes(self.root()),
            slashes(&self.config_dir()),
        ));
        yaml.push_str(
            "  archive:\n    HOSTNAME: 'srv1'\n    DATMAN_PROJECTSDIR: '/archive/data/'\n    DATMAN_ASSETSDIR: '/archive/assets/'\n    ARCHIVEDIR: '/archive/dicom/'\n    CONFIG_DIR: ''\n",
        );

        for section in &self.sections {
            yaml.push_str(section);
            yaml.push('\n');
        }

        self.write_global(&yaml)
    }

    /// Write `content` verbatim as `site_config.yml`, returning its path.
    pub fn write_global(&self, content: &str) -> PathBuf {
        let path = self.config_path();
        fs::write(&path, content).unwrap();
        path
    }

    /// Project root for `project` under the `local` profile, with a trailing `/`.
    pub fn project_dir(&self, project: &str) -> String {
        format!("{}/{project}/", slashes(&self.projects_dir()))
    }
}

fn slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
