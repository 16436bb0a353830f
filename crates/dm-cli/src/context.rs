//! Locating the site config and building a resolver

use dm_config::{ConfigResolver, SystemHost};
use dm_fs::NormalizedPath;
use std::path::Path;

use crate::error::{CliError, Result};

/// Options shared by every command that reads configuration.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub config: Option<&'a Path>,
    pub profile: Option<&'a str>,
}

impl Context<'_> {
    /// The site config path: `--config`, else the platform default.
    pub fn config_path(&self) -> Result<NormalizedPath> {
        match self.config {
            Some(path) => Ok(NormalizedPath::new(path)),
            None => ConfigResolver::default_config_path().ok_or_else(|| {
                CliError::user("No site config given and no platform config directory found; pass --config")
            }),
        }
    }

    /// A resolver for the site config under the selected profile.
    pub fn resolver(&self) -> Result<ConfigResolver> {
        let path = self.config_path()?;
        tracing::debug!(%path, profile = ?self.profile, "Loading site config");
        Ok(ConfigResolver::load(&path, &SystemHost, self.profile)?)
    }
}
