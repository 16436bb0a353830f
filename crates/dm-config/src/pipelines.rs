//! Pipeline validation and ordering
//!
//! Answers which pipelines apply to a project and in what order. Nothing
//! here launches anything.

use crate::resolved::ResolvedProjectConfig;
use crate::schema::PipelineDescriptor;
use crate::{Error, Result};
use std::collections::BTreeSet;

/// Pipelines that have a matching path tag and are always accepted.
pub const BUILTIN_PIPELINES: [&str; 2] = ["fmri", "hcp"];

/// Registry of pipeline names accepted during validation.
///
/// Names listed under `pipelines` in the resolved config are accepted in
/// addition to the registry's own entries.
#[derive(Debug, Clone)]
pub struct PipelineResolver {
    known: BTreeSet<String>,
}

impl PipelineResolver {
    /// A resolver that knows only the built-in pipelines.
    pub fn with_builtins() -> Self {
        Self {
            known: BUILTIN_PIPELINES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Register an external pipeline name.
    pub fn register(&mut self, name: impl Into<String>) {
        self.known.insert(name.into());
    }

    /// Whether `name` is known to this resolver or registered by `config`.
    pub fn is_known(&self, name: &str, config: &ResolvedProjectConfig) -> bool {
        self.known.contains(name) || config.registered_pipelines.iter().any(|p| p == name)
    }

    /// The project's pipelines in order, after validating every name.
    ///
    /// # Errors
    ///
    /// `UnknownPipeline` for the first name that is neither built in nor
    /// registered.
    pub fn resolve<'a>(&self, config: &'a ResolvedProjectConfig) -> Result<&'a [PipelineDescriptor]> {
        for descriptor in &config.effective_pipelines {
            self.check(&descriptor.name, config)?;
        }
        Ok(&config.effective_pipelines)
    }

    /// Pipelines staged to run, in `PipelineSettings_torun` order.
    ///
    /// With no staging list every resolved pipeline runs.
    ///
    /// # Errors
    ///
    /// `UnknownPipeline` if validation fails or a staged name has no
    /// descriptor in `PipelineSettings`.
    pub fn to_run<'a>(&self, config: &'a ResolvedProjectConfig) -> Result<Vec<&'a PipelineDescriptor>> {
        let pipelines = self.resolve(config)?;
        if config.pipelines_to_run.is_empty() {
            return Ok(pipelines.iter().collect());
        }

        config
            .pipelines_to_run
            .iter()
            .map(|name| {
                pipelines
                    .iter()
                    .find(|d| &d.name == name)
                    .ok_or_else(|| self.unknown(name, config))
            })
            .collect()
    }

    fn check(&self, name: &str, config: &ResolvedProjectConfig) -> Result<()> {
        if self.is_known(name, config) {
            Ok(())
        } else {
            Err(self.unknown(name, config))
        }
    }

    fn unknown(&self, name: &str, config: &ResolvedProjectConfig) -> Error {
        let mut known: BTreeSet<String> = self.known.clone();
        known.extend(config.registered_pipelines.iter().cloned());
        Error::UnknownPipeline {
            project: config.project_id.clone(),
            pipeline: name.to_string(),
            known: known.into_iter().collect(),
        }
    }
}

impl Default for PipelineResolver {
    fn default() -> Self {
        Self::with_builtins()
    }
}
