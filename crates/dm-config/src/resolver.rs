//! Per-project configuration resolution with a single-flight cache
//!
//! The resolver owns the site config and the selected environment profile.
//! Each project is resolved by layering, in order:
//!
//! 1. Site defaults from the global config
//! 2. The study settings file named by `Projects[<project>]`, located under
//!    the profile's `CONFIG_DIR`
//!
//! and then expanding path templates below the profile's projects root.
//!
//! Results are cached per `(profile, project)` for the lifetime of the
//! resolver. Concurrent callers asking for the same project wait for one
//! resolution instead of repeating it; failures are never cached.

use crate::export::ExportPolicy;
use crate::host::HostIdentity;
use crate::merge::merge;
use crate::paths::resolve_paths;
use crate::resolved::ResolvedProjectConfig;
use crate::schema::{GlobalConfig, SiteSettings, StudyOverlay};
use crate::selector::{SelectedProfile, select_profile};
use crate::sites::SiteExportInfo;
use crate::{Error, Result};
use dm_fs::{DocumentFormat, DocumentStore, NormalizedPath};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Environment variable naming the site config file.
pub const CONFIG_ENV: &str = "DM_CONFIG";

/// Environment variable naming a profile that overrides host matching.
pub const PROFILE_ENV: &str = "DM_SYSTEM";

type CacheKey = (String, String);
type Slot = Mutex<Option<Arc<ResolvedProjectConfig>>>;

/// Resolves and caches [`ResolvedProjectConfig`]s for one site config.
///
/// Safe to share across threads.
pub struct ConfigResolver {
    global: Arc<GlobalConfig>,

    /// Directory of the site config file; study files resolve against it
    /// when the profile's `CONFIG_DIR` is empty
    config_dir: NormalizedPath,

    host: String,
    profile: SelectedProfile,
    cache: Mutex<HashMap<CacheKey, Arc<Slot>>>,
    builds: AtomicUsize,
}

impl ConfigResolver {
    /// Create a resolver for an already selected profile.
    pub fn new(global: GlobalConfig, profile: SelectedProfile) -> Self {
        Self {
            global: Arc::new(global),
            config_dir: NormalizedPath::new(""),
            host: String::new(),
            profile,
            cache: Mutex::new(HashMap::new()),
            builds: AtomicUsize::new(0),
        }
    }

    /// Create a resolver, selecting the profile for `host`.
    ///
    /// A `requested` profile name bypasses host matching, in which case an
    /// unavailable host identity is not an error.
    pub fn from_global(
        global: GlobalConfig,
        host: &dyn HostIdentity,
        requested: Option<&str>,
    ) -> Result<Self> {
        let host_name = match (host.hostname(), requested) {
            (Ok(name), _) => name,
            (Err(e), Some(_)) => {
                tracing::debug!(error = %e, "Host identity unavailable, using requested profile");
                String::new()
            }
            (Err(e), None) => return Err(e),
        };

        let profile = select_profile(&global.system_profiles, &host_name, requested)?;
        let mut resolver = Self::new(global, profile);
        resolver.host = host_name;
        Ok(resolver)
    }

    /// Load the site config at `path` and create a resolver for it.
    pub fn load(path: &NormalizedPath, host: &dyn HostIdentity, requested: Option<&str>) -> Result<Self> {
        let global = GlobalConfig::load(path)?;
        let config_dir = path.parent().unwrap_or_else(|| NormalizedPath::new(""));
        Ok(Self::from_global(global, host, requested)?.with_config_dir(config_dir))
    }

    /// Set the directory used for study files when `CONFIG_DIR` is empty.
    pub fn with_config_dir(mut self, dir: NormalizedPath) -> Self {
        self.config_dir = dir;
        self
    }

    /// The site config location used when none is given explicitly.
    ///
    /// `$DM_CONFIG` if set, else `<config dir>/datman/site_config.yml`.
    pub fn default_config_path() -> Option<NormalizedPath> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Some(NormalizedPath::new(path));
            }
        }
        dirs::config_dir().map(|dir| NormalizedPath::new(dir.join("datman").join("site_config.yml")))
    }

    pub fn global(&self) -> &GlobalConfig {
        &self.global
    }

    /// The profile selected when the resolver was created.
    pub fn profile(&self) -> &SelectedProfile {
        &self.profile
    }

    /// Project ids listed in the site config.
    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.global.project_ids()
    }

    /// Location of the study settings file for `project` under the default profile.
    pub fn study_settings_path(&self, project: &str) -> Result<NormalizedPath> {
        self.study_path_for(project, &self.profile)
    }

    /// Resolve `project` under the default profile.
    pub fn resolve(&self, project: &str) -> Result<Arc<ResolvedProjectConfig>> {
        self.resolve_with_profile(project, None)
    }

    /// Resolve `project`, optionally under a different named profile.
    ///
    /// # Errors
    ///
    /// - `NoMatchingProfile` if `profile` names no declared profile
    /// - `UnknownProject` if the project is not listed under `Projects`
    /// - `StudyFileNotFound` / `MalformedStudySettings` for study file problems
    /// - `InvalidPathTemplate` if a merged path fragment is unsafe
    pub fn resolve_with_profile(
        &self,
        project: &str,
        profile: Option<&str>,
    ) -> Result<Arc<ResolvedProjectConfig>> {
        let selected = self.profile_for(profile)?;
        let key = (selected.name.clone(), project.to_string());

        let slot = {
            let mut index = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(index.entry(key.clone()).or_default())
        };

        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = guard.as_ref() {
            tracing::debug!(project, profile = %selected.name, "Using cached project config");
            return Ok(Arc::clone(cached));
        }

        match self.build(project, &selected) {
            Ok(resolved) => {
                let resolved = Arc::new(resolved);
                *guard = Some(Arc::clone(&resolved));
                Ok(resolved)
            }
            Err(e) => {
                drop(guard);
                self.evict_if_empty(&key, &slot);
                Err(e)
            }
        }
    }

    /// Resolve `project` without reading or updating the cache.
    pub fn resolve_uncached(&self, project: &str) -> Result<ResolvedProjectConfig> {
        self.build(project, &self.profile)
    }

    /// Whether a successful resolution of `project` under the default profile is cached.
    pub fn is_cached(&self, project: &str) -> bool {
        let key = (self.profile.name.clone(), project.to_string());
        let slot = {
            let index = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            index.get(&key).cloned()
        };
        slot.is_some_and(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
    }

    /// Number of cache entries, including in-flight ones.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of resolutions actually performed, successful or not.
    ///
    /// Cache hits do not count.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    fn profile_for(&self, requested: Option<&str>) -> Result<Cow<'_, SelectedProfile>> {
        match requested {
            Some(name) if name != self.profile.name => Ok(Cow::Owned(select_profile(
                &self.global.system_profiles,
                &self.host,
                Some(name),
            )?)),
            _ => Ok(Cow::Borrowed(&self.profile)),
        }
    }

    // Slots are only handed out under the index lock, so a strong count of
    // two (index plus `slot`) means no other caller holds or awaits it.
    fn evict_if_empty(&self, key: &CacheKey, slot: &Arc<Slot>) {
        let mut index = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let stale = index.get(key).is_some_and(|existing| {
            Arc::ptr_eq(existing, slot)
                && Arc::strong_count(existing) == 2
                && existing.try_lock().is_ok_and(|value| value.is_none())
        });
        if stale {
            index.remove(key);
        }
    }

    fn study_path_for(&self, project: &str, selected: &SelectedProfile) -> Result<NormalizedPath> {
        let file = self
            .global
            .projects
            .get(project)
            .ok_or_else(|| Error::UnknownProject {
                project: project.to_string(),
            })?;

        let root = if selected.profile.config_root.is_empty() {
            self.config_dir.clone()
        } else {
            NormalizedPath::new(&selected.profile.config_root)
        };
        Ok(root.join(file))
    }

    fn build(&self, project: &str, selected: &SelectedProfile) -> Result<ResolvedProjectConfig> {
        self.builds.fetch_add(1, Ordering::Relaxed);
        let study_settings = self.study_path_for(project, selected)?;
        let overlay = load_overlay(project, &study_settings)?;

        let merged = merge(&self.global, &overlay, project);
        let effective_paths =
            resolve_paths(&selected.profile.projects_root, project, &merged.path_templates)?;
        let sites = compile_sites(project, &study_settings, merged.sites)?;

        tracing::debug!(
            project,
            profile = %selected.name,
            paths = effective_paths.len(),
            "Resolved project config"
        );

        Ok(ResolvedProjectConfig {
            project_id: project.to_string(),
            profile: selected.clone(),
            study_settings,
            effective_paths,
            effective_export_policy: ExportPolicy::new(merged.export_policy),
            effective_pipelines: merged.pipelines,
            pipelines_to_run: merged.pipelines_to_run,
            registered_pipelines: merged.registered_pipelines,
            quarantine: merged.quarantine,
            remote: self.global.remote(),
            sites,
            extra: merged.extra,
        })
    }
}

fn load_overlay(project: &str, path: &NormalizedPath) -> Result<StudyOverlay> {
    if !path.is_file() {
        return Err(Error::StudyFileNotFound {
            project: project.to_string(),
            path: path.to_native(),
        });
    }

    let malformed = |message: String| Error::MalformedStudySettings {
        project: project.to_string(),
        path: path.to_native(),
        message,
    };

    let format = DocumentFormat::from_path(path).map_err(|e| malformed(e.to_string()))?;
    let content = dm_fs::io::read_text(path)?;
    tracing::debug!(project, %path, "Loading study settings");

    // An empty document is a study that overrides nothing.
    if content.trim().is_empty() {
        return Ok(StudyOverlay::default());
    }

    DocumentStore::new()
        .parse(&content, format, path)
        .map_err(|e| match e {
            dm_fs::Error::DocumentParse { message, .. } => malformed(message),
            other => Error::Fs(other),
        })
}

fn compile_sites(
    project: &str,
    path: &NormalizedPath,
    sites: BTreeMap<String, SiteSettings>,
) -> Result<BTreeMap<String, SiteExportInfo>> {
    let mut compiled = BTreeMap::new();
    for (site, settings) in sites {
        let info = SiteExportInfo::compile(&site, settings).map_err(|message| {
            Error::MalformedStudySettings {
                project: project.to_string(),
                path: path.to_native(),
                message,
            }
        })?;
        compiled.insert(site, info);
    }
    Ok(compiled)
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("profile", &self.profile.name)
            .field("config_dir", &self.config_dir)
            .field("cached", &self.cached_len())
            .finish()
    }
}
