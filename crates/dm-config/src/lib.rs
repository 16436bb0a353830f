//! Configuration resolution engine for datman studies
//!
//! Every study-aware tool asks this crate the same questions: where are the
//! project's data folders, which formats should a series be exported as,
//! and which pipelines apply. Answers come from one site-wide config file
//! layered with a per-study settings file, under the environment profile
//! selected for the current host.
//!
//! # Architecture
//!
//! ```text
//!   site_config.yml ──► GlobalConfig ─┐
//!                                     ├─► merge ─► resolve_paths ─► ResolvedProjectConfig
//!   <STUDY>_settings.yml ─► Overlay ──┘      ▲
//!                                            │
//!   HostIdentity ─► select_profile ──────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dm_config::{ConfigResolver, SystemHost};
//! use dm_fs::NormalizedPath;
//!
//! let resolver = ConfigResolver::load(&NormalizedPath::new("site_config.yml"), &SystemHost, None)?;
//! let spins = resolver.resolve("SPINS")?;
//! println!("dicoms live in {}", spins.path("dcm")?);
//! ```

pub mod error;
pub mod export;
pub mod host;
pub mod merge;
pub mod paths;
pub mod pipelines;
pub mod resolved;
pub mod resolver;
pub mod schema;
pub mod selector;
pub mod sites;

pub use error::{Error, Result};
pub use export::ExportPolicy;
pub use host::{HostIdentity, StaticHost, SystemHost};
pub use merge::{MergedSettings, merge};
pub use paths::resolve_paths;
pub use pipelines::{BUILTIN_PIPELINES, PipelineResolver};
pub use resolved::ResolvedProjectConfig;
pub use resolver::{CONFIG_ENV, ConfigResolver, PROFILE_ENV};
pub use schema::{
    EnvironmentProfile, ExportFormat, FormatSet, GlobalConfig, PipelineDescriptor,
    RemoteEndpoints, SiteSettings, StudyOverlay, TagInfo,
};
pub use selector::{SelectedProfile, select_profile};
pub use sites::SiteExportInfo;
