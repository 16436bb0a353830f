//! Schema definitions for site and study configuration documents
//!
//! - [`GlobalConfig`] - the site config, loaded once per process
//! - [`StudyOverlay`] - a study settings file, every field optional
//!
//! Key names follow the datman YAML conventions (`Projects`,
//! `SystemSettings`, `ExportSettings`, ...).

pub mod format;
pub mod global;
pub mod keyed;
pub mod overlay;
pub mod pipeline;
pub mod profile;
pub mod site;

pub use format::{ExportFormat, FormatSet};
pub use global::{GlobalConfig, RemoteEndpoints};
pub use overlay::{IMMUTABLE_KEYS, StudyOverlay};
pub use pipeline::PipelineDescriptor;
pub use profile::EnvironmentProfile;
pub use site::{SiteSettings, TagInfo};
