//! Command implementations for dm-cli

pub mod export;
pub mod paths;
pub mod pipelines;
pub mod profiles;
pub mod resolve;

pub use export::run_export;
pub use paths::run_paths;
pub use pipelines::run_pipelines;
pub use profiles::{run_profiles, run_projects};
pub use resolve::run_resolve;
