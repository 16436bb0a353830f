//! Shared test utilities for the datman config workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`site`] - [`TestSite`] builder writing a site config and study files

pub mod site;

pub use site::TestSite;
