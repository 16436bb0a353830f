//! Filesystem layer for datman study configuration
//!
//! Provides forward-slash normalized paths, validation of relative path
//! fragments, and format-agnostic loading of configuration documents.

pub mod document;
pub mod error;
pub mod io;
pub mod path;

pub use document::{DocumentFormat, DocumentStore};
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_relative_fragment};
