//! Resolved path listing

use crate::context::Context;
use crate::error::Result;

/// Print `tag<TAB>path` for every path of `project`
///
/// Fails with `MissingPath` if any tag in `require` is undefined.
pub fn run_paths(ctx: &Context<'_>, project: &str, require: &[String]) -> Result<()> {
    let resolver = ctx.resolver()?;
    let config = resolver.resolve(project)?;

    let required: Vec<&str> = require.iter().map(String::as_str).collect();
    config.require_paths(&required)?;

    for (tag, path) in &config.effective_paths {
        println!("{tag}\t{path}");
    }
    Ok(())
}
