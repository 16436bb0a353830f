//! Export format lookup

use crate::context::Context;
use crate::error::Result;

/// Print the export formats for `series`, one per line
///
/// Unknown series print nothing and still succeed.
pub fn run_export(ctx: &Context<'_>, project: &str, series: &str) -> Result<()> {
    let resolver = ctx.resolver()?;
    let config = resolver.resolve(project)?;

    if !config.effective_export_policy.is_configured(series) {
        tracing::debug!(project, series, "Series has no export entry");
    }
    for format in config.export_formats(series) {
        println!("{format}");
    }
    Ok(())
}
