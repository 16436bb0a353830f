//! Pipeline listing

use dm_config::PipelineResolver;

use crate::context::Context;
use crate::error::Result;

/// Print the project's pipelines in order, one per line
///
/// Parameters, when present, follow the name as compact JSON.
pub fn run_pipelines(
    ctx: &Context<'_>,
    project: &str,
    to_run: bool,
    registered: &[String],
) -> Result<()> {
    let resolver = ctx.resolver()?;
    let config = resolver.resolve(project)?;

    let mut pipelines = PipelineResolver::with_builtins();
    for name in registered {
        pipelines.register(name.as_str());
    }

    let selected: Vec<_> = if to_run {
        pipelines.to_run(&config)?
    } else {
        pipelines.resolve(&config)?.iter().collect()
    };

    for descriptor in selected {
        if descriptor.params.is_empty() {
            println!("{}", descriptor.name);
        } else {
            let params = serde_json::to_string(&descriptor.params)?;
            println!("{}\t{}", descriptor.name, params);
        }
    }
    Ok(())
}
