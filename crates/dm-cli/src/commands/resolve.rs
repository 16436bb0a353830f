//! Full resolved configuration display

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Display the resolved configuration of `project`
pub fn run_resolve(ctx: &Context<'_>, project: &str, json: bool) -> Result<()> {
    let resolver = ctx.resolver()?;
    let config = resolver.resolve(project)?;

    if json {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    println!("{} {}", "Project".bold(), config.project_id.cyan());
    println!();
    println!("  {:<16} {}", "Profile:".dimmed(), config.profile.name);
    println!("  {:<16} {}", "Study settings:".dimmed(), config.study_settings);
    println!(
        "  {:<16} {}",
        "Quarantine:".dimmed(),
        config.quarantine().unwrap_or("(disabled)")
    );
    println!("  {:<16} {}", "XNAT server:".dimmed(), config.remote.xnat_server);
    if let Some(ftp) = config.remote.ftp_server() {
        println!("  {:<16} {}", "FTP server:".dimmed(), ftp);
    }
    println!();

    if config.effective_paths.is_empty() {
        println!("  {:<16} {}", "Paths:".dimmed(), "(none)".dimmed());
    } else {
        println!("  {}:", "Paths".dimmed());
        for (tag, path) in &config.effective_paths {
            println!("    {:<10} {}", tag.green(), path);
        }
    }
    println!();

    if config.effective_export_policy.is_empty() {
        println!("  {:<16} {}", "Export:".dimmed(), "(none)".dimmed());
    } else {
        println!("  {}:", "Export".dimmed());
        for (series, formats) in config.effective_export_policy.iter() {
            println!("    {:<10} {}", series.green(), formats);
        }
    }
    println!();

    if config.effective_pipelines.is_empty() {
        println!("  {:<16} {}", "Pipelines:".dimmed(), "(none)".dimmed());
    } else {
        println!("  {}:", "Pipelines".dimmed());
        for pipeline in &config.effective_pipelines {
            println!("    {} {}", "+".green(), pipeline.name);
        }
    }

    Ok(())
}
