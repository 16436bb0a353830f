//! Site-level listings that need no project resolution

use colored::Colorize;
use dm_config::{GlobalConfig, HostIdentity, SystemHost, select_profile};

use crate::context::Context;
use crate::error::Result;

/// List declared system profiles, marking the one that would be selected
///
/// A `--profile` that names no declared profile is an error. Without one,
/// an unmatched host only leaves the listing unmarked.
pub fn run_profiles(ctx: &Context<'_>) -> Result<()> {
    let global = GlobalConfig::load(&ctx.config_path()?)?;
    let host = SystemHost.hostname().ok();

    let active = match ctx.profile {
        Some(name) => Some(select_profile(
            &global.system_profiles,
            host.as_deref().unwrap_or_default(),
            Some(name),
        )?),
        None => host
            .as_deref()
            .and_then(|h| select_profile(&global.system_profiles, h, None).ok()),
    };
    let active = active.map(|selected| selected.name);

    println!("{}", "System Profiles".bold());
    println!();
    for (name, profile) in global.system_profiles.iter() {
        let marker = if active.as_ref() == Some(name) {
            "*".green().bold()
        } else {
            " ".normal()
        };
        let hostname = if profile.hostname_pattern.is_empty() {
            "(any via --profile)".dimmed().to_string()
        } else {
            profile.hostname_pattern.clone()
        };
        println!("  {} {:<12} {:<24} {}", marker, name, hostname, profile.projects_root);
    }

    if let Some(host) = host {
        println!();
        println!("  {} {}", "Host:".dimmed(), host);
    }
    Ok(())
}

/// List the project ids declared under `Projects`
pub fn run_projects(ctx: &Context<'_>) -> Result<()> {
    let global = GlobalConfig::load(&ctx.config_path()?)?;
    for project in global.project_ids() {
        println!("{project}");
    }
    Ok(())
}
