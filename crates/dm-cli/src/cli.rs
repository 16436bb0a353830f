//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read-only views of resolved datman study configuration
#[derive(Parser, Debug)]
#[command(name = "dm-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Site config file (defaults to <config dir>/datman/site_config.yml)
    #[arg(short, long, global = true, env = "DM_CONFIG")]
    pub config: Option<PathBuf>,

    /// System profile to use instead of matching on the hostname
    #[arg(short, long, global = true, env = "DM_SYSTEM")]
    pub profile: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the full resolved configuration of a project
    Resolve {
        /// Project id as listed under Projects
        project: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print each path tag and its resolved directory
    ///
    /// Examples:
    ///   dm-config paths SPINS
    ///   dm-config paths SPINS --require dcm --require nii
    Paths {
        /// Project id as listed under Projects
        project: String,

        /// Fail unless these tags are defined
        #[arg(short, long)]
        require: Vec<String>,
    },

    /// Print the formats a series should be exported as, one per line
    Export {
        /// Project id as listed under Projects
        project: String,

        /// Series identifier (e.g. T1, DTI60-1000)
        series: String,
    },

    /// List the project's pipelines in order
    Pipelines {
        /// Project id as listed under Projects
        project: String,

        /// Only pipelines staged in PipelineSettings_torun
        #[arg(long)]
        to_run: bool,

        /// Additional external pipeline names to accept
        #[arg(long = "register")]
        registered: Vec<String>,
    },

    /// List the system profiles declared in the site config
    Profiles,

    /// List the projects declared in the site config
    Projects,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dm-config",
            "paths",
            "SPINS",
            "--profile",
            "local",
            "--require",
            "dcm",
        ])
        .unwrap();

        assert_eq!(cli.profile.as_deref(), Some("local"));
        assert_eq!(
            cli.command,
            Commands::Paths {
                project: "SPINS".into(),
                require: vec!["dcm".into()],
            }
        );
    }

    #[test]
    fn parse_export() {
        let cli = Cli::try_parse_from(["dm-config", "export", "SPINS", "T1"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Export {
                project: "SPINS".into(),
                series: "T1".into(),
            }
        );
    }
}
