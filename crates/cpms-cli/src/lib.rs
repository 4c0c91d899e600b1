//! ControlPlaneMachineSet CLI library

pub mod commands;
pub mod error;

pub use error::{Error, Result};

use clap::{Parser, Subcommand};
use cpms_common::telemetry::LogFormat;

/// cpms - offline checks for ControlPlaneMachineSet manifests
#[derive(Parser, Debug)]
#[command(name = "cpms")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log output format (json or text)
    #[arg(long, global = true, env = "CPMS_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run admission validation of a ControlPlaneMachineSet against Machines
    Validate(commands::validate::ValidateArgs),
    /// List the failure domains control plane Machines occupy
    FailureDomains(commands::failure_domains::FailureDomainsArgs),
    /// Print the provider spec each replica would be created with
    Render(commands::render::RenderArgs),
}

impl Cli {
    /// Run the CLI command, writing results to stdout
    pub fn run(self) -> Result<()> {
        let mut out = std::io::stdout().lock();
        match self.command {
            Commands::Validate(args) => commands::validate::run(args, &mut out),
            Commands::FailureDomains(args) => commands::failure_domains::run(args, &mut out),
            Commands::Render(args) => commands::render::run(args, &mut out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate_with_old() {
        let cli = Cli::try_parse_from([
            "cpms",
            "--log-format",
            "text",
            "validate",
            "--cpms",
            "new.yaml",
            "--machines",
            "machines.yaml",
            "--old",
            "old.yaml",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.log_format, LogFormat::Text);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.cpms.to_str(), Some("new.yaml"));
                assert_eq!(args.old.as_deref().and_then(|p| p.to_str()), Some("old.yaml"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_invalid_log_format_is_rejected() {
        let result = Cli::try_parse_from([
            "cpms",
            "--log-format",
            "yaml",
            "render",
            "--cpms",
            "cpms.yaml",
        ]);
        assert!(result.is_err());
    }
}
