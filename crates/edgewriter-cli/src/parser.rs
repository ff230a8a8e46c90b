//! Root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Local writing assistant server.
#[derive(Parser)]
#[command(name = "edgewriter")]
#[command(about = "Serve a local writing-assistant model over HTTP")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["edgewriter", "gpu-info", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.default_log_filter(), "debug");
        assert!(matches!(cli.command, Some(Commands::GpuInfo)));
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::parse_from(["edgewriter"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.default_log_filter(), "info");
    }
}
