//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// KeepMyPassword - manage the local account files.
#[derive(Parser, Debug)]
#[command(name = "keepmypassword")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format: table or json.
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Settings file (TOML).
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Use this working directory instead of the platform default.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory containing localization bundles.
    #[arg(long)]
    pub resource_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Account(AccountCommand),

    /// List available locales.
    Locales {
        /// Directory to scan (defaults to the configured resource directory).
        dir: Option<PathBuf>,
    },
}

/// Commands that operate on the working directory.
#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Create the configuration file and credential store.
    Init {
        /// Initial configuration payload.
        payload: String,
    },

    /// Run the startup check and print the configuration payload.
    Show,

    /// Overwrite the configuration payload.
    Write {
        /// New configuration payload.
        payload: String,
    },

    /// Delete the configuration file and credential store.
    Reset,

    /// Show platform, working directory and artifact state.
    Status,

    /// Print the resolved working directory.
    Paths,
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "keepmypassword",
            "-vv",
            "--data-dir",
            "/tmp/kmp",
            "--format",
            "json",
            "init",
            "payload",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/kmp")));
        assert_eq!(cli.output_format().unwrap(), OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Account(AccountCommand::Init { ref payload }) if payload == "payload"
        ));
    }

    #[test]
    fn test_locales_dir_is_optional() {
        let cli = Cli::try_parse_from(["keepmypassword", "locales"]).unwrap();
        assert!(matches!(cli.command, Commands::Locales { dir: None }));
    }

    #[test]
    fn test_account_commands_are_top_level() {
        let cli = Cli::try_parse_from(["keepmypassword", "reset"]).unwrap();
        assert!(matches!(cli.command, Commands::Account(AccountCommand::Reset)));
    }
}
