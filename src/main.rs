//! KeepMyPassword account files.
//!
//! Resolves the platform working directory, manages the configuration file
//! and its companion credential store, and lists available locales.
//!
//!   keepmypassword status               # Platform, directory and file state
//!   keepmypassword init '<payload>'     # First-time setup
//!   keepmypassword show                 # Startup check, prints the payload
//!   keepmypassword reset                # Delete the account files
//!   keepmypassword locales              # Available translations

mod application;
mod cli;
mod domain;
mod infrastructure;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    begin, format_alert, format_locales, format_status, Alert, OutputFormat, StartupState,
    StatusReport,
};
use cli::{AccountCommand, Cli, Commands};
use domain::{AppError, Settings};
use infrastructure::{default_resource_dir, list_locales, load_settings, ConfigFiles, WorkingDir};

/// Exit code telling the launcher to start the program again.
const EXIT_RESTART: i32 = 75;

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        let alert = Alert::from(&e);
        eprintln!("{}", format_alert(&alert));
        std::process::exit(if alert.restart_required { EXIT_RESTART } else { 1 });
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|message| AppError::Settings { message })?;

    let settings = load_settings(cli.settings.as_deref())?
        .with_overrides(cli.data_dir, cli.resource_dir);

    match cli.command {
        Commands::Locales { dir } => cmd_locales(dir, &settings, format),
        Commands::Account(command) => cmd_account(command, &settings, format),
    }
}

/// Commands that operate on the working directory.
fn cmd_account(command: AccountCommand, settings: &Settings, format: OutputFormat) -> domain::Result<()> {
    let working = WorkingDir::new(&settings.paths);
    let resolution = working.resolve_and_prepare();
    tracing::debug!(os = %resolution.os, "Resolved platform");

    if let Some(err) = &resolution.error {
        eprintln!("{}", format_alert(&Alert::from(err)));
    }

    match command {
        AccountCommand::Status => {
            let artifacts = working.path().map_or_else(Vec::new, |dir| {
                ConfigFiles::open(dir, &settings.store).status().to_vec()
            });
            let report = StatusReport {
                os: resolution.os,
                working_dir: resolution.path,
                artifacts,
            };
            println!(
                "{}",
                format_status(&report, format).map_err(json_error)?
            );
        }
        AccountCommand::Paths => {
            println!("{}", working.require()?.display());
        }
        AccountCommand::Init { payload } => {
            let files = ConfigFiles::open(working.require()?, &settings.store);
            files.create(&payload)?;
            println!(
                "{} Created {}",
                "✓".green().bold(),
                files.config_path().display()
            );
        }
        AccountCommand::Show => {
            let files = ConfigFiles::open(working.require()?, &settings.store);
            match begin(&files)? {
                StartupState::FirstRun => {
                    println!("No account yet. Run `keepmypassword init <payload>` to set one up.");
                }
                StartupState::Ready(payload) => println!("{payload}"),
            }
        }
        AccountCommand::Write { payload } => {
            let files = ConfigFiles::open(working.require()?, &settings.store);
            files.write(&payload)?;
            println!("{} Configuration updated", "✓".green().bold());
        }
        AccountCommand::Reset => {
            let files = ConfigFiles::open(working.require()?, &settings.store);
            files.delete()?;
            println!("{} Account files deleted", "✓".green().bold());
        }
    }

    Ok(())
}

/// List locales command.
fn cmd_locales(
    dir: Option<std::path::PathBuf>,
    settings: &Settings,
    format: OutputFormat,
) -> domain::Result<()> {
    let Some(dir) = dir
        .or_else(|| settings.paths.resource_dir.clone())
        .or_else(default_resource_dir)
    else {
        println!("{}", format_locales(&Default::default(), format).map_err(json_error)?);
        return Ok(());
    };

    let locales = list_locales(&dir);
    println!("{}", format_locales(&locales, format).map_err(json_error)?);

    Ok(())
}

fn json_error(err: serde_json::Error) -> AppError {
    AppError::Output {
        message: err.to_string(),
    }
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
