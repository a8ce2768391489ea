//! Rendering of results and alerts for the terminal.
//!
//! The core only classifies errors; this module turns that classification
//! into text.

use std::collections::BTreeSet;
use std::error::Error as _;
use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::domain::{AppError, ArtifactStatus, OsCategory, Severity};

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// A classified error, ready to be shown.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub diagnostic: bool,
    pub restart_required: bool,
    pub message: String,
    /// Source chain, filled only for diagnostic alerts.
    pub causes: Vec<String>,
}

impl From<&AppError> for Alert {
    fn from(err: &AppError) -> Self {
        let diagnostic = err.severity() == Severity::Diagnostic;

        let mut causes = Vec::new();
        if diagnostic {
            let mut source = err.source();
            while let Some(cause) = source {
                causes.push(cause.to_string());
                source = cause.source();
            }
        }

        Self {
            diagnostic,
            restart_required: err.requires_restart(),
            message: err.to_string(),
            causes,
        }
    }
}

/// Formats an alert for stderr.
#[must_use]
pub fn format_alert(alert: &Alert) -> String {
    let mut out = if alert.diagnostic {
        format!("{} {}", "Error:".red().bold(), alert.message)
    } else {
        format!("{} {}", "Notice:".yellow().bold(), alert.message)
    };

    for cause in &alert.causes {
        out.push_str(&format!("\n  {} {cause}", "caused by:".dimmed()));
    }

    if alert.restart_required {
        out.push_str(&format!("\n{}", "Please restart the program.".bold()));
    }

    out
}

/// Snapshot of where the account lives and what is on disk.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub os: OsCategory,
    pub working_dir: Option<PathBuf>,
    pub artifacts: Vec<ArtifactStatus>,
}

/// Formats a status report.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_status(report: &StatusReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Table => Ok(format_status_table(report)),
    }
}

fn format_status_table(report: &StatusReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Artifact", "Present", "Size", "Modified", "Path"]);

    for status in &report.artifacts {
        table.add_row(vec![
            status.artifact.to_string(),
            if status.present { "yes" } else { "no" }.to_string(),
            status
                .size_bytes
                .map_or_else(|| "-".to_string(), |b| format!("{b} B")),
            status.modified.map_or_else(
                || "-".to_string(),
                |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
            ),
            status.path.display().to_string(),
        ]);
    }

    let dir = report
        .working_dir
        .as_ref()
        .map_or_else(|| "(unset)".to_string(), |p| p.display().to_string());

    format!(
        "{} {}\n{} {}\n\n{table}",
        "Platform:".bold(),
        report.os,
        "Working directory:".bold(),
        dir
    )
}

/// Formats the available locales.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_locales(locales: &BTreeSet<String>, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(locales),
        OutputFormat::Table => {
            if locales.is_empty() {
                return Ok("No locales found".to_string());
            }
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Locale"]);
            for locale in locales {
                table.add_row(vec![locale.as_str()]);
            }
            Ok(table.to_string())
        }
    }
}
