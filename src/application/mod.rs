//! Application layer - startup flow and presentation.

pub mod presenter;
pub mod startup;

pub use presenter::{format_alert, format_locales, format_status, Alert, OutputFormat, StatusReport};
pub use startup::{begin, StartupState};
