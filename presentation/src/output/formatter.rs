//! Output formatter trait

use super::console::ConsoleFormatter;
use super::json::JsonFormatter;
use lmconfig_application::{FileStatusReport, LoadedConfig, ReloadReport};
use lmconfig_domain::OutputFormat;

/// Trait for formatting command results
pub trait OutputFormatter {
    /// Format the result of loading one file
    fn format_loaded(&self, loaded: &LoadedConfig) -> String;

    /// Format a full reload report
    fn format_reload(&self, report: &ReloadReport) -> String;

    /// Format the read-only status of every file
    fn format_status(&self, reports: &[FileStatusReport]) -> String;

    /// Format the file versions this build expects
    fn format_versions(&self) -> String;
}

/// Picks the formatter for an output format.
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
