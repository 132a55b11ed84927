//! Presentation layer for lmconfig
//!
//! This crate contains CLI definitions, output formatters,
//! and terminal rendering of loader messages.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, formatter_for};
pub use output::json::JsonFormatter;
pub use output::loader_log::ConsoleLoaderLog;
