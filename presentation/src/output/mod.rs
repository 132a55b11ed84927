//! Terminal output: report formatting and loader message rendering

pub mod console;
pub mod formatter;
pub mod json;
pub mod loader_log;
