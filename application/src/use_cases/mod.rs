//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod backup;
pub mod diagnostics;
pub mod inspect_configs;
pub mod load_config;
pub mod migrate_values;
pub mod reload_configs;
