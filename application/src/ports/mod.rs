//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod config_store;
pub mod default_resources;
pub mod loader_log;
