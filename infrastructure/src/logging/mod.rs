//! Logging infrastructure: loader diagnostics routed into `tracing`.
//!
//! Provides [`TracingLoaderLog`], which implements the
//! [`LoaderLog`](lmconfig_application::LoaderLog) port.

mod tracing_log;

pub use tracing_log::{LOADER_TARGET, TracingLoaderLog};
