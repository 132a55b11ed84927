//! CLI entrypoint for lmconfig
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use lmconfig_application::{
    ConfigStore, DefaultResourceProvider, InspectConfigsUseCase, LoadConfigUseCase, LoaderLog,
    ReloadConfigsUseCase, ReloadOptions,
};
use lmconfig_domain::{OutputFormat as DomainOutputFormat, PluginFile};
use lmconfig_infrastructure::{
    ConfigLoader, ConfigOverrides, DirectoryResources, EmbeddedResources, FsConfigStore,
    ToolConfig,
};
use lmconfig_presentation::{Cli, Command, ConsoleLoaderLog, formatter_for};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = resolve_config(&cli)?;
    debug!(?config, "Resolved configuration");

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format: DomainOutputFormat = match cli.output {
        Some(format) => format.into(),
        None => config.output.format.unwrap_or_default(),
    };
    let formatter = formatter_for(format);

    // === Dependency Injection ===
    let store: Arc<dyn ConfigStore> = Arc::new(FsConfigStore::new());
    let resources: Arc<dyn DefaultResourceProvider> = match &config.resources_dir {
        Some(dir) => Arc::new(DirectoryResources::new(dir)),
        None => Arc::new(EmbeddedResources::new()),
    };
    let log: Arc<dyn LoaderLog> = Arc::new(ConsoleLoaderLog::new());
    let loader = LoadConfigUseCase::new(&config.data_dir, store.clone(), resources, log);

    info!(data_dir = %config.data_dir.display(), "Starting lmconfig");

    let command = cli.command.clone().unwrap_or(Command::Status);
    match command {
        Command::Load { name, compatible } => {
            let (name, compatible) = load_target(&name, compatible)?;
            match loader
                .load(&name, compatible)
                .with_context(|| format!("Failed to load {name}.yml"))?
            {
                Some(loaded) => print!("{}", formatter.format_loaded(&loaded)),
                None => return Ok(ExitCode::FAILURE),
            }
        }
        Command::Reload { skip_custom_drops } => {
            let options = ReloadOptions {
                include_custom_drops: config.load_custom_drops && !skip_custom_drops,
            };
            let report = ReloadConfigsUseCase::new(loader).execute(&options);
            print!("{}", formatter.format_reload(&report));
            if !report.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Status => {
            let reports = InspectConfigsUseCase::new(&config.data_dir, store).execute()?;
            print!("{}", formatter.format_status(&reports));
        }
        Command::Versions => print!("{}", formatter.format_versions()),
    }

    Ok(ExitCode::SUCCESS)
}

/// Merges configuration files and applies command line overrides.
fn resolve_config(cli: &Cli) -> Result<ToolConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };

    Ok(config.with_overrides(ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        resources_dir: cli.resources.clone(),
        no_color: cli.no_color,
    })?)
}

/// Base name and compatible version for `load <name>`.
///
/// Plugin files are matched ignoring case and a `.yml` suffix; any other
/// name needs `--compatible`.
fn load_target(name: &str, compatible: Option<u32>) -> Result<(String, u32)> {
    if let Ok(file) = name.parse::<PluginFile>() {
        return Ok((
            file.base_name().to_string(),
            compatible.unwrap_or_else(|| file.compatible_version()),
        ));
    }
    match compatible {
        Some(version) => Ok((name.trim_end_matches(".yml").to_string(), version)),
        None => bail!("'{name}' is not a plugin file; pass --compatible <N> to load it"),
    }
}
