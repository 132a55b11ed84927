//! Configuration file loader with multi-source merging

use super::file_config::ToolConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "lmconfig";
const PROJECT_FILES: [&str; 2] = ["lmconfig.toml", ".lmconfig.toml"];
const ENV_PREFIX: &str = "LMCONFIG_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LMCONFIG_*` environment variables (`__` separates nested keys)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./lmconfig.toml` or `./.lmconfig.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/lmconfig/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<ToolConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path,
        )
        .merge(Self::env())
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> ToolConfig {
        ToolConfig::default()
    }

    /// File layers on top of the defaults. Missing files are skipped.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(ToolConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // Explicit path has the highest priority among files
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// `LMCONFIG_DATA_DIR`, `LMCONFIG_OUTPUT__COLOR` and so on.
    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/lmconfig/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] Environment: {ENV_PREFIX}*");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./lmconfig.toml or ./.lmconfig.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            println!("  [{marker}] Global:  {}", path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;
    use figment::Jail;
    use std::fs;
    use tempfile::TempDir;

    fn extract(figment: Figment) -> ToolConfig {
        figment.extract().unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.data_dir, PathBuf::from("plugins/LevelledMobs"));
        assert!(config.load_custom_drops);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("lmconfig"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        let project = temp.path().join("lmconfig.toml");
        fs::write(&global, "data_dir = \"/global\"\nload_custom_drops = false\n").unwrap();
        fs::write(&project, "data_dir = \"/project\"\n[output]\ncolor = false\n").unwrap();

        let config = extract(ConfigLoader::figment(
            Some(global.as_path()),
            Some(project.as_path()),
            None,
        ));

        assert_eq!(config.data_dir, PathBuf::from("/project"));
        assert!(!config.load_custom_drops);
        assert!(!config.output.color);
    }

    #[test]
    fn test_explicit_file_wins_and_missing_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("custom.toml");
        fs::write(&explicit, "data_dir = \"/explicit\"\n").unwrap();
        let missing = temp.path().join("missing.toml");

        let config = extract(ConfigLoader::figment(
            Some(missing.as_path()),
            None,
            Some(explicit.as_path()),
        ));
        assert_eq!(config.data_dir, PathBuf::from("/explicit"));
    }

    #[test]
    fn test_env_beats_explicit_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                "data_dir = \"/explicit\"\nload_custom_drops = false\n[output]\ncolor = true\n",
            )?;
            jail.set_env("LMCONFIG_DATA_DIR", "/from-env");
            jail.set_env("LMCONFIG_OUTPUT__COLOR", "false");

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;

            assert_eq!(config.data_dir, PathBuf::from("/from-env"));
            assert!(!config.output.color);
            // Keys without a variable still come from the file
            assert!(!config.load_custom_drops);
            Ok(())
        });
    }

    #[test]
    fn test_env_nested_format() {
        Jail::expect_with(|jail| {
            jail.set_env("LMCONFIG_OUTPUT__FORMAT", "json");

            let config = extract(ConfigLoader::figment(None, None, None).merge(ConfigLoader::env()));

            assert_eq!(config.output.format, Some(lmconfig_domain::OutputFormat::Json));
            assert_eq!(config.data_dir, PathBuf::from("plugins/LevelledMobs"));
            Ok(())
        });
    }

    #[test]
    fn test_flags_beat_env() {
        Jail::expect_with(|jail| {
            jail.set_env("LMCONFIG_DATA_DIR", "/from-env");
            jail.set_env("LMCONFIG_RESOURCES_DIR", "/env-defaults");

            let config = extract(ConfigLoader::figment(None, None, None).merge(ConfigLoader::env()))
                .with_overrides(ConfigOverrides {
                    data_dir: Some(PathBuf::from("/from-flag")),
                    ..ConfigOverrides::default()
                })
                .unwrap();

            assert_eq!(config.data_dir, PathBuf::from("/from-flag"));
            assert_eq!(config.resources_dir, Some(PathBuf::from("/env-defaults")));
            Ok(())
        });
    }
}
