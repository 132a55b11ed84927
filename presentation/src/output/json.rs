//! JSON output formatter

use super::formatter::OutputFormatter;
use lmconfig_application::{
    BackupRecord, FileStatusReport, LoadedConfig, MigrationOutcome, ReloadReport,
};
use lmconfig_domain::{ConfigDocument, MigrationPlan, PluginFile};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::Path;

/// Formats command results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_pretty<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Serialized shape of a loaded file, including its final contents
#[derive(Serialize)]
struct LoadedView<'a> {
    file: String,
    path: &'a Path,
    kind: &'static str,
    installed_version: u32,
    version: u32,
    plan: MigrationPlan,
    migrated: bool,
    backup: Option<&'a BackupRecord>,
    migration: Option<&'a MigrationOutcome>,
    document: &'a ConfigDocument,
}

impl<'a> From<&'a LoadedConfig> for LoadedView<'a> {
    fn from(loaded: &'a LoadedConfig) -> Self {
        Self {
            file: loaded.descriptor.file_name(),
            path: loaded.descriptor.path(),
            kind: loaded.descriptor.kind().as_str(),
            installed_version: loaded.installed_version,
            version: loaded.version,
            plan: loaded.plan,
            migrated: loaded.migrated,
            backup: loaded.backup.as_ref(),
            migration: loaded.migration.as_ref(),
            document: &loaded.document,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_loaded(&self, loaded: &LoadedConfig) -> String {
        Self::to_pretty(&LoadedView::from(loaded))
    }

    fn format_reload(&self, report: &ReloadReport) -> String {
        Self::to_pretty(report)
    }

    fn format_status(&self, reports: &[FileStatusReport]) -> String {
        Self::to_pretty(reports)
    }

    fn format_versions(&self) -> String {
        let versions: Vec<Value> = PluginFile::ALL
            .iter()
            .map(|file| {
                json!({
                    "file": file,
                    "compatible_version": file.compatible_version(),
                })
            })
            .collect();
        Self::to_pretty(&versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lmconfig_domain::{FileDescriptor, RulesMigration};

    #[test]
    fn test_versions_json() {
        let output = JsonFormatter.format_versions();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["file"], "settings");
        assert_eq!(parsed[0]["compatible_version"], 35);
        assert_eq!(parsed[3]["file"], "rules");
        assert_eq!(parsed[3]["compatible_version"], 4);
    }

    #[test]
    fn test_loaded_includes_document() {
        let descriptor = FileDescriptor::new(Path::new("/data"), "messages").unwrap();
        let document = ConfigDocument::parse("greeting: hi\nfile-version: 8\n").unwrap();
        let loaded = LoadedConfig {
            document,
            descriptor,
            installed_version: 8,
            version: 8,
            plan: MigrationPlan::CheckVersion,
            backup: None,
            migrated: false,
            migration: None,
        };

        let parsed: Value = serde_json::from_str(&JsonFormatter.format_loaded(&loaded)).unwrap();
        assert_eq!(parsed["file"], "messages.yml");
        assert_eq!(parsed["plan"]["action"], "check_version");
        assert_eq!(parsed["document"]["greeting"], "hi");
        assert!(parsed["backup"].is_null());
        assert!(parsed["migration"].is_null());
    }

    #[test]
    fn test_loaded_reports_rules_steps() {
        let descriptor = FileDescriptor::new(Path::new("/data"), "rules").unwrap();
        let loaded = LoadedConfig {
            document: ConfigDocument::parse("file-version: 4\n").unwrap(),
            descriptor,
            installed_version: 3,
            version: 4,
            plan: MigrationPlan::RulesInPlace,
            backup: None,
            migrated: true,
            migration: Some(MigrationOutcome::Rules(RulesMigration {
                from: 3,
                to: 4,
                applied: vec!["fine-tuning attributes moved under multipliers"],
            })),
        };

        let parsed: Value = serde_json::from_str(&JsonFormatter.format_loaded(&loaded)).unwrap();
        assert_eq!(parsed["migration"]["kind"], "rules");
        assert_eq!(parsed["migration"]["to"], 4);
        assert_eq!(parsed["migration"]["applied"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_empty_reload_report() {
        let output = JsonFormatter.format_reload(&ReloadReport::default());
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["files"], json!([]));
        assert!(parsed.get("notice").is_none());
    }
}
