//! Console output formatter for loader results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use lmconfig_application::{
    FileLoadStatus, FileState, FileStatusReport, LoadedConfig, MigrationOutcome, ReloadReport,
};
use lmconfig_domain::{MigrationPlan, PluginFile, VersionStatus, parse_markup};

/// Formats loader results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Renders inline style markup as terminal colors.
    ///
    /// Respects the `colored` global override, so `--no-color` yields the
    /// plain text.
    pub fn render_markup(text: &str) -> String {
        parse_markup(text)
            .into_iter()
            .map(|segment| {
                let mut styled: ColoredString = segment.text.as_str().normal();
                if let Some(color) = segment.color {
                    let (r, g, b) = color.rgb();
                    styled = styled.truecolor(r, g, b);
                }
                // &k (obfuscated) has no terminal equivalent
                if segment.format.bold {
                    styled = styled.bold();
                }
                if segment.format.italic {
                    styled = styled.italic();
                }
                if segment.format.underline {
                    styled = styled.underline();
                }
                if segment.format.strikethrough {
                    styled = styled.strikethrough();
                }
                styled.to_string()
            })
            .collect()
    }

    fn header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn plan_label(plan: &MigrationPlan) -> ColoredString {
        match plan {
            MigrationPlan::BackupAndMigrate {
                overwrite_defaults: true,
                ..
            } => "backup, regenerate and migrate".yellow(),
            MigrationPlan::BackupAndMigrate { .. } => "backup and migrate in place".yellow(),
            MigrationPlan::RulesInPlace => "rules steps in place".normal(),
            MigrationPlan::CheckVersion => "keep".green(),
            MigrationPlan::Keep => "keep (no version check)".normal(),
        }
    }

    fn status_label(status: VersionStatus) -> ColoredString {
        match status {
            VersionStatus::Current => "current".green(),
            VersionStatus::Outdated => "outdated".yellow(),
            VersionStatus::Ahead => "ahead".red(),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_loaded(&self, loaded: &LoadedConfig) -> String {
        let name = loaded.descriptor.file_name();
        if !loaded.migrated {
            return format!("{} {} (v{})\n", "Loaded".green(), name.bold(), loaded.version);
        }

        let mut output = format!(
            "{} {} v{} -> v{}\n",
            "Migrated".yellow(),
            name.bold(),
            loaded.installed_version,
            loaded.version
        );
        if let Some(backup) = &loaded.backup {
            output.push_str(&format!("  {} {}\n", "backup:".dimmed(), backup.path.display()));
        }
        match &loaded.migration {
            Some(MigrationOutcome::Values(summary)) => output.push_str(&format!(
                "  {} {} kept, {} dropped\n",
                "values:".dimmed(),
                summary.copied.len(),
                summary.dropped.len()
            )),
            Some(MigrationOutcome::Rules(rules)) => {
                for step in &rules.applied {
                    output.push_str(&format!("  {} {step}\n", "step:".dimmed()));
                }
            }
            None => {}
        }
        output
    }

    fn format_reload(&self, report: &ReloadReport) -> String {
        let mut output = Self::header("Reload");

        for line in &report.files {
            let name = format!("{:<16}", line.file_name);
            let detail = match &line.status {
                FileLoadStatus::Loaded { version } => format!("{} v{version}", "loaded".green()),
                FileLoadStatus::Migrated { from, to, backup } => {
                    let mut text = format!("{} v{from} -> v{to}", "migrated".yellow());
                    if let Some(backup) = backup {
                        text.push_str(&format!(" (backup {backup})"));
                    }
                    text
                }
                FileLoadStatus::SyntaxError => "syntax error, file left unchanged".red().to_string(),
                FileLoadStatus::Failed { message } => format!("{} {message}", "failed:".red().bold()),
            };
            output.push_str(&format!("{name} {detail}\n"));
        }

        if let Some(notice) = &report.notice {
            output.push('\n');
            output.push_str(&Self::render_markup(notice));
            output.push('\n');
        }
        output
    }

    fn format_status(&self, reports: &[FileStatusReport]) -> String {
        let mut output = Self::header("Status");

        for report in reports {
            let name = format!("{:<16}", format!("{}.yml", report.file.base_name()));
            let detail = match &report.state {
                FileState::Missing => format!(
                    "{} (would be created at v{})",
                    "missing".dimmed(),
                    report.compatible_version
                ),
                FileState::SyntaxError { message } => {
                    format!("{} {}", "syntax error:".red().bold(), message)
                }
                FileState::Present {
                    installed_version,
                    status,
                    plan,
                } => format!(
                    "v{installed_version}/v{} {} -> {}",
                    report.compatible_version,
                    Self::status_label(*status),
                    Self::plan_label(plan)
                ),
            };
            output.push_str(&format!("{name} {detail}\n"));
        }

        let pending = reports.iter().filter(|r| r.needs_migration()).count();
        if pending > 0 {
            output.push_str(&format!(
                "\n{} file(s) will be rewritten on the next load\n",
                pending.to_string().yellow()
            ));
        }
        output
    }

    fn format_versions(&self) -> String {
        let mut output = Self::header("Compatible file versions");
        for file in PluginFile::ALL {
            output.push_str(&format!(
                "{:<16} v{}\n",
                format!("{}.yml", file.base_name()),
                file.compatible_version()
            ));
        }
        output
    }
}
