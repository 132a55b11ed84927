//! Operator-facing loader messages
//!
//! All text carries inline style markup; see [`lmconfig_domain::markup`].

use lmconfig_domain::VersionStatus;

pub(crate) const PREFIX: &str = "&fFile Loader: ";

pub(crate) fn loading(file_name: &str) -> String {
    format!("{PREFIX}&7Loading file '&b{file_name}&7'...")
}

pub(crate) fn creating(file_name: &str) -> String {
    format!("{PREFIX}&7File '&b{file_name}&7' doesn't exist, creating it now...")
}

pub(crate) fn backed_up(file_name: &str, backup_name: &str) -> String {
    format!("{PREFIX}&8(Migration) &b{file_name} backed up to {backup_name}")
}

pub(crate) fn migrating(file_name: &str) -> String {
    format!("{PREFIX}&8(Migration) &7Migrating &b{file_name}&7 from old version to new version.")
}

pub(crate) fn rules_migrated(file_name: &str, from: u32, to: u32) -> String {
    format!("{PREFIX}&8(Migration) &7Updated &b{file_name}&7 in place from &bv{from}&7 to &bv{to}&7.")
}

pub(crate) fn legacy_rules(file_name: &str, version: u32, backup_name: &str) -> String {
    format!(
        "{PREFIX}&8(Migration) &b{file_name}&7 is at &bv{version}&7, older than any known rules layout. \
         Only the newer rules steps were applied; compare it against &b{backup_name}&7."
    )
}

/// Multi-line message for a file the YAML parser rejected.
pub fn syntax_error(file_name: &str, parser_error: &str) -> String {
    [
        format!("{PREFIX}&7Unable to read file &b{file_name}&r due to a user-caused YAML syntax error."),
        "Copy the contents of your file into a YAML validator, such as &bhttps://www.yamllint.com&r, to help locate the line of the mistake.".to_string(),
        "Until this is resolved the plugin will function improperly, or likely not at all.".to_string(),
        "Below is where the parser became confused while reading your file:".to_string(),
        "&b---- START ERROR ----&r".to_string(),
        format!("&4{parser_error}&r"),
        "&b---- END ERROR ----&r".to_string(),
    ]
    .join("\n")
}

/// The two warning lines for a version mismatch, or none when current.
pub fn version_mismatch(file_name: &str, installed: u32, compatible: u32) -> Option<[String; 2]> {
    let status = VersionStatus::compare(installed, compatible);
    if status == VersionStatus::Current {
        return None;
    }

    Some([
        format!(
            "{PREFIX}&7The version of &b{file_name}&7 you have installed is {}! \
             Fix this as soon as possible, else the plugin will most likely malfunction.",
            status.describe()
        ),
        format!(
            "{PREFIX}&8(&7You have &bv{installed}&7 installed but you are meant to be running &bv{compatible}&8)"
        ),
    ])
}

/// Short notice shown to a command sender when `rules.yml` fails to parse.
pub fn rules_load_error_notice() -> &'static str {
    "&4An error occurred&r whilst attempting to parse the file &brules.yml&r due to a user-caused YAML syntax error. Please see the console logs for more details."
}
