//! Record of what one migration did

use serde::Serialize;

/// Keys touched by a migration, as dotted paths.
///
/// Dropped keys are not reported to the operator; the summary is for
/// debug logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    /// Values carried over from the old document
    pub copied: Vec<String>,
    /// Old values with no compatible place in the new document
    pub dropped: Vec<String>,
    /// Keys moved to a new name before copying (`old -> new`)
    pub renamed: Vec<String>,
    /// Sections rewritten into a newer layout
    pub restructured: Vec<String>,
}

impl MigrationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn copied(&mut self, path: impl Into<String>) {
        self.copied.push(path.into());
    }

    pub(crate) fn dropped(&mut self, path: impl Into<String>) {
        self.dropped.push(path.into());
    }

    pub(crate) fn renamed(&mut self, from: &str, to: &str) {
        self.renamed.push(format!("{from} -> {to}"));
    }

    pub(crate) fn restructured(&mut self, path: impl Into<String>) {
        self.restructured.push(path.into());
    }
}
