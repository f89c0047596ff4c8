use crate::core::CatalogReport;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    /// One report per catalog, sorted by locale.
    pub catalogs: Vec<CatalogReport>,
    /// Number of source files that were scanned.
    pub source_files_checked: usize,
    /// Paths skipped due to access errors.
    pub skipped_count: usize,
    /// `--fix` was requested but catalogs were only reported on because some
    /// source files failed to parse.
    pub fix_skipped: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    /// False when the config file already existed.
    pub created: bool,
}

/// Result of running a tagi18n command.
pub struct CommandResult {
    pub summary: CommandSummary,
    /// All issues found; every issue is an error.
    pub issues: Vec<Issue>,
}

impl CommandResult {
    pub fn error_count(&self) -> usize {
        match &self.summary {
            CommandSummary::Init(InitSummary { created: false }) => 1,
            _ => self.issues.len(),
        }
    }
}
