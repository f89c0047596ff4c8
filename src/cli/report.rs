//! Report formatting and printing utilities.
//!
//! Separate from core logic so that the engine can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CheckSummary, CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{CatalogReport, FixOutcome};
use crate::issues::{Issue, Report};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Check(summary) => print_check_to(summary, &result.issues, &mut stdout),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print a check result to a custom writer.
pub fn print_check_to<W: Write>(summary: &CheckSummary, issues: &[Issue], writer: &mut W) {
    for catalog in &summary.catalogs {
        print_catalog_status(catalog, writer);
    }
    if summary.catalogs.iter().any(|c| c.outcome.is_some()) {
        let _ = writeln!(writer);
    }

    report_to(issues, writer);

    if issues.is_empty() {
        print_success_to(summary.source_files_checked, summary.catalogs.len(), writer);
    }

    if summary.skipped_count > 0 {
        eprintln!(
            "{} {} path(s) skipped due to access errors (use {} for details)",
            "warning:".bold().yellow(),
            summary.skipped_count,
            "-v".cyan()
        );
    }
    if summary.catalogs.is_empty() {
        eprintln!("{} no catalog files found", "warning:".bold().yellow());
    }
    if summary.fix_skipped {
        eprintln!(
            "{} catalogs were not fixed because some source files failed to parse",
            "warning:".bold().yellow()
        );
    }
}

/// Fix-mode status line of one catalog.
fn print_catalog_status<W: Write>(catalog: &CatalogReport, writer: &mut W) {
    let Some(outcome) = catalog.outcome else {
        return;
    };
    if catalog.error.is_some() {
        return;
    }

    let status = outcome.to_string();
    let line = match outcome {
        FixOutcome::HasMissingTranslations => {
            format!("{} {}: {}", FAILURE_MARK.red(), catalog.file_name(), status.red())
        }
        FixOutcome::KeysAdded | FixOutcome::TranslationsFixed => {
            format!("{} {}: {}", SUCCESS_MARK.green(), catalog.file_name(), status.green())
        }
        FixOutcome::UpToDate => {
            format!("{} {}: {}", SUCCESS_MARK.green(), catalog.file_name(), status.dimmed())
        }
    };
    let _ = writeln!(writer, "{}", line);
}

/// Print issues in cargo-style format.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    for issue in &sorted {
        print_issue(issue, writer);
    }

    let _ = writeln!(
        writer,
        "{} {} {}",
        FAILURE_MARK.red(),
        sorted.len(),
        if sorted.len() == 1 { "error" } else { "errors" }.red()
    );
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(source_files: usize, catalogs: usize, writer: &mut W) {
    let msg = format!(
        "Checked {} source {}, {} {} - no issues found",
        source_files,
        if source_files == 1 { "file" } else { "files" },
        catalogs,
        if catalogs == 1 { "catalog" } else { "catalogs" }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        "error".bold().red(),
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.file_path());

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    a.file_path()
        .cmp(b.file_path())
        .then_with(|| a.report_rule().cmp(&b.report_rule()))
        .then_with(|| a.message().cmp(&b.message()))
}
