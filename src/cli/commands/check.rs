use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary};
use crate::{
    core::{CatalogReport, CheckContext, Error, FixOutcome, KeyUsages, Mode},
    issues::{
        AmbiguousKeyIssue, CatalogDriftIssue, InvalidPluralIssue, Issue, KindMismatchIssue,
        ParseErrorFileType, ParseErrorIssue, PendingTranslationsIssue,
    },
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(args)?;

    let extraction = ctx.extraction();
    if extraction.usages.is_empty() {
        return Err(Error::NoTranslatableUsagesFound(ctx.src_dir.clone()).into());
    }

    // Keys of unparsable files are unknown, so fixing would delete their
    // translations as extra keys.
    let fix_skipped = args.fix && !extraction.parse_errors.is_empty();
    let mode = if args.fix && !fix_skipped {
        Mode::Fix
    } else {
        Mode::Report
    };

    let catalogs = ctx.reconcile(mode);

    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(ambiguous_key_issues(&extraction.usages, &ctx.config.src_dir));
    issues.extend(catalogs.iter().flat_map(catalog_issues));
    issues.extend(extraction.parse_errors.iter().cloned().map(Issue::ParseError));

    Ok(CommandResult {
        summary: CommandSummary::Check(CheckSummary {
            catalogs,
            source_files_checked: ctx.files.len(),
            skipped_count: ctx.skipped_count,
            fix_skipped,
        }),
        issues,
    })
}

fn ambiguous_key_issues(usages: &KeyUsages, src_dir: &str) -> Vec<Issue> {
    usages
        .ambiguous_keys()
        .into_iter()
        .map(|key| {
            Issue::AmbiguousKey(AmbiguousKeyIssue {
                src_dir: src_dir.to_string(),
                key: key.to_string(),
            })
        })
        .collect()
}

/// Issues of one catalog.
///
/// Drift only counts as an issue in report mode; fix mode resolves it and
/// only fails when the catalog still waits for translations.
fn catalog_issues(report: &CatalogReport) -> Vec<Issue> {
    let mut issues = Vec::new();
    let file_path = &report.file_path;
    let locale = &report.locale;

    if let Some(ref error) = report.error {
        issues.push(Issue::ParseError(ParseErrorIssue {
            file_path: file_path.clone(),
            error: error.clone(),
            file_type: ParseErrorFileType::Catalog,
        }));
        return issues;
    }

    let diff = &report.diff;

    if report.outcome.is_none() && diff.has_drift() {
        issues.push(Issue::CatalogDrift(CatalogDriftIssue {
            file_path: file_path.clone(),
            locale: locale.clone(),
            missing: diff.missing.clone(),
            extra: diff.extra.clone(),
        }));
    }

    issues.extend(diff.invalid_plural.iter().map(|key| {
        Issue::InvalidPlural(InvalidPluralIssue {
            file_path: file_path.clone(),
            locale: locale.clone(),
            key: key.clone(),
        })
    }));

    issues.extend(diff.kind_mismatch.iter().map(|key| {
        Issue::KindMismatch(KindMismatchIssue {
            file_path: file_path.clone(),
            locale: locale.clone(),
            key: key.clone(),
        })
    }));

    if report.outcome == Some(FixOutcome::HasMissingTranslations) {
        issues.push(Issue::PendingTranslations(PendingTranslationsIssue {
            file_path: file_path.clone(),
            locale: locale.clone(),
        }));
    }

    issues
}
