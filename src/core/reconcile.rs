//! Catalog reconciliation: diff the keys used in source against every locale
//! catalog, then either report the drift or patch the catalog in place.
//!
//! Each catalog goes through `Loaded -> Diffed -> Reported | Patched & Persisted`
//! on its own. A catalog that cannot be read, parsed or written records the
//! failure on its [`CatalogReport`] and never stops the other catalogs.
//!
//! The default locale is special: its source text *is* the translation, so
//! scalar keys never need an entry there, and an explicit `null` scalar entry
//! is redundant and flagged as extra. Plural keys always need an explicit rule
//! set because the fallback text cannot encode plural grammar.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use super::{
    catalog::{Catalog, MISSING_TRANSLATIONS_KEY, MISSING_TRANSLATIONS_VALUE, SENTINEL_KEY},
    entry::{Entry, PluralRules},
    error::Error,
    extract::KeyUsages,
};

/// Whether catalogs are only checked or also patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Report,
    Fix,
}

/// Differences between the source keys and one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDiff {
    /// Keys that must be added, sorted.
    pub missing: Vec<String>,
    /// Keys that are not used (or redundant), in catalog order.
    pub extra: Vec<String>,
    /// Plural keys whose entry is not a plural rule set.
    pub invalid_plural: Vec<String>,
    /// Scalar keys whose entry is a plural rule set or an unsupported value.
    pub kind_mismatch: Vec<String>,
}

impl CatalogDiff {
    pub fn has_drift(&self) -> bool {
        !self.missing.is_empty() || !self.extra.is_empty()
    }

    pub fn has_invalid_entries(&self) -> bool {
        !self.invalid_plural.is_empty() || !self.kind_mismatch.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_drift() && !self.has_invalid_entries()
    }

    /// `missing` is empty and the only extra key is the leftover marker.
    fn only_marker_left(&self) -> bool {
        self.missing.is_empty() && self.extra.len() == 1 && self.extra[0] == MISSING_TRANSLATIONS_KEY
    }
}

/// Compute the diff of `catalog` against the source keys.
///
/// Invalid plural entries are removed from `catalog` and listed as missing so
/// that fix mode regenerates them.
pub fn diff_catalog(catalog: &mut Catalog, usages: &KeyUsages, is_default: bool) -> CatalogDiff {
    let mut diff = CatalogDiff::default();

    diff.invalid_plural = catalog
        .iter()
        .filter(|(key, entry)| usages.is_plural(key) && !entry.is_plural())
        .map(|(key, _)| key.to_string())
        .collect();
    for key in &diff.invalid_plural {
        catalog.remove(key);
    }

    for (key, entry) in catalog.iter() {
        if key == SENTINEL_KEY {
            continue;
        }

        let used_as_scalar = usages.is_scalar(key) && !(is_default && entry.is_null());
        let used_as_plural = usages.is_plural(key) && entry.is_plural();

        if !used_as_scalar && !used_as_plural {
            diff.extra.push(key.to_string());
        }

        if usages.is_scalar(key)
            && !usages.is_plural(key)
            && matches!(entry, Entry::Plural(_) | Entry::Invalid(_))
        {
            diff.kind_mismatch.push(key.to_string());
        }
    }

    let required: Vec<&str> = if is_default {
        usages.plural.iter().map(String::as_str).collect()
    } else {
        usages.all_keys().into_iter().collect()
    };
    diff.missing = required
        .into_iter()
        .filter(|key| !catalog.contains_key(key))
        .map(str::to_string)
        .collect();

    diff
}

/// Result of fix mode for one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    KeysAdded,
    TranslationsFixed,
    UpToDate,
    /// Only the missing-translations marker is left; the file is not touched.
    HasMissingTranslations,
}

impl std::fmt::Display for FixOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixOutcome::KeysAdded => write!(f, "keys were added"),
            FixOutcome::TranslationsFixed => write!(f, "translations fixed"),
            FixOutcome::UpToDate => write!(f, "up to date"),
            FixOutcome::HasMissingTranslations => write!(f, "has missing translations"),
        }
    }
}

/// Patch `catalog` in memory so that it matches the source keys.
///
/// Expects the catalog that went through [`diff_catalog`] (invalid plural
/// entries already stripped).
pub fn apply_fix(catalog: &mut Catalog, diff: &CatalogDiff, usages: &KeyUsages) -> FixOutcome {
    if diff.only_marker_left() {
        return FixOutcome::HasMissingTranslations;
    }

    let mut added = false;
    let mut removed = !diff.invalid_plural.is_empty();

    catalog.remove(SENTINEL_KEY);

    if !diff.missing.is_empty() && !catalog.contains_key(MISSING_TRANSLATIONS_KEY) {
        catalog.insert(
            MISSING_TRANSLATIONS_KEY,
            Entry::Scalar(MISSING_TRANSLATIONS_VALUE.to_string()),
        );
        added = true;
    }

    for key in &diff.missing {
        let entry = if usages.is_plural(key) {
            Entry::Plural(PluralRules::skeleton())
        } else {
            Entry::Null
        };
        catalog.insert(key.as_str(), entry);
        added = true;
    }

    for key in &diff.extra {
        if key != MISSING_TRANSLATIONS_KEY && catalog.remove(key).is_some() {
            removed = true;
        }
    }

    catalog.insert(SENTINEL_KEY, Entry::Scalar(String::new()));

    if added {
        FixOutcome::KeysAdded
    } else if removed {
        FixOutcome::TranslationsFixed
    } else {
        FixOutcome::UpToDate
    }
}

/// A locale catalog file found in the catalog directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogFile {
    pub locale: String,
    pub path: PathBuf,
}

impl CatalogFile {
    pub fn new(locale: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            locale: locale.into(),
            path: path.into(),
        }
    }
}

/// Everything that happened to one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    pub locale: String,
    pub file_path: String,
    pub is_default: bool,
    pub diff: CatalogDiff,
    /// Set in fix mode.
    pub outcome: Option<FixOutcome>,
    /// True when fix mode rewrote the file.
    pub written: bool,
    /// Read, parse or write failure.
    pub error: Option<String>,
}

impl CatalogReport {
    fn new(file: &CatalogFile, is_default: bool) -> Self {
        Self {
            locale: file.locale.clone(),
            file_path: file.path.to_string_lossy().to_string(),
            is_default,
            diff: CatalogDiff::default(),
            outcome: None,
            written: false,
            error: None,
        }
    }

    /// File name for display (`pt.json`).
    pub fn file_name(&self) -> &str {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file_path)
    }

    /// Whether this catalog makes the whole run fail.
    pub fn is_failure(&self) -> bool {
        if self.error.is_some() || self.diff.has_invalid_entries() {
            return true;
        }
        match self.outcome {
            None => self.diff.has_drift(),
            Some(outcome) => outcome == FixOutcome::HasMissingTranslations,
        }
    }
}

/// Load, diff and (in fix mode) patch and persist one catalog.
pub fn reconcile_catalog(
    file: &CatalogFile,
    usages: &KeyUsages,
    is_default: bool,
    mode: Mode,
) -> CatalogReport {
    let mut report = CatalogReport::new(file, is_default);

    let content = match fs::read_to_string(&file.path) {
        Ok(content) => content,
        Err(e) => {
            report.error = Some(Error::io(&file.path, e).to_string());
            return report;
        }
    };

    let mut catalog = match Catalog::from_json_str(&content) {
        Ok(catalog) => catalog,
        Err(Error::CatalogRoot(_)) => {
            report.error = Some(Error::CatalogRoot(file.path.clone()).to_string());
            return report;
        }
        Err(e) => {
            report.error = Some(format!("{}: {}", file.path.display(), e));
            return report;
        }
    };

    report.diff = diff_catalog(&mut catalog, usages, is_default);

    if mode == Mode::Report {
        return report;
    }

    let outcome = apply_fix(&mut catalog, &report.diff, usages);
    report.outcome = Some(outcome);

    if outcome == FixOutcome::HasMissingTranslations {
        return report;
    }

    match persist(&catalog, &file.path, &content) {
        Ok(written) => report.written = written,
        Err(e) => report.error = Some(e.to_string()),
    }

    report
}

/// Write the catalog unless the file already has exactly this content.
fn persist(catalog: &Catalog, path: &Path, current: &str) -> Result<bool, Error> {
    let content = catalog.to_json_string()?;
    if content == current {
        return Ok(false);
    }

    fs::write(path, content).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), "catalog written");
    Ok(true)
}

/// Reconcile every catalog in parallel. Reports are sorted by locale.
///
/// Each file is handled by exactly one task, so no file has two writers.
pub fn reconcile_all(
    files: &[CatalogFile],
    usages: &KeyUsages,
    default_locale: Option<&str>,
    mode: Mode,
) -> Vec<CatalogReport> {
    let mut reports: Vec<CatalogReport> = files
        .par_iter()
        .map(|file| {
            let is_default = default_locale == Some(file.locale.as_str());
            reconcile_catalog(file, usages, is_default, mode)
        })
        .collect();

    reports.sort_by(|a, b| (&a.locale, &a.file_path).cmp(&(&b.locale, &b.file_path)));
    reports
}
