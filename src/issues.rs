//! Issue types for catalog checks.
//!
//! Every issue is self-contained: it carries the file it belongs to and all
//! the data the reporter needs to display it. All issues count as errors.

use enum_dispatch::enum_dispatch;

use crate::core::MISSING_TRANSLATIONS_KEY;

/// Maximum number of keys listed in a drift note.
const MAX_KEYS_DISPLAY: usize = 5;

// ============================================================
// Rule
// ============================================================

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    CatalogDrift,
    InvalidPlural,
    KindMismatch,
    PendingTranslations,
    AmbiguousKey,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::CatalogDrift => write!(f, "catalog-drift"),
            Rule::InvalidPlural => write!(f, "invalid-plural"),
            Rule::KindMismatch => write!(f, "kind-mismatch"),
            Rule::PendingTranslations => write!(f, "pending-translations"),
            Rule::AmbiguousKey => write!(f, "ambiguous-key"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Catalogs
// ============================================================

/// Catalog keys differ from the keys used in source (report mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDriftIssue {
    pub file_path: String,
    pub locale: String,
    /// Keys used in source but absent from the catalog, sorted.
    pub missing: Vec<String>,
    /// Catalog keys not used in source, in catalog order.
    pub extra: Vec<String>,
}

/// Plural key whose entry is not a plural rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPluralIssue {
    pub file_path: String,
    pub locale: String,
    pub key: String,
}

/// Scalar key whose entry is a plural rule set or an unsupported value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMismatchIssue {
    pub file_path: String,
    pub locale: String,
    pub key: String,
}

/// Catalog still carries the missing-translations marker and nothing else
/// to fix (fix mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTranslationsIssue {
    pub file_path: String,
    pub locale: String,
}

// ============================================================
// Issue Types - Source
// ============================================================

/// Key used both as `__` and as `__p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousKeyIssue {
    /// Scanned source directory.
    pub src_dir: String,
    pub key: String,
}

/// Which kind of file failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorFileType {
    Source,
    Catalog,
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
    pub file_type: ParseErrorFileType,
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found by `check`.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    CatalogDrift(CatalogDriftIssue),
    InvalidPlural(InvalidPluralIssue),
    KindMismatch(KindMismatchIssue),
    PendingTranslations(PendingTranslationsIssue),
    AmbiguousKey(AmbiguousKeyIssue),
    ParseError(ParseErrorIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for static dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// File the issue belongs to.
    fn file_path(&self) -> &str;

    /// Primary message to display (key, counts, error, etc.).
    fn message(&self) -> String;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

fn list_keys(keys: &[String]) -> String {
    let shown: Vec<String> = keys
        .iter()
        .take(MAX_KEYS_DISPLAY)
        .map(|k| format!("\"{}\"", k))
        .collect();
    let remaining = keys.len().saturating_sub(MAX_KEYS_DISPLAY);
    if remaining > 0 {
        format!("{} (and {} more)", shown.join(", "), remaining)
    } else {
        shown.join(", ")
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for CatalogDriftIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing {}", self.missing.len()));
        }
        if !self.extra.is_empty() {
            parts.push(format!("extra {}", self.extra.len()));
        }
        format!("{} invalid translations: {}", self.locale, parts.join(", "))
    }

    fn report_rule(&self) -> Rule {
        Rule::CatalogDrift
    }

    fn hint(&self) -> Option<&str> {
        Some("run with --fix to update the catalog")
    }

    fn details(&self) -> Option<String> {
        let mut notes = Vec::new();
        if !self.missing.is_empty() {
            notes.push(format!("missing: {}", list_keys(&self.missing)));
        }
        if !self.extra.is_empty() {
            notes.push(format!("extra: {}", list_keys(&self.extra)));
        }
        Some(notes.join("; "))
    }
}

impl Report for InvalidPluralIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("{} invalid plural translation: \"{}\"", self.locale, self.key)
    }

    fn report_rule(&self) -> Rule {
        Rule::InvalidPlural
    }

    fn hint(&self) -> Option<&str> {
        Some("plural keys need an object with \"zero\", \"one\", \"+2\", \"many\" and \"manyLimit\"")
    }
}

impl Report for KindMismatchIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("{} invalid scalar translation: \"{}\"", self.locale, self.key)
    }

    fn report_rule(&self) -> Rule {
        Rule::KindMismatch
    }

    fn hint(&self) -> Option<&str> {
        Some("scalar keys need a string or null")
    }
}

impl Report for PendingTranslationsIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("{} has missing translations", self.locale)
    }

    fn report_rule(&self) -> Rule {
        Rule::PendingTranslations
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "translate the new entries, then delete the \"{}\" line",
            MISSING_TRANSLATIONS_KEY
        ))
    }
}

impl Report for AmbiguousKeyIssue {
    fn file_path(&self) -> &str {
        &self.src_dir
    }

    fn message(&self) -> String {
        format!("\"{}\" is used both as scalar and plural", self.key)
    }

    fn report_rule(&self) -> Rule {
        Rule::AmbiguousKey
    }

    fn hint(&self) -> Option<&str> {
        Some("add a \"~~\" variant suffix to one of the templates")
    }
}

impl Report for ParseErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_rule(&self) -> Rule {
        Rule::ParseError
    }

    fn details(&self) -> Option<String> {
        match self.file_type {
            ParseErrorFileType::Source => {
                Some("keys used in this file are not known; catalogs may be reported as drifted".to_string())
            }
            ParseErrorFileType::Catalog => None,
        }
    }
}
