//! Core engine.
//!
//! - `hash`: canonical keys and fallback text
//! - `entry` / `catalog`: classified catalog entries and ordered catalogs
//! - `resolve`: runtime translation lookup (`__` / `__p`)
//! - `extract`: key usages in source files, behind the `UsageWalker` trait
//! - `reconcile`: catalog diff and in-place fix
//! - `context`: one `check` run (config, scanning, parallel extraction)

pub mod catalog;
pub mod context;
pub mod entry;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod hash;
pub mod parsers;
pub mod reconcile;
pub mod resolve;

pub use catalog::{Catalog, MISSING_TRANSLATIONS_KEY, MISSING_TRANSLATIONS_VALUE, SENTINEL_KEY};
pub use context::CheckContext;
pub use entry::{Entry, PluralRules};
pub use error::{EntryKind, Error, Result};
pub use extract::{Extractor, KeyUsages, Markers, SwcWalker, TemplateUsage, UsageKind, UsageWalker};
pub use hash::{Template, VARIANT_MARKER, derive_fallback, derive_key};
pub use reconcile::{CatalogDiff, CatalogFile, CatalogReport, FixOutcome, Mode};
pub use resolve::{I18n, Translator, resolve_plural, resolve_scalar};
