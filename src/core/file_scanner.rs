use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use super::reconcile::CatalogFile;

/// Directories that are never descended into.
const ALWAYS_SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning source files.
pub struct ScanResult {
    pub files: BTreeSet<String>,
    pub skipped_count: usize,
}

/// User ignore patterns, split into literal path prefixes and globs.
struct IgnoreMatcher {
    literal_paths: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreMatcher {
    fn new(base_dir: &Path, ignore_patterns: &[String]) -> Self {
        let mut literal_paths = Vec::new();
        let mut globs = Vec::new();

        for p in ignore_patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => globs.push(pattern),
                    Err(e) => tracing::warn!(pattern = %p, error = %e, "invalid ignore pattern"),
                }
            } else {
                literal_paths.push(base_dir.join(p));
            }
        }

        Self {
            literal_paths,
            globs,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.literal_paths.iter().any(|p| path.starts_with(p))
            || self.globs.iter().any(|p| p.matches(&path_str))
    }
}

fn is_always_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| ALWAYS_SKIPPED_DIRS.contains(&name))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

/// Collect every source file under `base_dir` with one of `extensions`.
pub fn scan_files(base_dir: &Path, extensions: &[String], ignore_patterns: &[String]) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;
    let ignores = IgnoreMatcher::new(base_dir, ignore_patterns);

    let walker = WalkDir::new(base_dir)
        .into_iter()
        .filter_entry(|entry| !is_always_skipped(entry) && !ignores.is_ignored(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::debug!(error = %e, "cannot access path");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && has_extension(path, extensions) {
            files.insert(path.to_string_lossy().to_string());
        }
    }

    tracing::debug!(dir = %base_dir.display(), files = files.len(), "scanned source files");

    ScanResult {
        files,
        skipped_count,
    }
}

/// Locale of a catalog file: its file stem (`locales/pt.json` -> `pt`).
pub fn extract_locale(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Find every `*.json` catalog under `catalog_dir`, sorted by locale.
pub fn scan_catalog_files(catalog_dir: &Path) -> Result<Vec<CatalogFile>> {
    if !catalog_dir.is_dir() {
        bail!("Catalog directory not found: {}", catalog_dir.display());
    }

    Ok(find_catalog_files(catalog_dir))
}

/// Every `*.json` file under `catalog_dir`, sorted by locale then path.
///
/// Unreadable entries are skipped; a missing directory yields nothing.
pub fn find_catalog_files(catalog_dir: &Path) -> Vec<CatalogFile> {
    let json = ["json".to_string()];
    let mut catalogs: Vec<CatalogFile> = WalkDir::new(catalog_dir)
        .into_iter()
        .filter_entry(|entry| !is_always_skipped(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), &json))
        .filter_map(|entry| {
            extract_locale(entry.path()).map(|locale| CatalogFile::new(locale, entry.path()))
        })
        .collect();

    catalogs.sort();
    catalogs
}
