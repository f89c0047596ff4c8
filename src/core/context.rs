use std::{
    cell::OnceCell,
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use rayon::prelude::*;

use crate::{
    cli::args::CheckArgs,
    config::{Config, load_config},
    core::{
        extract::{Extractor, KeyUsages, SwcWalker},
        file_scanner::{scan_catalog_files, scan_files},
        reconcile::{CatalogFile, CatalogReport, Mode, reconcile_all},
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
};

/// Keys used across the source tree plus the files that failed to parse.
pub struct Extraction {
    pub usages: KeyUsages,
    pub parse_errors: Vec<ParseErrorIssue>,
}

/// State of one `check` run.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--default en`)
/// 2. `.tagi18nrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    pub src_dir: PathBuf,

    pub config_dir: PathBuf,

    /// Source files to extract usages from.
    pub files: BTreeSet<String>,

    /// Locale catalogs found under `config_dir`, sorted by locale.
    pub catalogs: Vec<CatalogFile>,

    /// Paths skipped because they could not be accessed.
    pub skipped_count: usize,

    /// Initialized on first call to `extraction()`.
    extraction: OnceCell<Extraction>,
}

impl CheckContext {
    /// Load the config, apply CLI overrides and discover files.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the catalog directory
    /// does not exist.
    pub fn new(args: &CheckArgs) -> Result<Self> {
        let config_result = load_config(Path::new("."))?;

        if !config_result.from_file() {
            tracing::debug!("no config file found, using default configuration");
        }

        let mut config = config_result.config;

        if let Some(ref src_dir) = args.src_dir {
            config.src_dir = src_dir.to_string_lossy().to_string();
        }

        if let Some(ref config_dir) = args.config_dir {
            config.config_dir = config_dir.to_string_lossy().to_string();
        }

        if let Some(ref default_locale) = args.default_locale {
            config.default_locale = Some(default_locale.clone());
        }

        let src_dir = PathBuf::from(&config.src_dir);
        let config_dir = PathBuf::from(&config.config_dir);

        let (scan_result, catalogs) = rayon::join(
            || scan_files(&src_dir, &config.extensions, &config.ignores),
            || scan_catalog_files(&config_dir),
        );
        let catalogs = catalogs?;

        if let Some(ref locale) = config.default_locale
            && !catalogs.iter().any(|c| &c.locale == locale)
        {
            tracing::debug!(locale = %locale, "default locale has no catalog file");
        }

        Ok(Self {
            config,
            src_dir,
            config_dir,
            files: scan_result.files,
            catalogs,
            skipped_count: scan_result.skipped_count,
            extraction: OnceCell::new(),
        })
    }

    /// Key usages of all source files (lazy initialization).
    ///
    /// Files are read and parsed in parallel; every file yields its own
    /// [`KeyUsages`] and the results are reduced by union.
    pub fn extraction(&self) -> &Extraction {
        self.extraction.get_or_init(|| {
            let extractor = Extractor::<SwcWalker>::swc(
                self.config.markers.clone(),
                self.config.prefilter,
            );

            let (usages, mut parse_errors) = self
                .files
                .par_iter()
                .map(|file_path| match extract_file(&extractor, file_path) {
                    Ok(usages) => (usages, Vec::new()),
                    Err(e) => {
                        tracing::debug!(file = %file_path, error = %e, "failed to extract");
                        let issue = ParseErrorIssue {
                            file_path: file_path.clone(),
                            error: e.to_string(),
                            file_type: ParseErrorFileType::Source,
                        };
                        (KeyUsages::new(), vec![issue])
                    }
                })
                .reduce(
                    || (KeyUsages::new(), Vec::new()),
                    |(a, mut a_errors), (b, b_errors)| {
                        a_errors.extend(b_errors);
                        (a.merge(b), a_errors)
                    },
                );

            parse_errors.sort_by(|a, b| a.file_path.cmp(&b.file_path));

            tracing::debug!(
                scalar = usages.scalar.len(),
                plural = usages.plural.len(),
                "extracted keys"
            );

            Extraction {
                usages,
                parse_errors,
            }
        })
    }

    /// Reconcile every catalog against the extracted keys.
    pub fn reconcile(&self, mode: Mode) -> Vec<CatalogReport> {
        reconcile_all(
            &self.catalogs,
            &self.extraction().usages,
            self.config.default_locale.as_deref(),
            mode,
        )
    }
}

fn extract_file(extractor: &Extractor<SwcWalker>, file_path: &str) -> Result<KeyUsages> {
    let code = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path))?;
    extractor.extract(file_path, &code)
}
