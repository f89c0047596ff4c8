use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::Markers;

pub const CONFIG_FILE_NAME: &str = ".tagi18nrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root of the scanned source tree.
    #[serde(default = "default_src_dir", alias = "rootDir")]
    pub src_dir: String,
    /// Directory holding one `<locale>.json` catalog per locale.
    #[serde(default = "default_config_dir")]
    pub config_dir: String,
    /// Locale whose source text doubles as its translation.
    #[serde(default)]
    pub default_locale: Option<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Skip files that cannot contain a marker before parsing them.
    #[serde(default = "default_prefilter")]
    pub prefilter: bool,
    #[serde(default)]
    pub markers: Markers,
}

fn default_src_dir() -> String {
    "./src".to_string()
}

fn default_config_dir() -> String {
    "./locales".to_string()
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx"].map(String::from).to_vec()
}

fn default_prefilter() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            config_dir: default_config_dir(),
            default_locale: None,
            ignores: Vec::new(),
            extensions: default_extensions(),
            prefilter: default_prefilter(),
            markers: Markers::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns in `ignores`, an empty extension list and
    /// empty or identical marker names.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        let Markers { scalar, plural } = &self.markers;
        if scalar.is_empty() || plural.is_empty() {
            bail!("'markers' names must not be empty");
        }
        if scalar == plural {
            bail!("'markers.scalar' and 'markers.plural' must differ (both are \"{}\")", scalar);
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).context("Failed to generate default config.")?;
    Ok(format!("{}\n", json))
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
