//! Error types returned by the library API (resolver, catalogs, extraction).

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Which resolve operation an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Scalar,
    Plural,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Scalar => write!(f, "scalar"),
            EntryKind::Plural => write!(f, "plural"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// The catalog entry has the other shape: a plural rule set resolved as a
    /// scalar, or a scalar string resolved as a plural.
    #[error("invalid translation for `{key}`: this translation must be resolved via the {expected} operation")]
    KindMismatch { key: String, expected: EntryKind },

    /// The catalog entry is neither a string, `null`, nor a plural rule set.
    #[error("invalid translation for `{key}`: unsupported value `{value}`")]
    InvalidEntry { key: String, value: String },

    #[error("unknown locale `{0}`")]
    UnknownLocale(String),

    #[error("no translations found in dir: {}", .0.display())]
    NoTranslatableUsagesFound(PathBuf),

    #[error("root of catalog must be a JSON object: {}", .0.display())]
    CatalogRoot(PathBuf),

    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
