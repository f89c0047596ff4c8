//! Locale catalogs: one JSON object per locale, keyed by canonical key.
//!
//! Entries live in an insertion-ordered map so that writing a catalog back
//! keeps existing keys in place and appends new ones.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};

use super::{
    entry::Entry,
    error::{Error, Result},
};

/// Formatting sentinel; always written last as `"": ""`.
pub const SENTINEL_KEY: &str = "";

/// Leftover marker inserted by fix mode above newly added keys.
pub const MISSING_TRANSLATIONS_KEY: &str = "👇 missing translations 👇";

/// Value of [`MISSING_TRANSLATIONS_KEY`].
pub const MISSING_TRANSLATIONS_VALUE: &str = "🛑 delete this line 🛑";

/// An ordered, classified locale catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: IndexMap<String, Entry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON text. The root must be an object.
    pub fn from_json_str(content: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(Error::CatalogRoot(PathBuf::new())),
        }
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&content).map_err(|e| match e {
            Error::CatalogRoot(_) => Error::CatalogRoot(path.to_path_buf()),
            other => other,
        })
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let mut catalog = Self::new();
        for (key, value) in map {
            catalog.insert(key, Entry::classify(value));
        }
        catalog
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace an entry. New keys are appended; replaced keys keep
    /// their position.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) -> Option<Entry> {
        self.entries.insert(key.into(), entry)
    }

    /// Remove an entry, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.entries.shift_remove(key)
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON (2-space indent) with a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let content = serde_json::to_string_pretty(self)?;
        Ok(format!("{}\n", content))
    }

    /// Write the catalog to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(path, self.to_json_string()?).map_err(|e| Error::io(path, e))
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in self.iter() {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}
