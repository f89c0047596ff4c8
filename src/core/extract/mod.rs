//! Usage extraction: from source files to canonical keys.
//!
//! The syntax tree is owned by a [`UsageWalker`]; the extractor only sees the
//! literal segments of every matched tagged template and whether it was a
//! scalar (`` __`…` ``) or plural (`` __p(n)`…` ``) usage. Per-file results
//! are [`KeyUsages`] values that can be merged in any order, so files can be
//! scanned in parallel and reduced afterwards.

pub mod swc_walker;

use std::collections::BTreeSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::hash::derive_key;

pub use swc_walker::SwcWalker;

/// Call shape of a translatable usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageKind {
    Scalar,
    Plural,
}

/// One matched tagged template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateUsage {
    pub kind: UsageKind,
    /// Literal segments; `segments.len() - 1` slots sit between them.
    pub segments: Vec<String>,
}

impl TemplateUsage {
    pub fn new(kind: UsageKind, segments: Vec<String>) -> Self {
        Self { kind, segments }
    }

    pub fn key(&self) -> String {
        derive_key(&self.segments)
    }

    pub fn slot_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

/// Syntax-tree collaborator: finds the marker usages of one file.
pub trait UsageWalker: Sync {
    fn walk(&self, file_name: &str, code: &str) -> Result<Vec<TemplateUsage>>;
}

/// Marker names recognised in source code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Markers {
    /// Tag of scalar usages: `` __`Hello` `` or `` i18n.__`Hello` ``.
    pub scalar: String,
    /// Callee of plural usages: `` __p(count)`# apples` ``.
    pub plural: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            scalar: "__".to_string(),
            plural: "__p".to_string(),
        }
    }
}

impl Markers {
    /// Cheap substring check used to skip files before parsing.
    ///
    /// Only a heuristic: a marker re-exported under another name is missed, so
    /// the pre-filter can be disabled in the config.
    pub fn may_contain_usages(&self, code: &str) -> bool {
        code.contains("i18n")
            || code.contains(&format!("{}`", self.scalar))
            || code.contains(&format!("{}(", self.plural))
    }
}

/// Scalar and plural keys used by one file or a whole source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyUsages {
    pub scalar: BTreeSet<String>,
    pub plural: BTreeSet<String>,
}

impl KeyUsages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, usage: &TemplateUsage) {
        let key = usage.key();
        match usage.kind {
            UsageKind::Scalar => self.scalar.insert(key),
            UsageKind::Plural => self.plural.insert(key),
        };
    }

    /// Union of two results.
    pub fn merge(mut self, other: KeyUsages) -> KeyUsages {
        self.scalar.extend(other.scalar);
        self.plural.extend(other.plural);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.scalar.is_empty() && self.plural.is_empty()
    }

    pub fn is_scalar(&self, key: &str) -> bool {
        self.scalar.contains(key)
    }

    pub fn is_plural(&self, key: &str) -> bool {
        self.plural.contains(key)
    }

    /// Sorted union of scalar and plural keys.
    pub fn all_keys(&self) -> BTreeSet<&str> {
        self.scalar
            .iter()
            .chain(self.plural.iter())
            .map(String::as_str)
            .collect()
    }

    /// Keys used both as scalar and as plural.
    pub fn ambiguous_keys(&self) -> Vec<&str> {
        self.scalar
            .intersection(&self.plural)
            .map(String::as_str)
            .collect()
    }
}

/// Extracts the key usages of single files through a [`UsageWalker`].
pub struct Extractor<W> {
    walker: W,
    markers: Markers,
    prefilter: bool,
}

impl<W: UsageWalker> Extractor<W> {
    pub fn new(walker: W, markers: Markers, prefilter: bool) -> Self {
        Self {
            walker,
            markers,
            prefilter,
        }
    }

    pub fn extract(&self, file_name: &str, code: &str) -> Result<KeyUsages> {
        let mut usages = KeyUsages::new();

        if self.prefilter && !self.markers.may_contain_usages(code) {
            tracing::debug!(file = file_name, "skipped by pre-filter");
            return Ok(usages);
        }

        for usage in self.walker.walk(file_name, code)? {
            usages.add(&usage);
        }

        Ok(usages)
    }
}

impl Extractor<SwcWalker> {
    /// Extractor backed by the swc walker.
    pub fn swc(markers: Markers, prefilter: bool) -> Self {
        Self::new(SwcWalker::new(markers.clone()), markers, prefilter)
    }
}
