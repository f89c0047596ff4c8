//! Runtime translation resolution.
//!
//! `resolve_scalar` and `resolve_plural` are the two operations behind the
//! `` __`…` `` and `` __p(count)`…` `` call shapes. Both derive the canonical key
//! and the fallback text from the call-site [`Template`], look the key up in a
//! [`Catalog`] and fill the `{i}` slot markers of the selected text.
//!
//! ```
//! use tagi18n::core::{Catalog, Template, resolve_scalar};
//!
//! let catalog = Catalog::from_json_str(r#"{ "hello {1}": "olá {1}" }"#).unwrap();
//! let text = resolve_scalar(&Template::new(["hello ", ""]), &catalog, &["world"]).unwrap();
//! assert_eq!(text, "olá world");
//! ```

use std::{collections::HashMap, fmt::Display, fs, path::Path, sync::LazyLock};

use regex::{Captures, Regex};

use super::{
    catalog::Catalog,
    entry::{COUNT_PLACEHOLDER, Entry, PluralRules},
    error::{EntryKind, Error, Result},
    file_scanner::find_catalog_files,
    hash::Template,
};

static SLOT_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("valid slot marker regex"));

/// Resolve a scalar (non-plural) call site.
pub fn resolve_scalar<V: Display>(
    template: &Template<'_>,
    catalog: &Catalog,
    args: &[V],
) -> Result<String> {
    let key = template.key();
    let fallback = template.fallback(args);

    match catalog.get(&key) {
        None | Some(Entry::Null) => Ok(fallback),
        Some(Entry::Scalar(text)) if text.is_empty() => Ok(fallback),
        Some(Entry::Scalar(text)) => {
            if args.is_empty() {
                return Ok(text.clone());
            }
            Ok(non_empty_or(interpolate(text, args), fallback))
        }
        Some(Entry::Plural(_)) => Err(Error::KindMismatch {
            key,
            expected: EntryKind::Plural,
        }),
        Some(Entry::Invalid(value)) => Err(Error::InvalidEntry {
            key,
            value: value.to_string(),
        }),
    }
}

/// Resolve a plural call site for `count`.
///
/// Tiers are tried in order and the first match wins: `zero` for 0, `one`
/// for 1, `many` above `manyLimit`, then `+2` with its first `#` replaced by
/// the count.
pub fn resolve_plural<V: Display>(
    template: &Template<'_>,
    count: i64,
    catalog: &Catalog,
    args: &[V],
) -> Result<String> {
    let key = template.key();
    let fallback = template.fallback(args);

    let rules = match catalog.get(&key) {
        None | Some(Entry::Null) => return Ok(fallback),
        Some(Entry::Scalar(text)) if text.is_empty() => return Ok(fallback),
        Some(Entry::Scalar(_)) => {
            return Err(Error::KindMismatch {
                key,
                expected: EntryKind::Scalar,
            });
        }
        Some(Entry::Invalid(value)) => {
            return Err(Error::InvalidEntry {
                key,
                value: value.to_string(),
            });
        }
        Some(Entry::Plural(rules)) => rules,
    };

    let selected = select_plural(rules, count).unwrap_or_else(|| {
        tracing::warn!(key = %key, count, "no plural configured for hash");
        String::new()
    });

    let text = if args.is_empty() {
        selected
    } else {
        interpolate(&selected, args)
    };

    Ok(non_empty_or(text, fallback))
}

/// Pick the plural tier for `count`, `None` when no tier applies.
pub fn select_plural(rules: &PluralRules, count: i64) -> Option<String> {
    if count == 0
        && let Some(zero) = rules.zero()
    {
        return Some(zero.to_string());
    }

    if count == 1
        && let Some(one) = rules.one()
    {
        return Some(one.to_string());
    }

    if let (Some(limit), Some(many)) = (rules.many_limit(), rules.many())
        && (count as f64) > limit
    {
        return Some(many.to_string());
    }

    rules
        .plural()
        .map(|text| text.replacen(COUNT_PLACEHOLDER, &count.to_string(), 1))
}

/// Replace every `{i}` marker with `args[i - 1]`.
///
/// Markers without a matching argument are left as they are.
pub fn interpolate<V: Display>(text: &str, args: &[V]) -> String {
    SLOT_MARKER_REGEX
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|pos| pos.checked_sub(1))
                .and_then(|index| args.get(index))
                .map(|value| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn non_empty_or(text: String, fallback: String) -> String {
    if text.is_empty() { fallback } else { text }
}

/// Runtime registry of locale catalogs.
#[derive(Debug, Clone, Default)]
pub struct I18n {
    locales: HashMap<String, Catalog>,
}

impl I18n {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `<locale>.json` file under `dir`, nested directories
    /// included, the same set of catalogs `check` reconciles.
    ///
    /// When two files share a locale name, the one whose path sorts last wins.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        fs::metadata(dir).map_err(|e| Error::io(dir, e))?;

        let mut i18n = Self::new();
        for file in find_catalog_files(dir) {
            let catalog = Catalog::load(&file.path)?;
            i18n.insert_locale(file.locale, catalog);
        }

        Ok(i18n)
    }

    pub fn insert_locale(&mut self, locale: impl Into<String>, catalog: Catalog) {
        self.locales.insert(locale.into(), catalog);
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Translator bound to one locale.
    pub fn with(&self, locale: &str) -> Result<Translator<'_>> {
        let (locale, catalog) = self
            .locales
            .get_key_value(locale)
            .ok_or_else(|| Error::UnknownLocale(locale.to_string()))?;
        Ok(Translator { locale, catalog })
    }
}

/// Resolves call sites against a single locale catalog.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    locale: &'a str,
    catalog: &'a Catalog,
}

impl<'a> Translator<'a> {
    pub fn locale(&self) -> &'a str {
        self.locale
    }

    /// Scalar translation (`` __`…` ``).
    pub fn tr<V: Display>(&self, template: &Template<'_>, args: &[V]) -> Result<String> {
        resolve_scalar(template, self.catalog, args)
    }

    /// Plural translation (`` __p(count)`…` ``).
    pub fn tr_plural<V: Display>(
        &self,
        count: i64,
        template: &Template<'_>,
        args: &[V],
    ) -> Result<String> {
        resolve_plural(template, count, self.catalog, args)
    }
}
