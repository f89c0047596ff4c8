//! Canonical key ("hash") and fallback text derivation.
//!
//! A tagged template `` __`Hello ${name}, you have ${count} messages` `` is split
//! by the JS runtime into literal segments `["Hello ", ", you have ", " messages"]`
//! and slot values `[name, count]`. The canonical key only depends on the
//! segments and the *positions* of the slots:
//!
//! ```text
//! Hello {1}, you have {2} messages
//! ```
//!
//! The fallback text is what the user sees when no catalog entry exists: the
//! segments interleaved with the rendered slot values, cut at the first `~~`
//! variant marker.

use std::fmt::Display;

/// Separator that introduces a variant suffix (`"Save~~toolbar"`).
pub const VARIANT_MARKER: &str = "~~";

/// Build the canonical key from the literal segments of a template.
///
/// Slot markers are 1-based and only placed *between* segments, so a template
/// with `n` slots always has `n + 1` segments.
///
/// ```
/// use tagi18n::core::derive_key;
///
/// assert_eq!(derive_key(&["Hello World"]), "Hello World");
/// assert_eq!(derive_key(&["Hello ", " and ", ""]), "Hello {1} and {2}");
/// ```
pub fn derive_key<S: AsRef<str>>(segments: &[S]) -> String {
    let mut key = String::new();
    let last = segments.len().saturating_sub(1);

    for (i, segment) in segments.iter().enumerate() {
        key.push_str(segment.as_ref());
        if i != last {
            key.push('{');
            key.push_str(&(i + 1).to_string());
            key.push('}');
        }
    }

    key
}

/// Build the fallback text of a call site.
///
/// Missing values (fewer values than slots) render as nothing. Everything from
/// the first [`VARIANT_MARKER`] on is dropped.
pub fn derive_fallback<S: AsRef<str>, V: Display>(segments: &[S], values: &[V]) -> String {
    let mut fallback = String::new();

    for (i, segment) in segments.iter().enumerate() {
        fallback.push_str(segment.as_ref());
        if let Some(value) = values.get(i) {
            fallback.push_str(&value.to_string());
        }
    }

    strip_variant(fallback)
}

fn strip_variant(mut text: String) -> String {
    if let Some(pos) = text.find(VARIANT_MARKER) {
        text.truncate(pos);
    }
    text
}

/// Literal structure of one tagged-template call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template<'a> {
    segments: Vec<&'a str>,
}

impl<'a> Template<'a> {
    /// Template from the raw segments, as a JS runtime would pass them.
    pub fn new(segments: impl IntoIterator<Item = &'a str>) -> Self {
        let mut segments: Vec<&'a str> = segments.into_iter().collect();
        if segments.is_empty() {
            segments.push("");
        }
        Self { segments }
    }

    /// Template without any slot.
    pub fn literal(text: &'a str) -> Self {
        Self {
            segments: vec![text],
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    pub fn slot_count(&self) -> usize {
        self.segments.len() - 1
    }

    pub fn key(&self) -> String {
        derive_key(&self.segments)
    }

    pub fn fallback<V: Display>(&self, values: &[V]) -> String {
        derive_fallback(&self.segments, values)
    }
}
