//! Catalog entry model.
//!
//! Catalog values are classified once, when the catalog is parsed, so the
//! resolver and the reconciler match on [`Entry`] instead of poking at raw JSON.
//!
//! | JSON value                          | Entry               |
//! |-------------------------------------|---------------------|
//! | `"Olá {1}"`                         | `Entry::Scalar`     |
//! | `{ "one": "…", "+2": "# …" }`       | `Entry::Plural`     |
//! | `null`                              | `Entry::Null`       |
//! | anything else (`3`, `[]`, `{"one": 1}`) | `Entry::Invalid` |

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use super::error::EntryKind;

/// Count placeholder inside the `+2` and `many` texts.
pub const COUNT_PLACEHOLDER: char = '#';

/// Default `manyLimit` of generated plural skeletons.
pub const SKELETON_MANY_LIMIT: u64 = 50;

/// Plural rule set: up to five optional tiers.
///
/// Field order on write is canonical (`zero`, `one`, `+2`, `many`,
/// `manyLimit`); unknown fields are kept after them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,
    #[serde(rename = "+2", default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,
    #[serde(rename = "manyLimit", default, skip_serializing_if = "Option::is_none")]
    pub many_limit: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PluralRules {
    /// Placeholder rule set inserted by fix mode for a missing plural key.
    pub fn skeleton() -> Self {
        Self {
            zero: Some("🛑 zero 🛑".to_string()),
            one: Some("🛑 one 🛑".to_string()),
            plural: Some("🛑 # items 🛑".to_string()),
            many: Some("🛑 many 🛑".to_string()),
            many_limit: Some(Number::from(SKELETON_MANY_LIMIT)),
            extra: Map::new(),
        }
    }

    pub fn zero(&self) -> Option<&str> {
        non_empty(&self.zero)
    }

    pub fn one(&self) -> Option<&str> {
        non_empty(&self.one)
    }

    pub fn plural(&self) -> Option<&str> {
        non_empty(&self.plural)
    }

    pub fn many(&self) -> Option<&str> {
        non_empty(&self.many)
    }

    /// Threshold of the `many` tier; a limit of `0` counts as unset.
    pub fn many_limit(&self) -> Option<f64> {
        self.many_limit
            .as_ref()
            .and_then(Number::as_f64)
            .filter(|limit| *limit != 0.0)
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.is_empty())
}

/// A classified catalog value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Scalar(String),
    Plural(PluralRules),
    Null,
    /// Kept verbatim so that writing the catalog back never loses data.
    Invalid(Value),
}

impl Entry {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Null => Entry::Null,
            Value::String(s) => Entry::Scalar(s),
            Value::Object(map) => {
                match serde_json::from_value::<PluralRules>(Value::Object(map.clone())) {
                    Ok(rules) => Entry::Plural(rules),
                    Err(_) => Entry::Invalid(Value::Object(map)),
                }
            }
            other => Entry::Invalid(other),
        }
    }

    pub fn kind(&self) -> Option<EntryKind> {
        match self {
            Entry::Scalar(_) => Some(EntryKind::Scalar),
            Entry::Plural(_) => Some(EntryKind::Plural),
            Entry::Null | Entry::Invalid(_) => None,
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Entry::Plural(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Entry::Null)
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Entry::classify)
    }
}
