//! Translation bundles: typed, nested key/value content for one locale and section.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value inside a bundle: either a string leaf or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Text(String),
    Nested(BTreeMap<String, TranslationValue>),
}

impl TranslationValue {
    /// Walk `segments` starting at this value.
    ///
    /// Returns `None` as soon as a segment is missing or a string leaf would
    /// have to be traversed.
    pub fn walk<'a, I>(&self, mut segments: I) -> Option<&TranslationValue>
    where
        I: Iterator<Item = &'a str>,
    {
        match segments.next() {
            None => Some(self),
            Some(segment) => match self {
                TranslationValue::Nested(map) => map.get(segment)?.walk(segments),
                TranslationValue::Text(_) => None,
            },
        }
    }

    /// The leaf string, if this value is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TranslationValue::Text(text) => Some(text.as_str()),
            TranslationValue::Nested(_) => None,
        }
    }
}

/// An immutable set of translations for one (locale, section) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: BTreeMap<String, TranslationValue>,
}

impl Bundle {
    /// Parse a bundle from its JSON source.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Top-level entries of the bundle.
    pub fn entries(&self) -> &BTreeMap<String, TranslationValue> {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap the whole bundle as a nested value.
    pub fn to_value(&self) -> TranslationValue {
        TranslationValue::Nested(self.entries.clone())
    }

    /// Every string leaf of the bundle, keyed by its dot-separated path.
    pub fn leaves(&self) -> BTreeMap<String, &str> {
        let mut out = BTreeMap::new();
        for (key, value) in &self.entries {
            collect_leaves(key.clone(), value, &mut out);
        }
        out
    }
}

fn collect_leaves<'a>(prefix: String, value: &'a TranslationValue, out: &mut BTreeMap<String, &'a str>) {
    match value {
        TranslationValue::Text(text) => {
            out.insert(prefix, text.as_str());
        }
        TranslationValue::Nested(map) => {
            for (key, child) in map {
                collect_leaves(format!("{}.{}", prefix, key), child, out);
            }
        }
    }
}
