//! Resolved translation sets and key-path lookup.

use crate::i18n::{Bundle, Locale, Page, TranslationMetrics, TranslationValue};
use std::collections::BTreeMap;
use tracing::warn;

/// Top-level key under which the common bundle stays reachable in a merged set.
pub const COMMON_NAMESPACE: &str = "common";

/// The strings available to one page in one locale.
///
/// Built by merging the locale's common bundle with the page bundle. Top-level
/// keys are the union of both, and a page key replaces a common key of the
/// same name. The whole common bundle is also kept under `common`, unless the
/// page bundle defines that key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSet {
    locale: Locale,
    page: Page,
    root: TranslationValue,
}

impl TranslationSet {
    pub fn merge(locale: Locale, page: Page, common: &Bundle, page_bundle: &Bundle) -> Self {
        let mut entries: BTreeMap<String, TranslationValue> = common.entries().clone();
        entries.insert(COMMON_NAMESPACE.to_string(), common.to_value());
        entries.extend(
            page_bundle
                .entries()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        Self {
            locale,
            page,
            root: TranslationValue::Nested(entries),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Whether `key` is a top-level key of the set.
    pub fn contains_key(&self, key: &str) -> bool {
        match &self.root {
            TranslationValue::Nested(map) => map.contains_key(key),
            TranslationValue::Text(_) => false,
        }
    }

    /// Resolve a dot-separated key path to its string leaf.
    ///
    /// Returns `None` if any segment is missing or the path ends on a mapping.
    pub fn lookup(&self, key_path: &str) -> Option<&str> {
        self.root
            .walk(key_path.split('.'))
            .and_then(TranslationValue::as_text)
    }

    /// Translate `key_path`, falling back to the key path itself when it does
    /// not resolve to a string.
    pub fn t(&self, key_path: &str) -> String {
        let metrics = TranslationMetrics::global();
        metrics.record_lookup();

        match self.lookup(key_path) {
            Some(text) => text.to_string(),
            None => {
                metrics.record_miss();
                warn!(
                    locale = self.locale.code(),
                    page = self.page.name(),
                    "Translation key not found: {}",
                    key_path
                );
                key_path.to_string()
            }
        }
    }
}
