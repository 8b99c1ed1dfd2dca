//! Translation completeness validation.
//!
//! Compares a translated bundle against the default-locale bundle of the same
//! section, so content gaps are reported at startup instead of showing up as
//! raw key paths on a rendered page.

use crate::i18n::Bundle;
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Key paths the translation is missing
    pub errors: Vec<String>,

    /// Non-critical findings (extra keys, empty strings, changed URLs)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for bundle completeness.
pub struct TranslationValidator;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate `translated` against the `reference` bundle of the same section.
    ///
    /// This function checks that:
    /// - every string in the reference exists in the translation (errors)
    /// - the translation has no strings the reference lacks (warnings)
    /// - no translated string is empty (warnings)
    /// - URLs and email addresses are kept as-is (warnings)
    pub fn validate(reference: &Bundle, translated: &Bundle) -> ValidationReport {
        let mut report = ValidationReport::new();
        let reference_leaves = reference.leaves();
        let translated_leaves = translated.leaves();

        for (path, original) in &reference_leaves {
            match translated_leaves.get(path) {
                None => report.errors.push(format!("Missing key: {}", path)),
                Some(text) => {
                    let orig_urls = Self::extract_urls(original);
                    let trans_urls = Self::extract_urls(text);
                    if orig_urls != trans_urls {
                        report.warnings.push(format!(
                            "URL mismatch in '{}': original has {:?}, translation has {:?}",
                            path, orig_urls, trans_urls
                        ));
                    }
                }
            }
        }

        for (path, text) in &translated_leaves {
            if !reference_leaves.contains_key(path) {
                report.warnings.push(format!("Extra key: {}", path));
            }
            if text.trim().is_empty() {
                report.warnings.push(format!("Empty value: {}", path));
            }
        }

        report
    }

    /// Extract all URLs and email addresses from text
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| {
            Regex::new(r"https?://[^\s)\]]+|[^\s@]+@[^\s@]+\.[a-zA-Z]{2,}").unwrap()
        });

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
