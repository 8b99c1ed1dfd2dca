//! Locale type: validated locale representation backed by the registry.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A validated locale.
///
/// Only codes present in the [`LocaleRegistry`] can be turned into a `Locale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// ISO 639-1 language code (e.g., "ro", "en")
    code: &'static str,
}

impl Locale {
    pub const ROMANIAN: Locale = Locale { code: "ro" };
    pub const ENGLISH: Locale = Locale { code: "en" };

    /// Create a Locale from a language code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered
    /// * `Err` if the code is unknown
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// Like [`Locale::from_code`], but unknown codes fall back to the default locale.
    pub fn from_code_or_default(code: &str) -> Locale {
        Self::from_code(code).unwrap_or_else(|_| Self::default_locale())
    }

    /// The default locale ("ro").
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    /// Every registered locale, default first.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not registered. This cannot happen for a Locale
    /// built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be registered")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }

    /// URL prefix for this locale: empty for the default locale, `/<code>` otherwise.
    pub fn path_prefix(&self) -> String {
        if self.is_default() {
            String::new()
        } else {
            format!("/{}", self.code)
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::default_locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
