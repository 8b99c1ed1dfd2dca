//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is built once on first access through a `OnceLock` and stays
//! immutable afterwards.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 language code (e.g., "ro", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Romanian")
    pub name: &'static str,

    /// Native name of the language (e.g., "Română")
    pub native_name: &'static str,

    /// Whether this is the default locale (only one should be true).
    ///
    /// The default locale is served without a URL prefix, is the fallback for
    /// unknown codes and is the reference content the others are checked against.
    pub is_default: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get all locales, default first.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if no default locale is found or if several are defined
    /// (this indicates a configuration error).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }
}

/// Romanian (default) and English.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "ro",
            name: "Romanian",
            native_name: "Română",
            is_default: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
        },
    ]
}
