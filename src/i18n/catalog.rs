//! The translation catalog: every bundle for every locale, loaded once.

use crate::i18n::{
    Bundle, Locale, Page, Section, TranslationSet, TranslationValidator, ValidationReport,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Content compiled into the binary, as (locale, section, json).
const EMBEDDED: &[(&str, &str, &str)] = &[
    ("ro", "common", include_str!("../../locales/ro/common.json")),
    ("ro", "home", include_str!("../../locales/ro/home.json")),
    ("ro", "services", include_str!("../../locales/ro/services.json")),
    ("ro", "about", include_str!("../../locales/ro/about.json")),
    ("ro", "contact", include_str!("../../locales/ro/contact.json")),
    ("en", "common", include_str!("../../locales/en/common.json")),
    ("en", "home", include_str!("../../locales/en/home.json")),
    ("en", "services", include_str!("../../locales/en/services.json")),
    ("en", "about", include_str!("../../locales/en/about.json")),
    ("en", "contact", include_str!("../../locales/en/contact.json")),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Missing translation bundle '{section}' for locale '{locale}'")]
    MissingBundle { locale: String, section: String },

    #[error("Failed to read translation file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid translation bundle '{section}' for locale '{locale}': {source}")]
    Parse {
        locale: String,
        section: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Bundles of one locale. Complete by construction: one per section.
#[derive(Debug, Clone)]
struct LocaleBundles {
    common: Bundle,
    pages: HashMap<Page, Bundle>,
}

impl LocaleBundles {
    fn from_sections(
        locale: Locale,
        mut sections: HashMap<Section, Bundle>,
    ) -> Result<Self, CatalogError> {
        let missing = |section: Section| CatalogError::MissingBundle {
            locale: locale.code().to_string(),
            section: section.name().to_string(),
        };

        let common = sections
            .remove(&Section::Common)
            .ok_or_else(|| missing(Section::Common))?;

        let mut pages = HashMap::new();
        for page in Page::ALL {
            let bundle = sections
                .remove(&Section::Page(page))
                .ok_or_else(|| missing(Section::Page(page)))?;
            pages.insert(page, bundle);
        }

        Ok(Self { common, pages })
    }

    fn bundle(&self, section: Section) -> &Bundle {
        match section {
            Section::Common => &self.common,
            Section::Page(page) => &self.pages[&page],
        }
    }
}

/// Immutable, validated translation content for all locales.
#[derive(Debug, Clone)]
pub struct Catalog {
    default: LocaleBundles,
    others: HashMap<Locale, LocaleBundles>,
}

impl Catalog {
    /// Build the catalog from the content compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_sources(EMBEDDED.iter().map(|(locale, section, json)| {
            (locale.to_string(), section.to_string(), json.to_string())
        }))
    }

    /// Build the catalog from `<dir>/<locale>/<section>.json` files.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut sources = Vec::new();

        for locale in Locale::all() {
            for section in Section::all() {
                let path = dir.join(locale.code()).join(section.file_name());
                match std::fs::read_to_string(&path) {
                    Ok(json) => {
                        debug!("Read {}", path.display());
                        sources.push((locale.code().to_string(), section.name().to_string(), json));
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Err(CatalogError::MissingBundle {
                            locale: locale.code().to_string(),
                            section: section.name().to_string(),
                        });
                    }
                    Err(source) => return Err(CatalogError::Io { path, source }),
                }
            }
        }

        Self::from_sources(sources)
    }

    /// Build the catalog from (locale code, section name, json) triples.
    ///
    /// Every registered locale must provide every section. Triples for unknown
    /// locales or sections are ignored with a warning.
    pub fn from_sources<I>(sources: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, String, String)>,
    {
        let mut by_locale: HashMap<Locale, HashMap<Section, Bundle>> = HashMap::new();

        for (locale_code, section_name, json) in sources {
            let Ok(locale) = Locale::from_code(&locale_code) else {
                warn!("Ignoring translations for unknown locale '{}'", locale_code);
                continue;
            };
            let Some(section) = Section::all().find(|s| s.name() == section_name) else {
                warn!("Ignoring unknown translation section '{}'", section_name);
                continue;
            };

            let bundle = Bundle::from_json(&json).map_err(|source| CatalogError::Parse {
                locale: locale_code.clone(),
                section: section_name.clone(),
                source,
            })?;
            by_locale.entry(locale).or_default().insert(section, bundle);
        }

        let default_locale = Locale::default_locale();
        let mut default = None;
        let mut others = HashMap::new();

        for locale in Locale::all() {
            let sections = by_locale.remove(&locale).unwrap_or_default();
            let bundles = LocaleBundles::from_sections(locale, sections)?;
            if locale == default_locale {
                default = Some(bundles);
            } else {
                others.insert(locale, bundles);
            }
        }

        let default = default.ok_or_else(|| CatalogError::MissingBundle {
            locale: default_locale.code().to_string(),
            section: Section::Common.name().to_string(),
        })?;

        info!("Loaded translations for {} locales", others.len() + 1);
        Ok(Self { default, others })
    }

    fn bundles(&self, locale: Locale) -> &LocaleBundles {
        self.others.get(&locale).unwrap_or(&self.default)
    }

    /// The raw bundle of one section.
    pub fn bundle(&self, locale: Locale, section: Section) -> &Bundle {
        self.bundles(locale).bundle(section)
    }

    /// Merge the common strings of `locale` with the strings of `page`.
    pub fn load_translations(&self, locale: Locale, page: Page) -> TranslationSet {
        let bundles = self.bundles(locale);
        TranslationSet::merge(locale, page, &bundles.common, bundles.bundle(Section::Page(page)))
    }

    /// Like [`Catalog::load_translations`], with unknown locale codes falling
    /// back to the default locale.
    pub fn load_translations_by_code(&self, code: &str, page: Page) -> TranslationSet {
        self.load_translations(Locale::from_code_or_default(code), page)
    }

    /// Check every non-default locale against the default locale, section by section.
    pub fn validate(&self) -> Vec<(Locale, Section, ValidationReport)> {
        let mut reports = Vec::new();
        for locale in Locale::all().into_iter().filter(|l| !l.is_default()) {
            for section in Section::all() {
                let report = TranslationValidator::validate(
                    self.default.bundle(section),
                    self.bundle(locale, section),
                );
                reports.push((locale, section, report));
            }
        }
        reports
    }
}
