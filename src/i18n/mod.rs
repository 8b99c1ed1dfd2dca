//! Internationalization (i18n) module for the bilingual site.
//!
//! All locale detection, translation content and lookup logic lives here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported locales and their metadata
//! - `language`: Validated `Locale` type backed by the registry
//! - `page`: Page identifiers and content sections
//! - `bundle`: Typed translation content for one (locale, section) pair
//! - `catalog`: All bundles, loaded once at startup
//! - `translations`: Merged per-page translation sets and key-path lookup
//! - `paths`: Locale detection from URLs and alternate/canonical links
//! - `validator`: Completeness checks of translated content
//! - `metrics`: Lookup and missing-key counters
//!
//! # Example
//!
//! ```rust,ignore
//! use signalforge_site::i18n::{resolve_language, Catalog, Page};
//!
//! let catalog = Catalog::embedded()?;
//! let locale = resolve_language("/en/services");
//! let strings = catalog.load_translations(locale, Page::Services);
//! let title = strings.t("hero.title");
//! ```

mod bundle;
mod catalog;
mod language;
mod metrics;
mod page;
mod paths;
mod registry;
mod translations;
mod validator;

pub use bundle::{Bundle, TranslationValue};
pub use catalog::{Catalog, CatalogError};
pub use language::Locale;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use page::{Page, Section};
pub use paths::{get_alternate_paths, get_page_url, page_route, resolve_language, strip_locale_prefix, AlternatePaths};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use translations::{TranslationSet, COMMON_NAMESPACE};
pub use validator::{TranslationValidator, ValidationReport};
