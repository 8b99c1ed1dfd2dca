//! Locale-aware URL paths.

use crate::i18n::Locale;
use serde::Serialize;

/// Prefix that marks an English URL.
const ENGLISH_PREFIX: &str = "/en";

/// Detect the locale of a request from its URL path.
///
/// Any path starting with "/en" is English; everything else is Romanian.
pub fn resolve_language(request_path: &str) -> Locale {
    if request_path.starts_with(ENGLISH_PREFIX) {
        Locale::ENGLISH
    } else {
        Locale::ROMANIAN
    }
}

/// Remove a leading "/en" from `path`, if present.
pub fn strip_locale_prefix(path: &str) -> &str {
    path.strip_prefix(ENGLISH_PREFIX).unwrap_or(path)
}

/// The part of `path` that names a page, after its locale prefix.
///
/// Unlike [`strip_locale_prefix`], the prefix only counts as a whole
/// segment: "/en" and "/en/about" split, "/enabout" does not route.
pub fn page_route(path: &str) -> Option<&str> {
    match path.strip_prefix(ENGLISH_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => Some(rest),
        Some(_) => None,
        None => Some(path),
    }
}

/// The same page in every locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternatePaths {
    pub ro: String,
    pub en: String,
}

impl AlternatePaths {
    pub fn for_locale(&self, locale: Locale) -> &str {
        if locale == Locale::ENGLISH {
            &self.en
        } else {
            &self.ro
        }
    }
}

/// Derive the Romanian and English paths for the page at `current_path`.
///
/// No validation is done: the result is only string manipulation.
pub fn get_alternate_paths(_current_locale: Locale, current_path: &str) -> AlternatePaths {
    let base_path = strip_locale_prefix(current_path);
    let en_suffix = if base_path == "/" { "" } else { base_path };

    AlternatePaths {
        ro: if base_path.is_empty() {
            "/".to_string()
        } else {
            base_path.to_string()
        },
        en: format!("{}{}", ENGLISH_PREFIX, en_suffix),
    }
}

/// Absolute canonical URL of `path` in `locale`.
pub fn get_page_url(locale: Locale, path: &str, base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let clean_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    let prefix = locale.path_prefix();

    // The English home page is "/en", not "/en/"
    if clean_path == "/" && !prefix.is_empty() {
        return format!("{}{}", base_url, prefix);
    }

    format!("{}{}{}", base_url, prefix, clean_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== resolve_language Tests ====================

    #[test]
    fn test_resolve_language_english() {
        assert_eq!(resolve_language("/en"), Locale::ENGLISH);
        assert_eq!(resolve_language("/en/services"), Locale::ENGLISH);
    }

    #[test]
    fn test_resolve_language_romanian() {
        assert_eq!(resolve_language("/"), Locale::ROMANIAN);
        assert_eq!(resolve_language("/services"), Locale::ROMANIAN);
        assert_eq!(resolve_language(""), Locale::ROMANIAN);
        assert_eq!(resolve_language("en"), Locale::ROMANIAN);
    }

    #[test]
    fn test_resolve_language_prefix_only_check() {
        // Only the prefix is inspected, not the full segment
        assert_eq!(resolve_language("/english"), Locale::ENGLISH);
    }

    // ==================== get_alternate_paths Tests ====================

    #[test]
    fn test_alternate_paths_from_english_page() {
        let paths = get_alternate_paths(Locale::ENGLISH, "/en/services");
        assert_eq!(paths.ro, "/services");
        assert_eq!(paths.en, "/en/services");
    }

    #[test]
    fn test_alternate_paths_from_romanian_home() {
        let paths = get_alternate_paths(Locale::ROMANIAN, "/");
        assert_eq!(paths.ro, "/");
        assert_eq!(paths.en, "/en");
    }

    #[test]
    fn test_alternate_paths_from_english_home() {
        let paths = get_alternate_paths(Locale::ENGLISH, "/en");
        assert_eq!(paths.ro, "/");
        assert_eq!(paths.en, "/en");
    }

    #[test]
    fn test_alternate_paths_from_romanian_page() {
        let paths = get_alternate_paths(Locale::ROMANIAN, "/about");
        assert_eq!(paths.ro, "/about");
        assert_eq!(paths.en, "/en/about");
    }

    #[test]
    fn test_alternate_paths_for_locale() {
        let paths = get_alternate_paths(Locale::ROMANIAN, "/contact");
        assert_eq!(paths.for_locale(Locale::ROMANIAN), "/contact");
        assert_eq!(paths.for_locale(Locale::ENGLISH), "/en/contact");
    }

    #[test]
    fn test_alternate_paths_strip_prefix_not_segment() {
        // A Romanian path that happens to start with "/en" loses those letters
        let paths = get_alternate_paths(Locale::ROMANIAN, "/en");
        assert_eq!(paths.ro, "/");
        assert_eq!(paths.en, "/en");

        let paths = get_alternate_paths(Locale::ROMANIAN, "/english");
        assert_eq!(paths.ro, "glish");
        assert_eq!(paths.en, "/english");
    }

    // ==================== get_page_url Tests ====================

    #[test]
    fn test_page_url_romanian() {
        assert_eq!(
            get_page_url(Locale::ROMANIAN, "/services", "https://signalforge.ro"),
            "https://signalforge.ro/services"
        );
    }

    #[test]
    fn test_page_url_english_adds_prefix() {
        assert_eq!(
            get_page_url(Locale::ENGLISH, "about", "https://signalforge.ro/"),
            "https://signalforge.ro/en/about"
        );
    }

    #[test]
    fn test_page_url_home() {
        assert_eq!(
            get_page_url(Locale::ENGLISH, "/", "https://signalforge.ro"),
            "https://signalforge.ro/en"
        );
        assert_eq!(
            get_page_url(Locale::ROMANIAN, "/", "https://signalforge.ro"),
            "https://signalforge.ro/"
        );
    }

    // ==================== page_route Tests ====================

    #[test]
    fn test_page_route_splits_whole_segment() {
        assert_eq!(page_route("/en"), Some(""));
        assert_eq!(page_route("/en/about"), Some("/about"));
        assert_eq!(page_route("/services"), Some("/services"));
        assert_eq!(page_route("/"), Some("/"));
    }

    #[test]
    fn test_page_route_rejects_glued_prefix() {
        assert_eq!(page_route("/enabout"), None);
        assert_eq!(page_route("/english"), None);
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_resolve_language_en_iff_prefix(path in "\\PC*") {
            let expected = if path.starts_with("/en") { Locale::ENGLISH } else { Locale::ROMANIAN };
            prop_assert_eq!(resolve_language(&path), expected);
        }

        #[test]
        fn prop_alternate_paths_are_prefix_consistent(rest in "/[a-df-z][a-z]{0,9}(/[a-z]{1,10}){0,2}") {
            let from_ro = get_alternate_paths(Locale::ROMANIAN, &rest);
            let from_en = get_alternate_paths(Locale::ENGLISH, &format!("/en{}", rest));

            prop_assert_eq!(&from_ro, &from_en);
            prop_assert_eq!(from_ro.en, format!("/en{}", from_ro.ro));
        }
    }
}
