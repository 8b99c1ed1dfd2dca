//! Page identifiers and the content sections they map to.

use anyhow::{bail, Result};
use std::fmt;

/// One of the site's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Services,
    About,
    Contact,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Services, Page::About, Page::Contact];

    /// Section name, also the bundle file stem (e.g. "services").
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Services => "services",
            Page::About => "about",
            Page::Contact => "contact",
        }
    }

    /// Path segment after the locale prefix; empty for the home page.
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Home => "",
            other => other.name(),
        }
    }

    /// Path of this page without a locale prefix ("/", "/services", ...).
    pub fn path(&self) -> String {
        format!("/{}", self.slug())
    }

    /// Parse a page from its URL slug. One leading and one trailing slash are
    /// ignored; empty segments ("//about") are rejected.
    pub fn from_slug(slug: &str) -> Result<Page> {
        if slug.contains("//") {
            bail!("Unknown page: '{}'", slug);
        }
        let slug = slug.strip_prefix('/').unwrap_or(slug);
        let slug = slug.strip_suffix('/').unwrap_or(slug);
        match Page::ALL.iter().find(|page| page.slug() == slug) {
            Some(page) => Ok(*page),
            None => bail!("Unknown page: '{}'", slug),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A content section: the shared "common" strings or one page's strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Common,
    Page(Page),
}

impl Section {
    /// Every section, "common" first.
    pub fn all() -> impl Iterator<Item = Section> {
        std::iter::once(Section::Common).chain(Page::ALL.into_iter().map(Section::Page))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Section::Common => "common",
            Section::Page(page) => page.name(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
