//! Server-side rendering of the localized pages.

use crate::html::escape_html;
use crate::i18n::{get_alternate_paths, get_page_url, Catalog, Locale, Page, TranslationSet};

/// Title/body blocks shown below the hero, by key prefix.
fn sections(page: Page) -> &'static [&'static str] {
    match page {
        Page::Home => &["intro", "approach"],
        Page::Services => &["services.web", "services.automation", "services.support"],
        Page::About => &["mission", "team"],
        Page::Contact => &[],
    }
}

/// Render `page` in `locale` as a complete HTML document.
pub fn render_page(catalog: &Catalog, locale: Locale, page: Page, site_url: &str) -> String {
    let strings = catalog.load_translations(locale, page);
    let path = format!("{}{}", locale.path_prefix(), page.path());
    let path = if path.len() > 1 { path.trim_end_matches('/').to_string() } else { path };

    let mut main = format!(
        "<section class=\"hero\">\n<h1>{}</h1>\n<p>{}</p>\n{}</section>\n",
        text(&strings, "hero.title"),
        text(&strings, "hero.subtitle"),
        hero_cta(&strings, locale),
    );

    for prefix in sections(page) {
        main.push_str(&format!(
            "<section>\n<h2>{}</h2>\n<p>{}</p>\n</section>\n",
            text(&strings, &format!("{}.title", prefix)),
            text(&strings, &format!("{}.body", prefix)),
        ));
    }

    if page == Page::Contact {
        main.push_str(&contact_form(&strings));
    }

    let head = Head {
        title: strings.t("meta.title"),
        description: strings.t("meta.description"),
        canonical: Some(get_page_url(locale, page.path().as_str(), site_url)),
    };

    layout(&strings, &path, &head, &main)
}

/// Render the localized 404 page for `request_path`.
pub fn render_not_found(catalog: &Catalog, locale: Locale, request_path: &str) -> String {
    let strings = catalog.load_translations(locale, Page::Home);
    let home = Page::Home.path();
    let home_href = format!("{}{}", locale.path_prefix(), home);
    let home_href = if home_href.len() > 1 { home_href.trim_end_matches('/').to_string() } else { home_href };

    let main = format!(
        "<section class=\"not-found\">\n<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>\n</section>\n",
        text(&strings, "notFound.title"),
        text(&strings, "notFound.message"),
        escape_html(&home_href),
        text(&strings, "notFound.back"),
    );

    let head = Head {
        title: format!("{} | {}", strings.t("notFound.title"), strings.t("site.name")),
        description: strings.t("notFound.message"),
        canonical: None,
    };

    layout(&strings, request_path, &head, &main)
}

struct Head {
    title: String,
    description: String,
    canonical: Option<String>,
}

/// Translate and escape.
fn text(strings: &TranslationSet, key_path: &str) -> String {
    escape_html(&strings.t(key_path))
}

fn hero_cta(strings: &TranslationSet, locale: Locale) -> String {
    match strings.lookup("hero.cta") {
        Some(cta) => format!(
            "<a class=\"cta\" href=\"{}{}\">{}</a>\n",
            locale.path_prefix(),
            Page::Contact.path(),
            escape_html(cta)
        ),
        None => String::new(),
    }
}

fn contact_form(strings: &TranslationSet) -> String {
    let field = |name: &str, label_key: &str, kind: &str, required: bool| {
        format!(
            "<label>{}<input type=\"{}\" name=\"{}\"{}></label>\n",
            text(strings, label_key),
            kind,
            name,
            if required { " required" } else { "" }
        )
    };

    let mut form = String::from("<form id=\"contact-form\" method=\"post\" action=\"/api/contact\"");
    form.push_str(&format!(
        " data-sending=\"{}\" data-success=\"{}\" data-error=\"{}\">\n",
        text(strings, "form.sending"),
        text(strings, "form.success"),
        text(strings, "form.error"),
    ));
    form.push_str(&field("name", "form.name", "text", true));
    form.push_str(&field("phoneNumber", "form.phone", "tel", true));
    form.push_str(&field("email", "form.email", "email", true));
    form.push_str(&field("company", "form.company", "text", false));
    form.push_str(&format!(
        "<label>{}<textarea name=\"message\" rows=\"6\" required></textarea></label>\n",
        text(strings, "form.message")
    ));
    form.push_str(&format!(
        "<button type=\"submit\">{}</button>\n<p class=\"form-status\" role=\"status\"></p>\n</form>\n",
        text(strings, "form.submit")
    ));
    form.push_str(CONTACT_SCRIPT);
    form
}

/// Posts the contact form as JSON and shows the localized outcome.
const CONTACT_SCRIPT: &str = r#"<script>
document.getElementById("contact-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = event.currentTarget;
  const status = form.querySelector(".form-status");
  const button = form.querySelector("button");
  const data = Object.fromEntries(new FormData(form).entries());
  button.disabled = true;
  status.textContent = form.dataset.sending;
  try {
    const response = await fetch(form.action, {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(data),
    });
    if (!response.ok) throw new Error(String(response.status));
    form.reset();
    status.textContent = form.dataset.success;
  } catch (_) {
    status.textContent = form.dataset.error;
  } finally {
    button.disabled = false;
  }
});
</script>
"#;

fn layout(strings: &TranslationSet, current_path: &str, head: &Head, main: &str) -> String {
    let locale = strings.locale();
    let alternates = get_alternate_paths(locale, current_path);
    let other = if locale == Locale::ENGLISH {
        Locale::ROMANIAN
    } else {
        Locale::ENGLISH
    };

    let canonical = head
        .canonical
        .as_deref()
        .map(|url| format!("<link rel=\"canonical\" href=\"{}\">\n", escape_html(url)))
        .unwrap_or_default();

    let hreflang: String = Locale::all()
        .into_iter()
        .map(|l| {
            format!(
                "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
                l.code(),
                escape_html(alternates.for_locale(l))
            )
        })
        .collect();

    let nav: String = Page::ALL
        .iter()
        .map(|page| {
            let href = format!("{}{}", locale.path_prefix(), page.path());
            let href = if href.len() > 1 { href.trim_end_matches('/').to_string() } else { href };
            let current = if *page == strings.page() && head.canonical.is_some() {
                " aria-current=\"page\""
            } else {
                ""
            };
            format!(
                "<li><a href=\"{}\"{}>{}</a></li>",
                escape_html(&href),
                current,
                text(strings, &format!("nav.{}", page.name()))
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         {canonical}{hreflang}</head>\n\
         <body>\n\
         <header>\n\
         <a class=\"brand\" href=\"{home}\">{site_name}</a>\n\
         <nav><ul>{nav}</ul></nav>\n\
         <a class=\"language-switch\" hreflang=\"{other_code}\" href=\"{other_href}\" aria-label=\"{language_label}\">{language_switch}</a>\n\
         </header>\n\
         <main>\n{main}</main>\n\
         <footer>\n\
         <p>{site_name} · {tagline}</p>\n\
         <p><a href=\"mailto:{footer_email}\">{footer_email}</a></p>\n\
         <p>{rights}</p>\n\
         </footer>\n\
         </body>\n\
         </html>\n",
        lang = locale.code(),
        title = escape_html(&head.title),
        description = escape_html(&head.description),
        canonical = canonical,
        hreflang = hreflang,
        home = if locale.is_default() { "/".to_string() } else { locale.path_prefix() },
        site_name = text(strings, "site.name"),
        nav = nav,
        other_code = other.code(),
        other_href = escape_html(alternates.for_locale(other)),
        language_label = text(strings, "language.label"),
        language_switch = text(strings, "language.switch"),
        main = main,
        tagline = text(strings, "site.tagline"),
        footer_email = text(strings, "footer.email"),
        rights = text(strings, "footer.rights"),
    )
}
