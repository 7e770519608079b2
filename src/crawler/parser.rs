//! Anchor extraction from fetched pages.

use scraper::{Html, Selector};
use url::Url;

/// Links and title pulled out of one HTML page.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title, if any.
    pub title: Option<String>,

    /// Anchor targets resolved to absolute http(s) URLs, in document order.
    pub links: Vec<Url>,
}

/// Parses an HTML document and resolves its anchors against `base_url`.
///
/// Only `<a href>` elements contribute links. Fragment-only anchors and
/// non-web schemes (`javascript:`, `mailto:`, `tel:`, `data:`) are
/// skipped, as are hrefs that fail to resolve.
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document, base_url),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_link(href, base_url) {
                    links.push(url);
                }
            }
        }
    }

    links
}

fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute),
        _ => None,
    }
}
