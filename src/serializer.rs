//! Sitemap XML generation compliant with the sitemaps.org protocol.
//!
//! Pure string building, no document model: a `<urlset>` renderer for sitemap
//! pages and a `<sitemapindex>` renderer for the shard index. Entry iteration
//! order is preserved exactly as given, which is how registry insertion order
//! reaches the output.

use chrono::{NaiveDateTime, NaiveTime};

use crate::model::SitemapUrl;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const URLSET_OPEN: &str = "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"";
const XHTML_NAMESPACE: &str = "\n        xmlns:xhtml=\"http://www.w3.org/1999/xhtml\"";
const SITEMAP_INDEX_OPEN: &str =
    "<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n";
const SITEMAP_INDEX_CLOSE: &str = "</sitemapindex>\n";

/// Renders a complete sitemap document for the given URLs.
///
/// The output contains the XML declaration, the `<urlset>` element and one
/// `<url>` record per entry, in input order. The `xmlns:xhtml` namespace is
/// declared on `<urlset>` only when at least one entry carries alternates.
pub fn render_urlset(urls: &[SitemapUrl]) -> String {
    let has_alternates = urls.iter().any(|u| !u.alternates().is_empty());

    let mut out = String::with_capacity(urls.len() * 256 + 128);
    out.push_str(XML_HEADER);
    out.push_str(URLSET_OPEN);
    if has_alternates {
        out.push_str(XHTML_NAMESPACE);
    }
    out.push_str(">\n");

    for url in urls {
        append_url(&mut out, url);
    }

    out.push_str("</urlset>\n");
    out
}

/// Renders a sitemap index document referencing `sitemap-{n}.xml` files,
/// numbered 1 through `sitemap_count`, under the given base URL.
pub fn render_sitemap_index(sitemap_count: usize, base_url: &str) -> String {
    let base_url = strip_trailing_slash(base_url);

    let mut out = String::with_capacity(sitemap_count * 128 + 128);
    out.push_str(XML_HEADER);
    out.push_str(SITEMAP_INDEX_OPEN);

    for n in 1..=sitemap_count {
        out.push_str("  <sitemap>\n    <loc>");
        out.push_str(&escape_xml(&format!("{}/sitemap-{}.xml", base_url, n)));
        out.push_str("</loc>\n  </sitemap>\n");
    }

    out.push_str(SITEMAP_INDEX_CLOSE);
    out
}

/// Appends one `<url>` record. Child element order is fixed by the protocol:
/// loc, xhtml:link alternates, lastmod, changefreq, priority.
fn append_url(out: &mut String, url: &SitemapUrl) {
    out.push_str("  <url>\n");
    out.push_str("    <loc>");
    out.push_str(&escape_xml(url.loc()));
    out.push_str("</loc>\n");

    for (hreflang, href) in url.alternates() {
        out.push_str("    <xhtml:link rel=\"alternate\" hreflang=\"");
        out.push_str(&escape_xml(hreflang));
        out.push_str("\" href=\"");
        out.push_str(&escape_xml(href));
        out.push_str("\"/>\n");
    }

    if let Some(lastmod) = url.lastmod() {
        out.push_str("    <lastmod>");
        out.push_str(&format_lastmod(&lastmod));
        out.push_str("</lastmod>\n");
    }

    if let Some(changefreq) = url.changefreq() {
        out.push_str("    <changefreq>");
        out.push_str(changefreq.as_str());
        out.push_str("</changefreq>\n");
    }

    if let Some(priority) = url.priority() {
        out.push_str("    <priority>");
        out.push_str(&format!("{:.1}", priority));
        out.push_str("</priority>\n");
    }

    out.push_str("  </url>\n");
}

/// Formats a last-modification timestamp to W3C Datetime.
///
/// Exactly midnight emits the date-only form (`2025-02-01`); any other time
/// emits the full second-precision form (`2025-02-01T10:30:00`), without a
/// timezone suffix.
pub(crate) fn format_lastmod(lastmod: &NaiveDateTime) -> String {
    if lastmod.time() == NaiveTime::MIN {
        lastmod.format("%Y-%m-%d").to_string()
    } else {
        lastmod.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Escapes the five XML entities required by the sitemap protocol:
/// `&` `'` `"` `>` `<`.
///
/// The input must be raw, unescaped text. Each character is substituted in a
/// single left-to-right pass, so generated entities are never re-matched; a
/// value that already contains entity references will be escaped again.
pub(crate) fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            '>' => out.push_str("&gt;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strips a single trailing slash, if present.
pub(crate) fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}
