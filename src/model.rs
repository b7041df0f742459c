//! The sitemap entry model: a single `<url>` record and its change-frequency hint.
//!
//! Entries are immutable once built. All validation happens in
//! [`SitemapUrlBuilder::build`]; the registry never re-validates what it stores.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SitemapError;

/// Values for the `<changefreq>` element as defined by the sitemaps.org protocol.
///
/// A hint to crawlers about how frequently the page is likely to change.
/// "Not set" is expressed as `Option::None` on the entry, not as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// Documents that change each time they are accessed.
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Archived URLs that will never change.
    Never,
}

impl ChangeFrequency {
    /// Lowercase string value used in XML output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

/// A single `<url>` entry in a sitemap.
///
/// `loc` is required and must be a fully qualified http(s) URL; everything else
/// is optional. The `alternates` map holds hreflang alternate links for
/// multilingual sites, mapping a language/region code (e.g. `"en"`, `"pt"`,
/// `"x-default"`) to a fully qualified URL. Insertion order of the map is
/// preserved all the way into the XML output.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    loc: String,
    lastmod: Option<NaiveDateTime>,
    changefreq: Option<ChangeFrequency>,
    priority: Option<f64>,
    alternates: IndexMap<String, String>,
}

impl SitemapUrl {
    /// Starts building an entry for the given location.
    pub fn builder(loc: impl Into<String>) -> SitemapUrlBuilder {
        SitemapUrlBuilder {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
            alternates: IndexMap::new(),
        }
    }

    /// The fully qualified URL of the page.
    pub fn loc(&self) -> &str {
        &self.loc
    }

    /// Last modification date, if known.
    pub fn lastmod(&self) -> Option<NaiveDateTime> {
        self.lastmod
    }

    /// Change frequency hint, if set.
    pub fn changefreq(&self) -> Option<ChangeFrequency> {
        self.changefreq
    }

    /// Priority relative to other URLs on the site, if set.
    pub fn priority(&self) -> Option<f64> {
        self.priority
    }

    /// Hreflang alternate links in insertion order.
    pub fn alternates(&self) -> &IndexMap<String, String> {
        &self.alternates
    }
}

/// Builder for [`SitemapUrl`] instances.
///
/// ```
/// use sitemap_ultra::model::{ChangeFrequency, SitemapUrl};
///
/// let url = SitemapUrl::builder("https://example.com/page")
///     .priority(0.8)
///     .changefreq(ChangeFrequency::Weekly)
///     .alternate("en", "https://example.com/en/page")
///     .alternate("pt", "https://example.com/pt/page")
///     .build()
///     .unwrap();
/// assert_eq!(url.loc(), "https://example.com/page");
/// ```
#[derive(Debug, Clone)]
pub struct SitemapUrlBuilder {
    loc: String,
    lastmod: Option<NaiveDateTime>,
    changefreq: Option<ChangeFrequency>,
    priority: Option<f64>,
    alternates: IndexMap<String, String>,
}

impl SitemapUrlBuilder {
    /// Sets the last modification date.
    pub fn lastmod(mut self, lastmod: NaiveDateTime) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    /// Sets the change frequency hint.
    pub fn changefreq(mut self, changefreq: ChangeFrequency) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    /// Sets the priority. Must be within 0.0..=1.0 at build time.
    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Adds one hreflang alternate link.
    pub fn alternate(mut self, hreflang: impl Into<String>, href: impl Into<String>) -> Self {
        self.alternates.insert(hreflang.into(), href.into());
        self
    }

    /// Sets all hreflang alternates at once, replacing any previously added.
    pub fn alternates(mut self, alternates: IndexMap<String, String>) -> Self {
        self.alternates = alternates;
        self
    }

    /// Validates and builds the entry.
    pub fn build(self) -> Result<SitemapUrl, SitemapError> {
        if self.loc.trim().is_empty() {
            return Err(SitemapError::BlankLocation);
        }
        if !self.loc.starts_with("http://") && !self.loc.starts_with("https://") {
            return Err(SitemapError::InvalidScheme(self.loc));
        }
        if let Some(priority) = self.priority {
            if !(0.0..=1.0).contains(&priority) {
                return Err(SitemapError::PriorityOutOfRange(priority));
            }
        }
        Ok(SitemapUrl {
            loc: self.loc,
            lastmod: self.lastmod,
            changefreq: self.changefreq,
            priority: self.priority,
            alternates: self.alternates,
        })
    }
}
