//! Producer-side route registration.
//!
//! Discovery of candidate paths lives outside the core: anything that can
//! produce [`RoutePage`] records (a web framework's route table, a CMS page
//! list, a database of slugs) plugs in through the [`RouteSource`] trait. The
//! scanner's only contract with the registry is one bulk insert per scan.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

use crate::config::SitemapConfig;
use crate::locale::LocaleUrlBuilder;
use crate::model::{ChangeFrequency, SitemapUrl};
use crate::registry::SitemapRegistry;

lazy_static! {
    /// Detects path template variables like `{id}` or `{slug}`.
    static ref PATH_VARIABLE: Regex = Regex::new(r"\{[^}]+}").expect("valid path variable pattern");
}

/// One candidate page produced by a route source: a site-relative path plus
/// optional per-route metadata overriding the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct RoutePage {
    /// Site-relative path, e.g. `"/about"`.
    pub path: String,
    /// Overrides `default_priority` when set.
    pub priority: Option<f64>,
    /// Overrides `default_changefreq` when set.
    pub changefreq: Option<ChangeFrequency>,
    /// Last-modification text, `"2025-01-15"` or `"2025-01-15T10:30:00"`.
    /// Unparseable values are logged and treated as absent.
    pub lastmod: Option<String>,
    /// Route-level locale override for the resolution chain.
    pub locales: Vec<String>,
}

impl RoutePage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// External collaborator yielding the pages to register.
///
/// Collection may fail (a route table not ready, a database hiccup); the
/// scanner does not retry, it logs and stays unscanned so the caller can.
pub trait RouteSource: Send + Sync {
    fn collect(&self) -> Result<Vec<RoutePage>>;
}

/// Expands route pages into sitemap entries and registers them, once.
///
/// Paths containing template variables (e.g. `/users/{id}`) are skipped with a
/// warning since the concrete URLs are unknown at scan time; register those
/// programmatically via [`SitemapRegistry::add`]. When locales resolve for a
/// route, one entry per locale is registered, each carrying the full hreflang
/// alternates map; otherwise a single non-localized entry.
pub struct RouteScanner {
    source: Box<dyn RouteSource>,
    registry: Arc<SitemapRegistry>,
    config: Arc<SitemapConfig>,
    locale_builder: LocaleUrlBuilder,
    scanned: AtomicBool,
}

impl RouteScanner {
    pub fn new(
        source: Box<dyn RouteSource>,
        registry: Arc<SitemapRegistry>,
        config: Arc<SitemapConfig>,
    ) -> Self {
        let locale_builder = LocaleUrlBuilder::new(Arc::clone(&config));
        Self {
            source,
            registry,
            config,
            locale_builder,
            scanned: AtomicBool::new(false),
        }
    }

    /// Runs the scan if it has not run yet. Idempotent under concurrency: the
    /// atomic guard lets exactly one caller through.
    pub fn scan(&self) {
        if self
            .scanned
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("route scan already performed, skipping");
            return;
        }

        info!("scanning route source for sitemap registration...");
        let pages = match self.source.collect() {
            Ok(pages) => pages,
            Err(e) => {
                warn!("route source failed, scan can be retried: {:#}", e);
                self.scanned.store(false, Ordering::SeqCst);
                return;
            }
        };

        let mut urls = Vec::new();
        for page in &pages {
            urls.extend(self.expand(page));
        }
        let count = urls.len();
        self.registry.add_all(urls);
        info!("route scan complete: {} urls registered", count);
    }

    /// Whether the scan has completed at least once.
    pub fn is_scanned(&self) -> bool {
        self.scanned.load(Ordering::SeqCst)
    }

    fn expand(&self, page: &RoutePage) -> Vec<SitemapUrl> {
        if PATH_VARIABLE.is_match(&page.path) {
            warn!(
                "skipping route with path variables: {}; add these urls programmatically via SitemapRegistry::add",
                page.path
            );
            return Vec::new();
        }

        let priority = page.priority.unwrap_or(self.config.default_priority);
        let changefreq = page.changefreq.or(self.config.default_changefreq);
        let lastmod = page
            .lastmod
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(parse_lastmod);

        let locales = self.locale_builder.resolve_locales(&page.locales);
        if locales.is_empty() {
            let loc = self.locale_builder.build_url(&page.path);
            return self
                .build_entry(loc, priority, changefreq, lastmod, None)
                .into_iter()
                .collect();
        }

        let alternates = self.locale_builder.build_alternates(&page.path, &locales);
        locales
            .iter()
            .filter_map(|locale| {
                let loc = self.locale_builder.build_localized_url(&page.path, locale);
                self.build_entry(loc, priority, changefreq, lastmod, Some(alternates.clone()))
            })
            .collect()
    }

    fn build_entry(
        &self,
        loc: String,
        priority: f64,
        changefreq: Option<ChangeFrequency>,
        lastmod: Option<NaiveDateTime>,
        alternates: Option<indexmap::IndexMap<String, String>>,
    ) -> Option<SitemapUrl> {
        let mut builder = SitemapUrl::builder(loc.as_str()).priority(priority);
        if let Some(changefreq) = changefreq {
            builder = builder.changefreq(changefreq);
        }
        if let Some(lastmod) = lastmod {
            builder = builder.lastmod(lastmod);
        }
        if let Some(alternates) = alternates {
            builder = builder.alternates(alternates);
        }
        match builder.build() {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("skipping invalid sitemap entry {}: {}", loc, e);
                None
            }
        }
    }
}

/// Parses lastmod text as an ISO local date or date-time. Failures are logged
/// and yield `None`; a bad timestamp never fails the scan.
fn parse_lastmod(value: &str) -> Option<NaiveDateTime> {
    let parsed = if value.contains('T') {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
    } else {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN))
    };
    match parsed {
        Ok(lastmod) => Some(lastmod),
        Err(e) => {
            warn!("failed to parse lastmod value '{}': {}", value, e);
            None
        }
    }
}
