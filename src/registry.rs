//! Thread-safe in-memory registry of sitemap entries.
//!
//! The registry is the single source of truth for every URL that appears in
//! the generated output. It is constructed once at startup, shared by `Arc`
//! with all producers and consumers, and torn down with the process; nothing
//! is persisted.
//!
//! Entries live in an insertion-ordered map behind a read-write lock, so
//! snapshots and pagination see the same order the producers registered. The
//! two serialized documents (sitemap and sitemap index) are cached as shared
//! `Arc<str>` values and regenerated lazily: readers clone the current Arc
//! without blocking each other, and on a miss a single writer rebuilds the
//! document under the write lock with a double check, so concurrent readers
//! share one regeneration instead of racing.

use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use parking_lot::RwLock;

use crate::config::SitemapConfig;
use crate::model::SitemapUrl;
use crate::serializer;

/// Holds all sitemap URLs in memory and serves cached XML documents.
pub struct SitemapRegistry {
    config: Arc<SitemapConfig>,
    urls: RwLock<IndexMap<String, SitemapUrl>>,
    cached_sitemap: RwLock<Option<Arc<str>>>,
    cached_index: RwLock<Option<Arc<str>>>,
}

impl SitemapRegistry {
    /// Creates an empty registry over the given configuration.
    pub fn new(config: Arc<SitemapConfig>) -> Self {
        Self {
            config,
            urls: RwLock::new(IndexMap::new()),
            cached_sitemap: RwLock::new(None),
            cached_index: RwLock::new(None),
        }
    }

    /// Adds a single entry. An existing entry with the same `loc` is replaced
    /// in place (its original position is kept). Invalidates the cached XML.
    pub fn add(&self, url: SitemapUrl) {
        let loc = url.loc().to_string();
        self.urls.write().insert(loc.clone(), url);
        self.invalidate();
        debug!("added sitemap url: {}", loc);
    }

    /// Adds a batch of entries, replacing existing ones by `loc`. The cached
    /// XML is invalidated once, after the whole batch is in.
    pub fn add_all(&self, urls: impl IntoIterator<Item = SitemapUrl>) {
        let mut count = 0usize;
        {
            let mut map = self.urls.write();
            for url in urls {
                map.insert(url.loc().to_string(), url);
                count += 1;
            }
        }
        self.invalidate();
        debug!("added {} sitemap urls", count);
    }

    /// Removes an entry by location. Returns `true` (and invalidates the
    /// cached XML) only when the entry existed.
    pub fn remove(&self, loc: &str) -> bool {
        // shift_remove keeps the remaining entries in insertion order
        let removed = self.urls.write().shift_remove(loc).is_some();
        if removed {
            self.invalidate();
            debug!("removed sitemap url: {}", loc);
        }
        removed
    }

    /// Removes every entry and invalidates the cached XML.
    pub fn clear(&self) {
        self.urls.write().clear();
        self.invalidate();
        debug!("cleared all sitemap urls");
    }

    /// Whether a location is currently registered.
    pub fn contains(&self, loc: &str) -> bool {
        self.urls.read().contains_key(loc)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.urls.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.read().is_empty()
    }

    /// An owned copy of all entries in insertion order. Mutating the returned
    /// vector has no effect on the registry.
    pub fn snapshot(&self) -> Vec<SitemapUrl> {
        self.urls.read().values().cloned().collect()
    }

    /// A 1-indexed page of entries. Out-of-range page numbers (including 0)
    /// yield an empty vector, never an error.
    pub fn page(&self, page: usize, page_size: usize) -> Vec<SitemapUrl> {
        if page == 0 {
            return Vec::new();
        }
        let urls = self.urls.read();
        let from = (page - 1) * page_size;
        if from >= urls.len() {
            return Vec::new();
        }
        urls.values().skip(from).take(page_size).cloned().collect()
    }

    /// Number of individual sitemap files needed: 0 when empty, otherwise
    /// `ceil(len / max_urls_per_sitemap)`.
    pub fn sitemap_count(&self) -> usize {
        let total = self.len();
        if total == 0 {
            return 0;
        }
        let max = self.config.max_urls_per_sitemap;
        total.div_ceil(max)
    }

    /// Whether index mode is required (entry count exceeds the per-file limit).
    pub fn requires_index(&self) -> bool {
        self.len() > self.config.max_urls_per_sitemap
    }

    /// The complete sitemap document over all entries.
    ///
    /// Cached: repeated calls without an intervening mutation return the same
    /// `Arc` allocation (`Arc::ptr_eq` holds). On a miss exactly one caller
    /// regenerates while the rest wait and share the result.
    pub fn sitemap_xml(&self) -> Arc<str> {
        self.cached_or_regenerate(&self.cached_sitemap, || {
            serializer::render_urlset(&self.snapshot())
        })
    }

    /// The sitemap index document, built from [`sitemap_count`](Self::sitemap_count)
    /// and the configured base URL. Same caching contract as
    /// [`sitemap_xml`](Self::sitemap_xml).
    pub fn sitemap_index_xml(&self) -> Arc<str> {
        self.cached_or_regenerate(&self.cached_index, || {
            serializer::render_sitemap_index(self.sitemap_count(), &self.config.base_url)
        })
    }

    /// The sitemap document for one 1-indexed page of `max_urls_per_sitemap`
    /// entries. Not cached: paged documents trade repeated CPU work for
    /// bounded memory when the entry set is large.
    pub fn sitemap_page_xml(&self, page: usize) -> String {
        serializer::render_urlset(&self.page(page, self.config.max_urls_per_sitemap))
    }

    fn cached_or_regenerate(
        &self,
        cache: &RwLock<Option<Arc<str>>>,
        build: impl FnOnce() -> String,
    ) -> Arc<str> {
        if let Some(cached) = cache.read().as_ref() {
            return Arc::clone(cached);
        }
        let mut slot = cache.write();
        // Double check: another caller may have regenerated while we waited.
        if let Some(cached) = slot.as_ref() {
            return Arc::clone(cached);
        }
        let fresh: Arc<str> = Arc::from(build());
        *slot = Some(Arc::clone(&fresh));
        fresh
    }

    /// Drops both cached documents. Runs after the entry lock is released;
    /// mutators must never hold `urls` while taking a cache lock, or a
    /// regenerating reader (cache write then `urls` read) could deadlock.
    fn invalidate(&self) {
        *self.cached_sitemap.write() = None;
        *self.cached_index.write() = None;
    }
}
