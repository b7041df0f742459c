//! Error types for entry construction and configuration loading.

use thiserror::Error;

/// Errors produced while building sitemap entries or loading configuration.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The entry location was empty or whitespace-only.
    #[error("loc must not be blank")]
    BlankLocation,

    /// The entry location does not start with `http://` or `https://`.
    #[error("loc must start with http:// or https://, got: {0}")]
    InvalidScheme(String),

    /// Entry priority outside the protocol range.
    #[error("priority must be between 0.0 and 1.0, got: {0}")]
    PriorityOutOfRange(f64),

    /// `base_url` is missing or not an absolute http(s) URL.
    #[error("base_url must be an absolute http(s) URL, got: {0:?}")]
    InvalidBaseUrl(String),

    /// Configured default priority outside the protocol range.
    #[error("default_priority must be between 0.0 and 1.0, got: {0}")]
    DefaultPriorityOutOfRange(f64),

    /// The per-sitemap URL limit must allow at least one URL.
    #[error("max_urls_per_sitemap must be at least 1")]
    ZeroMaxUrlsPerSitemap,

    /// Reading or deserializing a configuration source failed.
    #[error("failed to load sitemap configuration")]
    Config(#[from] config::ConfigError),
}
