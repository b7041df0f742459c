//! Configuration for sitemap generation.
//!
//! [`SitemapConfig`] is a plain read-only value shared by the registry, the
//! locale URL builder and the route scanner. It can be constructed in code,
//! deserialized from any serde source, or loaded from a file with `SITEMAP_*`
//! environment variable overrides via [`SitemapConfig::from_file`].

use std::path::Path;

use serde::Deserialize;

use crate::error::SitemapError;
use crate::model::ChangeFrequency;

/// URL pattern strategy for constructing locale-specific URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleUrlPattern {
    /// Inserts the locale as a path prefix segment,
    /// e.g. `https://example.com/en/about`.
    PathPrefix,
    /// Appends the locale as a query parameter,
    /// e.g. `https://example.com/about?lang=en`.
    QueryParam,
}

/// Controls when the route scanner performs its initial scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Initialization {
    /// Scan at application startup, via [`crate::server::SitemapService::initialize`].
    Eager,
    /// Scan on the first sitemap request.
    Lazy,
}

/// Configuration values recognized by the sitemap generator.
///
/// `base_url` is required; every other field has a protocol-sensible default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Base URL of the site (e.g. `"https://www.example.com"`), including the
    /// protocol and without a trailing slash. Required.
    pub base_url: String,

    /// Maximum number of URLs per individual sitemap file. When the total
    /// exceeds this limit a sitemap index referencing multiple files is
    /// generated. The protocol ceiling is 50,000.
    pub max_urls_per_sitemap: usize,

    /// Priority assigned to scanned URLs without an explicit priority.
    pub default_priority: f64,

    /// Change frequency assigned to scanned URLs without an explicit one.
    /// `None` means the `<changefreq>` element is omitted.
    pub default_changefreq: Option<ChangeFrequency>,

    /// When the route scanner runs its initial scan.
    pub initialization: Initialization,

    /// Locale codes for hreflang alternate generation. Empty means no locale
    /// handling unless a route supplies its own locales.
    pub locales: Vec<String>,

    /// How locale codes are embedded into URLs.
    pub locale_url_pattern: LocaleUrlPattern,

    /// Query parameter name used with [`LocaleUrlPattern::QueryParam`].
    pub locale_query_param_name: String,

    /// The default locale code. Used to pick the `x-default` alternate and,
    /// together with `omit_default_locale_in_url`, to produce clean URLs for
    /// the primary language.
    pub default_locale: Option<String>,

    /// When `true`, URLs for `default_locale` carry no locale identifier.
    pub omit_default_locale_in_url: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_urls_per_sitemap: 50_000,
            default_priority: 0.5,
            default_changefreq: None,
            initialization: Initialization::Eager,
            locales: Vec::new(),
            locale_url_pattern: LocaleUrlPattern::PathPrefix,
            locale_query_param_name: "lang".to_string(),
            default_locale: None,
            omit_default_locale_in_url: false,
        }
    }
}

impl SitemapConfig {
    /// Creates a configuration with the given base URL and all defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from a file (TOML, YAML or JSON, by extension),
    /// letting `SITEMAP_*` environment variables override individual keys
    /// (e.g. `SITEMAP_BASE_URL`). The result is validated before returning.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SitemapError> {
        let loaded = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("SITEMAP").try_parsing(true))
            .build()?;
        let parsed: SitemapConfig = loaded.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Checks that the configuration is usable: an absolute http(s) base URL,
    /// a default priority within 0.0..=1.0 and a non-zero per-sitemap limit.
    pub fn validate(&self) -> Result<(), SitemapError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SitemapError::InvalidBaseUrl(self.base_url.clone()));
        }
        if !(0.0..=1.0).contains(&self.default_priority) {
            return Err(SitemapError::DefaultPriorityOutOfRange(self.default_priority));
        }
        if self.max_urls_per_sitemap == 0 {
            return Err(SitemapError::ZeroMaxUrlsPerSitemap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SitemapConfig::default();
        assert_eq!(config.max_urls_per_sitemap, 50_000);
        assert_eq!(config.default_priority, 0.5);
        assert!(config.default_changefreq.is_none());
        assert_eq!(config.initialization, Initialization::Eager);
        assert!(config.locales.is_empty());
        assert_eq!(config.locale_url_pattern, LocaleUrlPattern::PathPrefix);
        assert_eq!(config.locale_query_param_name, "lang");
        assert!(config.default_locale.is_none());
        assert!(!config.omit_default_locale_in_url);
    }

    #[test]
    fn test_validate_requires_absolute_base_url() {
        assert!(matches!(
            SitemapConfig::default().validate(),
            Err(SitemapError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            SitemapConfig::new("www.example.com").validate(),
            Err(SitemapError::InvalidBaseUrl(_))
        ));
        assert!(SitemapConfig::new("https://www.example.com").validate().is_ok());
    }

    #[test]
    fn test_validate_default_priority_range() {
        let mut config = SitemapConfig::new("https://example.com");
        config.default_priority = 1.5;
        assert!(matches!(
            config.validate(),
            Err(SitemapError::DefaultPriorityOutOfRange(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = SitemapConfig::new("https://example.com");
        config.max_urls_per_sitemap = 0;
        assert!(matches!(
            config.validate(),
            Err(SitemapError::ZeroMaxUrlsPerSitemap)
        ));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: SitemapConfig = from_json(
            r#"{
                "base_url": "https://example.com",
                "default_changefreq": "weekly",
                "locale_url_pattern": "query_param",
                "initialization": "lazy",
                "locales": ["en", "pt"]
            }"#,
        );
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.default_changefreq, Some(ChangeFrequency::Weekly));
        assert_eq!(config.locale_url_pattern, LocaleUrlPattern::QueryParam);
        assert_eq!(config.initialization, Initialization::Lazy);
        assert_eq!(config.locales, vec!["en".to_string(), "pt".to_string()]);
        // Untouched keys keep their defaults
        assert_eq!(config.max_urls_per_sitemap, 50_000);
    }

    fn from_json(raw: &str) -> SitemapConfig {
        let source = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Json))
            .build()
            .unwrap();
        source.try_deserialize().unwrap()
    }
}
