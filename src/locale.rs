//! Locale resolution and locale-aware URL construction for hreflang support.
//!
//! Locales are resolved through a three-tier priority chain: an explicit
//! per-route override, then the configured global locale list, then nothing.
//! URL shaping follows the configured [`LocaleUrlPattern`].

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;

use crate::config::{LocaleUrlPattern, SitemapConfig};
use crate::serializer::strip_trailing_slash;

/// Builds locale-qualified URLs and hreflang alternates maps from a shared
/// [`SitemapConfig`].
#[derive(Debug, Clone)]
pub struct LocaleUrlBuilder {
    config: Arc<SitemapConfig>,
}

impl LocaleUrlBuilder {
    pub fn new(config: Arc<SitemapConfig>) -> Self {
        Self { config }
    }

    /// Resolves the locales that apply to one route.
    ///
    /// Priority chain: a non-empty `explicit` override wins; otherwise the
    /// configured `locales` list; otherwise empty, meaning no locale handling
    /// for this route. Per-request locale detection is a producer concern and
    /// never happens here.
    pub fn resolve_locales(&self, explicit: &[String]) -> Vec<String> {
        if !explicit.is_empty() {
            debug!("using route-level locales: {:?}", explicit);
            return explicit.to_vec();
        }
        if !self.config.locales.is_empty() {
            debug!("using config-level locales: {:?}", self.config.locales);
            return self.config.locales.clone();
        }
        debug!("no locales resolved; configure locales for multilingual support");
        Vec::new()
    }

    /// Builds the non-localized URL for a path: `base_url + path`, with the
    /// path normalized to a single leading slash.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), ensure_leading_slash(path))
    }

    /// Builds the URL for a path in a specific locale.
    ///
    /// When `omit_default_locale_in_url` is set and `locale` is the configured
    /// default, the result is identical to [`build_url`](Self::build_url).
    /// Otherwise the locale is embedded per the configured pattern: as a path
    /// prefix segment, or as a query parameter (appended with `?` or `&`
    /// depending on whether the URL already carries a query).
    pub fn build_localized_url(&self, path: &str, locale: &str) -> String {
        let base_url = self.base_url();
        let normal_path = ensure_leading_slash(path);

        if self.config.omit_default_locale_in_url
            && self.config.default_locale.as_deref() == Some(locale)
        {
            return format!("{}{}", base_url, normal_path);
        }

        match self.config.locale_url_pattern {
            LocaleUrlPattern::PathPrefix => format!("{}/{}{}", base_url, locale, normal_path),
            LocaleUrlPattern::QueryParam => {
                let full_url = format!("{}{}", base_url, normal_path);
                let separator = if full_url.contains('?') { '&' } else { '?' };
                format!(
                    "{}{}{}={}",
                    full_url, separator, self.config.locale_query_param_name, locale
                )
            }
        }
    }

    /// Builds the hreflang alternates map for a path across the given locales.
    ///
    /// Empty input yields an empty map. Otherwise one entry per locale in
    /// order (first occurrence wins on duplicates), followed by an `x-default`
    /// entry pointing at the configured default locale when it is among
    /// `locales`, or the first locale otherwise.
    pub fn build_alternates(&self, path: &str, locales: &[String]) -> IndexMap<String, String> {
        if locales.is_empty() {
            return IndexMap::new();
        }

        let mut alternates = IndexMap::with_capacity(locales.len() + 1);
        for locale in locales {
            if !alternates.contains_key(locale.as_str()) {
                alternates.insert(locale.clone(), self.build_localized_url(path, locale));
            }
        }

        let x_default_locale = self
            .config
            .default_locale
            .as_deref()
            .filter(|default| locales.iter().any(|l| l == default))
            .unwrap_or(&locales[0]);
        alternates.insert(
            "x-default".to_string(),
            self.build_localized_url(path, x_default_locale),
        );

        alternates
    }

    fn base_url(&self) -> &str {
        strip_trailing_slash(&self.config.base_url)
    }
}

/// Normalizes a path to start with exactly one `/`. Empty becomes `/`.
fn ensure_leading_slash(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        Cow::Borrowed("/")
    } else if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(configure: impl FnOnce(&mut SitemapConfig)) -> LocaleUrlBuilder {
        let mut config = SitemapConfig::new("https://example.com");
        configure(&mut config);
        LocaleUrlBuilder::new(Arc::new(config))
    }

    #[test]
    fn test_explicit_override_wins() {
        let builder = builder(|c| c.locales = vec!["en".into(), "pt".into()]);
        let explicit = vec!["fr".to_string(), "de".to_string()];
        assert_eq!(builder.resolve_locales(&explicit), explicit);
    }

    #[test]
    fn test_empty_override_falls_back_to_config() {
        let builder = builder(|c| c.locales = vec!["en".into(), "pt".into()]);
        assert_eq!(builder.resolve_locales(&[]), vec!["en".to_string(), "pt".to_string()]);
    }

    #[test]
    fn test_both_empty_yields_no_locales() {
        let builder = builder(|_| {});
        assert!(builder.resolve_locales(&[]).is_empty());
    }

    #[test]
    fn test_build_url_normalizes_path() {
        let builder = builder(|_| {});
        assert_eq!(builder.build_url("/about"), "https://example.com/about");
        assert_eq!(builder.build_url("about"), "https://example.com/about");
        assert_eq!(builder.build_url(""), "https://example.com/");
    }

    #[test]
    fn test_build_url_strips_trailing_base_slash() {
        let config = SitemapConfig::new("https://example.com/");
        let builder = LocaleUrlBuilder::new(Arc::new(config));
        assert_eq!(builder.build_url("/about"), "https://example.com/about");
    }

    #[test]
    fn test_path_prefix_pattern() {
        let builder = builder(|_| {});
        assert_eq!(
            builder.build_localized_url("/about", "en"),
            "https://example.com/en/about"
        );
    }

    #[test]
    fn test_query_param_pattern() {
        let builder = builder(|c| c.locale_url_pattern = LocaleUrlPattern::QueryParam);
        assert_eq!(
            builder.build_localized_url("/about", "en"),
            "https://example.com/about?lang=en"
        );
    }

    #[test]
    fn test_query_param_appends_with_ampersand() {
        let builder = builder(|c| c.locale_url_pattern = LocaleUrlPattern::QueryParam);
        assert_eq!(
            builder.build_localized_url("/page?sort=date", "pt"),
            "https://example.com/page?sort=date&lang=pt"
        );
    }

    #[test]
    fn test_custom_query_param_name() {
        let builder = builder(|c| {
            c.locale_url_pattern = LocaleUrlPattern::QueryParam;
            c.locale_query_param_name = "locale".to_string();
        });
        assert_eq!(
            builder.build_localized_url("/about", "fr"),
            "https://example.com/about?locale=fr"
        );
    }

    #[test]
    fn test_omit_default_locale_in_url() {
        let builder = builder(|c| {
            c.default_locale = Some("en".to_string());
            c.omit_default_locale_in_url = true;
        });
        assert_eq!(builder.build_localized_url("/about", "en"), "https://example.com/about");
        assert_eq!(
            builder.build_localized_url("/about", "pt"),
            "https://example.com/pt/about"
        );
    }

    #[test]
    fn test_default_locale_kept_when_omit_disabled() {
        let builder = builder(|c| c.default_locale = Some("en".to_string()));
        assert_eq!(
            builder.build_localized_url("/about", "en"),
            "https://example.com/en/about"
        );
    }

    #[test]
    fn test_build_alternates_with_default_locale() {
        let builder = builder(|c| c.default_locale = Some("en".to_string()));
        let locales = vec!["en".to_string(), "pt".to_string()];
        let alternates = builder.build_alternates("/about", &locales);

        assert_eq!(alternates.len(), 3);
        let keys: Vec<_> = alternates.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["en", "pt", "x-default"]);
        assert_eq!(alternates["x-default"], alternates["en"]);
    }

    #[test]
    fn test_build_alternates_x_default_falls_back_to_first() {
        let builder = builder(|c| c.default_locale = Some("de".to_string()));
        let locales = vec!["en".to_string(), "pt".to_string()];
        let alternates = builder.build_alternates("/about", &locales);
        // "de" is not among the locales, so x-default points at "en"
        assert_eq!(alternates["x-default"], alternates["en"]);
    }

    #[test]
    fn test_build_alternates_duplicate_locale_first_wins() {
        let builder = builder(|_| {});
        let locales = vec!["en".to_string(), "en".to_string(), "pt".to_string()];
        let alternates = builder.build_alternates("/about", &locales);
        assert_eq!(alternates.len(), 3); // en, pt, x-default
    }

    #[test]
    fn test_build_alternates_empty() {
        let builder = builder(|_| {});
        assert!(builder.build_alternates("/about", &[]).is_empty());
    }
}
