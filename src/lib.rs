//! Sitemap Ultra
//!
//! An in-memory sitemap registry and XML generator with hreflang support,
//! compliant with the sitemaps.org protocol.
//!
//! The [`SitemapRegistry`] holds all URLs and serves cached XML documents,
//! splitting into a sitemap index once the per-file limit is exceeded. The
//! [`LocaleUrlBuilder`] resolves locales and shapes locale-qualified URLs for
//! hreflang alternates. Route producers plug in through [`RouteSource`], and
//! [`server::router`] exposes the whole thing as an embeddable axum router.

pub mod config;
pub mod error;
pub mod locale;
pub mod model;
pub mod registry;
pub mod routes;
pub mod serializer;
pub mod server;

pub use config::{Initialization, LocaleUrlPattern, SitemapConfig};
pub use error::SitemapError;
pub use locale::LocaleUrlBuilder;
pub use model::{ChangeFrequency, SitemapUrl, SitemapUrlBuilder};
pub use registry::SitemapRegistry;
pub use routes::{RoutePage, RouteScanner, RouteSource};
pub use serializer::{render_sitemap_index, render_urlset};
pub use server::SitemapService;
