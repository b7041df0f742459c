//! HTTP endpoints serving the generated sitemap XML.
//!
//! The router is meant to be merged at the root of an axum application:
//! `/sitemap.xml` serves either the single sitemap or the sitemap index, and
//! `/sitemap-{n}.xml` serves individual pages in index mode. Response bodies
//! are exactly the serializer output, with an `application/xml` content type.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::{Initialization, SitemapConfig};
use crate::registry::SitemapRegistry;
use crate::routes::RouteScanner;

lazy_static! {
    /// Matches sitemap page filenames like `sitemap-3.xml`. The router can
    /// only capture whole path segments, so the page number is extracted here.
    static ref SITEMAP_PAGE_FILE: Regex =
        Regex::new(r"^sitemap-(\d+)\.xml$").expect("valid sitemap page pattern");
}

/// Shared state behind the sitemap endpoints.
pub struct SitemapService {
    registry: Arc<SitemapRegistry>,
    config: Arc<SitemapConfig>,
    scanner: Option<Arc<RouteScanner>>,
}

impl SitemapService {
    pub fn new(registry: Arc<SitemapRegistry>, config: Arc<SitemapConfig>) -> Self {
        Self {
            registry,
            config,
            scanner: None,
        }
    }

    /// Attaches a route scanner so requests can trigger lazy initialization.
    pub fn with_scanner(mut self, scanner: Arc<RouteScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    /// Runs the initial scan when eager initialization is configured. Call
    /// once at startup, after the application's routes are known.
    pub fn initialize(&self) {
        if let Some(scanner) = &self.scanner {
            if self.config.initialization == Initialization::Eager {
                scanner.scan();
            }
        }
    }

    fn ensure_scanned(&self) {
        if let Some(scanner) = &self.scanner {
            if self.config.initialization == Initialization::Lazy && !scanner.is_scanned() {
                scanner.scan();
            }
        }
    }
}

/// Builds a router exposing `/sitemap.xml` and `/sitemap-{n}.xml`.
///
/// The page route claims `/{file}` underneath, so merge this router at the
/// application root; unrecognized filenames on it answer 404.
pub fn router(service: Arc<SitemapService>) -> Router {
    Router::new()
        .route("/sitemap.xml", get(sitemap))
        .route("/{file}", get(sitemap_page))
        .with_state(service)
}

/// `GET /sitemap.xml`: the sitemap index when index mode is required, the
/// single full sitemap otherwise.
pub async fn sitemap(State(service): State<Arc<SitemapService>>) -> Response {
    service.ensure_scanned();
    let registry = &service.registry;
    let xml = if registry.requires_index() {
        registry.sitemap_index_xml()
    } else {
        registry.sitemap_xml()
    };
    xml_response(xml.as_ref())
}

/// `GET /sitemap-{n}.xml`: one sitemap page in index mode. Pages are
/// 1-indexed; out-of-range numbers and non-matching filenames answer 404.
pub async fn sitemap_page(
    State(service): State<Arc<SitemapService>>,
    Path(file): Path<String>,
) -> Response {
    service.ensure_scanned();

    let page = SITEMAP_PAGE_FILE
        .captures(&file)
        .and_then(|captures| captures[1].parse::<usize>().ok());
    let Some(page) = page else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let registry = &service.registry;
    if page < 1 || page > registry.sitemap_count() {
        return StatusCode::NOT_FOUND.into_response();
    }
    xml_response(&registry.sitemap_page_xml(page))
}

fn xml_response(body: &str) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        body.to_owned(),
    )
        .into_response()
}
