//! Integration tests for the Rocketshoes storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! Tests drive the full router in-process with [`TestApp`], which carries
//! the session cookie between requests the way a browser would.

#![allow(clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use rocketshoes_core::{Product, ProductId};
use rocketshoes_storefront::{catalog::Catalog, config::StorefrontConfig, state::AppState};
use rust_decimal::Decimal;
use tower::ServiceExt;

/// Largest response body the helpers will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A storefront instance plus one shopper's session cookie.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Storefront with default config and the sample catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(sample_catalog())
    }

    /// Storefront with default config and the given catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).expect("default config is valid");
        let state = AppState::new(config, catalog);
        Self {
            router: rocketshoes_storefront::app(state),
            cookie: None,
        }
    }

    /// A second shopper on the same storefront, with no session yet.
    #[must_use]
    pub fn other_shopper(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Issue a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::get(path);
        self.send(request, Body::empty()).await
    }

    /// Submit a form as a plain browser post.
    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(form.to_string())).await
    }

    /// Submit a form the way HTMX does.
    pub async fn htmx_post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true");
        self.send(request, Body::from(form.to_string())).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(body).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("body fits in memory");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a product with a price given in cents.
#[must_use]
pub fn product(id: i32, title: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Decimal::new(cents, 2),
        image: format!("https://images.example.com/{id}.jpg"),
    }
}

/// Three-product catalog used by most tests.
#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::from_products(vec![
        product(1, "Tênis de Caminhada", 10_000),
        product(2, "Tênis VR Caminhada", 13_990),
        product(3, "Tênis Duramo Lite", 21_990),
    ])
    .expect("sample catalog has unique ids")
}
