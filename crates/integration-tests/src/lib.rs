//! Integration tests for Streuobst.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p streuobst-integration-tests
//! ```
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`;
//! no server or browser is started. [`TestContext`] plays the browser: it keeps
//! the session cookie between requests so the cart persists across them.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart actions, persistence and panel rendering
//! - `storefront_ui` - Tabs, navbar, overlays and middleware headers

use std::path::PathBuf;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use streuobst_core::catalog::Catalog;
use streuobst_storefront::config::StorefrontConfig;
use streuobst_storefront::state::AppState;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

/// Catalog used by every integration test.
pub const FIXTURE_CATALOG: &str = r#"
tabs:
  - key: saefte
    label: Säfte
    products:
      - name: Bio Apfelsaft, 1L
        price: "3,00 €"
        weight: 1 Liter
        image: /static/img/flasche.svg
      - name: Bio Apfel-Birne, 1L
        price: "3,40 €"
        weight: 1 Liter
        image: /static/img/flasche.svg
  - key: pakete
    label: Pakete
    products:
      - name: Probierpaket
        price: "17,90 €"
        weight: 6 × 1 Liter
        image: /static/img/kiste.svg
"#;

/// Id of the first fixture product.
pub const APFELSAFT: &str = "bio-apfelsaft-1l";

/// Id of the second fixture product.
pub const APFEL_BIRNE: &str = "bio-apfel-birne-1l";

/// Id of the product in the second tab.
pub const PROBIERPAKET: &str = "probierpaket";

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Whether the body contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}

/// One visitor talking to an in-process storefront.
pub struct TestContext {
    app: Router,
    cookie: Option<String>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build a storefront over [`FIXTURE_CATALOG`] with a fresh session store.
    ///
    /// # Panics
    ///
    /// Panics if the fixture catalog is invalid.
    #[must_use]
    pub fn new() -> Self {
        let catalog = Catalog::from_yaml(FIXTURE_CATALOG).expect("fixture catalog is valid");
        let config = StorefrontConfig {
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config, catalog);

        Self {
            app: streuobst_storefront::app(state, MemoryStore::default()),
            cookie: None,
        }
    }

    /// A second visitor on the same server, without this visitor's cookie.
    #[must_use]
    pub fn other_visitor(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request("GET", uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a form POST request with an already encoded body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post_form(&mut self, uri: &str, body: &str) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .expect("valid request");
        self.send(request).await
    }

    /// Post a cart action (`op=action:id`), as a cart button would.
    pub async fn cart_action(&mut self, op: &str) -> TestResponse {
        self.post_form("/cart/action", &format!("op={op}")).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("hx-request", "true");
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
