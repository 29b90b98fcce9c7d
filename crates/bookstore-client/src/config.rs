//! # Client Configuration
//!
//! Base URLs for the five services and the per-request timeout.
//!
//! ```text
//! ┌────────────┬───────────────────────────┬──────────────────────────────┐
//! │ Service    │ Default base URL          │ Requests go to               │
//! ├────────────┼───────────────────────────┼──────────────────────────────┤
//! │ users      │ http://localhost:8001     │ http://localhost:8001/api/.. │
//! │ books      │ http://localhost:8002     │ http://localhost:8002/api/.. │
//! │ orders     │ http://localhost:8003     │ http://localhost:8003/api/.. │
//! │ payments   │ http://localhost:8004     │ http://localhost:8004/api/.. │
//! │ reviews    │ http://localhost:8005     │ http://localhost:8005/api/.. │
//! └────────────┴───────────────────────────┴──────────────────────────────┘
//! ```

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The five backend services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Users,
    Books,
    Orders,
    Payments,
    Reviews,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::Users,
        Service::Books,
        Service::Orders,
        Service::Payments,
        Service::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Users => "users",
            Service::Books => "books",
            Service::Orders => "orders",
            Service::Payments => "payments",
            Service::Reviews => "reviews",
        }
    }

    /// Port the service listens on in a local deployment.
    pub fn default_port(&self) -> u16 {
        match self {
            Service::Users => 8001,
            Service::Books => 8002,
            Service::Orders => 8003,
            Service::Payments => 8004,
            Service::Reviews => 8005,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where each service lives.
///
/// Base URLs are kept as validated strings; [`parse_base_url`] is the only
/// way in besides the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub users_url: String,
    pub books_url: String,
    pub orders_url: String,
    pub payments_url: String,
    pub reviews_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            users_url: localhost(Service::Users),
            books_url: localhost(Service::Books),
            orders_url: localhost(Service::Orders),
            payments_url: localhost(Service::Payments),
            reviews_url: localhost(Service::Reviews),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Points every service at the same base URL. Handy for a gateway or a
    /// test server.
    pub fn single_host(base: &Url) -> Self {
        let base = base.as_str().to_string();
        ApiConfig {
            users_url: base.clone(),
            books_url: base.clone(),
            orders_url: base.clone(),
            payments_url: base.clone(),
            reviews_url: base,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets one service's base URL, validating it.
    pub fn with_base_url(mut self, service: Service, base: &str) -> ApiResult<Self> {
        *self.base_url_mut(service) = parse_base_url(base)?.into();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Users => &self.users_url,
            Service::Books => &self.books_url,
            Service::Orders => &self.orders_url,
            Service::Payments => &self.payments_url,
            Service::Reviews => &self.reviews_url,
        }
    }

    fn base_url_mut(&mut self, service: Service) -> &mut String {
        match service {
            Service::Users => &mut self.users_url,
            Service::Books => &mut self.books_url,
            Service::Orders => &mut self.orders_url,
            Service::Payments => &mut self.payments_url,
            Service::Reviews => &mut self.reviews_url,
        }
    }

    /// The API root for a service: `<base>/api`.
    pub fn api_root(&self, service: Service) -> String {
        format!("{}/api", self.base_url(service).trim_end_matches('/'))
    }
}

/// Parses a base URL, accepting only http and https.
pub fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::config(format!("Invalid URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::config(format!(
            "Invalid URL '{}': scheme must be http or https, got {}",
            raw, other
        ))),
    }
}

fn localhost(service: Service) -> String {
    format!("http://localhost:{}", service.default_port())
}
