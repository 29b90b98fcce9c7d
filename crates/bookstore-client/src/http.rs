//! # Service Client
//!
//! JSON-over-HTTP plumbing shared by every service wrapper.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BooksService::get_book(7)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceClient::get("/books/7/")                                       │
//! │       │  url   = <base>/api/books/7/                                   │
//! │       │  auth  = "Bearer <token>" if the TokenProvider has one         │
//! │       ▼                                                                 │
//! │  reqwest ──► service                                                   │
//! │       │                                                                 │
//! │       ├── 2xx  ──► decode JSON body (empty body decodes as null)        │
//! │       ├── !2xx ──► ApiError::from_response(status, body)               │
//! │       └── I/O  ──► ApiError from the reqwest error                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Service;
use crate::error::{ApiError, ApiResult};
use crate::token::TokenProvider;

/// A list endpoint's body: either a bare array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) => items,
            ListResponse::Paginated { results } => results,
        }
    }
}

/// HTTP client bound to one service's API root.
#[derive(Clone)]
pub struct ServiceClient {
    service: Service,
    root: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service", &self.service)
            .field("root", &self.root)
            .finish()
    }
}

impl ServiceClient {
    /// `root` is the service's API root, e.g. `http://localhost:8002/api`.
    pub fn new(
        service: Service,
        root: impl Into<String>,
        http: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        ServiceClient {
            service,
            root: root.into(),
            http,
            tokens,
        }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    /// Full URL for an endpoint path such as `/books/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    /// GET a list endpoint, accepting both response shapes.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let list: ListResponse<T> = self.get(path).await?;
        Ok(list.into_vec())
    }

    pub async fn get_list_with<T, Q>(&self, path: &str, query: &Q) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let list: ListResponse<T> = self.get_with(path, query).await?;
        Ok(list.into_vec())
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// POST without a body, for action endpoints like refunds.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::POST, path)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    /// DELETE, ignoring whatever body comes back.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(service = %self.service, %method, path, "Sending request");

        let builder = self.http.request(method, self.url(path));
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let (status, body) = self.execute(builder).await?;
        decode_body(status, &body)
    }

    /// Sends the request and returns the status and body of a 2xx response.
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<(u16, String)> {
        let response = builder.send().await.map_err(|e| {
            warn!(service = %self.service, error = %e, "Request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            debug!(service = %self.service, status = status.as_u16(), message = %err.message, "Service returned an error");
            return Err(err);
        }

        Ok((status.as_u16(), body))
    }
}

/// Decodes a success body. An empty body decodes as JSON `null`, so `()`
/// and `Option<T>` targets accept 204 responses.
pub(crate) fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::decode(status, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_shapes() {
        let plain: ListResponse<i64> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2]);

        let paged: ListResponse<i64> =
            serde_json::from_str(r#"{"count": 2, "next": null, "results": [3, 4]}"#).unwrap();
        assert_eq!(paged.into_vec(), vec![3, 4]);
    }

    #[test]
    fn test_decode_empty_body() {
        assert!(decode_body::<()>(204, "").is_ok());

        let none: Option<i64> = decode_body(200, "  ").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_decode_mismatch() {
        let err = decode_body::<Vec<i64>>(200, r#"{"oops": true}"#).unwrap_err();
        assert_eq!(err.status, Some(200));
        assert!(err.message.starts_with("Unexpected response from server"));
    }

    #[test]
    fn test_url_joins_root_and_path() {
        let client = ServiceClient::new(
            Service::Books,
            "http://localhost:8002/api",
            reqwest::Client::new(),
            Arc::new(crate::token::Anonymous),
        );
        assert_eq!(client.url("/books/7/"), "http://localhost:8002/api/books/7/");
        assert_eq!(client.service(), Service::Books);
    }
}
