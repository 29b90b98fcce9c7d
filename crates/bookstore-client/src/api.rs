//! # Api Bundle
//!
//! One handle holding a client for each service, all sharing a single
//! connection pool and token provider.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::{ApiConfig, Service};
use crate::error::{ApiError, ApiResult};
use crate::http::ServiceClient;
use crate::services::{BooksService, OrdersService, PaymentsService, ReviewsService, UsersService};
use crate::token::TokenProvider;

/// Clients for the five services.
#[derive(Debug, Clone)]
pub struct Api {
    pub users: UsersService,
    pub books: BooksService,
    pub orders: OrdersService,
    pub payments: PaymentsService,
    pub reviews: ReviewsService,
}

impl Api {
    /// Builds the clients. Fails only if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::config(format!("Failed to build HTTP client: {}", e)))?;

        let client = |service: Service| {
            ServiceClient::new(service, config.api_root(service), http.clone(), tokens.clone())
        };

        Ok(Api {
            users: UsersService::new(client(Service::Users)),
            books: BooksService::new(client(Service::Books)),
            orders: OrdersService::new(client(Service::Orders)),
            payments: PaymentsService::new(client(Service::Payments)),
            reviews: ReviewsService::new(client(Service::Reviews)),
        })
    }
}
