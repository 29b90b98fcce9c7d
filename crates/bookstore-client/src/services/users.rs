//! Users service: registration, login, profile.

use bookstore_core::{AuthResponse, Credentials, ProfileUpdate, Registration, User, UserId};
use tracing::info;

use crate::error::ApiResult;
use crate::http::ServiceClient;

#[derive(Debug, Clone)]
pub struct UsersService {
    client: ServiceClient,
}

impl UsersService {
    pub fn new(client: ServiceClient) -> Self {
        UsersService { client }
    }

    /// `POST /users/register/`
    pub async fn register(&self, form: &Registration) -> ApiResult<AuthResponse> {
        let response: AuthResponse = self.client.post("/users/register/", form).await?;
        info!(user_id = response.user.id, "Registered user");
        Ok(response)
    }

    /// `POST /users/login/`
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        let response: AuthResponse = self.client.post("/users/login/", credentials).await?;
        info!(user_id = response.user.id, "Logged in");
        Ok(response)
    }

    /// `GET /users/me/`
    pub async fn current_user(&self) -> ApiResult<User> {
        self.client.get("/users/me/").await
    }

    /// `GET /users/{id}/`
    pub async fn get_user(&self, id: UserId) -> ApiResult<User> {
        self.client.get(&format!("/users/{}/", id)).await
    }

    /// `PUT /users/{id}/`
    pub async fn update_user(&self, id: UserId, update: &ProfileUpdate) -> ApiResult<User> {
        self.client.put(&format!("/users/{}/", id), update).await
    }
}
