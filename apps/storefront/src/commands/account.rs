//! Login, registration and profile.

use bookstore_core::validation::validate_registration;
use bookstore_core::{Credentials, ProfileUpdate, Registration, User, ValidationError};
use tracing::info;

use crate::context::AppContext;
use crate::error::{StorefrontError, StorefrontResult};

/// Logs in and stores the session.
pub async fn login(ctx: &AppContext, username: &str, password: &str) -> StorefrontResult<User> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        }
        .into());
    }
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        }
        .into());
    }

    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    let response = ctx
        .api
        .users
        .login(&credentials)
        .await
        .map_err(StorefrontError::Api)?;
    ctx.session.login(&response.user, response.token.as_deref());

    info!(user_id = response.user.id, "Session started");
    Ok(response.user)
}

/// Registers a new account and logs it in.
pub async fn register(ctx: &AppContext, form: &Registration) -> StorefrontResult<User> {
    validate_registration(form)?;

    let response = ctx
        .api
        .users
        .register(form)
        .await
        .map_err(StorefrontError::Api)?;
    ctx.session.login(&response.user, response.token.as_deref());

    info!(user_id = response.user.id, "Registered and logged in");
    Ok(response.user)
}

/// Forgets the session. Safe to call when logged out.
pub fn logout(ctx: &AppContext) {
    ctx.session.logout();
    info!("Logged out");
}

/// The stored identity, without contacting the users service.
pub fn whoami(ctx: &AppContext) -> Option<User> {
    ctx.session.get_user()
}

/// Fetches the logged-in user's current profile.
pub async fn profile(ctx: &AppContext) -> StorefrontResult<User> {
    let user = ctx.require_user()?;
    Ok(ctx.api.users.get_user(user.id).await?)
}

/// Saves profile changes, then refreshes the stored identity from the
/// service.
pub async fn update_profile(ctx: &AppContext, update: &ProfileUpdate) -> StorefrontResult<User> {
    let user = ctx.require_user()?;
    if update.is_empty() {
        return Err(ValidationError::Required {
            field: "profile field".to_string(),
        }
        .into());
    }

    ctx.api.users.update_user(user.id, update).await?;
    let refreshed = ctx.api.users.get_user(user.id).await?;
    ctx.session.set_user(&refreshed);

    info!(user_id = refreshed.id, "Profile updated");
    Ok(refreshed)
}
