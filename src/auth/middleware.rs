// Authentication extractor for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::debug;

use crate::auth::{error::AuthError, models::User};
use crate::AppState;

/// Extractor that resolves the bearer token on a request to its user record.
///
/// Runs the full authenticate contract: extract the `Authorization: Bearer`
/// header, validate the token signature and expiry, load the user by the
/// subject claim, and require the token to still be the user's current
/// session. Handlers taking this extractor never see an unauthenticated
/// request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Pull the bearer token out of the Authorization header.
///
/// A missing header and a present-but-malformed one are distinct failures;
/// both map to 401 at the response layer.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = bearer_token(parts)?;

        let user = state.auth.authenticate(token).await?;
        debug!("Authenticated request for user id={}", user.id);

        Ok(AuthenticatedUser { user })
    }
}
