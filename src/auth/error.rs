// Authentication error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

/// Authentication error taxonomy
///
/// Domain failures (`EmailInUse`, `InvalidCredentials`, token errors) are
/// expected and map to specific 4xx responses; everything else is an
/// unexpected fault that maps to a generic 500 with no internal detail.
#[derive(Debug)]
pub enum AuthError {
    /// Malformed request body (email format, password rules)
    ValidationError(String),
    /// Unknown email or wrong password; the two are indistinguishable
    /// to the client so responses cannot be used as a user-existence oracle
    InvalidCredentials,
    /// Malformed token, bad signature, or token no longer bound to the user
    InvalidToken,
    /// Token signature is fine but the expiry has passed
    ExpiredToken,
    /// No Authorization header on a protected route
    MissingToken,
    /// Registration attempted with an email that already has an account
    EmailInUse,
    /// Storage fault; details are logged server-side only
    DatabaseError(String),
    /// Password hashing failed
    PasswordHashError,
    /// Token signing failed
    TokenGenerationError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AuthError::InvalidCredentials => write!(f, "Email or password is wrong"),
            AuthError::InvalidToken => write!(f, "Not authorized"),
            AuthError::ExpiredToken => write!(f, "Not authorized"),
            AuthError::MissingToken => write!(f, "Not authorized"),
            AuthError::EmailInUse => write!(f, "Email in use"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::PasswordHashError => write!(f, "Password hashing error"),
            AuthError::TokenGenerationError(msg) => write!(f, "Token generation error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Email or password is wrong".to_string())
            }
            AuthError::InvalidToken => {
                warn!("Invalid or superseded token presented");
                (StatusCode::UNAUTHORIZED, "Not authorized".to_string())
            }
            AuthError::ExpiredToken => {
                warn!("Expired token presented");
                (StatusCode::UNAUTHORIZED, "Not authorized".to_string())
            }
            AuthError::MissingToken => {
                warn!("Missing bearer token on protected route");
                (StatusCode::UNAUTHORIZED, "Not authorized".to_string())
            }
            AuthError::EmailInUse => (StatusCode::CONFLICT, "Email in use".to_string()),
            AuthError::DatabaseError(msg) => {
                error!("Database error in auth flow: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AuthError::PasswordHashError => {
                error!("Password hashing error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AuthError::TokenGenerationError(msg) => {
                error!("Token generation error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::EmailInUse => StatusCode::CONFLICT,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PasswordHashError => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe message for this error (no internal detail)
    pub fn error_message(&self) -> String {
        match self {
            AuthError::ValidationError(msg) => msg.clone(),
            AuthError::InvalidCredentials => "Email or password is wrong".to_string(),
            AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::MissingToken => "Not authorized".to_string(),
            AuthError::EmailInUse => "Email in use".to_string(),
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => "Internal server error".to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthError::ValidationError(errors.to_string())
    }
}
