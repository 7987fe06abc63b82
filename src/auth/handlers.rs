// HTTP handlers for the authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
};
use crate::AppState;

/// Register a new user
/// POST /signup
#[utoipa::path(
    post,
    path = "/signup",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, session opened", body = AuthResponse),
        (status = 400, description = "Malformed email or password", body = String, example = json!({"message": "Validation error"})),
        (status = 409, description = "Email already registered", body = String, example = json!({"message": "Email in use"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"message": "Internal server error"}))
    ),
    tag = "auth"
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    request.validate()?;

    let response = state
        .auth
        .register(&request.email, &request.password, request.name.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Log an existing user in
/// POST /signin
#[utoipa::path(
    post,
    path = "/signin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, new session opened", body = AuthResponse),
        (status = 400, description = "Malformed email or password", body = String, example = json!({"message": "Validation error"})),
        (status = 401, description = "Unknown email or wrong password", body = String, example = json!({"message": "Email or password is wrong"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"message": "Internal server error"}))
    ),
    tag = "auth"
)]
pub async fn signin_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    request.validate()?;

    let response = state.auth.login(&request.email, &request.password).await?;

    Ok(Json(response))
}

/// Return the profile of the authenticated user
/// GET /current
///
/// The extractor already resolved and checked the user; no further lookup
/// is needed here.
#[utoipa::path(
    get,
    path = "/current",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserResponse),
        (status = 401, description = "Missing, invalid or superseded token", body = String, example = json!({"message": "Not authorized"}))
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn current_handler(auth: AuthenticatedUser) -> Json<UserResponse> {
    Json(UserResponse::from(auth.user))
}

/// Close the authenticated user's session
/// POST /logout
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 401, description = "Missing, invalid or superseded token", body = String, example = json!({"message": "Not authorized"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"message": "Internal server error"}))
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn logout_handler(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<StatusCode, AuthError> {
    state.auth.logout(auth.user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
