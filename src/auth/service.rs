// Authentication service - business logic layer

use tracing::{debug, info};

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, User, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};

/// Authentication service coordinating registration, login, token
/// authentication and logout.
///
/// Each operation is a single non-transactional sequence: lookup, verify,
/// issue, bind. A crash between issue and bind leaves a signed token that
/// never matches the stored binding, so it fails safe.
pub struct AuthService {
    user_repo: UserRepository,
    token_service: TokenService,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, token_service: TokenService) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// True iff `presented` is exactly the token currently bound to the user.
    /// An empty stored value means no active session, so nothing matches it.
    pub fn token_is_current(stored: &str, presented: &str) -> bool {
        !stored.is_empty() && stored == presented
    }

    /// Register a new user and open their first session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResponse, AuthError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            debug!("Registration rejected: email already in use");
            return Err(AuthError::EmailInUse);
        }

        let password_hash = PasswordService::hash_password(password)?;

        // The unique index catches a concurrent duplicate that slipped past
        // the lookup above; the repository maps it to the same EmailInUse.
        let user = self
            .user_repo
            .create_user(email, name, &password_hash)
            .await?;

        let token = self.token_service.issue(user.id)?;
        self.user_repo.set_session_token(user.id, &token).await?;

        info!("Registered new user id={}", user.id);
        Ok(AuthResponse {
            access_token: token,
            user: UserResponse::from(user),
        })
    }

    /// Log a user in, superseding any previously issued token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        // Unknown email and wrong password collapse to the same error so the
        // response cannot reveal whether the account exists
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.token_service.issue(user.id)?;
        self.user_repo.set_session_token(user.id, &token).await?;

        debug!("User id={} logged in", user.id);
        Ok(AuthResponse {
            access_token: token,
            user: UserResponse::from(user),
        })
    }

    /// Resolve a bearer token to its user record.
    ///
    /// A token must pass both checks to authenticate: cryptographic
    /// signature + expiry, and exact equality with the token currently bound
    /// to the user. A valid-but-superseded token fails the second check.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.token_service.validate(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !Self::token_is_current(&user.session_token, token) {
            debug!("Superseded or unbound token presented for user id={}", user.id);
            return Err(AuthError::InvalidToken);
        }

        Ok(user)
    }

    /// Clear the user's session binding. All outstanding tokens for the user
    /// stop authenticating immediately, regardless of their expiry.
    pub async fn logout(&self, user_id: i32) -> Result<(), AuthError> {
        self.user_repo.clear_session_token(user_id).await?;
        debug!("User id={} logged out", user_id);
        Ok(())
    }
}
