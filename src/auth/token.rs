// Bearer token issuance and validation

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::AuthError;

/// Claims carried by a session token
///
/// `sub` is the user id and the only identity claim. `jti` is a random id so
/// that two tokens minted for the same user within the same second are still
/// string-distinct, which the session binding relies on to supersede the
/// previous login.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Token service signing and validating session tokens (HS256)
///
/// The signing secret and TTL come from [`AppConfig`](crate::config::AppConfig)
/// at startup; neither is read from ambient state and the secret is never
/// logged or exposed to clients.
pub struct TokenService {
    secret: String,
    session_ttl_seconds: i64,
}

impl TokenService {
    pub fn new(secret: String, session_ttl_seconds: i64) -> Self {
        Self {
            secret,
            session_ttl_seconds,
        }
    }

    /// Issue a session token for a user, expiring `session_ttl_seconds`
    /// from now.
    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.session_ttl_seconds,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Validate a token's signature and expiry.
    ///
    /// Returns `ExpiredToken` for an expired-but-genuine token and
    /// `InvalidToken` for anything malformed or signed with another key.
    /// Both are recoverable classifications, never a fault. Note that this
    /// says nothing about whether the token is still bound to the user
    /// record; the session binding check is separate.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        // No leeway: a token past its expiry is invalid immediately
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        // The library accepts exp == now; here an expiry at or before the
        // current second already counts as expired, so a zero-TTL token is
        // never momentarily valid
        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_TTL: i64 = 1800;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string(), TEST_TTL)
    }

    #[test]
    fn test_token_expiry_matches_configured_ttl() {
        let service = test_token_service();
        let token = service.issue(1).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, TEST_TTL);
    }

    #[test]
    fn test_ttl_is_configuration_not_a_constant() {
        let service = TokenService::new("secret".to_string(), 86400);
        let token = service.issue(1).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn test_claims_carry_user_identity() {
        let service = test_token_service();
        let token = service.issue(42).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn test_tokens_for_same_user_are_distinct() {
        // Two logins in the same second must still produce different tokens,
        // otherwise the second login could not supersede the first
        let service = test_token_service();
        let first = service.issue(1).unwrap();
        let second = service.issue(1).unwrap();

        assert_ne!(first, second);
        assert!(service.validate(&first).is_ok());
        assert!(service.validate(&second).is_ok());
    }

    #[test]
    fn test_zero_or_negative_ttl_is_immediately_invalid() {
        let zero = TokenService::new("secret".to_string(), 0);
        let token = zero.issue(1).unwrap();
        assert!(matches!(
            zero.validate(&token),
            Err(AuthError::ExpiredToken)
        ));

        let negative = TokenService::new("secret".to_string(), -60);
        let token = negative.issue(1).unwrap();
        assert!(matches!(
            negative.validate(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.validate("").is_err());
        assert!(service.validate("not.a.token").is_err());
        assert!(service.validate("plain_garbage").is_err());
        assert!(service
            .validate("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = TokenService::new("secret1".to_string(), TEST_TTL);
        let other = TokenService::new("secret2".to_string(), TEST_TTL);

        let token = issuer.issue(1).unwrap();
        assert!(issuer.validate(&token).is_ok());
        assert!(matches!(
            other.validate(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_classified_not_a_crash() {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let claims = Claims {
            sub: 1,
            iat: Utc::now().timestamp() - 1000,
            exp: Utc::now().timestamp() - 500,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        let service = test_token_service();
        assert!(matches!(
            service.validate(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    proptest! {
        #[test]
        fn prop_issued_tokens_validate_with_configured_ttl(
            user_id in 1i32..1000000,
            ttl in 5i64..604800,
        ) {
            let service = TokenService::new("prop_secret".to_string(), ttl);
            let token = service.issue(user_id)?;
            let claims = service.validate(&token)?;

            prop_assert_eq!(claims.sub, user_id);
            prop_assert_eq!(claims.exp - claims.iat, ttl);
        }

        #[test]
        fn prop_malformed_tokens_rejected(
            malformed in "[a-zA-Z0-9]{10,50}"
        ) {
            let service = test_token_service();
            prop_assert!(service.validate(&malformed).is_err());
        }
    }
}
