// Application configuration loaded once at startup

use std::fmt;

/// Default session token lifetime: 30 minutes
const DEFAULT_SESSION_TTL_SECONDS: i64 = 1800;

/// Immutable application configuration, built from the environment once at
/// startup and passed explicitly to the services that need it.
///
/// The signing secret is kept out of `Debug` output so it can never end up
/// in logs by accident.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub session_ttl_seconds: i64,
    pub host: String,
    pub port: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Errors raised while reading configuration from the environment
#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "missing environment variable {}", name),
            ConfigError::InvalidVar(name, value) => {
                write!(f, "invalid value '{}' for environment variable {}", value, name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; `SESSION_TTL_SECONDS`
    /// defaults to 30 minutes, `HOST` to 0.0.0.0 and `PORT` to 8000.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let session_ttl_seconds = match std::env::var("SESSION_TTL_SECONDS") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidVar("SESSION_TTL_SECONDS", raw))?,
            Err(_) => DEFAULT_SESSION_TTL_SECONDS,
        };

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            session_ttl_seconds,
            host,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config = AppConfig {
            database_url: "postgresql://user:hunter2@db/auth".to_string(),
            jwt_secret: "super_secret_signing_key".to_string(),
            session_ttl_seconds: 1800,
            host: "0.0.0.0".to_string(),
            port: "8000".to_string(),
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("super_secret_signing_key"));
        assert!(rendered.contains("1800"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingVar("JWT_SECRET");
        assert_eq!(err.to_string(), "missing environment variable JWT_SECRET");

        let err = ConfigError::InvalidVar("SESSION_TTL_SECONDS", "soon".to_string());
        assert_eq!(
            err.to_string(),
            "invalid value 'soon' for environment variable SESSION_TTL_SECONDS"
        );
    }
}
