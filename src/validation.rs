// Validation utilities module
// Custom validation rules for request DTOs, used alongside the derive macros

use validator::ValidationError;

/// Validates that a password contains no whitespace characters.
/// Length and email format are enforced by the derive attributes on the DTOs.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().any(char::is_whitespace) {
        Err(ValidationError::new("password_contains_whitespace"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_without_whitespace_is_valid() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("p@ssw0rd!").is_ok());
    }

    #[test]
    fn test_password_with_whitespace_is_rejected() {
        assert!(validate_password("secret one").is_err());
        assert!(validate_password(" secret1").is_err());
        assert!(validate_password("secret1\t").is_err());
    }
}
