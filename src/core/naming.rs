//! Service naming conventions.
//!
//! Service names are lowercase kebab-case; environment variable names are
//! SCREAMING_SNAKE_CASE derived from them. Every component derives key names
//! through this module; the deep-delete prefix match depends on the
//! conversion being byte-identical everywhere.

use crate::error::{ConfigError, Result};

/// Convert a kebab-case service name to SCREAMING_SNAKE_CASE.
///
/// `auth-service` becomes `AUTH_SERVICE`. The conversion is lossy for names
/// containing anything other than letters, digits, and hyphens; validate with
/// [`validate_service_name`] first.
pub fn to_screaming_snake(kebab: &str) -> String {
    kebab.replace('-', "_").to_uppercase()
}

/// The `{PREFIX}_` used for a service's derived variable names.
///
/// `auth-service` yields `AUTH_SERVICE_`, as in `AUTH_SERVICE_API_KEY`.
pub fn env_prefix(service: &str) -> String {
    format!("{}_", to_screaming_snake(service))
}

/// Convert a SCREAMING_SNAKE_CASE prefix back to the kebab-case service name.
pub fn to_kebab_case(snake: &str) -> String {
    snake.replace('_', "-").to_lowercase()
}

/// Validate that a service name is lowercase kebab-case.
///
/// Rules:
/// - Only a-z, 0-9, and hyphen
/// - Cannot be empty
/// - Cannot start or end with a hyphen
///
/// # Errors
///
/// Returns `ConfigError::InvalidServiceName` with the offending character and
/// position when the name is invalid.
pub fn validate_service_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::InvalidServiceName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        }
        .into());
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(ConfigError::InvalidServiceName {
            name: name.to_string(),
            reason: "cannot start or end with a hyphen".to_string(),
        }
        .into());
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_lowercase() && !ch.is_ascii_digit() && ch != '-' {
            return Err(ConfigError::InvalidServiceName {
                name: name.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only a-z, 0-9, and hyphen are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_screaming_snake() {
        assert_eq!(to_screaming_snake("auth-service"), "AUTH_SERVICE");
        assert_eq!(to_screaming_snake("bff"), "BFF");
        assert_eq!(to_screaming_snake("api-v2-gateway"), "API_V2_GATEWAY");
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(env_prefix("auth-service"), "AUTH_SERVICE_");
    }

    #[test]
    fn test_to_kebab_case_roundtrip() {
        assert_eq!(to_kebab_case("AUTH_SERVICE"), "auth-service");
        assert_eq!(to_kebab_case(&to_screaming_snake("demo-service")), "demo-service");
    }

    #[test]
    fn test_valid_service_names() {
        assert!(validate_service_name("auth-service").is_ok());
        assert!(validate_service_name("bff").is_ok());
        assert!(validate_service_name("svc2").is_ok());
    }

    #[test]
    fn test_invalid_service_names() {
        assert!(validate_service_name("").is_err());
        assert!(validate_service_name("Auth-Service").is_err());
        assert!(validate_service_name("auth_service").is_err());
        assert!(validate_service_name("-auth").is_err());
        assert!(validate_service_name("auth-").is_err());
        assert!(validate_service_name("auth service").is_err());
    }
}
