//! Session token issue and verification.
//!
//! Tokens are HS256-signed JWTs carrying [`Claims`]. They are produced only
//! by a successful login and checked on every protected request. There is no
//! clock-skew tolerance: a token is valid strictly before its `exp` and
//! rejected from that second on.
//!
//! Both operations have an `_at` variant taking the current Unix time so the
//! expiry boundary can be tested without sleeping.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use schooldesk_config::JwtConfig;
use schooldesk_core::AppError;

use crate::claims::Claims;
use crate::roles::Role;

/// Message returned for any token that fails verification.
pub const INVALID_TOKEN: &str = "Invalid Token";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is not configured")]
    MissingSecret,
    #[error("failed to encode token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("token rejected: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    #[error("token expired")]
    Expired,
    #[error("token lifetime of {0} seconds overflows the expiry time")]
    ExpiryOverflow(i64),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingSecret | TokenError::Encode(_) | TokenError::ExpiryOverflow(_) => {
                AppError::internal(err)
            }
            TokenError::Invalid(_) | TokenError::Expired => AppError::unauthorized(INVALID_TOKEN),
        }
    }
}

/// Issues a session token for `user_id` with the configured lifetime.
pub fn issue_token(
    user_id: Uuid,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    issue_token_at(user_id, role, jwt_config, Utc::now().timestamp())
}

pub fn issue_token_at(
    user_id: Uuid,
    role: Role,
    jwt_config: &JwtConfig,
    now: i64,
) -> Result<String, TokenError> {
    if jwt_config.secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let exp = now
        .checked_add(jwt_config.token_expiry)
        .ok_or(TokenError::ExpiryOverflow(jwt_config.token_expiry))?;

    let claims = Claims {
        sub: user_id,
        role,
        iat: now,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Encode)
}

/// Verifies a session token and returns its claims.
///
/// Fails on a bad signature, a malformed payload (including an unknown
/// role), or expiry.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    verify_token_at(token, jwt_config, Utc::now().timestamp())
}

pub fn verify_token_at(
    token: &str,
    jwt_config: &JwtConfig,
    now: i64,
) -> Result<Claims, TokenError> {
    if jwt_config.secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    // Expiry is checked below against the supplied clock.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(TokenError::Invalid)?;

    if claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            token_expiry: 86_400,
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_token_at(user_id, Role::Librarian, &config(), NOW).unwrap();

        let claims = verify_token_at(&token, &config(), NOW + 1).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Librarian);
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + 86_400);
    }

    #[test]
    fn test_verify_with_real_clock() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, Role::Admin, &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_expiry_boundary() {
        let token = issue_token_at(Uuid::new_v4(), Role::Admin, &config(), NOW).unwrap();
        let exp = NOW + 86_400;

        assert!(verify_token_at(&token, &config(), exp - 1).is_ok());
        assert!(matches!(
            verify_token_at(&token, &config(), exp),
            Err(TokenError::Expired)
        ));
        assert!(matches!(
            verify_token_at(&token, &config(), exp + 1),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token_at(Uuid::new_v4(), Role::Admin, &config(), NOW).unwrap();
        let other = JwtConfig {
            secret: "a_different_secret".to_string(),
            token_expiry: 86_400,
        };
        assert!(matches!(
            verify_token_at(&token, &other, NOW),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = issue_token_at(Uuid::new_v4(), Role::OfficeStaff, &config(), NOW).unwrap();
        let forged = issue_token_at(Uuid::new_v4(), Role::Admin, &config(), NOW).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(verify_token_at(&spliced, &config(), NOW).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(verify_token_at("invalid.token.here", &config(), NOW).is_err());
        assert!(verify_token_at("", &config(), NOW).is_err());
    }

    #[test]
    fn test_empty_secret_is_configuration_error() {
        let empty = JwtConfig {
            secret: String::new(),
            token_expiry: 86_400,
        };
        let err = issue_token_at(Uuid::new_v4(), Role::Admin, &empty, NOW).unwrap_err();
        assert!(matches!(err, TokenError::MissingSecret));
        assert_eq!(AppError::from(err).status.as_u16(), 500);
    }

    #[test]
    fn test_overflowing_lifetime_is_an_error() {
        let unbounded = JwtConfig {
            secret: "s".to_string(),
            token_expiry: i64::MAX,
        };
        let err = issue_token_at(Uuid::new_v4(), Role::Admin, &unbounded, NOW).unwrap_err();
        assert!(matches!(err, TokenError::ExpiryOverflow(i64::MAX)));
        assert_eq!(AppError::from(err).status.as_u16(), 500);
    }

    #[test]
    fn test_rejections_map_to_invalid_token() {
        let err: AppError = TokenError::Expired.into();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.message(), INVALID_TOKEN);
    }
}
