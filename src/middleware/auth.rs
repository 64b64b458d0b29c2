use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use schooldesk_auth::{Claims, INVALID_TOKEN, verify_token};
use schooldesk_config::JwtConfig;
use schooldesk_core::AppError;
use schooldesk_models::UserId;

use crate::state::AppState;

pub const NO_TOKEN: &str = "Access Denied, No Token";

/// The identity decoded from a verified session token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.0.sub)
    }
}

/// Reads `Authorization: Bearer <token>` and verifies the token.
///
/// A missing header or an empty token part is "no token"; anything else
/// that fails, including a scheme other than `Bearer`, is an invalid token.
pub fn authenticate(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<AuthUser, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(AppError::unauthorized(NO_TOKEN));
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::unauthorized(INVALID_TOKEN))?;

    let (scheme, token) = value.trim().split_once(' ').unwrap_or((value.trim(), ""));
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::unauthorized(NO_TOKEN));
    }
    if scheme != "Bearer" {
        return Err(AppError::unauthorized(INVALID_TOKEN));
    }

    let claims = verify_token(token, jwt_config)?;
    Ok(AuthUser(claims))
}

/// Rejects requests without a valid token and stores the [`AuthUser`] in the
/// request extensions for the handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = authenticate(req.headers(), &state.jwt_config)?;
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }
        authenticate(&parts.headers, &state.jwt_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use schooldesk_auth::{Role, issue_token};
    use uuid::Uuid;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "gate-test-secret".to_string(),
            token_expiry: 3600,
        }
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn rejection(headers: &HeaderMap) -> String {
        authenticate(headers, &config()).unwrap_err().message()
    }

    #[test]
    fn test_missing_header_is_no_token() {
        assert_eq!(rejection(&HeaderMap::new()), NO_TOKEN);
    }

    #[test]
    fn test_scheme_without_token_is_no_token() {
        assert_eq!(rejection(&headers("Bearer")), NO_TOKEN);
        assert_eq!(rejection(&headers("Bearer   ")), NO_TOKEN);
    }

    #[test]
    fn test_wrong_scheme_is_invalid() {
        let token = issue_token(Uuid::new_v4(), Role::Admin, &config()).unwrap();
        assert_eq!(rejection(&headers(&format!("Basic {}", token))), INVALID_TOKEN);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(rejection(&headers("Bearer not.a.jwt")), INVALID_TOKEN);
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, Role::Librarian, &config()).unwrap();

        let auth_user = authenticate(&headers(&format!("Bearer {}", token)), &config()).unwrap();
        assert_eq!(auth_user.user_id().into_inner(), user_id);
        assert_eq!(auth_user.0.role, Role::Librarian);
    }
}
