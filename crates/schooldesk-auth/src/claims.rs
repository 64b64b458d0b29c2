//! Session token claims.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::roles::Role;

/// Claims carried by a session token.
///
/// - `sub`: the account identifier
/// - `role`: the account's role at login time
/// - `iat`: issue time (Unix seconds)
/// - `exp`: expiry (Unix seconds), `iat` plus the configured lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Whether the token has lapsed at `now`. The expiry instant itself is
    /// already expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Claims {
        Claims {
            sub: Uuid::nil(),
            role: Role::Admin,
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        }
    }

    #[test]
    fn test_claims_serialize() {
        let serialized = serde_json::to_string(&sample()).unwrap();
        assert!(serialized.contains(r#""sub":"00000000-0000-0000-0000-000000000000""#));
        assert!(serialized.contains(r#""role":"Admin""#));
        assert!(serialized.contains(r#""exp":1700086400"#));
    }

    #[test]
    fn test_claims_reject_unknown_role() {
        let json =
            r#"{"sub":"00000000-0000-0000-0000-000000000000","role":"Janitor","iat":0,"exp":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let claims = sample();
        assert!(!claims.is_expired_at(claims.exp - 1));
        assert!(claims.is_expired_at(claims.exp));
        assert!(claims.is_expired_at(claims.exp + 1));
    }
}
