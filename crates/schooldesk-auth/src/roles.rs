//! Account roles.
//!
//! A role is a coarse permission tag stored on every credential. It is
//! independent of the `superAdmin` flag, which overrides roles entirely
//! (see [`crate::permissions`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    #[default]
    OfficeStaff,
    Librarian,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::OfficeStaff, Role::Librarian];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::OfficeStaff => "OfficeStaff",
            Role::Librarian => "Librarian",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "OfficeStaff" => Ok(Role::OfficeStaff),
            "Librarian" => Ok(Role::Librarian),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "admin".parse::<Role>(),
            Err(UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn test_default_role_is_office_staff() {
        assert_eq!(Role::default(), Role::OfficeStaff);
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(
            serde_json::to_string(&Role::OfficeStaff).unwrap(),
            r#""OfficeStaff""#
        );
        let role: Role = serde_json::from_str(r#""Librarian""#).unwrap();
        assert_eq!(role, Role::Librarian);
        assert!(serde_json::from_str::<Role>(r#""Teacher""#).is_err());
    }
}
