//! Staff account models and DTOs.
//!
//! [`Credential`] is the stored account including its password hash and is
//! only handled by the auth service and the stores. Everything that leaves
//! the API goes through [`User`], which has no hash field.

use chrono::{DateTime, Utc};
use schooldesk_auth::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;
use crate::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Credential {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub super_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A staff account as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub super_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Credential> for User {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id,
            name: credential.name,
            email: credential.email,
            role: credential.role,
            super_admin: credential.super_admin,
            created_at: credential.created_at,
            updated_at: credential.updated_at,
        }
    }
}

/// Fields needed to store a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub super_admin: bool,
}

/// Changes to apply to a stored account. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct CredentialChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl CredentialChanges {
    pub fn apply_to(self, credential: &mut Credential) {
        if let Some(name) = self.name {
            credential.name = name;
        }
        if let Some(email) = self.email {
            credential.email = email;
        }
        if let Some(password_hash) = self.password_hash {
            credential.password_hash = password_hash;
        }
        if let Some(role) = self.role {
            credential.role = role;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(custom(function = "not_blank", message = "All fields are required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// DTO for creating an account from the staff management screens.
///
/// `role` falls back to `OfficeStaff` when omitted.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New password; left unchanged when absent or empty.
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// The account summary handed back on login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Credential> for LoginUser {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id,
            name: credential.name.clone(),
            email: credential.email.clone(),
            role: credential.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub data: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub success: bool,
    pub data: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn credential() -> Credential {
        let now = Utc::now();
        Credential {
            id: UserId::new(),
            name: "Grace".to_string(),
            email: "grace@school.test".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::Librarian,
            super_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_user_never_carries_password_hash() {
        let user = User::from(credential());
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "Librarian");
        assert_eq!(json["superAdmin"], false);
    }

    #[test]
    fn test_changes_only_touch_given_fields() {
        let mut stored = credential();
        CredentialChanges {
            role: Some(Role::Admin),
            ..Default::default()
        }
        .apply_to(&mut stored);

        assert_eq!(stored.role, Role::Admin);
        assert_eq!(stored.name, "Grace");
        assert_eq!(stored.password_hash, "$2b$04$hash");
    }

    #[test]
    fn test_register_request_requires_role() {
        let result = serde_json::from_str::<RegisterRequest>(
            r#"{"name":"A","email":"a@b.co","password":"pw"}"#,
        );
        assert!(result.unwrap_err().to_string().contains("missing field `role`"));
    }

    #[test]
    fn test_register_request_rejects_blank_name() {
        let dto = RegisterRequest {
            name: "   ".to_string(),
            email: "a@b.co".to_string(),
            password: "pw".to_string(),
            role: Role::OfficeStaff,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_dto_accepts_empty_body() {
        let dto: UpdateUserDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.name.is_none() && dto.role.is_none());
    }
}
