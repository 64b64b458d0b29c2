//! Super admin creation.
//!
//! The HTTP API never sets `superAdmin`, so the first account able to manage
//! other Admins has to be created here.

use schooldesk_auth::Role;
use schooldesk_core::hash_password;
use schooldesk_db::UserStore;
use schooldesk_models::{Credential, NewCredential};

/// Stores a new account with `super_admin` set. A duplicate email is an
/// error and leaves the existing account untouched.
pub async fn create_super_admin(
    users: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
    bcrypt_cost: u32,
) -> Result<Credential, Box<dyn std::error::Error>> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("name, email and password are required".into());
    }

    let password_hash = hash_password(password, bcrypt_cost)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let credential = users
        .insert_user(NewCredential {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role,
            super_admin: true,
        })
        .await?;

    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooldesk_core::verify_password;
    use schooldesk_db::MemoryStore;

    #[tokio::test]
    async fn test_creates_super_admin() {
        let store = MemoryStore::new();
        let admin =
            create_super_admin(&store, " Root ", "root@school.test", "secret", Role::Admin, 4)
                .await
                .unwrap();

        assert!(admin.super_admin);
        assert_eq!(admin.name, "Root");
        assert_eq!(admin.role, Role::Admin);
        assert!(verify_password("secret", &admin.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        create_super_admin(&store, "Root", "root@school.test", "secret", Role::Admin, 4)
            .await
            .unwrap();

        let err =
            create_super_admin(&store, "Other", "root@school.test", "pw", Role::Librarian, 4)
                .await
                .unwrap_err();
        assert_eq!(err.to_string(), "User already exists");

        let stored = store
            .find_user_by_email("root@school.test")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Root");
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let store = MemoryStore::new();
        let result =
            create_super_admin(&store, "  ", "root@school.test", "pw", Role::Admin, 4).await;
        assert!(result.is_err());
    }
}
