//! Staff account management.
//!
//! Update and delete run the same sequence: load the acting account from
//! the store (its current role and super admin flag decide, not the token),
//! load the target, ask the permission evaluator, then write.

use tracing::{info, instrument};

use schooldesk_auth::{Actor, Mutation, authorize_mutation};
use schooldesk_config::PasswordConfig;
use schooldesk_core::{AppError, hash_password_async};
use schooldesk_db::UserStore;
use schooldesk_db::error::USER_EXISTS;
use schooldesk_models::{Credential, CredentialChanges, NewCredential, UserId};

use super::model::{ACCOUNT_GONE, CreateUserDto, USER_NOT_FOUND, UpdateUserDto, User};

pub struct UsersService;

impl UsersService {
    #[instrument(skip(users))]
    pub async fn list_users(users: &dyn UserStore) -> Result<Vec<User>, AppError> {
        Ok(users.list_users().await?)
    }

    #[instrument(skip(users))]
    pub async fn get_user(users: &dyn UserStore, id: UserId) -> Result<User, AppError> {
        users
            .find_user(id)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    #[instrument(skip(users, password_config, dto), fields(email = %dto.email))]
    pub async fn create_user(
        users: &dyn UserStore,
        password_config: &PasswordConfig,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        if users.find_user_by_email(&dto.email).await?.is_some() {
            return Err(AppError::conflict(USER_EXISTS));
        }

        let password_hash = hash_password_async(dto.password, password_config.bcrypt_cost).await?;
        let credential = users
            .insert_user(NewCredential {
                name: dto.name.trim().to_string(),
                email: dto.email,
                password_hash,
                role: dto.role.unwrap_or_default(),
                super_admin: false,
            })
            .await?;

        info!(user_id = %credential.id, role = %credential.role, "User created");
        Ok(credential.into())
    }

    #[instrument(skip(users, password_config, dto))]
    pub async fn update_user(
        users: &dyn UserStore,
        password_config: &PasswordConfig,
        actor_id: UserId,
        target_id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let actor = Self::load_actor(users, actor_id).await?;
        let target = Self::load_target(users, target_id).await?;
        authorize_mutation(&actor, target.role, Mutation::Update)?;

        let password_hash = match dto.password.filter(|password| !password.is_empty()) {
            Some(password) => {
                Some(hash_password_async(password, password_config.bcrypt_cost).await?)
            }
            None => None,
        };

        let changes = CredentialChanges {
            name: dto.name.map(|name| name.trim().to_string()),
            email: dto.email,
            password_hash,
            role: dto.role,
        };

        let updated = users
            .update_user(target_id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        info!(actor_id = %actor_id, target_id = %target_id, "User updated");
        Ok(updated.into())
    }

    #[instrument(skip(users))]
    pub async fn delete_user(
        users: &dyn UserStore,
        actor_id: UserId,
        target_id: UserId,
    ) -> Result<(), AppError> {
        let actor = Self::load_actor(users, actor_id).await?;
        let target = Self::load_target(users, target_id).await?;
        authorize_mutation(&actor, target.role, Mutation::Delete)?;

        if !users.delete_user(target_id).await? {
            return Err(AppError::not_found(USER_NOT_FOUND));
        }

        info!(actor_id = %actor_id, target_id = %target_id, "User deleted");
        Ok(())
    }

    async fn load_actor(users: &dyn UserStore, id: UserId) -> Result<Actor, AppError> {
        let credential = users
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::unauthorized(ACCOUNT_GONE))?;
        Ok(Actor {
            id: credential.id.into_inner(),
            role: credential.role,
            super_admin: credential.super_admin,
        })
    }

    async fn load_target(users: &dyn UserStore, id: UserId) -> Result<Credential, AppError> {
        users
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooldesk_auth::Role;
    use schooldesk_db::MemoryStore;

    const COST: PasswordConfig = PasswordConfig { bcrypt_cost: 4 };

    async fn seed(store: &MemoryStore, email: &str, role: Role, super_admin: bool) -> UserId {
        store
            .insert_user(NewCredential {
                name: email.to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                role,
                super_admin,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_missing_target_is_404_before_permission_check() {
        let store = MemoryStore::new();
        let librarian = seed(&store, "lib@school.test", Role::Librarian, false).await;

        let err = UsersService::delete_user(&store, librarian, UserId::new())
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }

    #[tokio::test]
    async fn test_deleted_actor_is_unauthorized() {
        let store = MemoryStore::new();
        let target = seed(&store, "staff@school.test", Role::OfficeStaff, false).await;

        let err = UsersService::delete_user(&store, UserId::new(), target)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[tokio::test]
    async fn test_actor_role_is_read_from_store() {
        let store = MemoryStore::new();
        let actor = seed(&store, "admin@school.test", Role::Admin, false).await;
        let target = seed(&store, "staff@school.test", Role::OfficeStaff, false).await;

        store
            .update_user(
                actor,
                CredentialChanges {
                    role: Some(Role::Librarian),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = UsersService::delete_user(&store, actor, target)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert_eq!(err.message(), "You do not have permission to delete this user");
    }

    #[tokio::test]
    async fn test_update_keeps_password_when_blank() {
        let store = MemoryStore::new();
        let actor = seed(&store, "root@school.test", Role::Admin, true).await;
        let target = seed(&store, "staff@school.test", Role::OfficeStaff, false).await;

        let dto = UpdateUserDto {
            name: Some("  Renamed ".to_string()),
            password: Some(String::new()),
            ..Default::default()
        };
        let user = UsersService::update_user(&store, &COST, actor, target, dto)
            .await
            .unwrap();
        assert_eq!(user.name, "Renamed");

        let stored = store.find_user(target).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_create_defaults_role() {
        let store = MemoryStore::new();
        let dto = CreateUserDto {
            name: "New".to_string(),
            email: "new@school.test".to_string(),
            password: "secret".to_string(),
            role: None,
        };
        let user = UsersService::create_user(&store, &COST, dto).await.unwrap();
        assert_eq!(user.role, Role::OfficeStaff);
        assert!(!user.super_admin);
    }
}
