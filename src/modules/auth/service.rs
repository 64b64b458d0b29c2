use tracing::{info, instrument, warn};

use schooldesk_auth::issue_token;
use schooldesk_config::{JwtConfig, PasswordConfig};
use schooldesk_core::{AppError, hash_password_async, verify_password_async};
use schooldesk_db::UserStore;
use schooldesk_db::error::USER_EXISTS;
use schooldesk_models::NewCredential;

use super::model::{
    INVALID_CREDENTIALS, LoginRequest, LoginResponse, LoginUser, RegisterRequest, User,
};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, password_config, dto), fields(email = %dto.email))]
    pub async fn register_user(
        users: &dyn UserStore,
        password_config: &PasswordConfig,
        dto: RegisterRequest,
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
                role: dto.role,
                super_admin: false,
            })
            .await?;

        info!(user_id = %credential.id, role = %credential.role, "User registered");
        Ok(credential.into())
    }

    #[instrument(skip(users, jwt_config, dto), fields(email = %dto.email))]
    pub async fn login_user(
        users: &dyn UserStore,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let Some(credential) = users.find_user_by_email(&dto.email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password_async(dto.password, credential.password_hash.clone()).await? {
            warn!(user_id = %credential.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = issue_token(credential.id.into_inner(), credential.role, jwt_config)?;

        Ok(LoginResponse {
            token,
            user: LoginUser::from(&credential),
        })
    }

    #[instrument(skip(users))]
    pub async fn list_users(users: &dyn UserStore) -> Result<Vec<User>, AppError> {
        Ok(users.list_users().await?)
    }
}
