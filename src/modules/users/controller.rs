use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use schooldesk_core::AppError;
use schooldesk_models::{AuthErrorResponse, ErrorResponse, UserId};

use super::model::{
    CreateUserDto, MessageResponse, USER_DELETED, UpdateUserDto, UserListResponse, UserResponse,
};
use super::service::UsersService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidPath, ValidatedJson};

/// List staff accounts
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts", body = UserListResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<UserListResponse>, AppError> {
    let data = UsersService::list_users(state.users.as_ref()).await?;
    Ok(Json(UserListResponse {
        success: true,
        data,
    }))
}

/// Get a staff account by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = UserId, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The account", body = UserResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidPath(id): ValidPath<UserId>,
) -> Result<Json<UserResponse>, AppError> {
    let data = UsersService::get_user(state.users.as_ref(), id).await?;
    Ok(Json(UserResponse {
        success: true,
        data,
    }))
}

/// Create a staff account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let data = UsersService::create_user(state.users.as_ref(), &state.password_config, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            data,
        }),
    ))
}

/// Update a staff account
///
/// Super admins may update anyone. Admins may update accounts that are not
/// Admins. Everyone else is refused.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = UserId, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Malformed ID or field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 403, description = "Not allowed to update this account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto), fields(actor_id = %auth_user.user_id()))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(id): ValidPath<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let data = UsersService::update_user(
        state.users.as_ref(),
        &state.password_config,
        auth_user.user_id(),
        id,
        dto,
    )
    .await?;
    Ok(Json(UserResponse {
        success: true,
        data,
    }))
}

/// Delete a staff account
///
/// Same rules as update.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = UserId, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 403, description = "Not allowed to delete this account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(actor_id = %auth_user.user_id()))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidPath(id): ValidPath<UserId>,
) -> Result<Json<MessageResponse>, AppError> {
    UsersService::delete_user(state.users.as_ref(), auth_user.user_id(), id).await?;
    Ok(Json(MessageResponse::ok(USER_DELETED)))
}
