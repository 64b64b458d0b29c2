use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use schooldesk_models::{AuthErrorResponse, ErrorResponse};

use super::model::{
    LoginRequest, LoginResponse, REGISTERED, RegisterRequest, RegisterResponse, User,
};
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use schooldesk_core::AppError;

/// Register a new staff account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = AuthService::register_user(state.users.as_ref(), &state.password_config, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: REGISTERED.to_string(),
            user,
        }),
    ))
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = AuthErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(state.users.as_ref(), &state.jwt_config, dto).await?;
    Ok(Json(response))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/api/auth",
    responses(
        (status = 200, description = "All accounts", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = AuthService::list_users(state.users.as_ref()).await?;
    Ok(Json(users))
}
