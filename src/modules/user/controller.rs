use axum::Json;
use axum::extract::State;
use tracing::instrument;

use schooldesk_core::AppError;
use schooldesk_models::{AuthErrorResponse, ErrorResponse};

use super::model::MeResponse;
use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Get the current user's account
#[utoipa::path(
    get,
    path = "/api/user/me",
    responses(
        (status = 200, description = "Current account", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "User"
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = UserService::get_current_user(state.users.as_ref(), auth_user.user_id()).await?;
    Ok(Json(MeResponse {
        success: true,
        user,
    }))
}
