use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use schooldesk_core::AppError;
use schooldesk_models::{AuthErrorResponse, ErrorResponse, FeesRecordId};

use super::model::{
    CreateFeesDto, FEES_DELETED, FeesEntryResponse, FeesListResponse, FeesRecordResponse,
    MessageResponse, UpdateFeesDto,
};
use super::service::FeesService;
use crate::state::AppState;
use crate::validator::{ValidPath, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/fees",
    responses(
        (status = 200, description = "All payments with student names", body = FeesListResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_fees_history(
    State(state): State<AppState>,
) -> Result<Json<FeesListResponse>, AppError> {
    let data = FeesService::get_fees_history(state.fees.as_ref()).await?;
    Ok(Json(FeesListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/fees/{id}",
    params(
        ("id" = FeesRecordId, Path, description = "Fees record ID")
    ),
    responses(
        (status = 200, description = "The payment", body = FeesEntryResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Fees history not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_fees(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<FeesRecordId>,
) -> Result<Json<FeesEntryResponse>, AppError> {
    let data = FeesService::get_fees(state.fees.as_ref(), id).await?;
    Ok(Json(FeesEntryResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/fees",
    request_body = CreateFeesDto,
    responses(
        (status = 201, description = "Payment recorded", body = FeesRecordResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Fees"
)]
#[instrument(skip(state, dto))]
pub async fn create_fees(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFeesDto>,
) -> Result<(StatusCode, Json<FeesRecordResponse>), AppError> {
    let data = FeesService::create_fees(state.fees.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(FeesRecordResponse {
            success: true,
            data,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/fees/{id}",
    params(
        ("id" = FeesRecordId, Path, description = "Fees record ID")
    ),
    request_body = UpdateFeesDto,
    responses(
        (status = 200, description = "Payment updated", body = FeesRecordResponse),
        (status = 400, description = "Malformed ID or field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Fees history not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Fees"
)]
#[instrument(skip(state, dto))]
pub async fn update_fees(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<FeesRecordId>,
    ValidatedJson(dto): ValidatedJson<UpdateFeesDto>,
) -> Result<Json<FeesRecordResponse>, AppError> {
    let data = FeesService::update_fees(state.fees.as_ref(), id, dto).await?;
    Ok(Json(FeesRecordResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/fees/{id}",
    params(
        ("id" = FeesRecordId, Path, description = "Fees record ID")
    ),
    responses(
        (status = 200, description = "Payment deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Fees history not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn delete_fees(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<FeesRecordId>,
) -> Result<Json<MessageResponse>, AppError> {
    FeesService::delete_fees(state.fees.as_ref(), id).await?;
    Ok(Json(MessageResponse::ok(FEES_DELETED)))
}
