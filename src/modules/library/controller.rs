use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use schooldesk_core::AppError;
use schooldesk_models::{AuthErrorResponse, ErrorResponse, LibraryRecordId};

use super::model::{
    CreateLibraryDto, LIBRARY_DELETED, LibraryEntryResponse, LibraryListResponse,
    LibraryRecordResponse, MessageResponse, UpdateLibraryDto,
};
use super::service::LibraryService;
use crate::state::AppState;
use crate::validator::{ValidPath, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/library",
    responses(
        (status = 200, description = "All loans with student names", body = LibraryListResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Library"
)]
#[instrument(skip(state))]
pub async fn get_loans(
    State(state): State<AppState>,
) -> Result<Json<LibraryListResponse>, AppError> {
    let data = LibraryService::get_loans(state.library.as_ref()).await?;
    Ok(Json(LibraryListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/library/{id}",
    params(
        ("id" = LibraryRecordId, Path, description = "Library record ID")
    ),
    responses(
        (status = 200, description = "The loan", body = LibraryEntryResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "History not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Library"
)]
#[instrument(skip(state))]
pub async fn get_loan(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<LibraryRecordId>,
) -> Result<Json<LibraryEntryResponse>, AppError> {
    let data = LibraryService::get_loan(state.library.as_ref(), id).await?;
    Ok(Json(LibraryEntryResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/library",
    request_body = CreateLibraryDto,
    responses(
        (status = 201, description = "Loan recorded", body = LibraryRecordResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Library"
)]
#[instrument(skip(state, dto))]
pub async fn create_loan(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateLibraryDto>,
) -> Result<(StatusCode, Json<LibraryRecordResponse>), AppError> {
    let data = LibraryService::create_loan(state.library.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(LibraryRecordResponse {
            success: true,
            data,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/library/{id}",
    params(
        ("id" = LibraryRecordId, Path, description = "Library record ID")
    ),
    request_body = UpdateLibraryDto,
    responses(
        (status = 200, description = "Loan updated", body = LibraryRecordResponse),
        (status = 400, description = "Malformed ID or field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "History not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Library"
)]
#[instrument(skip(state, dto))]
pub async fn update_loan(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<LibraryRecordId>,
    ValidatedJson(dto): ValidatedJson<UpdateLibraryDto>,
) -> Result<Json<LibraryRecordResponse>, AppError> {
    let data = LibraryService::update_loan(state.library.as_ref(), id, dto).await?;
    Ok(Json(LibraryRecordResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/library/{id}",
    params(
        ("id" = LibraryRecordId, Path, description = "Library record ID")
    ),
    responses(
        (status = 200, description = "Loan deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "History not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Library"
)]
#[instrument(skip(state))]
pub async fn delete_loan(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<LibraryRecordId>,
) -> Result<Json<MessageResponse>, AppError> {
    LibraryService::delete_loan(state.library.as_ref(), id).await?;
    Ok(Json(MessageResponse::ok(LIBRARY_DELETED)))
}
