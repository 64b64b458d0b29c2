use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use schooldesk_core::AppError;
use schooldesk_models::{AuthErrorResponse, ErrorResponse, StudentId};

use super::model::{
    CreateStudentDto, MessageResponse, STUDENT_DELETED, STUDENT_DETAILS, Student,
    StudentDetailsResponse, StudentResponse, UpdateStudentDto,
};
use super::service::StudentService;
use crate::state::AppState;
use crate::validator::{ValidPath, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/student",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 409, description = "Roll number already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let student = StudentService::create_student(state.students.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            success: true,
            student,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/student",
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::get_students(state.students.as_ref()).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/student/{id}",
    params(
        ("id" = StudentId, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = StudentDetailsResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<StudentId>,
) -> Result<Json<StudentDetailsResponse>, AppError> {
    let student = StudentService::get_student(state.students.as_ref(), id).await?;
    Ok(Json(StudentDetailsResponse {
        success: true,
        message: STUDENT_DETAILS.to_string(),
        student,
    }))
}

#[utoipa::path(
    put,
    path = "/api/student/{id}",
    params(
        ("id" = StudentId, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Malformed ID or field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Roll number already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<StudentId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = StudentService::update_student(state.students.as_ref(), id, dto).await?;
    Ok(Json(StudentResponse {
        success: true,
        student,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/student/{id}",
    params(
        ("id" = StudentId, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = AuthErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<StudentId>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_student(state.students.as_ref(), id).await?;
    Ok(Json(MessageResponse::ok(STUDENT_DELETED)))
}
