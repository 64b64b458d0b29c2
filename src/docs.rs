use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use schooldesk_auth::Role;
use schooldesk_models::fees::{FeesEntryResponse, FeesListResponse, FeesRecordResponse};
use schooldesk_models::library::{
    LibraryEntryResponse, LibraryListResponse, LibraryRecordResponse,
};
use schooldesk_models::students::{StudentDetailsResponse, StudentResponse};
use schooldesk_models::users::{
    LoginResponse, LoginUser, MeResponse, RegisterResponse, UserListResponse, UserResponse,
};
use schooldesk_models::{
    Address, AuthErrorResponse, CreateFeesDto, CreateLibraryDto, CreateStudentDto, CreateUserDto,
    ErrorResponse, FeesEntry, FeesRecord, FeesStatus, Gender, LibraryEntry, LibraryRecord,
    LoginRequest, MessageResponse, ParentDetails, PaymentMethod, RegisterRequest, Student,
    StudentSummary, UpdateFeesDto, UpdateLibraryDto, UpdateStudentDto, UpdateUserDto, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_users,
        crate::modules::user::controller::get_me,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::fees::controller::get_fees_history,
        crate::modules::fees::controller::get_fees,
        crate::modules::fees::controller::create_fees,
        crate::modules::fees::controller::update_fees,
        crate::modules::fees::controller::delete_fees,
        crate::modules::library::controller::get_loans,
        crate::modules::library::controller::get_loan,
        crate::modules::library::controller::create_loan,
        crate::modules::library::controller::update_loan,
        crate::modules::library::controller::delete_loan,
    ),
    components(
        schemas(
            Role,
            User,
            LoginUser,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            MeResponse,
            CreateUserDto,
            UpdateUserDto,
            UserResponse,
            UserListResponse,
            Gender,
            FeesStatus,
            Address,
            ParentDetails,
            Student,
            StudentSummary,
            CreateStudentDto,
            UpdateStudentDto,
            StudentResponse,
            StudentDetailsResponse,
            PaymentMethod,
            FeesRecord,
            FeesEntry,
            CreateFeesDto,
            UpdateFeesDto,
            FeesRecordResponse,
            FeesEntryResponse,
            FeesListResponse,
            LibraryRecord,
            LibraryEntry,
            CreateLibraryDto,
            UpdateLibraryDto,
            LibraryRecordResponse,
            LibraryEntryResponse,
            LibraryListResponse,
            MessageResponse,
            ErrorResponse,
            AuthErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "User", description = "The signed-in account"),
        (name = "Users", description = "Staff account management"),
        (name = "Students", description = "Student records"),
        (name = "Fees", description = "Fee payment history"),
        (name = "Library", description = "Library loan history")
    ),
    info(
        title = "SchoolDesk API",
        version = "0.1.0",
        description = "School administration API: students, fees, library loans and staff.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
