pub use schooldesk_models::MessageResponse;
pub use schooldesk_models::students::{
    CreateStudentDto, NewStudent, Student, StudentDetailsResponse, StudentResponse,
    UpdateStudentDto,
};

pub const STUDENT_NOT_FOUND: &str = "Student not found";
pub const STUDENT_DETAILS: &str = "Student details";
pub const STUDENT_DELETED: &str = "Student deleted successfully";
