use chrono::Utc;
use tracing::{info, instrument};

use schooldesk_core::AppError;
use schooldesk_db::StudentStore;
use schooldesk_models::StudentId;

use super::model::{CreateStudentDto, NewStudent, STUDENT_NOT_FOUND, Student, UpdateStudentDto};

pub struct StudentService;

impl StudentService {
    #[instrument(skip(students, dto), fields(roll_number = %dto.roll_number))]
    pub async fn create_student(
        students: &dyn StudentStore,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let student = students
            .insert_student(NewStudent::from_dto(dto, Utc::now()))
            .await?;
        info!(student_id = %student.id, "Student created");
        Ok(student)
    }

    #[instrument(skip(students))]
    pub async fn get_students(students: &dyn StudentStore) -> Result<Vec<Student>, AppError> {
        Ok(students.list_students().await?)
    }

    #[instrument(skip(students))]
    pub async fn get_student(
        students: &dyn StudentStore,
        id: StudentId,
    ) -> Result<Student, AppError> {
        students
            .find_student(id)
            .await?
            .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))
    }

    #[instrument(skip(students, dto))]
    pub async fn update_student(
        students: &dyn StudentStore,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        students
            .update_student(id, dto.normalized())
            .await?
            .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))
    }

    #[instrument(skip(students))]
    pub async fn delete_student(
        students: &dyn StudentStore,
        id: StudentId,
    ) -> Result<(), AppError> {
        if !students.delete_student(id).await? {
            return Err(AppError::not_found(STUDENT_NOT_FOUND));
        }
        info!(student_id = %id, "Student deleted");
        Ok(())
    }
}
