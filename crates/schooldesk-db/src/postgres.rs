//! Postgres-backed stores.
//!
//! Uniqueness of emails and roll numbers is enforced by the named unique
//! constraints `users_email_key` and `students_roll_number_key`; violations
//! come back as [`StoreError::Conflict`]. Fee and loan rows reference
//! students without a foreign key, so reads join with `LEFT JOIN` and a
//! deleted student shows up as a missing summary.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use schooldesk_models::{
    CreateFeesDto, CreateLibraryDto, Credential, CredentialChanges, FeesEntry, FeesRecord,
    FeesRecordId, LibraryEntry, LibraryRecord, LibraryRecordId, NewCredential, NewStudent,
    Student, StudentId, StudentSummary, UpdateFeesDto, UpdateLibraryDto, UpdateStudentDto, User,
    UserId,
};

use crate::error::{StoreError, map_sqlx_error};
use crate::store::{FeesStore, LibraryStore, StudentStore, UserStore};

const CREDENTIAL_COLUMNS: &str =
    "id, name, email, password_hash, role, super_admin, created_at, updated_at";

const STUDENT_COLUMNS: &str = "id, name, roll_number, class_name, section, date_of_birth, gender, \
     address, parent_details, admission_date, fees_status, created_at, updated_at";

const FEES_COLUMNS: &str = "id, student_id, amount_paid, payment_date, payment_method, \
     fees_status, remarks, created_at, updated_at";

const LOAN_COLUMNS: &str =
    "id, student_id, book_title, issue_date, return_date, is_returned, created_at, updated_at";

const FEES_ENTRY_SELECT: &str = "SELECT f.id, f.student_id, f.amount_paid, f.payment_date, \
     f.payment_method, f.fees_status, f.remarks, f.created_at, f.updated_at, \
     s.name AS student_name \
     FROM fees_history f LEFT JOIN students s ON s.id = f.student_id";

const LOAN_ENTRY_SELECT: &str = "SELECT l.id, l.student_id, l.book_title, l.issue_date, \
     l.return_date, l.is_returned, l.created_at, l.updated_at, \
     s.name AS student_name, s.roll_number AS student_roll_number \
     FROM library_history l LEFT JOIN students s ON s.id = l.student_id";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn fees_entry(row: &PgRow) -> Result<FeesEntry, sqlx::Error> {
    let record = FeesRecord::from_row(row)?;
    let student = row
        .try_get::<Option<String>, _>("student_name")?
        .map(|name| StudentSummary {
            id: record.student_id,
            name,
            roll_number: None,
        });
    Ok(FeesEntry { record, student })
}

fn loan_entry(row: &PgRow) -> Result<LibraryEntry, sqlx::Error> {
    let record = LibraryRecord::from_row(row)?;
    let name: Option<String> = row.try_get("student_name")?;
    let roll_number: Option<String> = row.try_get("student_roll_number")?;
    let student = name.map(|name| StudentSummary {
        id: record.student_id,
        name,
        roll_number,
    });
    Ok(LibraryEntry { record, student })
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self, new), fields(email = %new.email), err)]
    async fn insert_user(&self, new: NewCredential) -> Result<Credential, StoreError> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, role, super_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {CREDENTIAL_COLUMNS}"
        );
        sqlx::query_as::<_, Credential>(&sql)
            .bind(UserId::new())
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.password_hash)
            .bind(new.role.as_str())
            .bind(new.super_admin)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<Credential>, StoreError> {
        let sql = format!("SELECT {CREDENTIAL_COLUMNS} FROM users WHERE id = $1");
        Ok(sqlx::query_as::<_, Credential>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        let sql = format!("SELECT {CREDENTIAL_COLUMNS} FROM users WHERE email = $1");
        Ok(sqlx::query_as::<_, Credential>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, super_admin, created_at, updated_at \
             FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    #[instrument(skip(self, changes), err)]
    async fn update_user(
        &self,
        id: UserId,
        changes: CredentialChanges,
    ) -> Result<Option<Credential>, StoreError> {
        let sql = format!(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 email = COALESCE($3, email), \
                 password_hash = COALESCE($4, password_hash), \
                 role = COALESCE($5, role), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {CREDENTIAL_COLUMNS}"
        );
        sqlx::query_as::<_, Credential>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(changes.role.map(|role| role.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    #[instrument(skip(self), err)]
    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StudentStore for PgStore {
    #[instrument(skip(self, new), fields(roll_number = %new.roll_number), err)]
    async fn insert_student(&self, new: NewStudent) -> Result<Student, StoreError> {
        let sql = format!(
            "INSERT INTO students (id, name, roll_number, class_name, section, date_of_birth, \
                 gender, address, parent_details, admission_date, fees_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(StudentId::new())
            .bind(&new.name)
            .bind(&new.roll_number)
            .bind(&new.class_name)
            .bind(&new.section)
            .bind(new.date_of_birth)
            .bind(new.gender.as_str())
            .bind(Json(&new.address))
            .bind(Json(&new.parent_details))
            .bind(new.admission_date)
            .bind(new.fees_status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_student(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self, changes), err)]
    async fn update_student(
        &self,
        id: StudentId,
        changes: UpdateStudentDto,
    ) -> Result<Option<Student>, StoreError> {
        let sql = format!(
            "UPDATE students SET \
                 name = COALESCE($2, name), \
                 roll_number = COALESCE($3, roll_number), \
                 class_name = COALESCE($4, class_name), \
                 section = COALESCE($5, section), \
                 date_of_birth = COALESCE($6, date_of_birth), \
                 gender = COALESCE($7, gender), \
                 address = COALESCE($8, address), \
                 parent_details = COALESCE($9, parent_details), \
                 fees_status = COALESCE($10, fees_status), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.roll_number)
            .bind(changes.class_name)
            .bind(changes.section)
            .bind(changes.date_of_birth)
            .bind(changes.gender.map(|g| g.as_str()))
            .bind(changes.address.map(Json))
            .bind(changes.parent_details.map(Json))
            .bind(changes.fees_status.map(|s| s.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    #[instrument(skip(self), err)]
    async fn delete_student(&self, id: StudentId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl FeesStore for PgStore {
    #[instrument(skip(self, new), fields(student_id = %new.student_id), err)]
    async fn insert_fees(&self, new: CreateFeesDto) -> Result<FeesRecord, StoreError> {
        let sql = format!(
            "INSERT INTO fees_history (id, student_id, amount_paid, payment_date, \
                 payment_method, fees_status, remarks) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {FEES_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, FeesRecord>(&sql)
            .bind(FeesRecordId::new())
            .bind(new.student_id)
            .bind(new.amount_paid)
            .bind(new.payment_date)
            .bind(new.payment_method.as_str())
            .bind(new.fees_status.unwrap_or_default().as_str())
            .bind(new.remarks)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_fees(&self, id: FeesRecordId) -> Result<Option<FeesEntry>, StoreError> {
        let sql = format!("{FEES_ENTRY_SELECT} WHERE f.id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(fees_entry).transpose()?)
    }

    async fn list_fees(&self) -> Result<Vec<FeesEntry>, StoreError> {
        let sql = format!("{FEES_ENTRY_SELECT} ORDER BY f.created_at");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(fees_entry)
            .collect::<Result<Vec<_>, _>>()?)
    }

    #[instrument(skip(self, changes), err)]
    async fn update_fees(
        &self,
        id: FeesRecordId,
        changes: UpdateFeesDto,
    ) -> Result<Option<FeesRecord>, StoreError> {
        let sql = format!(
            "UPDATE fees_history SET \
                 student_id = COALESCE($2, student_id), \
                 amount_paid = COALESCE($3, amount_paid), \
                 payment_date = COALESCE($4, payment_date), \
                 payment_method = COALESCE($5, payment_method), \
                 fees_status = COALESCE($6, fees_status), \
                 remarks = COALESCE($7, remarks), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {FEES_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, FeesRecord>(&sql)
            .bind(id)
            .bind(changes.student_id)
            .bind(changes.amount_paid)
            .bind(changes.payment_date)
            .bind(changes.payment_method.map(|m| m.as_str()))
            .bind(changes.fees_status.map(|s| s.as_str()))
            .bind(changes.remarks)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self), err)]
    async fn delete_fees(&self, id: FeesRecordId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM fees_history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LibraryStore for PgStore {
    #[instrument(skip(self, new), fields(student_id = %new.student_id), err)]
    async fn insert_loan(&self, new: CreateLibraryDto) -> Result<LibraryRecord, StoreError> {
        let sql = format!(
            "INSERT INTO library_history (id, student_id, book_title, issue_date, \
                 return_date, is_returned) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {LOAN_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, LibraryRecord>(&sql)
            .bind(LibraryRecordId::new())
            .bind(new.student_id)
            .bind(&new.book_title)
            .bind(new.issue_date)
            .bind(new.return_date)
            .bind(new.is_returned)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_loan(&self, id: LibraryRecordId) -> Result<Option<LibraryEntry>, StoreError> {
        let sql = format!("{LOAN_ENTRY_SELECT} WHERE l.id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(loan_entry).transpose()?)
    }

    async fn list_loans(&self) -> Result<Vec<LibraryEntry>, StoreError> {
        let sql = format!("{LOAN_ENTRY_SELECT} ORDER BY l.created_at");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(loan_entry)
            .collect::<Result<Vec<_>, _>>()?)
    }

    #[instrument(skip(self, changes), err)]
    async fn update_loan(
        &self,
        id: LibraryRecordId,
        changes: UpdateLibraryDto,
    ) -> Result<Option<LibraryRecord>, StoreError> {
        let sql = format!(
            "UPDATE library_history SET \
                 student_id = COALESCE($2, student_id), \
                 book_title = COALESCE($3, book_title), \
                 issue_date = COALESCE($4, issue_date), \
                 return_date = CASE WHEN $5 THEN $6 ELSE return_date END, \
                 is_returned = COALESCE($7, is_returned), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {LOAN_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, LibraryRecord>(&sql)
            .bind(id)
            .bind(changes.student_id)
            .bind(changes.book_title)
            .bind(changes.issue_date)
            .bind(changes.return_date.is_some())
            .bind(changes.return_date.flatten())
            .bind(changes.is_returned)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self), err)]
    async fn delete_loan(&self, id: LibraryRecordId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM library_history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
