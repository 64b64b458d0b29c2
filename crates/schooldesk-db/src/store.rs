//! Store boundaries.
//!
//! Handlers only see these traits. [`crate::PgStore`] backs them with
//! Postgres and [`crate::MemoryStore`] keeps everything in process.
//!
//! Updates return `Ok(None)` and deletes return `Ok(false)` when the record
//! does not exist.

use async_trait::async_trait;

use schooldesk_models::{
    CreateFeesDto, CreateLibraryDto, Credential, CredentialChanges, FeesEntry, FeesRecord,
    FeesRecordId, LibraryEntry, LibraryRecord, LibraryRecordId, NewCredential, NewStudent,
    Student, StudentId, UpdateFeesDto, UpdateLibraryDto, UpdateStudentDto, User, UserId,
};

use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with a conflict when the email is taken.
    async fn insert_user(&self, new: NewCredential) -> Result<Credential, StoreError>;
    async fn find_user(&self, id: UserId) -> Result<Option<Credential>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn update_user(
        &self,
        id: UserId,
        changes: CredentialChanges,
    ) -> Result<Option<Credential>, StoreError>;
    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Fails with a conflict when the roll number is taken.
    async fn insert_student(&self, new: NewStudent) -> Result<Student, StoreError>;
    async fn find_student(&self, id: StudentId) -> Result<Option<Student>, StoreError>;
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;
    async fn update_student(
        &self,
        id: StudentId,
        changes: UpdateStudentDto,
    ) -> Result<Option<Student>, StoreError>;
    async fn delete_student(&self, id: StudentId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait FeesStore: Send + Sync {
    async fn insert_fees(&self, new: CreateFeesDto) -> Result<FeesRecord, StoreError>;
    async fn find_fees(&self, id: FeesRecordId) -> Result<Option<FeesEntry>, StoreError>;
    async fn list_fees(&self) -> Result<Vec<FeesEntry>, StoreError>;
    async fn update_fees(
        &self,
        id: FeesRecordId,
        changes: UpdateFeesDto,
    ) -> Result<Option<FeesRecord>, StoreError>;
    async fn delete_fees(&self, id: FeesRecordId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait LibraryStore: Send + Sync {
    async fn insert_loan(&self, new: CreateLibraryDto) -> Result<LibraryRecord, StoreError>;
    async fn find_loan(&self, id: LibraryRecordId) -> Result<Option<LibraryEntry>, StoreError>;
    async fn list_loans(&self) -> Result<Vec<LibraryEntry>, StoreError>;
    async fn update_loan(
        &self,
        id: LibraryRecordId,
        changes: UpdateLibraryDto,
    ) -> Result<Option<LibraryRecord>, StoreError>;
    async fn delete_loan(&self, id: LibraryRecordId) -> Result<bool, StoreError>;
}
