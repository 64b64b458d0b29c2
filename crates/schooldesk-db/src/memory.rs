//! In-process store.
//!
//! Holds every table behind one lock. Records keep insertion order, which is
//! also the order lists are returned in. Used by the test suite and for
//! running the API without a database.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use schooldesk_models::{
    CreateFeesDto, CreateLibraryDto, Credential, CredentialChanges, FeesEntry, FeesRecord,
    FeesRecordId, LibraryEntry, LibraryRecord, LibraryRecordId, NewCredential, NewStudent,
    Student, StudentId, StudentSummary, UpdateFeesDto, UpdateLibraryDto, UpdateStudentDto, User,
    UserId,
};

use crate::error::{ROLL_NUMBER_EXISTS, StoreError, USER_EXISTS};
use crate::store::{FeesStore, LibraryStore, StudentStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<Credential>,
    students: Vec<Student>,
    fees: Vec<FeesRecord>,
    loans: Vec<LibraryRecord>,
}

impl Tables {
    fn student_summary(&self, id: StudentId, with_roll_number: bool) -> Option<StudentSummary> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .map(|s| StudentSummary {
                id: s.id,
                name: s.name.clone(),
                roll_number: with_roll_number.then(|| s.roll_number.clone()),
            })
    }

    fn fees_entry(&self, record: &FeesRecord) -> FeesEntry {
        FeesEntry {
            student: self.student_summary(record.student_id, false),
            record: record.clone(),
        }
    }

    fn loan_entry(&self, record: &LibraryRecord) -> LibraryEntry {
        LibraryEntry {
            student: self.student_summary(record.student_id, true),
            record: record.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, new: NewCredential) -> Result<Credential, StoreError> {
        let mut tables = self.write()?;
        if tables.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::Conflict(USER_EXISTS));
        }

        let now = Utc::now();
        let credential = Credential {
            id: UserId::new(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            super_admin: new.super_admin,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(credential.clone());
        Ok(credential)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<Credential>, StoreError> {
        Ok(self.read()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self.read()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .iter()
            .cloned()
            .map(User::from)
            .collect())
    }

    async fn update_user(
        &self,
        id: UserId,
        changes: CredentialChanges,
    ) -> Result<Option<Credential>, StoreError> {
        let mut tables = self.write()?;
        if let Some(email) = &changes.email {
            if tables.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Conflict(USER_EXISTS));
            }
        }

        let Some(credential) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        changes.apply_to(credential);
        credential.updated_at = Utc::now();
        Ok(Some(credential.clone()))
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() != before)
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn insert_student(&self, new: NewStudent) -> Result<Student, StoreError> {
        let mut tables = self.write()?;
        if tables.students.iter().any(|s| s.roll_number == new.roll_number) {
            return Err(StoreError::Conflict(ROLL_NUMBER_EXISTS));
        }

        let now = Utc::now();
        let student = Student {
            id: StudentId::new(),
            name: new.name,
            roll_number: new.roll_number,
            class_name: new.class_name,
            section: new.section,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            address: new.address,
            parent_details: new.parent_details,
            admission_date: new.admission_date,
            fees_status: new.fees_status,
            created_at: now,
            updated_at: now,
        };
        tables.students.push(student.clone());
        Ok(student)
    }

    async fn find_student(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        Ok(self.read()?.students.iter().find(|s| s.id == id).cloned())
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.read()?.students.clone())
    }

    async fn update_student(
        &self,
        id: StudentId,
        changes: UpdateStudentDto,
    ) -> Result<Option<Student>, StoreError> {
        let mut tables = self.write()?;
        if let Some(roll_number) = &changes.roll_number {
            if tables
                .students
                .iter()
                .any(|s| s.id != id && &s.roll_number == roll_number)
            {
                return Err(StoreError::Conflict(ROLL_NUMBER_EXISTS));
            }
        }

        let Some(student) = tables.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        changes.apply_to(student);
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn delete_student(&self, id: StudentId) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let before = tables.students.len();
        tables.students.retain(|s| s.id != id);
        Ok(tables.students.len() != before)
    }
}

#[async_trait]
impl FeesStore for MemoryStore {
    async fn insert_fees(&self, new: CreateFeesDto) -> Result<FeesRecord, StoreError> {
        let now = Utc::now();
        let record = FeesRecord {
            id: FeesRecordId::new(),
            student_id: new.student_id,
            amount_paid: new.amount_paid,
            payment_date: new.payment_date,
            payment_method: new.payment_method,
            fees_status: new.fees_status.unwrap_or_default(),
            remarks: new.remarks,
            created_at: now,
            updated_at: now,
        };
        self.write()?.fees.push(record.clone());
        Ok(record)
    }

    async fn find_fees(&self, id: FeesRecordId) -> Result<Option<FeesEntry>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .fees
            .iter()
            .find(|f| f.id == id)
            .map(|record| tables.fees_entry(record)))
    }

    async fn list_fees(&self) -> Result<Vec<FeesEntry>, StoreError> {
        let tables = self.read()?;
        Ok(tables.fees.iter().map(|record| tables.fees_entry(record)).collect())
    }

    async fn update_fees(
        &self,
        id: FeesRecordId,
        changes: UpdateFeesDto,
    ) -> Result<Option<FeesRecord>, StoreError> {
        let mut tables = self.write()?;
        let Some(record) = tables.fees.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        changes.apply_to(record);
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_fees(&self, id: FeesRecordId) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let before = tables.fees.len();
        tables.fees.retain(|f| f.id != id);
        Ok(tables.fees.len() != before)
    }
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn insert_loan(&self, new: CreateLibraryDto) -> Result<LibraryRecord, StoreError> {
        let now = Utc::now();
        let record = LibraryRecord {
            id: LibraryRecordId::new(),
            student_id: new.student_id,
            book_title: new.book_title,
            issue_date: new.issue_date,
            return_date: new.return_date,
            is_returned: new.is_returned,
            created_at: now,
            updated_at: now,
        };
        self.write()?.loans.push(record.clone());
        Ok(record)
    }

    async fn find_loan(&self, id: LibraryRecordId) -> Result<Option<LibraryEntry>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .loans
            .iter()
            .find(|l| l.id == id)
            .map(|record| tables.loan_entry(record)))
    }

    async fn list_loans(&self) -> Result<Vec<LibraryEntry>, StoreError> {
        let tables = self.read()?;
        Ok(tables.loans.iter().map(|record| tables.loan_entry(record)).collect())
    }

    async fn update_loan(
        &self,
        id: LibraryRecordId,
        changes: UpdateLibraryDto,
    ) -> Result<Option<LibraryRecord>, StoreError> {
        let mut tables = self.write()?;
        let Some(record) = tables.loans.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        changes.apply_to(record);
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_loan(&self, id: LibraryRecordId) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let before = tables.loans.len();
        tables.loans.retain(|l| l.id != id);
        Ok(tables.loans.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use schooldesk_auth::Role;
    use schooldesk_models::{
        Address, FeesStatus, Gender, ParentDetails, PaymentMethod,
    };

    fn new_credential(email: &str) -> NewCredential {
        NewCredential {
            name: "Staff".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::OfficeStaff,
            super_admin: false,
        }
    }

    fn new_student(roll_number: &str) -> NewStudent {
        NewStudent {
            name: "Ada".to_string(),
            roll_number: roll_number.to_string(),
            class_name: "10".to_string(),
            section: "A".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 12, 10).unwrap(),
            gender: Gender::Female,
            address: Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                postal_code: "62701".to_string(),
                country: "USA".to_string(),
            },
            parent_details: ParentDetails {
                father_name: "George".to_string(),
                mother_name: "Anne".to_string(),
                contact_number: "555-0100".to_string(),
            },
            admission_date: Utc::now(),
            fees_status: FeesStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = MemoryStore::new();
        let first = store.insert_user(new_credential("a@school.test")).await.unwrap();

        let err = store
            .insert_user(new_credential("a@school.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(USER_EXISTS)));

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, first.id);
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let store = MemoryStore::new();
        store.insert_user(new_credential("a@school.test")).await.unwrap();
        assert!(store.insert_user(new_credential("A@school.test")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_conflict() {
        let store = MemoryStore::new();
        store.insert_user(new_credential("a@school.test")).await.unwrap();
        let b = store.insert_user(new_credential("b@school.test")).await.unwrap();

        let changes = CredentialChanges {
            email: Some("a@school.test".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update_user(b.id, changes).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_records() {
        let store = MemoryStore::new();
        assert!(store.find_user(UserId::new()).await.unwrap().is_none());
        assert!(!store.delete_user(UserId::new()).await.unwrap());
        assert!(!store.delete_student(StudentId::new()).await.unwrap());
        assert!(
            store
                .update_fees(FeesRecordId::new(), UpdateFeesDto::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_roll_number_is_conflict() {
        let store = MemoryStore::new();
        store.insert_student(new_student("R-1")).await.unwrap();
        let err = store.insert_student(new_student("R-1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ROLL_NUMBER_EXISTS)));
    }

    #[tokio::test]
    async fn test_fees_populate_student_name_and_dangling_reference() {
        let store = MemoryStore::new();
        let student = store.insert_student(new_student("R-1")).await.unwrap();

        let dto = CreateFeesDto {
            student_id: student.id,
            amount_paid: 500.0,
            payment_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            payment_method: PaymentMethod::Cash,
            fees_status: None,
            remarks: None,
        };
        let record = store.insert_fees(dto).await.unwrap();
        assert_eq!(record.fees_status, FeesStatus::Pending);

        let entry = store.find_fees(record.id).await.unwrap().unwrap();
        let summary = entry.student.unwrap();
        assert_eq!(summary.name, "Ada");
        assert!(summary.roll_number.is_none());

        store.delete_student(student.id).await.unwrap();
        let entry = store.find_fees(record.id).await.unwrap().unwrap();
        assert!(entry.student.is_none());
    }

    #[tokio::test]
    async fn test_loans_populate_roll_number() {
        let store = MemoryStore::new();
        let student = store.insert_student(new_student("R-7")).await.unwrap();

        let dto = CreateLibraryDto {
            student_id: student.id,
            book_title: "Dune".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            return_date: None,
            is_returned: false,
        };
        store.insert_loan(dto).await.unwrap();

        let loans = store.list_loans().await.unwrap();
        assert_eq!(loans.len(), 1);
        let summary = loans[0].student.clone().unwrap();
        assert_eq!(summary.roll_number.as_deref(), Some("R-7"));
    }

    #[tokio::test]
    async fn test_student_fees_status_is_not_synchronized() {
        let store = MemoryStore::new();
        let student = store.insert_student(new_student("R-2")).await.unwrap();

        store
            .insert_fees(CreateFeesDto {
                student_id: student.id,
                amount_paid: 100.0,
                payment_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                payment_method: PaymentMethod::BankTransfer,
                fees_status: Some(FeesStatus::Paid),
                remarks: Some("first term".to_string()),
            })
            .await
            .unwrap();

        let student = store.find_student(student.id).await.unwrap().unwrap();
        assert_eq!(student.fees_status, FeesStatus::Pending);
    }
}
