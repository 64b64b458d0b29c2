//! Library loan records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{LibraryRecordId, StudentId};
use crate::students::StudentSummary;
use crate::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryRecord {
    pub id: LibraryRecordId,
    pub student_id: StudentId,
    pub book_title: String,
    pub issue_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub is_returned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A loan with the borrowing student's name and roll number filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LibraryEntry {
    #[serde(flatten)]
    pub record: LibraryRecord,
    pub student: Option<StudentSummary>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLibraryDto {
    pub student_id: StudentId,
    #[validate(custom(function = "not_blank", message = "bookTitle is required"))]
    pub book_title: String,
    pub issue_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_returned: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLibraryDto {
    pub student_id: Option<StudentId>,
    #[validate(custom(function = "not_blank", message = "bookTitle must not be blank"))]
    pub book_title: Option<String>,
    pub issue_date: Option<NaiveDate>,
    /// Absent leaves the date alone; an explicit `null` clears it.
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<NaiveDate>)]
    pub return_date: Option<Option<NaiveDate>>,
    pub is_returned: Option<bool>,
}

fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateLibraryDto {
    pub fn apply_to(self, record: &mut LibraryRecord) {
        if let Some(student_id) = self.student_id {
            record.student_id = student_id;
        }
        if let Some(book_title) = self.book_title {
            record.book_title = book_title;
        }
        if let Some(issue_date) = self.issue_date {
            record.issue_date = issue_date;
        }
        if let Some(return_date) = self.return_date {
            record.return_date = return_date;
        }
        if let Some(is_returned) = self.is_returned {
            record.is_returned = is_returned;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LibraryRecordResponse {
    pub success: bool,
    pub data: LibraryRecord,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LibraryEntryResponse {
    pub success: bool,
    pub data: LibraryEntry,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LibraryListResponse {
    pub success: bool,
    pub data: Vec<LibraryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults_to_not_returned() {
        let dto: CreateLibraryDto = serde_json::from_value(json!({
            "studentId": "6f1c2d1e-5b8a-4a53-9c1e-2f0a7c6f1b11",
            "bookTitle": "The Hobbit",
            "issueDate": "2024-02-01"
        }))
        .unwrap();
        assert!(!dto.is_returned);
        assert!(dto.return_date.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_marks_returned() {
        let now = Utc::now();
        let mut record = LibraryRecord {
            id: LibraryRecordId::new(),
            student_id: StudentId::new(),
            book_title: "Dune".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            return_date: None,
            is_returned: false,
            created_at: now,
            updated_at: now,
        };

        let update: UpdateLibraryDto =
            serde_json::from_value(json!({ "isReturned": true, "returnDate": "2024-02-15" }))
                .unwrap();
        update.apply_to(&mut record);

        assert!(record.is_returned);
        assert_eq!(record.return_date, NaiveDate::from_ymd_opt(2024, 2, 15));
        assert_eq!(record.book_title, "Dune");
    }

    #[test]
    fn test_update_return_date_absent_vs_null() {
        let absent: UpdateLibraryDto =
            serde_json::from_value(json!({ "isReturned": false })).unwrap();
        assert_eq!(absent.return_date, None);

        let cleared: UpdateLibraryDto =
            serde_json::from_value(json!({ "isReturned": false, "returnDate": null })).unwrap();
        assert_eq!(cleared.return_date, Some(None));

        let now = Utc::now();
        let mut record = LibraryRecord {
            id: LibraryRecordId::new(),
            student_id: StudentId::new(),
            book_title: "Dune".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2024, 2, 15),
            is_returned: true,
            created_at: now,
            updated_at: now,
        };

        absent.apply_to(&mut record);
        assert_eq!(record.return_date, NaiveDate::from_ymd_opt(2024, 2, 15));

        cleared.apply_to(&mut record);
        assert!(!record.is_returned);
        assert!(record.return_date.is_none());
    }
}
