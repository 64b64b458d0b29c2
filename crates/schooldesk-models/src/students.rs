//! Student records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::StudentId;
use crate::validation::not_blank;

text_enum! {
    /// Student gender as recorded at admission.
    Gender ("gender") {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

text_enum! {
    /// Payment state of a student or a single fee payment.
    ///
    /// The student's status and each payment's status are independent; nothing
    /// keeps them in step.
    FeesStatus ("fees status") {
        Paid => "Paid",
        Pending => "Pending",
        Partial => "Partial",
    }
}

impl Default for FeesStatus {
    fn default() -> Self {
        FeesStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[validate(custom(function = "not_blank", message = "address.street is required"))]
    pub street: String,
    #[validate(custom(function = "not_blank", message = "address.city is required"))]
    pub city: String,
    #[validate(custom(function = "not_blank", message = "address.state is required"))]
    pub state: String,
    #[validate(custom(function = "not_blank", message = "address.postalCode is required"))]
    pub postal_code: String,
    #[validate(custom(function = "not_blank", message = "address.country is required"))]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParentDetails {
    #[validate(custom(function = "not_blank", message = "parentDetails.fatherName is required"))]
    pub father_name: String,
    #[validate(custom(function = "not_blank", message = "parentDetails.motherName is required"))]
    pub mother_name: String,
    #[validate(custom(
        function = "not_blank",
        message = "parentDetails.contactNumber is required"
    ))]
    pub contact_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub roll_number: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub section: String,
    pub date_of_birth: NaiveDate,
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    #[sqlx(json)]
    pub address: Address,
    #[sqlx(json)]
    pub parent_details: ParentDetails,
    pub admission_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub fees_status: FeesStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reference to a student embedded in fee and loan records.
///
/// Fee records carry only the name; loan records also carry the roll number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: StudentId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "rollNumber is required"))]
    pub roll_number: String,
    #[serde(rename = "class")]
    #[validate(custom(function = "not_blank", message = "class is required"))]
    pub class_name: String,
    #[validate(custom(function = "not_blank", message = "section is required"))]
    pub section: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[validate(nested)]
    pub address: Address,
    #[validate(nested)]
    pub parent_details: ParentDetails,
    pub admission_date: Option<DateTime<Utc>>,
    pub fees_status: Option<FeesStatus>,
}

/// Partial update of a student. Nested address and parent details are
/// replaced as a whole when present.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "rollNumber must not be blank"))]
    pub roll_number: Option<String>,
    #[serde(rename = "class")]
    #[validate(custom(function = "not_blank", message = "class must not be blank"))]
    pub class_name: Option<String>,
    #[validate(custom(function = "not_blank", message = "section must not be blank"))]
    pub section: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[validate(nested)]
    pub address: Option<Address>,
    #[validate(nested)]
    pub parent_details: Option<ParentDetails>,
    pub fees_status: Option<FeesStatus>,
}

/// A student ready to be stored: trimmed and with defaults resolved.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: Address,
    pub parent_details: ParentDetails,
    pub admission_date: DateTime<Utc>,
    pub fees_status: FeesStatus,
}

impl NewStudent {
    pub fn from_dto(dto: CreateStudentDto, now: DateTime<Utc>) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            roll_number: dto.roll_number.trim().to_string(),
            class_name: dto.class_name,
            section: dto.section,
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            address: dto.address,
            parent_details: dto.parent_details,
            admission_date: dto.admission_date.unwrap_or(now),
            fees_status: dto.fees_status.unwrap_or_default(),
        }
    }
}

impl UpdateStudentDto {
    /// Trims the fields that are stored trimmed.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.map(|name| name.trim().to_string());
        self.roll_number = self.roll_number.map(|roll| roll.trim().to_string());
        self
    }

    pub fn apply_to(self, student: &mut Student) {
        if let Some(name) = self.name {
            student.name = name;
        }
        if let Some(roll_number) = self.roll_number {
            student.roll_number = roll_number;
        }
        if let Some(class_name) = self.class_name {
            student.class_name = class_name;
        }
        if let Some(section) = self.section {
            student.section = section;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            student.date_of_birth = date_of_birth;
        }
        if let Some(gender) = self.gender {
            student.gender = gender;
        }
        if let Some(address) = self.address {
            student.address = address;
        }
        if let Some(parent_details) = self.parent_details {
            student.parent_details = parent_details;
        }
        if let Some(fees_status) = self.fees_status {
            student.fees_status = fees_status;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub success: bool,
    pub student: Student,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentDetailsResponse {
    pub success: bool,
    pub message: String,
    pub student: Student,
}
