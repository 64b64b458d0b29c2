//! Fee payment records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{FeesRecordId, StudentId};
use crate::students::{FeesStatus, StudentSummary};

text_enum! {
    PaymentMethod ("payment method") {
        Cash => "Cash",
        CreditCard => "Credit Card",
        BankTransfer => "Bank Transfer",
        Other => "Other",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeesRecord {
    pub id: FeesRecordId,
    pub student_id: StudentId,
    pub amount_paid: f64,
    pub payment_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub payment_method: PaymentMethod,
    #[sqlx(try_from = "String")]
    pub fees_status: FeesStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fee record with the referenced student's name filled in.
///
/// `student` is `null` when the student has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeesEntry {
    #[serde(flatten)]
    pub record: FeesRecord,
    pub student: Option<StudentSummary>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeesDto {
    pub student_id: StudentId,
    #[validate(range(min = 0.0, message = "amountPaid must not be negative"))]
    pub amount_paid: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub fees_status: Option<FeesStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeesDto {
    pub student_id: Option<StudentId>,
    #[validate(range(min = 0.0, message = "amountPaid must not be negative"))]
    pub amount_paid: Option<f64>,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub fees_status: Option<FeesStatus>,
    pub remarks: Option<String>,
}

impl UpdateFeesDto {
    pub fn apply_to(self, record: &mut FeesRecord) {
        if let Some(student_id) = self.student_id {
            record.student_id = student_id;
        }
        if let Some(amount_paid) = self.amount_paid {
            record.amount_paid = amount_paid;
        }
        if let Some(payment_date) = self.payment_date {
            record.payment_date = payment_date;
        }
        if let Some(payment_method) = self.payment_method {
            record.payment_method = payment_method;
        }
        if let Some(fees_status) = self.fees_status {
            record.fees_status = fees_status;
        }
        if let Some(remarks) = self.remarks {
            record.remarks = Some(remarks);
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeesRecordResponse {
    pub success: bool,
    pub data: FeesRecord,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeesEntryResponse {
    pub success: bool,
    pub data: FeesEntry,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeesListResponse {
    pub success: bool,
    pub data: Vec<FeesEntry>,
}
