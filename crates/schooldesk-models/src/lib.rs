//! # SchoolDesk Models
//!
//! Domain records, request DTOs and response envelopes for the SchoolDesk
//! API. JSON field names are camelCase throughout.
//!
//! - [`ids`]: strongly-typed record identifiers
//! - [`users`]: staff accounts, login and registration
//! - [`students`]: student records
//! - [`fees`]: fee payments
//! - [`library`]: library loans

/// Declares a closed set of string values stored as text.
///
/// Generates the enum with its serde names, `as_str`, `Display`, `FromStr`
/// and `TryFrom<String>` (the latter for decoding database columns).
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            ::serde::Serialize, ::serde::Deserialize, ::utoipa::ToSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::validation::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::validation::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::validation::UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub mod fees;
pub mod ids;
pub mod library;
pub mod students;
pub mod users;
pub mod validation;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export commonly used types at crate root
pub use fees::{CreateFeesDto, FeesEntry, FeesRecord, PaymentMethod, UpdateFeesDto};
pub use ids::{FeesRecordId, LibraryRecordId, StudentId, UserId};
pub use library::{CreateLibraryDto, LibraryEntry, LibraryRecord, UpdateLibraryDto};
pub use students::{
    Address, CreateStudentDto, FeesStatus, Gender, NewStudent, ParentDetails, Student,
    StudentSummary, UpdateStudentDto,
};
pub use users::{
    CreateUserDto, Credential, CredentialChanges, LoginRequest, NewCredential, RegisterRequest,
    UpdateUserDto, User,
};

/// `{ "success": true, "message": ... }`, used for deletions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Body of every error other than authentication failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub status: u16,
    pub message: String,
}

/// Body of authentication failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthErrorResponse {
    pub error: String,
}
