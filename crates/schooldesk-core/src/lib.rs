//! # SchoolDesk Core
//!
//! Foundational types shared by every SchoolDesk crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response mapping
//! - [`password`]: bcrypt hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use schooldesk_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password", 10)?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! let error = AppError::not_found("Student not found");
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, InternalErrorDetail};
pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};
