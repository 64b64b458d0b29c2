//! # SchoolDesk CLI
//!
//! Administrative helpers used by the `schooldesk-cli` binary: creating the
//! first super admin account and seeding fake student records.
//!
//! ## Usage
//!
//! ```ignore
//! use schooldesk_cli::seeder::seed_students;
//!
//! let inserted = seed_students(&pool, 200).await?;
//! ```

pub mod admin;
pub mod seeder;
