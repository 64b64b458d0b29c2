//! # SchoolDesk API
//!
//! A REST backend for school administration built with Axum and PostgreSQL:
//! staff accounts, student records, fee payments and library loans.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Token gate and the AuthUser extractor
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Registration and login
//! │   ├── user/        # The signed-in account
//! │   ├── users/       # Staff account management
//! │   ├── students/    # Student records
//! │   ├── fees/        # Fee payment history
//! │   └── library/     # Library loan history
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Subscriber setup and request logging
//! ├── router.rs         # Route tree, CORS, fallback
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Body and path extractors with 400 mapping
//! ```
//!
//! Each feature module has the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic over the store traits
//! - `model.rs`: re-exported DTOs and the module's messages
//! - `router.rs`: Axum router
//!
//! ## Access rules
//!
//! Everything under `/api` except `/api/auth/register` and
//! `/api/auth/login` needs a bearer token. Updating or deleting a staff
//! account additionally goes through the permission evaluator in
//! [`schooldesk_auth::permissions`]:
//!
//! | Actor | Admin target | Other target |
//! |-------|--------------|--------------|
//! | super admin | allowed | allowed |
//! | Admin | denied | allowed |
//! | OfficeStaff / Librarian | denied | denied |
//!
//! ## API Documentation
//!
//! - Swagger UI: `/swagger-ui`
//! - Scalar: `/scalar`
//! - OpenAPI JSON: `/api-docs/openapi.json`

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use schooldesk_auth;
pub use schooldesk_config;
pub use schooldesk_core;
pub use schooldesk_db;
pub use schooldesk_models;
