//! Request middleware.
//!
//! - [`auth`]: the token gate (`require_auth`) and the [`auth::AuthUser`]
//!   extractor

pub mod auth;
