//! # SchoolDesk Auth
//!
//! Roles, session tokens and the permission evaluator for the SchoolDesk API.
//!
//! - [`roles`]: the account role tag
//! - [`claims`]: claims carried by a session token
//! - [`jwt`]: token issue and verification
//! - [`permissions`]: who may update or delete which account

pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod roles;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{
    INVALID_TOKEN, TokenError, issue_token, issue_token_at, verify_token, verify_token_at,
};
pub use permissions::{
    Actor, Decision, DenyReason, Mutation, PermissionDenied, authorize_mutation, evaluate,
};
pub use roles::{Role, UnknownRole};
