//! Permission evaluator for mutations on user accounts.
//!
//! The decision depends only on who is acting and the role of the account
//! being changed. Loading either record is the caller's job.
//!
//! | Actor | Target | Decision |
//! |-------|--------|----------|
//! | super admin | any | allow |
//! | `Admin` | `Admin` | deny |
//! | `Admin` | not `Admin` | allow |
//! | anyone else | any | deny |
//!
//! Acting on one's own record is not special-cased.

use thiserror::Error;
use uuid::Uuid;

use schooldesk_core::AppError;

use crate::roles::Role;

/// The acting account, as currently stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
    pub super_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

impl Mutation {
    pub const fn verb(&self) -> &'static str {
        match self {
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    AdminTarget,
    NoPermission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionDenied {
    #[error("Admins cannot {} other Admins", .0.verb())]
    AdminTarget(Mutation),
    #[error("You do not have permission to {} this user", .0.verb())]
    NoPermission(Mutation),
}

impl From<PermissionDenied> for AppError {
    fn from(err: PermissionDenied) -> Self {
        AppError::forbidden(err.to_string())
    }
}

/// Decides whether `actor` may update or delete an account holding `target`.
pub fn evaluate(actor: &Actor, target: Role) -> Decision {
    if actor.super_admin {
        return Decision::Allow;
    }

    match (actor.role, target) {
        (Role::Admin, Role::Admin) => Decision::Deny(DenyReason::AdminTarget),
        (Role::Admin, _) => Decision::Allow,
        _ => Decision::Deny(DenyReason::NoPermission),
    }
}

/// [`evaluate`] with the denial turned into an error for `mutation`.
pub fn authorize_mutation(
    actor: &Actor,
    target: Role,
    mutation: Mutation,
) -> Result<(), PermissionDenied> {
    match evaluate(actor, target) {
        Decision::Allow => Ok(()),
        Decision::Deny(DenyReason::AdminTarget) => Err(PermissionDenied::AdminTarget(mutation)),
        Decision::Deny(DenyReason::NoPermission) => Err(PermissionDenied::NoPermission(mutation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role, super_admin: bool) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            role,
            super_admin,
        }
    }

    #[test]
    fn test_permission_table() {
        let super_admin = actor(Role::OfficeStaff, true);
        let admin = actor(Role::Admin, false);
        let office_staff = actor(Role::OfficeStaff, false);
        let librarian = actor(Role::Librarian, false);

        let cases = [
            (&super_admin, Role::Admin, Decision::Allow),
            (&super_admin, Role::OfficeStaff, Decision::Allow),
            (&super_admin, Role::Librarian, Decision::Allow),
            (&admin, Role::Admin, Decision::Deny(DenyReason::AdminTarget)),
            (&admin, Role::OfficeStaff, Decision::Allow),
            (&admin, Role::Librarian, Decision::Allow),
            (&office_staff, Role::Admin, Decision::Deny(DenyReason::NoPermission)),
            (&office_staff, Role::OfficeStaff, Decision::Deny(DenyReason::NoPermission)),
            (&office_staff, Role::Librarian, Decision::Deny(DenyReason::NoPermission)),
            (&librarian, Role::Admin, Decision::Deny(DenyReason::NoPermission)),
            (&librarian, Role::OfficeStaff, Decision::Deny(DenyReason::NoPermission)),
            (&librarian, Role::Librarian, Decision::Deny(DenyReason::NoPermission)),
        ];

        for (actor, target, expected) in cases {
            assert_eq!(
                evaluate(actor, target),
                expected,
                "actor {:?} on {}",
                actor,
                target
            );
        }
    }

    #[test]
    fn test_super_admin_flag_overrides_every_role() {
        for role in Role::ALL {
            let actor = actor(role, true);
            for target in Role::ALL {
                assert_eq!(evaluate(&actor, target), Decision::Allow);
            }
        }
    }

    #[test]
    fn test_denial_messages() {
        let admin = actor(Role::Admin, false);
        let librarian = actor(Role::Librarian, false);

        assert_eq!(
            authorize_mutation(&admin, Role::Admin, Mutation::Update)
                .unwrap_err()
                .to_string(),
            "Admins cannot update other Admins"
        );
        assert_eq!(
            authorize_mutation(&admin, Role::Admin, Mutation::Delete)
                .unwrap_err()
                .to_string(),
            "Admins cannot delete other Admins"
        );
        assert_eq!(
            authorize_mutation(&librarian, Role::OfficeStaff, Mutation::Delete)
                .unwrap_err()
                .to_string(),
            "You do not have permission to delete this user"
        );
    }

    #[test]
    fn test_denial_is_forbidden() {
        let err: AppError = PermissionDenied::NoPermission(Mutation::Update).into();
        assert_eq!(err.status.as_u16(), 403);
        assert_eq!(
            err.message(),
            "You do not have permission to update this user"
        );
    }

    #[test]
    fn test_admin_acting_on_own_record_is_denied() {
        let admin = actor(Role::Admin, false);
        assert!(authorize_mutation(&admin, Role::Admin, Mutation::Update).is_err());
    }
}
