//! Ownership and role checks shared by every mutating operation.
//!
//! The functions here are pure: they never touch storage, so callers must
//! consult them before opening a transaction or calling the media store.

use crate::auth::application::domain::entities::UserId;

/// Identity of whoever triggered an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated { id: UserId, is_admin: bool },
}

impl Caller {
    pub fn user(id: UserId) -> Self {
        Caller::Authenticated {
            id,
            is_admin: false,
        }
    }

    pub fn admin(id: UserId) -> Self {
        Caller::Authenticated { id, is_admin: true }
    }

    pub fn id(&self) -> Option<UserId> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated { id, .. } => Some(*id),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::Authenticated { is_admin: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    NotOwner,
    NotAdmin,
    /// Admins cannot target their own account with admin actions.
    SelfTarget,
    /// Admin accounts cannot be deleted through the admin surface.
    ProtectedAdmin,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::Unauthenticated => "Authentication required",
            DenyReason::NotOwner => "You can only modify your own listings",
            DenyReason::NotAdmin => "Administrator privileges required",
            DenyReason::SelfTarget => "You cannot perform this action on your own account",
            DenyReason::ProtectedAdmin => "Administrator accounts cannot be deleted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn into_result(self) -> Result<(), DenyReason> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(reason) => Err(reason),
        }
    }
}

/// Allow iff the caller is authenticated and either owns the resource or is an admin.
pub fn authorize(caller: &Caller, resource_owner: UserId) -> AccessDecision {
    match caller {
        Caller::Anonymous => AccessDecision::Deny(DenyReason::Unauthenticated),
        Caller::Authenticated { id, is_admin } => {
            if *id == resource_owner || *is_admin {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::NotOwner)
            }
        }
    }
}

/// Gate for admin-only operations with no owned resource.
pub fn authorize_admin(caller: &Caller) -> AccessDecision {
    match caller {
        Caller::Anonymous => AccessDecision::Deny(DenyReason::Unauthenticated),
        Caller::Authenticated { is_admin: true, .. } => AccessDecision::Allow,
        Caller::Authenticated { .. } => AccessDecision::Deny(DenyReason::NotAdmin),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    ToggleAdmin,
    DeleteUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetUser {
    pub id: UserId,
    pub is_admin: bool,
}

pub fn authorize_admin_action(
    caller: &Caller,
    target: TargetUser,
    action: AdminAction,
) -> AccessDecision {
    if let AccessDecision::Deny(reason) = authorize_admin(caller) {
        return AccessDecision::Deny(reason);
    }

    if caller.id() == Some(target.id) {
        return AccessDecision::Deny(DenyReason::SelfTarget);
    }

    match action {
        AdminAction::DeleteUser if target.is_admin => {
            AccessDecision::Deny(DenyReason::ProtectedAdmin)
        }
        _ => AccessDecision::Allow,
    }
}
