pub mod access_policy;

pub use access_policy::{
    authorize, authorize_admin, authorize_admin_action, AccessDecision, AdminAction, Caller,
    DenyReason, TargetUser,
};
