//! IAM Identity Center module

mod api;
mod collector;
mod commands;
mod models;

pub use api::IdentityCenterApi;
pub use collector::{select_instance, IdentityAssignmentCollector};
pub use commands::{build_inventory_report, run_identity_center_command};
pub use models::{
    AccountAssignment, Assignment, GroupMember, GroupMembership, IdentityInventory,
    PermissionSet, Principal, PrincipalKind, SsoInstance,
};

#[cfg(test)]
pub(crate) use collector::fake;
