//! AWS API client module
//!
//! This module provides signed access to AWS Organizations, IAM Identity
//! Center (SSO admin + Identity Store) and STS.

mod client;
mod credentials;
mod endpoint;
pub mod identity_center;
pub mod organizations;
mod signer;
mod sts;
pub mod traits;

pub use client::{AwsClient, AwsConfig};
pub use credentials::{CredentialResolver, Credentials};
pub use endpoint::{resolve_region, Service};
pub use identity_center::{
    run_identity_center_command, select_instance, Assignment, IdentityAssignmentCollector,
    IdentityCenterApi, IdentityInventory, PermissionSet, Principal, PrincipalKind, SsoInstance,
};
pub use organizations::{
    run_accounts_command, Account, AccountRecord, AccountStatus, JoinedMethod,
    OrganizationInventory, OrganizationTreeCollector, OrganizationalUnit, OrganizationsApi,
    TreeOptions,
};
pub use sts::CallerIdentity;
pub use traits::{AwsResource, PaginatedResponse};

use crate::error::{InventoryError, Result};

/// Unwrap a field the service must always return; empty counts as missing
pub(crate) fn require_field(value: Option<String>, entity: &str, field: &str) -> Result<String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        InventoryError::InvalidResponse(format!("{} is missing required field '{}'", entity, field))
    })
}
