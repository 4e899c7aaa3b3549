//! IAM Identity Center API operations

use async_trait::async_trait;
use log::debug;
use serde_json::json;

use crate::aws::client::AwsClient;
use crate::aws::endpoint::Service;
use crate::error::{InventoryError, Result};

use super::models::{
    AccountAssignment, AccountAssignmentData, DescribePermissionSetResponse, GroupData,
    GroupMember, GroupMembershipData, InstanceData, ListAccountAssignmentsResponse,
    ListGroupMembershipsResponse, ListGroupsResponse, ListInstancesResponse,
    ListPermissionSetsResponse, ListUsersResponse, PermissionSet, Principal, SsoInstance,
    UserData,
};

/// Read-only view of IAM Identity Center (SSO admin + Identity Store)
///
/// Every listing follows `NextToken` until the service reports the last page.
#[async_trait]
pub trait IdentityCenterApi: Send + Sync {
    /// List Identity Center instances
    async fn list_instances(&self) -> Result<Vec<SsoInstance>>;

    /// List users of an identity store
    async fn list_users(&self, identity_store_id: &str) -> Result<Vec<Principal>>;

    /// List groups of an identity store
    async fn list_groups(&self, identity_store_id: &str) -> Result<Vec<Principal>>;

    /// List members of one group
    async fn list_group_memberships(
        &self,
        identity_store_id: &str,
        group_id: &str,
    ) -> Result<Vec<GroupMember>>;

    /// List permission set ARNs of an instance
    async fn list_permission_sets(&self, instance_arn: &str) -> Result<Vec<String>>;

    /// Get the name and description of a permission set
    async fn describe_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
    ) -> Result<PermissionSet>;

    /// List principals holding a permission set on an account
    async fn list_account_assignments(
        &self,
        instance_arn: &str,
        account_id: &str,
        permission_set_arn: &str,
    ) -> Result<Vec<AccountAssignment>>;
}

#[async_trait]
impl IdentityCenterApi for AwsClient {
    async fn list_instances(&self) -> Result<Vec<SsoInstance>> {
        debug!("Fetching Identity Center instances");

        let instances = self
            .fetch_all_pages::<InstanceData, ListInstancesResponse>(
                Service::SsoAdmin,
                "ListInstances",
                json!({}),
                "Identity Center instances",
            )
            .await?;

        instances.into_iter().map(SsoInstance::try_from).collect()
    }

    async fn list_users(&self, identity_store_id: &str) -> Result<Vec<Principal>> {
        debug!("Fetching users of identity store '{}'", identity_store_id);

        let users = self
            .fetch_all_pages::<UserData, ListUsersResponse>(
                Service::IdentityStore,
                "ListUsers",
                json!({ "IdentityStoreId": identity_store_id }),
                &format!("users in '{}'", identity_store_id),
            )
            .await?;

        users.into_iter().map(Principal::try_from).collect()
    }

    async fn list_groups(&self, identity_store_id: &str) -> Result<Vec<Principal>> {
        debug!("Fetching groups of identity store '{}'", identity_store_id);

        let groups = self
            .fetch_all_pages::<GroupData, ListGroupsResponse>(
                Service::IdentityStore,
                "ListGroups",
                json!({ "IdentityStoreId": identity_store_id }),
                &format!("groups in '{}'", identity_store_id),
            )
            .await?;

        groups.into_iter().map(Principal::try_from).collect()
    }

    async fn list_group_memberships(
        &self,
        identity_store_id: &str,
        group_id: &str,
    ) -> Result<Vec<GroupMember>> {
        debug!("Fetching memberships of group '{}'", group_id);

        let memberships = self
            .fetch_all_pages::<GroupMembershipData, ListGroupMembershipsResponse>(
                Service::IdentityStore,
                "ListGroupMemberships",
                json!({ "IdentityStoreId": identity_store_id, "GroupId": group_id }),
                &format!("memberships of group '{}'", group_id),
            )
            .await?;

        memberships.into_iter().map(GroupMember::try_from).collect()
    }

    async fn list_permission_sets(&self, instance_arn: &str) -> Result<Vec<String>> {
        debug!("Fetching permission sets of '{}'", instance_arn);

        self.fetch_all_pages::<String, ListPermissionSetsResponse>(
            Service::SsoAdmin,
            "ListPermissionSets",
            json!({ "InstanceArn": instance_arn }),
            "permission sets",
        )
        .await
    }

    async fn describe_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
    ) -> Result<PermissionSet> {
        debug!("Describing permission set '{}'", permission_set_arn);

        let context = format!("permission set '{}'", permission_set_arn);
        let response: DescribePermissionSetResponse = self
            .call(
                Service::SsoAdmin,
                "DescribePermissionSet",
                &json!({ "InstanceArn": instance_arn, "PermissionSetArn": permission_set_arn }),
                &context,
            )
            .await?;

        let data = response.permission_set.ok_or_else(|| {
            InventoryError::InvalidResponse(format!(
                "DescribePermissionSet returned no {}",
                context
            ))
        })?;
        PermissionSet::try_from(data)
    }

    async fn list_account_assignments(
        &self,
        instance_arn: &str,
        account_id: &str,
        permission_set_arn: &str,
    ) -> Result<Vec<AccountAssignment>> {
        debug!(
            "Fetching assignments of '{}' on account {}",
            permission_set_arn, account_id
        );

        let assignments = self
            .fetch_all_pages::<AccountAssignmentData, ListAccountAssignmentsResponse>(
                Service::SsoAdmin,
                "ListAccountAssignments",
                json!({
                    "InstanceArn": instance_arn,
                    "AccountId": account_id,
                    "PermissionSetArn": permission_set_arn
                }),
                &format!(
                    "assignments of '{}' on account {}",
                    permission_set_arn, account_id
                ),
            )
            .await?;

        assignments
            .into_iter()
            .map(AccountAssignment::try_from)
            .collect()
    }
}
