//! IAM Identity Center data models

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::aws::require_field;
use crate::aws::traits::{AwsResource, PaginatedResponse};
use crate::error::{InventoryError, Result};

/// Response wrapper for ListInstances
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListInstancesResponse {
    #[serde(default)]
    pub instances: Vec<InstanceData>,
    pub next_token: Option<String>,
}

/// Response wrapper for ListUsers
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListUsersResponse {
    #[serde(default)]
    pub users: Vec<UserData>,
    pub next_token: Option<String>,
}

/// Response wrapper for ListGroups
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListGroupsResponse {
    #[serde(default)]
    pub groups: Vec<GroupData>,
    pub next_token: Option<String>,
}

/// Response wrapper for ListGroupMemberships
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListGroupMembershipsResponse {
    #[serde(default)]
    pub group_memberships: Vec<GroupMembershipData>,
    pub next_token: Option<String>,
}

/// Response wrapper for ListPermissionSets (ARNs only)
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListPermissionSetsResponse {
    #[serde(default)]
    pub permission_sets: Vec<String>,
    pub next_token: Option<String>,
}

/// Response wrapper for DescribePermissionSet
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct DescribePermissionSetResponse {
    pub permission_set: Option<PermissionSetData>,
}

/// Response wrapper for ListAccountAssignments
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListAccountAssignmentsResponse {
    #[serde(default)]
    pub account_assignments: Vec<AccountAssignmentData>,
    pub next_token: Option<String>,
}

macro_rules! paginated {
    ($response:ty, $item:ty, $field:ident) => {
        impl PaginatedResponse<$item> for $response {
            fn into_data(self) -> Vec<$item> {
                self.$field
            }

            fn next_token(&self) -> Option<&str> {
                self.next_token.as_deref()
            }
        }
    };
}

paginated!(ListInstancesResponse, InstanceData, instances);
paginated!(ListUsersResponse, UserData, users);
paginated!(ListGroupsResponse, GroupData, groups);
paginated!(
    ListGroupMembershipsResponse,
    GroupMembershipData,
    group_memberships
);
paginated!(ListPermissionSetsResponse, String, permission_sets);
paginated!(
    ListAccountAssignmentsResponse,
    AccountAssignmentData,
    account_assignments
);

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceData {
    pub instance_arn: Option<String>,
    pub identity_store_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct UserData {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct GroupData {
    pub group_id: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct GroupMembershipData {
    pub group_id: Option<String>,
    pub member_id: Option<MemberIdData>,
}

/// Union member id; only users can be group members today
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct MemberIdData {
    pub user_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionSetData {
    pub permission_set_arn: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct AccountAssignmentData {
    pub account_id: Option<String>,
    pub permission_set_arn: Option<String>,
    pub principal_type: Option<String>,
    pub principal_id: Option<String>,
}

/// IAM Identity Center instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsoInstance {
    pub instance_arn: String,
    pub identity_store_id: String,
}

impl TryFrom<InstanceData> for SsoInstance {
    type Error = InventoryError;

    fn try_from(data: InstanceData) -> Result<Self> {
        Ok(Self {
            instance_arn: require_field(data.instance_arn, "instance", "InstanceArn")?,
            identity_store_id: require_field(
                data.identity_store_id,
                "instance",
                "IdentityStoreId",
            )?,
        })
    }
}

/// Kind of identity-store principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrincipalKind {
    User,
    Group,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::User => "USER",
            PrincipalKind::Group => "GROUP",
        }
    }
}

impl FromStr for PrincipalKind {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "USER" => Ok(PrincipalKind::User),
            "GROUP" => Ok(PrincipalKind::Group),
            other => Err(InventoryError::InvalidResponse(format!(
                "Unknown principal type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User or group of the identity store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub kind: PrincipalKind,
    pub display_name: String,
    pub user_name: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<UserData> for Principal {
    type Error = InventoryError;

    fn try_from(data: UserData) -> Result<Self> {
        let id = require_field(data.user_id, "user", "UserId")?;
        let user_name = data.user_name.filter(|n| !n.is_empty());
        let display_name = data
            .display_name
            .filter(|n| !n.is_empty())
            .or_else(|| user_name.clone())
            .ok_or_else(|| {
                InventoryError::InvalidResponse(format!(
                    "user '{}' has neither DisplayName nor UserName",
                    id
                ))
            })?;

        Ok(Self {
            id,
            kind: PrincipalKind::User,
            display_name,
            user_name,
            description: None,
        })
    }
}

impl TryFrom<GroupData> for Principal {
    type Error = InventoryError;

    fn try_from(data: GroupData) -> Result<Self> {
        let id = require_field(data.group_id, "group", "GroupId")?;
        let entity = format!("group '{}'", id);
        Ok(Self {
            display_name: require_field(data.display_name, &entity, "DisplayName")?,
            id,
            kind: PrincipalKind::Group,
            user_name: None,
            description: data.description.filter(|d| !d.is_empty()),
        })
    }
}

impl AwsResource for Principal {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.display_name
    }
}

/// Permission set with its name resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    pub arn: String,
    pub name: String,
    pub description: Option<String>,
}

impl TryFrom<PermissionSetData> for PermissionSet {
    type Error = InventoryError;

    fn try_from(data: PermissionSetData) -> Result<Self> {
        let entity = "permission set";
        let arn = require_field(data.permission_set_arn, entity, "PermissionSetArn")?;
        Ok(Self {
            name: require_field(data.name, &format!("permission set '{}'", arn), "Name")?,
            arn,
            description: data.description.filter(|d| !d.is_empty()),
        })
    }
}

impl AwsResource for PermissionSet {
    fn id(&self) -> &str {
        &self.arn
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Raw group membership (IDs only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub group_id: String,
    pub user_id: String,
}

impl TryFrom<GroupMembershipData> for GroupMember {
    type Error = InventoryError;

    fn try_from(data: GroupMembershipData) -> Result<Self> {
        let group_id = require_field(data.group_id, "group membership", "GroupId")?;
        let user_id = data.member_id.and_then(|m| m.user_id);
        let entity = format!("membership of group '{}'", group_id);
        Ok(Self {
            user_id: require_field(user_id, &entity, "MemberId.UserId")?,
            group_id,
        })
    }
}

/// Group membership with names resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMembership {
    pub group_id: String,
    pub group_name: String,
    pub user_id: String,
    pub user_name: String,
}

/// Raw assignment of a principal and permission set to an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAssignment {
    pub account_id: String,
    pub permission_set_arn: String,
    pub principal_kind: PrincipalKind,
    pub principal_id: String,
}

impl AccountAssignment {
    /// Identity of the assignment; duplicates share the same key
    pub fn key(&self) -> (PrincipalKind, String, String, String) {
        (
            self.principal_kind,
            self.principal_id.clone(),
            self.permission_set_arn.clone(),
            self.account_id.clone(),
        )
    }
}

impl TryFrom<AccountAssignmentData> for AccountAssignment {
    type Error = InventoryError;

    fn try_from(data: AccountAssignmentData) -> Result<Self> {
        let entity = "account assignment";
        let permission_set_arn =
            require_field(data.permission_set_arn, entity, "PermissionSetArn")?;
        let principal_type = require_field(data.principal_type, entity, "PrincipalType")?;
        Ok(Self {
            account_id: require_field(data.account_id, entity, "AccountId")?,
            permission_set_arn,
            principal_kind: principal_type.parse()?,
            principal_id: require_field(data.principal_id, entity, "PrincipalId")?,
        })
    }
}

/// Assignment with account, principal and permission set names resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub account_id: String,
    pub account_name: String,
    pub principal_kind: PrincipalKind,
    pub principal_id: String,
    pub principal_name: String,
    pub permission_set_arn: String,
    pub permission_set_name: String,
}

/// Result of one Identity Center collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityInventory {
    pub instance: SsoInstance,
    /// Users first, then groups, in listing order
    pub principals: Vec<Principal>,
    pub permission_sets: Vec<PermissionSet>,
    pub memberships: Vec<GroupMembership>,
    pub assignments: Vec<Assignment>,
}
