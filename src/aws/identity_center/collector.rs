//! Identity Center principal, permission set and assignment collection

use log::{debug, info};
use std::collections::{HashMap, HashSet};

use crate::aws::traits::AwsResource;
use crate::error::{InventoryError, Result};

use super::api::IdentityCenterApi;
use super::models::{
    AccountAssignment, Assignment, GroupMember, GroupMembership, IdentityInventory,
    PermissionSet, Principal, PrincipalKind, SsoInstance,
};

/// Pick the instance to inventory: the requested ARN, or the first one listed
pub fn select_instance(
    instances: Vec<SsoInstance>,
    requested: Option<&str>,
) -> Result<SsoInstance> {
    match requested {
        Some(arn) => instances
            .into_iter()
            .find(|instance| instance.instance_arn == arn)
            .ok_or_else(|| {
                InventoryError::Config(format!("Identity Center instance '{}' not found", arn))
            }),
        None => instances.into_iter().next().ok_or_else(|| {
            InventoryError::Config("No IAM Identity Center instance found".to_string())
        }),
    }
}

/// Collects principals, permission sets and their account assignments
pub struct IdentityAssignmentCollector<'a, A: ?Sized> {
    api: &'a A,
    instance: SsoInstance,
}

impl<'a, A> IdentityAssignmentCollector<'a, A>
where
    A: IdentityCenterApi + ?Sized,
{
    pub fn new(api: &'a A, instance: SsoInstance) -> Self {
        Self { api, instance }
    }

    /// Collect everything for the given accounts
    ///
    /// Assignments are queried per account and permission set; the same
    /// (principal, permission set, account) triple is kept once.
    pub async fn collect<R: AwsResource>(&self, accounts: &[R]) -> Result<IdentityInventory> {
        let store_id = &self.instance.identity_store_id;
        let instance_arn = &self.instance.instance_arn;
        info!(
            "Collecting Identity Center inventory for {} (store {})",
            instance_arn, store_id
        );

        let mut principals = self.api.list_users(store_id).await?;
        let groups = self.api.list_groups(store_id).await?;
        debug!(
            "Found {} users and {} groups",
            principals.len(),
            groups.len()
        );

        let mut members = Vec::new();
        for group in &groups {
            let group_members = self.api.list_group_memberships(store_id, &group.id).await?;
            members.extend(group_members);
        }
        principals.extend(groups);

        let permission_set_arns = self.api.list_permission_sets(instance_arn).await?;
        let mut permission_sets = Vec::with_capacity(permission_set_arns.len());
        for arn in &permission_set_arns {
            let permission_set = self.api.describe_permission_set(instance_arn, arn).await?;
            permission_sets.push(permission_set);
        }
        debug!("Found {} permission sets", permission_sets.len());

        let mut seen = HashSet::new();
        let mut raw_assignments = Vec::new();
        for account in accounts {
            for permission_set in &permission_sets {
                let assignments = self
                    .api
                    .list_account_assignments(instance_arn, account.id(), &permission_set.arn)
                    .await?;
                for assignment in assignments {
                    if seen.insert(assignment.key()) {
                        raw_assignments.push(assignment);
                    } else {
                        debug!("Skipping duplicate assignment {:?}", assignment.key());
                    }
                }
            }
        }

        let resolver = NameResolver::new(&principals, &permission_sets, accounts);
        let assignments: Vec<Assignment> = raw_assignments
            .iter()
            .map(|assignment| resolver.assignment(assignment))
            .collect();
        let memberships: Vec<GroupMembership> = members
            .iter()
            .map(|member| resolver.membership(member))
            .collect();

        info!(
            "Collected {} principals, {} permission sets, {} assignments",
            principals.len(),
            permission_sets.len(),
            assignments.len()
        );

        Ok(IdentityInventory {
            instance: self.instance.clone(),
            principals,
            permission_sets,
            memberships,
            assignments,
        })
    }
}

/// ID to display-name lookups
struct NameResolver<'a> {
    principals: HashMap<(PrincipalKind, &'a str), &'a str>,
    permission_sets: HashMap<&'a str, &'a str>,
    accounts: HashMap<&'a str, &'a str>,
}

impl<'a> NameResolver<'a> {
    fn new<R: AwsResource>(
        principals: &'a [Principal],
        permission_sets: &'a [PermissionSet],
        accounts: &'a [R],
    ) -> Self {
        Self {
            principals: principals
                .iter()
                .map(|p| ((p.kind, p.id.as_str()), p.display_name.as_str()))
                .collect(),
            permission_sets: permission_sets
                .iter()
                .map(|ps| (ps.arn.as_str(), ps.name.as_str()))
                .collect(),
            accounts: accounts.iter().map(|a| (a.id(), a.name())).collect(),
        }
    }

    fn principal(&self, kind: PrincipalKind, id: &str) -> String {
        self.principals
            .get(&(kind, id))
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("#DELETED({})", id))
    }

    fn assignment(&self, raw: &AccountAssignment) -> Assignment {
        Assignment {
            account_id: raw.account_id.clone(),
            account_name: self
                .accounts
                .get(raw.account_id.as_str())
                .map(|name| name.to_string())
                .unwrap_or_else(|| raw.account_id.clone()),
            principal_kind: raw.principal_kind,
            principal_id: raw.principal_id.clone(),
            principal_name: self.principal(raw.principal_kind, &raw.principal_id),
            permission_set_arn: raw.permission_set_arn.clone(),
            permission_set_name: self
                .permission_sets
                .get(raw.permission_set_arn.as_str())
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("#UNKNOWN({})", raw.permission_set_arn)),
        }
    }

    fn membership(&self, member: &GroupMember) -> GroupMembership {
        GroupMembership {
            group_id: member.group_id.clone(),
            group_name: self.principal(PrincipalKind::Group, &member.group_id),
            user_id: member.user_id.clone(),
            user_name: self.principal(PrincipalKind::User, &member.user_id),
        }
    }
}
