//! Organization tree traversal

use log::{debug, info};
use std::collections::HashSet;

use crate::error::{InventoryError, Result};

use super::api::OrganizationsApi;
use super::models::{AccountRecord, OrganizationInventory, OrganizationalUnit};

/// Where the traversal starts
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Start container (root or OU); `None` uses the first organization root
    pub root_id: Option<String>,
}

/// Container waiting to be visited
struct Frame {
    container_id: String,
    path: Vec<String>,
    unit: Option<OrganizationalUnit>,
}

/// Walks the OU tree depth-first and flattens it into account records
pub struct OrganizationTreeCollector<'a, A: ?Sized> {
    api: &'a A,
    options: TreeOptions,
}

impl<'a, A> OrganizationTreeCollector<'a, A>
where
    A: OrganizationsApi + ?Sized,
{
    pub fn new(api: &'a A, options: TreeOptions) -> Self {
        Self { api, options }
    }

    /// Traverse the tree in pre-order
    ///
    /// Accounts of a container come before the accounts of its child OUs, and
    /// each child OU is fully explored before its next sibling. Any failed
    /// listing fails the traversal.
    pub async fn collect(&self) -> Result<OrganizationInventory> {
        let root_id = self.resolve_start().await?;
        info!("Collecting organization tree from '{}'", root_id);

        let mut units = Vec::new();
        let mut accounts = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![Frame {
            container_id: root_id.clone(),
            path: Vec::new(),
            unit: None,
        }];

        while let Some(frame) = stack.pop() {
            if !visited.insert(frame.container_id.clone()) {
                return Err(InventoryError::InvalidResponse(format!(
                    "Container '{}' appears more than once in the organization tree",
                    frame.container_id
                )));
            }
            debug!(
                "Visiting '{}' at depth {}",
                frame.container_id,
                frame.path.len()
            );
            if let Some(unit) = frame.unit {
                units.push(unit);
            }

            let container_accounts = self
                .api
                .list_accounts_for_parent(&frame.container_id)
                .await?;
            debug!(
                "Found {} accounts in '{}'",
                container_accounts.len(),
                frame.container_id
            );
            accounts.extend(container_accounts.into_iter().map(|account| AccountRecord {
                account,
                parent_id: frame.container_id.clone(),
                ou_path: frame.path.clone(),
            }));

            let children = self
                .api
                .list_organizational_units_for_parent(&frame.container_id)
                .await?;
            for child in children.into_iter().rev() {
                let mut path = frame.path.clone();
                path.push(child.name.clone());
                stack.push(Frame {
                    container_id: child.id.clone(),
                    path,
                    unit: Some(child),
                });
            }
        }

        info!(
            "Collected {} accounts in {} organizational units",
            accounts.len(),
            units.len()
        );

        Ok(OrganizationInventory {
            root_id,
            units,
            accounts,
        })
    }

    async fn resolve_start(&self) -> Result<String> {
        if let Some(root_id) = &self.options.root_id {
            debug!("Using start container from options: {}", root_id);
            return Ok(root_id.clone());
        }

        let roots = self.api.list_roots().await?;
        debug!("Organization has {} root(s)", roots.len());
        roots
            .into_iter()
            .next()
            .map(|root| root.id)
            .ok_or_else(|| InventoryError::InvalidResponse("Organization has no root".to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::aws::organizations::api::OrganizationsApi;
    use crate::aws::organizations::models::{
        Account, AccountStatus, JoinedMethod, OrganizationalUnit, Root,
    };
    use crate::error::{InventoryError, Result};

    /// In-memory organization for collector tests
    #[derive(Default)]
    pub struct FakeOrganization {
        roots: Vec<Root>,
        units: HashMap<String, Vec<OrganizationalUnit>>,
        accounts: HashMap<String, Vec<Account>>,
        failing_parent: Option<String>,
        pub calls: Mutex<Vec<String>>,
    }

    pub fn account(id: &str, name: &str) -> Account {
        Account {
            id: id.to_string(),
            arn: format!("arn:aws:organizations::999999999999:account/o-test/{}", id),
            name: name.to_string(),
            email: format!("{}@example.com", name),
            status: AccountStatus::Active,
            joined_method: JoinedMethod::Created,
            joined_timestamp: None,
        }
    }

    impl FakeOrganization {
        pub fn new(root_id: &str) -> Self {
            Self {
                roots: vec![Root {
                    id: root_id.to_string(),
                    name: "Root".to_string(),
                }],
                ..Default::default()
            }
        }

        pub fn without_roots() -> Self {
            Self::default()
        }

        pub fn with_unit(mut self, parent_id: &str, id: &str, name: &str) -> Self {
            self.units
                .entry(parent_id.to_string())
                .or_default()
                .push(OrganizationalUnit {
                    id: id.to_string(),
                    name: name.to_string(),
                    parent_id: parent_id.to_string(),
                });
            self
        }

        pub fn with_account(mut self, parent_id: &str, id: &str, name: &str) -> Self {
            self.accounts
                .entry(parent_id.to_string())
                .or_default()
                .push(account(id, name));
            self
        }

        pub fn failing_at(mut self, parent_id: &str) -> Self {
            self.failing_parent = Some(parent_id.to_string());
            self
        }

        fn record(&self, call: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }

        pub fn call_log(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl OrganizationsApi for FakeOrganization {
        async fn list_roots(&self) -> Result<Vec<Root>> {
            self.record("ListRoots".to_string());
            Ok(self.roots.clone())
        }

        async fn list_accounts_for_parent(&self, parent_id: &str) -> Result<Vec<Account>> {
            self.record(format!("ListAccountsForParent {}", parent_id));
            if self.failing_parent.as_deref() == Some(parent_id) {
                return Err(InventoryError::Api {
                    status: 400,
                    code: "TooManyRequestsException".to_string(),
                    message: "Rate exceeded".to_string(),
                });
            }
            Ok(self.accounts.get(parent_id).cloned().unwrap_or_default())
        }

        async fn list_organizational_units_for_parent(
            &self,
            parent_id: &str,
        ) -> Result<Vec<OrganizationalUnit>> {
            self.record(format!("ListOrganizationalUnitsForParent {}", parent_id));
            Ok(self.units.get(parent_id).cloned().unwrap_or_default())
        }

        async fn describe_account(&self, account_id: &str) -> Result<Account> {
            self.record(format!("DescribeAccount {}", account_id));
            self.accounts
                .values()
                .flatten()
                .find(|a| a.id == account_id)
                .cloned()
                .ok_or_else(|| InventoryError::Api {
                    status: 400,
                    code: "AccountNotFoundException".to_string(),
                    message: format!("Account {} not found", account_id),
                })
        }
    }
}
