//! Organizations API operations

use async_trait::async_trait;
use log::debug;
use serde_json::json;

use crate::aws::client::AwsClient;
use crate::aws::endpoint::Service;
use crate::error::{InventoryError, Result};

use super::models::{
    Account, AccountData, DescribeAccountResponse, ListAccountsForParentResponse,
    ListOrganizationalUnitsForParentResponse, ListRootsResponse, OrganizationalUnit,
    OrganizationalUnitData, Root, RootData,
};

/// Read-only view of the organization directory
///
/// Every listing follows `NextToken` until the service reports the last page.
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    /// List the organization roots
    async fn list_roots(&self) -> Result<Vec<Root>>;

    /// List accounts directly contained in a root or OU
    async fn list_accounts_for_parent(&self, parent_id: &str) -> Result<Vec<Account>>;

    /// List OUs directly contained in a root or OU
    async fn list_organizational_units_for_parent(
        &self,
        parent_id: &str,
    ) -> Result<Vec<OrganizationalUnit>>;

    /// Get a single account
    async fn describe_account(&self, account_id: &str) -> Result<Account>;
}

#[async_trait]
impl OrganizationsApi for AwsClient {
    async fn list_roots(&self) -> Result<Vec<Root>> {
        debug!("Fetching organization roots");

        let roots = self
            .fetch_all_pages::<RootData, ListRootsResponse>(
                Service::Organizations,
                "ListRoots",
                json!({}),
                "organization roots",
            )
            .await?;

        roots.into_iter().map(Root::try_from).collect()
    }

    async fn list_accounts_for_parent(&self, parent_id: &str) -> Result<Vec<Account>> {
        debug!("Fetching accounts for parent '{}'", parent_id);

        let accounts = self
            .fetch_all_pages::<AccountData, ListAccountsForParentResponse>(
                Service::Organizations,
                "ListAccountsForParent",
                json!({ "ParentId": parent_id }),
                &format!("accounts in '{}'", parent_id),
            )
            .await?;

        accounts.into_iter().map(Account::try_from).collect()
    }

    async fn list_organizational_units_for_parent(
        &self,
        parent_id: &str,
    ) -> Result<Vec<OrganizationalUnit>> {
        debug!("Fetching organizational units for parent '{}'", parent_id);

        let units = self
            .fetch_all_pages::<OrganizationalUnitData, ListOrganizationalUnitsForParentResponse>(
                Service::Organizations,
                "ListOrganizationalUnitsForParent",
                json!({ "ParentId": parent_id }),
                &format!("organizational units in '{}'", parent_id),
            )
            .await?;

        units
            .into_iter()
            .map(|data| OrganizationalUnit::from_data(data, parent_id))
            .collect()
    }

    async fn describe_account(&self, account_id: &str) -> Result<Account> {
        debug!("Describing account '{}'", account_id);

        let context = format!("account '{}'", account_id);
        let response: DescribeAccountResponse = self
            .call(
                Service::Organizations,
                "DescribeAccount",
                &json!({ "AccountId": account_id }),
                &context,
            )
            .await?;

        let data = response.account.ok_or_else(|| {
            InventoryError::InvalidResponse(format!("DescribeAccount returned no {}", context))
        })?;
        Account::try_from(data)
    }
}
