//! Organizations data models

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::aws::require_field;
use crate::aws::traits::{AwsResource, PaginatedResponse};
use crate::error::{InventoryError, Result};

/// Response wrapper for ListRoots
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListRootsResponse {
    #[serde(default)]
    pub roots: Vec<RootData>,
    pub next_token: Option<String>,
}

/// Response wrapper for ListAccountsForParent
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListAccountsForParentResponse {
    #[serde(default)]
    pub accounts: Vec<AccountData>,
    pub next_token: Option<String>,
}

/// Response wrapper for ListOrganizationalUnitsForParent
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ListOrganizationalUnitsForParentResponse {
    #[serde(default)]
    pub organizational_units: Vec<OrganizationalUnitData>,
    pub next_token: Option<String>,
}

/// Response wrapper for DescribeAccount
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeAccountResponse {
    pub account: Option<AccountData>,
}

impl PaginatedResponse<RootData> for ListRootsResponse {
    fn into_data(self) -> Vec<RootData> {
        self.roots
    }

    fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }
}

impl PaginatedResponse<AccountData> for ListAccountsForParentResponse {
    fn into_data(self) -> Vec<AccountData> {
        self.accounts
    }

    fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }
}

impl PaginatedResponse<OrganizationalUnitData> for ListOrganizationalUnitsForParentResponse {
    fn into_data(self) -> Vec<OrganizationalUnitData> {
        self.organizational_units
    }

    fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }
}

/// Root as returned by the API
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct RootData {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Organizational unit as returned by the API
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct OrganizationalUnitData {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Account as returned by the API
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct AccountData {
    pub id: Option<String>,
    pub arn: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub joined_method: Option<String>,
    /// Epoch seconds (fractional)
    pub joined_timestamp: Option<f64>,
}

/// Organization root container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub id: String,
    pub name: String,
}

impl TryFrom<RootData> for Root {
    type Error = InventoryError;

    fn try_from(data: RootData) -> Result<Self> {
        Ok(Self {
            id: require_field(data.id, "root", "Id")?,
            name: data.name.unwrap_or_default(),
        })
    }
}

/// Organizational unit placed under its parent container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationalUnit {
    pub id: String,
    pub name: String,
    pub parent_id: String,
}

impl OrganizationalUnit {
    /// Map API data, attaching the container it was listed under
    pub fn from_data(data: OrganizationalUnitData, parent_id: &str) -> Result<Self> {
        Ok(Self {
            id: require_field(data.id, "organizational unit", "Id")?,
            name: require_field(data.name, "organizational unit", "Name")?,
            parent_id: parent_id.to_string(),
        })
    }
}

impl AwsResource for OrganizationalUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountStatus {
    Active,
    Suspended,
    PendingClosure,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Suspended => "SUSPENDED",
            AccountStatus::PendingClosure => "PENDING_CLOSURE",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ACTIVE" => Ok(AccountStatus::Active),
            "SUSPENDED" => Ok(AccountStatus::Suspended),
            "PENDING_CLOSURE" => Ok(AccountStatus::PendingClosure),
            other => Err(InventoryError::InvalidResponse(format!(
                "Unknown account status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the account joined the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinedMethod {
    Invited,
    Created,
}

impl JoinedMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinedMethod::Invited => "INVITED",
            JoinedMethod::Created => "CREATED",
        }
    }
}

impl FromStr for JoinedMethod {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "INVITED" => Ok(JoinedMethod::Invited),
            "CREATED" => Ok(JoinedMethod::Created),
            other => Err(InventoryError::InvalidResponse(format!(
                "Unknown joined method '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for JoinedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Member account of the organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub arn: String,
    pub name: String,
    pub email: String,
    pub status: AccountStatus,
    pub joined_method: JoinedMethod,
    pub joined_timestamp: Option<DateTime<Utc>>,
}

impl TryFrom<AccountData> for Account {
    type Error = InventoryError;

    fn try_from(data: AccountData) -> Result<Self> {
        let id = require_field(data.id, "account", "Id")?;
        let entity = format!("account '{}'", id);

        let joined_timestamp = match data.joined_timestamp {
            Some(seconds) => {
                let millis = (seconds * 1000.0).round() as i64;
                let timestamp = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                    InventoryError::InvalidResponse(format!(
                        "{} has an out-of-range JoinedTimestamp {}",
                        entity, seconds
                    ))
                })?;
                Some(timestamp)
            }
            None => None,
        };

        let joined_method = require_field(data.joined_method, &entity, "JoinedMethod")?;
        Ok(Self {
            arn: data.arn.unwrap_or_default(),
            name: require_field(data.name, &entity, "Name")?,
            email: require_field(data.email, &entity, "Email")?,
            status: require_field(data.status, &entity, "Status")?.parse()?,
            joined_method: joined_method.parse()?,
            joined_timestamp,
            id,
        })
    }
}

impl AwsResource for Account {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Account placed in the OU tree
///
/// `ou_path` holds the OU names from the traversal start (excluded) down to
/// the account's immediate parent; it is empty for accounts directly under
/// the start container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub account: Account,
    pub parent_id: String,
    pub ou_path: Vec<String>,
}

impl AwsResource for AccountRecord {
    fn id(&self) -> &str {
        &self.account.id
    }

    fn name(&self) -> &str {
        &self.account.name
    }
}

/// Result of one organization traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationInventory {
    /// Container the traversal started from
    pub root_id: String,
    /// Every OU below the start container, pre-order
    pub units: Vec<OrganizationalUnit>,
    /// Every account below the start container, pre-order
    pub accounts: Vec<AccountRecord>,
}

impl OrganizationInventory {
    /// Find an account by its 12-digit ID
    pub fn account_by_id(&self, account_id: &str) -> Option<&AccountRecord> {
        self.accounts
            .iter()
            .find(|record| record.account.id == account_id)
    }
}
