//! STS caller identity

use serde::Deserialize;

use crate::aws::client::AwsClient;
use crate::aws::endpoint::Service;
use crate::aws::require_field;
use crate::error::Result;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct GetCallerIdentityEnvelope {
    get_caller_identity_response: GetCallerIdentityResponse,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct GetCallerIdentityResponse {
    get_caller_identity_result: CallerIdentityData,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct CallerIdentityData {
    account: Option<String>,
    arn: Option<String>,
    user_id: Option<String>,
}

/// Identity the credentials resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
    pub user_id: String,
}

impl AwsClient {
    /// Get the account and ARN of the calling identity
    pub async fn get_caller_identity(&self) -> Result<CallerIdentity> {
        let envelope: GetCallerIdentityEnvelope = self
            .call_query(Service::Sts, "GetCallerIdentity", "caller identity")
            .await?;
        let data = envelope
            .get_caller_identity_response
            .get_caller_identity_result;

        Ok(CallerIdentity {
            account: require_field(data.account, "caller identity", "Account")?,
            arn: require_field(data.arn, "caller identity", "Arn")?,
            user_id: data.user_id.unwrap_or_default(),
        })
    }
}
