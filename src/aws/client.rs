//! AWS HTTP client for signed API interactions

use chrono::Utc;
use log::{debug, warn};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

use crate::aws::credentials::Credentials;
use crate::aws::endpoint::Service;
use crate::aws::signer::{self, SignableRequest, SigningParams};
use crate::aws::traits::PaginatedResponse;
use crate::config::api;
use crate::error::{InventoryError, Result};

/// Error codes returned when the credentials themselves are rejected
const AUTHENTICATION_ERROR_CODES: &[&str] = &[
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "SignatureDoesNotMatch",
    "IncompleteSignature",
    "InvalidClientTokenId",
    "MissingAuthenticationToken",
    "ExpiredToken",
    "ExpiredTokenException",
];

/// Connection settings for a single inventory run
#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub credentials: Credentials,
    /// Endpoint that replaces every service endpoint (mock servers, proxies)
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    pub fn new(region: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            region: region.into(),
            credentials,
            endpoint_url: None,
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url;
        self
    }
}

/// Unparsed service response
struct RawResponse {
    status: u16,
    error_type: Option<String>,
    body: String,
}

/// Error payload of the JSON protocol (`__type`) and the query protocol (`Error`)
#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
    #[serde(rename = "Error")]
    error: Option<QueryErrorBody>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct QueryErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// AWS API client
pub struct AwsClient {
    client: Client,
    config: AwsConfig,
}

impl AwsClient {
    /// Create a new client; the configuration lives as long as the client
    pub fn new(config: AwsConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Region used for regional services
    pub fn region(&self) -> &str {
        &self.config.region
    }

    /// Endpoint for a service, honouring the override
    pub(crate) fn endpoint(&self, service: Service) -> String {
        match &self.config.endpoint_url {
            Some(url) => url.clone(),
            None => service.endpoint(&self.config.region),
        }
    }

    /// Call a JSON 1.1 protocol operation (e.g. `ListAccountsForParent`)
    pub(crate) async fn call<R>(
        &self,
        service: Service,
        operation: &str,
        payload: &Value,
        error_context: &str,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let prefix = service.target_prefix().ok_or_else(|| {
            InventoryError::Config(format!("{} does not use the JSON protocol", service))
        })?;
        let target = format!("{}.{}", prefix, operation);
        debug!("Calling {} for {}", target, error_context);

        let response = self
            .send_signed(
                service,
                api::JSON_CONTENT_TYPE,
                Some(&target),
                payload.to_string(),
            )
            .await?;

        parse_response(response, error_context)
    }

    /// Call a query protocol action (STS) asking for a JSON response
    pub(crate) async fn call_query<R>(
        &self,
        service: Service,
        action: &str,
        error_context: &str,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let body = format!(
            "Action={}&Version={}",
            urlencoding::encode(action),
            urlencoding::encode(api::STS_VERSION)
        );
        debug!(
            "Calling {} action {} for {}",
            service, action, error_context
        );

        let response = self
            .send_signed(service, api::FORM_CONTENT_TYPE, None, body)
            .await?;

        parse_response(response, error_context)
    }

    /// Fetch every page of a `NextToken`-paginated operation
    ///
    /// Pages are requested one after another; the token of each response is
    /// copied into the next request until the service stops returning one.
    /// Any failing page fails the whole listing.
    ///
    /// # Arguments
    /// * `operation` - Operation name (e.g. "ListUsers")
    /// * `payload` - Request body of the first page (JSON object)
    /// * `error_context` - Context for error messages (e.g. "accounts in 'ou-abc'")
    pub async fn fetch_all_pages<T, R>(
        &self,
        service: Service,
        operation: &str,
        mut payload: Value,
        error_context: &str,
    ) -> Result<Vec<T>>
    where
        R: DeserializeOwned + PaginatedResponse<T>,
    {
        let mut all_items = Vec::new();
        let mut seen_tokens: HashSet<String> = HashSet::new();
        let mut page_num: u32 = 1;

        loop {
            let page_context = format!("{} (page {})", error_context, page_num);
            let page: R = match self.call(service, operation, &payload, &page_context).await {
                Ok(page) => page,
                Err(e) => {
                    if e.is_throttling() {
                        warn!(
                            "{} was throttled after {} items, aborting the listing",
                            page_context,
                            all_items.len()
                        );
                    }
                    return Err(e);
                }
            };

            let next_token = page
                .next_token()
                .filter(|token| !token.is_empty())
                .map(str::to_string);
            let items = page.into_data();
            debug!("Page {} returned {} items", page_num, items.len());
            all_items.extend(items);

            let Some(token) = next_token else {
                break;
            };
            if !seen_tokens.insert(token.clone()) {
                return Err(InventoryError::InvalidResponse(format!(
                    "{} returned NextToken '{}' that was already followed",
                    page_context, token
                )));
            }

            match payload {
                Value::Object(ref mut body) => {
                    body.insert("NextToken".to_string(), Value::String(token));
                }
                _ => {
                    return Err(InventoryError::Config(format!(
                        "Request body for {} must be a JSON object",
                        operation
                    )))
                }
            }
            page_num += 1;
        }

        debug!(
            "Fetched {} total items for {}",
            all_items.len(),
            error_context
        );
        Ok(all_items)
    }

    /// Sign and send a POST request to a service endpoint
    async fn send_signed(
        &self,
        service: Service,
        content_type: &str,
        target: Option<&str>,
        payload: String,
    ) -> Result<RawResponse> {
        let endpoint = self.endpoint(service);
        let url = Url::parse(&endpoint).map_err(|e| {
            InventoryError::Config(format!("Invalid endpoint URL '{}': {}", endpoint, e))
        })?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(InventoryError::Config(format!(
                    "Endpoint URL '{}' has no host",
                    endpoint
                )))
            }
        };

        let mut headers: Vec<(&str, &str)> =
            vec![("content-type", content_type), ("host", host.as_str())];
        if let Some(target) = target {
            headers.push(("x-amz-target", target));
        }

        let signing = SigningParams {
            credentials: &self.config.credentials,
            region: service.signing_region(&self.config.region),
            service: service.signing_name(),
            time: Utc::now(),
        };
        let signed_headers = signer::sign_request(
            &signing,
            &SignableRequest {
                method: "POST",
                path: url.path(),
                query: "",
                headers: &headers,
                payload: payload.as_bytes(),
            },
        )?;

        let mut builder = self
            .client
            .post(url.clone())
            .header("accept", "application/json");
        for (name, value) in headers.iter().filter(|(name, _)| *name != "host") {
            builder = builder.header(*name, *value);
        }
        for (name, value) in signed_headers {
            builder = builder.header(name, value);
        }

        let response = builder.body(payload).send().await?;
        let status = response.status().as_u16();
        let error_type = response
            .headers()
            .get("x-amzn-errortype")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            error_type,
            body,
        })
    }
}

/// Check the status and parse the body of a service response
fn parse_response<R>(response: RawResponse, error_context: &str) -> Result<R>
where
    R: DeserializeOwned,
{
    if !(200..300).contains(&response.status) {
        return Err(classify_error(&response, error_context));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        InventoryError::InvalidResponse(format!("Failed to parse {}: {}", error_context, e))
    })
}

/// Map an error response to Authentication or Api
fn classify_error(response: &RawResponse, error_context: &str) -> InventoryError {
    let body: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();

    let raw_code = body
        .error_type
        .or_else(|| body.error.as_ref().and_then(|e| e.code.clone()))
        .or_else(|| response.error_type.clone())
        .unwrap_or_default();
    let code = match error_code(&raw_code) {
        code if code.is_empty() => "UnknownError".to_string(),
        code => code,
    };
    let message = body
        .message
        .or_else(|| body.error.and_then(|e| e.message))
        .unwrap_or_else(|| format!("Failed to fetch {}", error_context));

    if response.status == 401 || AUTHENTICATION_ERROR_CODES.contains(&code.as_str()) {
        return InventoryError::Authentication(format!(
            "{} ({}) while fetching {}",
            message, code, error_context
        ));
    }

    InventoryError::Api {
        status: response.status,
        code,
        message: format!("{} while fetching {}", message, error_context),
    }
}

/// Strip namespace and suffix
///
/// `com.amazonaws#ThrottlingException:http://...` becomes `ThrottlingException`.
fn error_code(raw: &str) -> String {
    let code = raw.rsplit('#').next().unwrap_or(raw);
    let code = code.split(':').next().unwrap_or(code);
    code.trim().to_string()
}

#[cfg(test)]
impl AwsClient {
    /// Create a test client pointed at a mock server
    pub fn test_client(base_url: &str) -> Self {
        let credentials = Credentials::new(
            "AKIDTEST".to_string(),
            "test-secret".to_string(),
            None,
        );
        Self::new(
            AwsConfig::new("us-east-1", credentials)
                .with_endpoint_url(Some(base_url.to_string())),
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_override() {
        let client = AwsClient::test_client("http://127.0.0.1:9999");
        assert_eq!(
            client.endpoint(Service::Organizations),
            "http://127.0.0.1:9999"
        );
        assert_eq!(client.endpoint(Service::Sts), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_default_endpoints_use_region() {
        let credentials = Credentials::new("a".to_string(), "b".to_string(), None);
        let client = AwsClient::new(AwsConfig::new("eu-west-1", credentials));
        assert_eq!(client.region(), "eu-west-1");
        assert_eq!(
            client.endpoint(Service::IdentityStore),
            "https://identitystore.eu-west-1.amazonaws.com/"
        );
        assert_eq!(
            client.endpoint(Service::Organizations),
            "https://organizations.us-east-1.amazonaws.com/"
        );
    }

    #[test]
    fn test_error_code_parsing() {
        let qualified = "com.amazonaws.organizations.v20161128#TooManyRequestsException";
        assert_eq!(error_code(qualified), "TooManyRequestsException");
        assert_eq!(
            error_code("ThrottlingException:http://internal.amazon.com/coral/"),
            "ThrottlingException"
        );
        assert_eq!(error_code("AccessDeniedException"), "AccessDeniedException");
        assert_eq!(error_code(""), "");
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            error_type: None,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_classify_throttling() {
        let err = classify_error(
            &raw(
                400,
                r#"{"__type":"ThrottlingException","message":"Rate exceeded"}"#,
            ),
            "users",
        );
        assert!(err.is_throttling());
        assert!(err.to_string().contains("Rate exceeded"));
    }

    #[test]
    fn test_classify_authentication() {
        let err = classify_error(
            &raw(
                400,
                r#"{"__type":"UnrecognizedClientException","message":"The token is invalid."}"#,
            ),
            "roots",
        );
        assert!(matches!(err, InventoryError::Authentication(_)));
    }

    #[test]
    fn test_classify_query_protocol_error() {
        let err = classify_error(
            &raw(
                403,
                r#"{"Error":{"Code":"InvalidClientTokenId","Message":"bad token"}}"#,
            ),
            "caller identity",
        );
        match err {
            InventoryError::Authentication(msg) => assert!(msg.contains("bad token")),
            other => panic!("Expected Authentication, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_uses_error_type_header() {
        let response = RawResponse {
            status: 400,
            error_type: Some("AccessDeniedException:http://internal".to_string()),
            body: String::new(),
        };
        match classify_error(&response, "accounts") {
            InventoryError::Api { code, message, .. } => {
                assert_eq!(code, "AccessDeniedException");
                assert!(message.contains("accounts"));
            }
            other => panic!("Expected Api, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_empty_body() {
        match classify_error(&raw(500, ""), "groups") {
            InventoryError::Api { status, code, .. } => {
                assert_eq!(status, 500);
                assert_eq!(code, "UnknownError");
            }
            other => panic!("Expected Api, got {:?}", other),
        }
    }
}
