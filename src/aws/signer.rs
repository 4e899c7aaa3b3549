//! AWS Signature Version 4 request signing

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::aws::credentials::Credentials;
use crate::error::{InventoryError, Result};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Everything needed to sign one request
pub struct SigningParams<'a> {
    pub credentials: &'a Credentials,
    pub region: &'a str,
    pub service: &'a str,
    pub time: DateTime<Utc>,
}

/// A request as seen by the signer
pub struct SignableRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    /// Headers to sign; must include `host`
    pub headers: &'a [(&'a str, &'a str)],
    pub payload: &'a [u8],
}

/// Sign a request and return the headers to attach to it
/// (`x-amz-date`, optional `x-amz-security-token`, `authorization`).
pub fn sign_request(
    params: &SigningParams<'_>,
    request: &SignableRequest<'_>,
) -> Result<Vec<(String, String)>> {
    let amz_date = params.time.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = params.time.format("%Y%m%d").to_string();

    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
        .collect();
    headers.push(("x-amz-date".to_string(), amz_date.clone()));
    if let Some(token) = &params.credentials.session_token {
        headers.push(("x-amz-security-token".to_string(), token.clone()));
    }
    headers.sort_by(|a, b| a.0.cmp(&b.0));

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method,
        request.path,
        request.query,
        canonical_headers,
        signed_headers,
        hex::encode(Sha256::digest(request.payload))
    );

    let scope = format!(
        "{}/{}/{}/aws4_request",
        date_stamp, params.region, params.service
    );
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(
        &params.credentials.secret_access_key,
        &date_stamp,
        params.region,
        params.service,
    )?;
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, params.credentials.access_key_id, scope, signed_headers, signature
    );

    let mut result = vec![("x-amz-date".to_string(), amz_date)];
    if let Some(token) = &params.credentials.session_token {
        result.push(("x-amz-security-token".to_string(), token.clone()));
    }
    result.push(("authorization".to_string(), authorization));
    Ok(result)
}

/// Derive the SigV4 signing key for a date/region/service scope
pub fn signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Result<Vec<u8>> {
    let k_date = hmac(format!("AWS4{}", secret).as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, service.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| InventoryError::Authentication(format!("Invalid signing key: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
