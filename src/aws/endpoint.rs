//! Service endpoints and region resolution

use log::debug;
use std::fmt;

use crate::config::{api, defaults, region as region_config};

/// AWS services the inventory talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Organizations,
    IdentityStore,
    SsoAdmin,
    Sts,
}

impl Service {
    /// Service name used in the SigV4 credential scope
    pub fn signing_name(&self) -> &'static str {
        match self {
            Service::Organizations => "organizations",
            Service::IdentityStore => "identitystore",
            Service::SsoAdmin => "sso",
            Service::Sts => "sts",
        }
    }

    /// X-Amz-Target prefix for JSON protocol services
    pub fn target_prefix(&self) -> Option<&'static str> {
        match self {
            Service::Organizations => Some(api::ORGANIZATIONS_TARGET),
            Service::IdentityStore => Some(api::IDENTITY_STORE_TARGET),
            Service::SsoAdmin => Some(api::SSO_ADMIN_TARGET),
            Service::Sts => None,
        }
    }

    /// Region used to sign requests; Organizations is served from us-east-1 only
    pub fn signing_region<'a>(&self, region: &'a str) -> &'a str {
        match self {
            Service::Organizations => api::ORGANIZATIONS_REGION,
            _ => region,
        }
    }

    /// Default HTTPS endpoint for the service in a region
    pub fn endpoint(&self, region: &str) -> String {
        format!(
            "https://{}.{}.amazonaws.com/",
            self.signing_name(),
            self.signing_region(region)
        )
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Organizations => write!(f, "Organizations"),
            Service::IdentityStore => write!(f, "Identity Store"),
            Service::SsoAdmin => write!(f, "SSO Admin"),
            Service::Sts => write!(f, "STS"),
        }
    }
}

/// Resolve region from multiple sources with fallback:
/// 1. CLI argument or AWS_REGION (both arrive through clap)
/// 2. AWS_DEFAULT_REGION
/// 3. Built-in default
pub fn resolve_region(cli_region: Option<&str>) -> String {
    resolve_region_with_env(cli_region, |name| std::env::var(name).ok())
}

fn resolve_region_with_env<F>(cli_region: Option<&str>, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(region) = cli_region.filter(|r| !r.is_empty()) {
        debug!("Using region from CLI/AWS_REGION: {}", region);
        return region.to_string();
    }

    let default_region = env(region_config::DEFAULT_REGION_ENV_VAR);
    if let Some(region) = default_region.filter(|r| !r.is_empty()) {
        debug!(
            "Using region from {} environment variable: {}",
            region_config::DEFAULT_REGION_ENV_VAR,
            region
        );
        return region;
    }

    debug!("No region configured, using default {}", defaults::REGION);
    defaults::REGION.to_string()
}
