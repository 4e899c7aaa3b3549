//! AWS credential resolution from multiple sources

use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::credentials;
use crate::error::{InventoryError, Result};

/// Static AWS credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id,
            secret_access_key,
            session_token,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Credential resolution with fallback logic
pub struct CredentialResolver {
    profile: String,
    credentials_file: Option<PathBuf>,
}

impl CredentialResolver {
    /// Create a resolver for the given profile (defaults to `default`)
    pub fn new(profile: Option<&str>) -> Self {
        Self {
            profile: profile
                .unwrap_or(credentials::DEFAULT_PROFILE)
                .to_string(),
            credentials_file: None,
        }
    }

    /// Use an explicit shared credentials file instead of the default location
    pub fn with_credentials_file(mut self, path: PathBuf) -> Self {
        self.credentials_file = Some(path);
        self
    }

    /// Resolve credentials from multiple sources with fallback:
    /// 1. Environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN)
    /// 2. Shared credentials file, section of the selected profile
    pub fn resolve(&self) -> Result<Credentials> {
        self.resolve_with_env(|name| std::env::var(name).ok())
    }

    fn resolve_with_env<F>(&self, env: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| env(name).filter(|v| !v.is_empty());

        if let (Some(key), Some(secret)) = (
            non_empty(credentials::ACCESS_KEY_ENV_VAR),
            non_empty(credentials::SECRET_KEY_ENV_VAR),
        ) {
            debug!(
                "Using credentials from {} environment variable",
                credentials::ACCESS_KEY_ENV_VAR
            );
            return Ok(Credentials::new(
                key,
                secret,
                non_empty(credentials::SESSION_TOKEN_ENV_VAR),
            ));
        }

        let path = self
            .credentials_file
            .clone()
            .or_else(|| non_empty(credentials::FILE_ENV_VAR).map(PathBuf::from))
            .or_else(|| dirs::home_dir().map(|home| home.join(credentials::FILE_PATH)))
            .ok_or_else(|| InventoryError::Authentication(self.not_found_message(None)))?;

        self.read_from_credentials_file(&path)
    }

    /// Read the selected profile from a shared credentials file
    fn read_from_credentials_file(&self, path: &Path) -> Result<Credentials> {
        debug!("Looking for credentials file at: {}", path.display());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                return Err(InventoryError::Authentication(
                    self.not_found_message(Some(path)),
                ))
            }
        };

        let section = parse_profile(&content, &self.profile)
            .ok_or_else(|| InventoryError::Authentication(self.not_found_message(Some(path))))?;

        let field = |key: &str| {
            section.get(key).cloned().ok_or_else(|| {
                InventoryError::Credentials(format!(
                    "Profile '{}' in {} has no {}",
                    self.profile,
                    path.display(),
                    key
                ))
            })
        };

        debug!(
            "Using credentials for profile '{}' from {}",
            self.profile,
            path.display()
        );
        Ok(Credentials::new(
            field("aws_access_key_id")?,
            field("aws_secret_access_key")?,
            section.get("aws_session_token").cloned(),
        ))
    }

    fn not_found_message(&self, path: Option<&Path>) -> String {
        let file_info = path
            .map(|p| format!(" or in profile '{}' of {}", self.profile, p.display()))
            .unwrap_or_default();

        format!(
            "No AWS credentials found. Provide them using one of:\n\
             \n\
             1. Environment vars:  export {}=... {}=... [{}=...]\n\
             2. Shared file:       ~/.aws/credentials (select with --profile)\n\
             \n\
             Checked: env vars{}",
            credentials::ACCESS_KEY_ENV_VAR,
            credentials::SECRET_KEY_ENV_VAR,
            credentials::SESSION_TOKEN_ENV_VAR,
            file_info
        )
    }
}

/// Extract the key/value pairs of one `[profile]` section of an INI file
fn parse_profile(content: &str, profile: &str) -> Option<HashMap<String, String>> {
    let mut current: Option<&str> = None;
    let mut found = false;
    let mut values = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim();
            current = Some(name);
            found |= name == profile;
            continue;
        }
        if current != Some(profile) {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    found.then_some(values)
}
