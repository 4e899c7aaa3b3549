use std::fmt;

/// Error type for inventory operations
#[derive(Debug)]
pub enum InventoryError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Service returned an error response
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// Credentials are missing or were rejected by the service
    Authentication(String),
    /// Failed to read or parse the shared credentials file
    Credentials(String),
    /// Service response is missing required fields or is malformed
    InvalidResponse(String),
    /// Report could not be rendered
    Serialization(String),
    /// Report could not be written
    Io(String),
    /// Configuration error
    Config(String),
}

impl InventoryError {
    /// True when the service rejected the call because of request rate
    pub fn is_throttling(&self) -> bool {
        match self {
            InventoryError::Api { status, code, .. } => {
                *status == 429
                    || code.contains("Throttling")
                    || code.contains("TooManyRequests")
            }
            _ => false,
        }
    }
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryError::Http(e) => write!(f, "HTTP request failed: {}", e),
            InventoryError::Api {
                status,
                code,
                message,
            } => {
                write!(f, "API error (status {}, {}): {}", status, code, message)
            }
            InventoryError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            InventoryError::Credentials(msg) => write!(f, "{}", msg),
            InventoryError::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
            InventoryError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            InventoryError::Io(msg) => write!(f, "I/O error: {}", msg),
            InventoryError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for InventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InventoryError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for InventoryError {
    fn from(err: reqwest::Error) -> Self {
        InventoryError::Http(err)
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Serialization(err.to_string())
    }
}

impl From<serde_yml::Error> for InventoryError {
    fn from(err: serde_yml::Error) -> Self {
        InventoryError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        InventoryError::Io(err.to_string())
    }
}

/// Result type alias for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
