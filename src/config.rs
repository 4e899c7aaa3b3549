/// Configuration constants for the AWS wire protocol
pub mod api {
    /// Content type for JSON 1.1 protocol requests
    pub const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

    /// Content type for query protocol requests (STS)
    pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

    /// X-Amz-Target prefix for AWS Organizations
    pub const ORGANIZATIONS_TARGET: &str = "AWSOrganizationsV20161128";

    /// X-Amz-Target prefix for the Identity Store
    pub const IDENTITY_STORE_TARGET: &str = "AWSIdentityStore";

    /// X-Amz-Target prefix for SSO admin (IAM Identity Center)
    pub const SSO_ADMIN_TARGET: &str = "SWBExternalService";

    /// STS query API version
    pub const STS_VERSION: &str = "2011-06-15";

    /// Region that signs every Organizations request
    pub const ORGANIZATIONS_REGION: &str = "us-east-1";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Access key environment variable
    pub const ACCESS_KEY_ENV_VAR: &str = "AWS_ACCESS_KEY_ID";

    /// Secret key environment variable
    pub const SECRET_KEY_ENV_VAR: &str = "AWS_SECRET_ACCESS_KEY";

    /// Session token environment variable
    pub const SESSION_TOKEN_ENV_VAR: &str = "AWS_SESSION_TOKEN";

    /// Overrides the shared credentials file location
    pub const FILE_ENV_VAR: &str = "AWS_SHARED_CREDENTIALS_FILE";

    /// Path to the shared credentials file (relative to HOME)
    pub const FILE_PATH: &str = ".aws/credentials";

    /// Profile used when none is given
    pub const DEFAULT_PROFILE: &str = "default";
}

/// Configuration constants for region resolution
pub mod region {
    /// Fallback environment variable (AWS_REGION is read by clap)
    pub const DEFAULT_REGION_ENV_VAR: &str = "AWS_DEFAULT_REGION";
}

/// Default values for CLI
pub mod defaults {
    /// Default AWS region
    pub const REGION: &str = "us-east-1";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Directory reports are written to
    pub const OUTPUT_DIR: &str = "output";

    /// Separator between OU names in a rendered path
    pub const PATH_SEPARATOR: &str = "/";

    /// Timestamp format used in report file names
    pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

    /// Timestamp format used inside reports
    pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
}
