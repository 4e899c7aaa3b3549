//! Common traits for AWS resources

/// Common trait for inventoried resources (accounts, OUs, principals, permission sets)
pub trait AwsResource {
    /// Get the resource ID (or ARN where the service keys by ARN)
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;
}

/// Trait for list responses paginated with an opaque `NextToken`
///
/// Implement this for any `List*Response` struct to use it with
/// `AwsClient::fetch_all_pages()`.
pub trait PaginatedResponse<T> {
    /// Consume self and return the page items
    fn into_data(self) -> Vec<T>;
    /// Continuation token; `None` (or empty) on the last page
    fn next_token(&self) -> Option<&str>;
}
