use thiserror::Error;

/// Errors returned by the supplier API clients.
#[derive(Debug, Error)]
pub enum SupplierError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `body` is truncated.
    #[error("supplier rejected {url} with HTTP {status}: {body}")]
    Rejected {
        status: u16,
        url: String,
        body: String,
    },

    /// The supplier answered 2xx but flagged the call as failed in its
    /// envelope (CJ `"result": false`).
    #[error("supplier API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid supplier base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
