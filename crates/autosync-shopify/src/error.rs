use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by Shopify (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("Shopify rejected {url} with HTTP {status}: {body}")]
    Rejected {
        status: u16,
        url: String,
        body: String,
    },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("invalid Admin API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
