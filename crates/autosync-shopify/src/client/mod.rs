//! HTTP client for the Shopify Admin REST API.

mod catalog;
mod write;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ShopifyError;

pub use catalog::PageRequest;

/// Maximum number of listing pages walked before giving up.
/// Guards against stores that keep returning the same cursor.
pub(super) const MAX_PAGES: usize = 400;

/// Response bodies quoted in [`ShopifyError::Rejected`] are cut to this many
/// characters.
const ERROR_BODY_LIMIT: usize = 500;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for the Admin REST endpoints the sync needs: product listing,
/// product creation, collects, and product deletion.
///
/// Every call is a single attempt. Non-2xx responses become typed errors;
/// callers decide whether to skip or abort.
pub struct ShopifyAdminClient {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl std::fmt::Debug for ShopifyAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminClient")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl ShopifyAdminClient {
    /// Creates a client rooted at `base_url`, normally
    /// `https://{store}/admin/api/{version}`; tests point it at a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ShopifyError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `Url::join` append to the version segment
        // instead of replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ShopifyError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ShopifyError::InvalidBaseUrl {
                base_url: normalised,
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
        })
    }

    /// Resolves `path` (e.g. `"products.json"`) against the API root.
    fn endpoint(&self, path: &str) -> Result<Url, ShopifyError> {
        self.base_url
            .join(path)
            .map_err(|e| ShopifyError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Maps non-2xx statuses to [`ShopifyError`] variants.
    async fn ensure_success(response: Response, url: &Url) -> Result<Response, ShopifyError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ShopifyError::RateLimited {
                retry_after_secs: retry_after_secs(response.headers()),
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ShopifyError::NotFound {
                url: url.to_string(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(ShopifyError::Rejected {
            status: status.as_u16(),
            url: url.to_string(),
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        })
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, ShopifyError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ShopifyError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Parses `Retry-After`, which Shopify sends as fractional seconds
/// (`"2.0"`). Defaults to 2 seconds, Shopify's leak rate for one request.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map_or(2, |secs| secs.ceil() as u64)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
