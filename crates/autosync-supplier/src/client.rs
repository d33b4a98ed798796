//! HTTP client for the supplier product listing APIs.
//!
//! One [`SupplierClient`] talks to one supplier, chosen by [`SupplierKind`].
//! Listings are fetched in a single request; individual entries that fail to
//! decode are logged and dropped rather than failing the whole fetch.

use std::time::Duration;

use autosync_core::{SupplierKind, SupplierProduct};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SupplierError;
use crate::normalize::normalize_product;
use crate::types::{AutodsListResponse, AutodsProduct, CjListResponse, CjProduct, RawSupplierProduct};

const AUTODS_PRODUCTS_PATH: &str = "v1/products";
const CJ_PRODUCTS_PATH: &str = "api2.0/v1/product/list";
const CJ_TOKEN_HEADER: &str = "CJ-Access-Token";
const ERROR_BODY_LIMIT: usize = 500;

/// Client for a supplier's product listing endpoint.
///
/// Use [`SupplierClient::new`] for production or
/// [`SupplierClient::with_base_url`] to point at a mock server in tests.
pub struct SupplierClient {
    client: Client,
    kind: SupplierKind,
    token: String,
    base_url: Url,
}

impl std::fmt::Debug for SupplierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplierClient")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl SupplierClient {
    /// Creates a client pointed at the supplier's production API.
    ///
    /// # Errors
    ///
    /// Returns [`SupplierError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        kind: SupplierKind,
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SupplierError> {
        Self::with_base_url(kind, token, timeout_secs, user_agent, kind.default_base_url())
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SupplierError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SupplierError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        kind: SupplierKind,
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SupplierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Trailing slash so joined paths land under any base path prefix.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SupplierError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SupplierError::InvalidBaseUrl {
                base_url: normalised,
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            kind,
            token: token.to_owned(),
            base_url,
        })
    }

    #[must_use]
    pub fn kind(&self) -> SupplierKind {
        self.kind
    }

    /// Full URL of this supplier's product listing endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SupplierError::InvalidBaseUrl`] if the path cannot be joined.
    pub fn products_url(&self) -> Result<Url, SupplierError> {
        let path = match self.kind {
            SupplierKind::AutoDs => AUTODS_PRODUCTS_PATH,
            SupplierKind::Cj => CJ_PRODUCTS_PATH,
        };
        self.base_url
            .join(path)
            .map_err(|e| SupplierError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    /// Fetches the supplier's product listing, normalized.
    ///
    /// # Errors
    ///
    /// - [`SupplierError::Http`] on network failure.
    /// - [`SupplierError::Rejected`] on a non-2xx status.
    /// - [`SupplierError::ApiError`] when CJ answers `"result": false`.
    /// - [`SupplierError::Deserialize`] if the envelope does not match the
    ///   expected shape.
    pub async fn fetch_products(&self) -> Result<Vec<SupplierProduct>, SupplierError> {
        let raw = match self.kind {
            SupplierKind::AutoDs => self.fetch_autods().await?,
            SupplierKind::Cj => self.fetch_cj().await?,
        };

        tracing::debug!(supplier = %self.kind, count = raw.len(), "supplier listing decoded");
        Ok(raw.into_iter().map(normalize_product).collect())
    }

    async fn fetch_autods(&self) -> Result<Vec<RawSupplierProduct>, SupplierError> {
        let url = self.products_url()?;
        let request = self.client.get(url.clone()).bearer_auth(&self.token);
        let envelope: AutodsListResponse = self.request_json(request, &url).await?;

        Ok(decode_entries::<AutodsProduct>(envelope.products, "AutoDS")
            .map(RawSupplierProduct::AutoDs)
            .collect())
    }

    async fn fetch_cj(&self) -> Result<Vec<RawSupplierProduct>, SupplierError> {
        let url = self.products_url()?;
        let request = self
            .client
            .get(url.clone())
            .header(CJ_TOKEN_HEADER, &self.token);
        let envelope: CjListResponse = self.request_json(request, &url).await?;

        if envelope.result == Some(false) {
            let message = envelope
                .message
                .unwrap_or_else(|| "unknown error".to_owned());
            let code = envelope
                .code
                .map_or_else(String::new, |c| format!(" (code {c})"));
            return Err(SupplierError::ApiError(format!("{message}{code}")));
        }

        let list = envelope.data.unwrap_or_default().list;
        Ok(decode_entries::<CjProduct>(list, "CJ")
            .map(RawSupplierProduct::Cj)
            .collect())
    }

    /// Sends the request, asserts a 2xx status, and parses the body.
    async fn request_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, SupplierError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SupplierError::Rejected {
                status: status.as_u16(),
                url: url.to_string(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SupplierError::Deserialize {
            context: format!("{} product listing", self.kind),
            source: e,
        })
    }
}

/// Decodes each listing entry on its own, skipping entries that do not fit
/// the record shape.
fn decode_entries<T: DeserializeOwned>(
    entries: Vec<Value>,
    supplier: &'static str,
) -> impl Iterator<Item = T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(move |(index, entry)| match serde_json::from_value::<T>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(supplier, index, error = %e, "skipping undecodable supplier entry");
                None
            }
        })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
