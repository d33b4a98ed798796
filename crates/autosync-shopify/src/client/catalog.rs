//! Paginated reads of the destination catalog.

use std::ops::ControlFlow;

use reqwest::Url;

use crate::error::ShopifyError;
use crate::pagination::extract_next_cursor;
use crate::types::{CatalogProduct, ProductsResponse};

use super::{ShopifyAdminClient, MAX_PAGES};

/// Which listing page to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// 1-based `page` query parameter.
    Number(u32),
    /// `page_info` cursor taken from a previous `Link` header.
    Cursor(String),
}

impl PageRequest {
    #[must_use]
    pub fn first() -> Self {
        PageRequest::Number(1)
    }
}

/// One listing page plus where to go next, if anywhere.
#[derive(Debug)]
pub struct CatalogPage {
    pub products: Vec<CatalogProduct>,
    pub next: Option<PageRequest>,
}

impl ShopifyAdminClient {
    /// Builds the `products.json` listing URL for a page.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidBaseUrl`] if the endpoint cannot be
    /// resolved against the base URL.
    pub fn products_url(&self, limit: u32, page: &PageRequest) -> Result<Url, ShopifyError> {
        let mut url = self.endpoint("products.json")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            match page {
                PageRequest::Number(n) => query.append_pair("page", &n.to_string()),
                PageRequest::Cursor(cursor) => query.append_pair("page_info", cursor),
            };
        }
        Ok(url)
    }

    /// Fetches a single listing page.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::RateLimited`] on HTTP 429.
    /// - [`ShopifyError::NotFound`] on HTTP 404.
    /// - [`ShopifyError::Rejected`] on any other non-2xx status.
    /// - [`ShopifyError::Http`] on network or TLS failure.
    /// - [`ShopifyError::Deserialize`] if the body is not a product listing.
    pub async fn list_page(
        &self,
        limit: u32,
        page: &PageRequest,
    ) -> Result<CatalogPage, ShopifyError> {
        let url = self.products_url(limit, page)?;
        let response = self
            .authorized(self.client.get(url.clone()))
            .send()
            .await?;
        let response = Self::ensure_success(response, &url).await?;

        // Read the Link header before the body consumes the response.
        let link_header = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let parsed: ProductsResponse = Self::read_json(response, "products listing").await?;
        let next = next_page(page, parsed.products.len(), link_header.as_deref());

        Ok(CatalogPage {
            products: parsed.products,
            next,
        })
    }

    /// Walks listing pages from the first, handing each non-empty page to
    /// `visit` until it breaks or pagination runs out.
    async fn walk_pages<F>(&self, limit: u32, mut visit: F) -> Result<(), ShopifyError>
    where
        F: FnMut(Vec<CatalogProduct>) -> ControlFlow<()>,
    {
        let mut page = PageRequest::first();
        let mut previous_first_id: Option<u64> = None;

        for _ in 0..MAX_PAGES {
            let CatalogPage { products, next } = self.list_page(limit, &page).await?;

            let first_id = products.first().map(|p| p.id);
            if first_id.is_none() {
                return Ok(());
            }
            // API versions without page-number support answer every `page`
            // with the first page again.
            if first_id == previous_first_id {
                tracing::debug!(?page, "catalog page repeated, treating as end of listing");
                return Ok(());
            }
            previous_first_id = first_id;

            if visit(products).is_break() {
                return Ok(());
            }

            match next {
                Some(next) => page = next,
                None => return Ok(()),
            }
        }

        Err(ShopifyError::PaginationLimit {
            max_pages: MAX_PAGES,
        })
    }

    /// Lists every product in the catalog.
    ///
    /// **All-or-nothing**: a failure on any page discards earlier pages and
    /// returns the error, so callers never act on a partial listing.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::list_page`], or
    /// [`ShopifyError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn list_all(&self, limit: u32) -> Result<Vec<CatalogProduct>, ShopifyError> {
        let mut all = Vec::new();
        self.walk_pages(limit, |products| {
            all.extend(products);
            ControlFlow::Continue(())
        })
        .await?;
        Ok(all)
    }

    /// Pages through the catalog until a product with a variant carrying
    /// `sku` (ignoring case) is found. Stops at the first match.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_all`].
    pub async fn find_by_sku(
        &self,
        sku: &str,
        limit: u32,
    ) -> Result<Option<CatalogProduct>, ShopifyError> {
        let mut found = None;
        self.walk_pages(limit, |products| {
            match products.into_iter().find(|p| p.has_sku(sku)) {
                Some(product) => {
                    found = Some(product);
                    ControlFlow::Break(())
                }
                None => ControlFlow::Continue(()),
            }
        })
        .await?;
        Ok(found)
    }
}

/// Decides the follow-up request for a page that returned `count` products.
///
/// A `Link` header means cursor pagination: follow its `rel="next"` or stop.
/// Without one, keep counting pages until an empty page; a short page is not
/// proof the listing ended.
pub(crate) fn next_page(
    current: &PageRequest,
    count: usize,
    link_header: Option<&str>,
) -> Option<PageRequest> {
    if count == 0 {
        return None;
    }
    if link_header.is_some() {
        return extract_next_cursor(link_header).map(PageRequest::Cursor);
    }
    match current {
        PageRequest::Number(n) => Some(PageRequest::Number(n + 1)),
        PageRequest::Cursor(_) => None,
    }
}
