//! Destination-catalog duplicate checks.
//!
//! Lookup errors are logged and answered as "not found": a failed check may
//! let a duplicate through, but never stops the run.

use std::collections::HashMap;

use autosync_core::LookupMode;
use autosync_shopify::ShopifyAdminClient;

pub(crate) enum CatalogLookup {
    /// Page through the catalog for every candidate SKU.
    Scan,
    /// Lower-cased SKU → product id, built from one listing per run.
    Index(HashMap<String, u64>),
}

impl CatalogLookup {
    /// Builds the lookup for `mode`. Index mode lists the whole catalog once;
    /// a failed listing yields an empty index.
    pub(crate) async fn prepare(
        mode: LookupMode,
        shopify: &ShopifyAdminClient,
        page_size: u32,
    ) -> Self {
        match mode {
            LookupMode::Scan => CatalogLookup::Scan,
            LookupMode::Index => {
                let index = match shopify.list_all(page_size).await {
                    Ok(products) => {
                        let mut index = HashMap::new();
                        for product in &products {
                            for sku in product.skus() {
                                index.entry(sku.to_lowercase()).or_insert(product.id);
                            }
                        }
                        tracing::debug!(
                            products = products.len(),
                            skus = index.len(),
                            "catalog SKU index built"
                        );
                        index
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "catalog listing failed; duplicate checks will find nothing");
                        HashMap::new()
                    }
                };
                CatalogLookup::Index(index)
            }
        }
    }

    /// Id of a catalog product carrying `sku` (ignoring case), if any.
    pub(crate) async fn existing_product(
        &self,
        shopify: &ShopifyAdminClient,
        sku: &str,
        page_size: u32,
    ) -> Option<u64> {
        match self {
            CatalogLookup::Index(index) => index.get(&sku.trim().to_lowercase()).copied(),
            CatalogLookup::Scan => match shopify.find_by_sku(sku, page_size).await {
                Ok(found) => found.map(|p| p.id),
                Err(e) => {
                    tracing::error!(sku, error = %e, "catalog SKU lookup failed; treating as not found");
                    None
                }
            },
        }
    }

    /// Keeps the index current with products created during the run.
    pub(crate) fn record(&mut self, sku: &str, product_id: u64) {
        if let CatalogLookup::Index(index) = self {
            index.insert(sku.trim().to_lowercase(), product_id);
        }
    }
}
