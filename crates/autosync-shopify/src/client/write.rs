//! Catalog mutations: product creation, collection membership, deletion.

use autosync_core::NewCatalogProduct;

use crate::error::ShopifyError;
use crate::types::{CatalogProduct, Collect, CollectEnvelope, ProductRequest, ProductResponse};

use super::ShopifyAdminClient;

impl ShopifyAdminClient {
    /// Creates a product and returns it as stored, including its new id.
    ///
    /// # Errors
    ///
    /// [`ShopifyError::Rejected`] carries Shopify's validation message
    /// (HTTP 422) when the payload is refused.
    pub async fn create_product(
        &self,
        product: &NewCatalogProduct,
    ) -> Result<CatalogProduct, ShopifyError> {
        let url = self.endpoint("products.json")?;
        let response = self
            .authorized(self.client.post(url.clone()))
            .json(&ProductRequest { product })
            .send()
            .await?;
        let response = Self::ensure_success(response, &url).await?;
        let created: ProductResponse = Self::read_json(response, "created product").await?;
        Ok(created.product)
    }

    /// Adds a product to a custom collection via `POST collects.json`.
    ///
    /// # Errors
    ///
    /// Same status mapping as [`Self::create_product`].
    pub async fn add_to_collection(
        &self,
        product_id: u64,
        collection_id: u64,
    ) -> Result<Collect, ShopifyError> {
        let url = self.endpoint("collects.json")?;
        let body = CollectEnvelope {
            collect: Collect {
                id: None,
                product_id,
                collection_id,
            },
        };
        let response = self
            .authorized(self.client.post(url.clone()))
            .json(&body)
            .send()
            .await?;
        let response = Self::ensure_success(response, &url).await?;
        let created: CollectEnvelope = Self::read_json(response, "created collect").await?;
        Ok(created.collect)
    }

    /// Deletes a product by id.
    ///
    /// # Errors
    ///
    /// [`ShopifyError::NotFound`] when the product no longer exists.
    pub async fn delete_product(&self, product_id: u64) -> Result<(), ShopifyError> {
        let url = self.endpoint(&format!("products/{product_id}.json"))?;
        let response = self
            .authorized(self.client.delete(url.clone()))
            .send()
            .await?;
        Self::ensure_success(response, &url).await?;
        Ok(())
    }
}
