//! Supplier API response types.
//!
//! Supplier payloads are loosely typed: prices arrive as numbers or strings,
//! SKUs sometimes as bare integers, images as URLs or `{ "src": ... }`
//! objects. Those fields are kept as [`serde_json::Value`] or lenient enums
//! here and tightened in [`crate::normalize`].

use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// AutoDS
// ---------------------------------------------------------------------------

/// Envelope for `GET /v1/products`: `{ "products": [ ... ] }`.
///
/// Entries stay raw so one malformed product does not fail the listing.
#[derive(Debug, Deserialize)]
pub struct AutodsListResponse {
    #[serde(default)]
    pub products: Vec<Value>,
}

/// One AutoDS product as listed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutodsProduct {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sku: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub stock: Option<Value>,
    #[serde(default)]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
}

// ---------------------------------------------------------------------------
// CJ Dropshipping
// ---------------------------------------------------------------------------

/// Envelope for `GET /api2.0/v1/product/list`.
///
/// `result` is `false` (with a `message`) when CJ refuses the call even
/// though the HTTP status is 200.
#[derive(Debug, Deserialize)]
pub struct CjListResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub result: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<CjListData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CjListData {
    #[serde(default)]
    pub list: Vec<Value>,
}

/// One CJ product as listed. CJ has no stock figure on list entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CjProduct {
    #[serde(default, alias = "productName", alias = "title")]
    pub product_name_en: Option<String>,
    #[serde(default, alias = "sku")]
    pub product_sku: Option<Value>,
    #[serde(default)]
    pub sell_price: Option<Value>,
    #[serde(default)]
    pub image_urls: Option<Vec<ImageRef>>,
    /// Single main image, used when `imageUrls` is absent or empty.
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// An image as either a bare URL or an object carrying one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Object {
        #[serde(alias = "url")]
        src: String,
    },
}

impl ImageRef {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            ImageRef::Url(url) | ImageRef::Object { src: url } => url,
        }
    }
}

/// A supplier record in its source shape, before normalization.
#[derive(Debug, Clone)]
pub enum RawSupplierProduct {
    AutoDs(AutodsProduct),
    Cj(CjProduct),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_ref_accepts_string_and_objects() {
        let images: Vec<ImageRef> = serde_json::from_value(serde_json::json!([
            "https://cdn.example.com/a.jpg",
            { "src": "https://cdn.example.com/b.jpg" },
            { "url": "https://cdn.example.com/c.jpg" }
        ]))
        .unwrap();

        let urls: Vec<&str> = images.iter().map(ImageRef::url).collect();
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.com/a.jpg",
                "https://cdn.example.com/b.jpg",
                "https://cdn.example.com/c.jpg",
            ]
        );
    }

    #[test]
    fn cj_product_reads_camel_case_fields() {
        let product: CjProduct = serde_json::from_value(serde_json::json!({
            "productNameEn": "Silicone Face Brush",
            "productSku": "CJ-889",
            "sellPrice": "4.75",
            "productImage": "https://cdn.example.com/brush.jpg",
            "supplierName": "CJ Warehouse"
        }))
        .unwrap();

        assert_eq!(product.product_name_en.as_deref(), Some("Silicone Face Brush"));
        assert_eq!(product.supplier_name.as_deref(), Some("CJ Warehouse"));
        assert!(product.image_urls.is_none());
    }

    #[test]
    fn cj_envelope_tolerates_missing_data() {
        let envelope: CjListResponse = serde_json::from_value(serde_json::json!({
            "code": 1600200,
            "result": false,
            "message": "Invalid token"
        }))
        .unwrap();

        assert_eq!(envelope.result, Some(false));
        assert!(envelope.data.is_none());
    }
}
