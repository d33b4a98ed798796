//! Shopify Admin REST API shapes for products and collects.
//!
//! ### Tags
//! The Admin API returns `tags` as a single comma-separated string
//! (`"Skincare, imported"`), while the storefront `products.json` returns a
//! JSON array. Both are accepted and split into a `Vec<String>`.
//!
//! ### SKUs
//! Variant `sku` may be `null` or `""` on manually created products. Neither
//! takes part in duplicate detection or retirement.

use serde::{Deserialize, Deserializer, Serialize};

use autosync_core::NewCatalogProduct;

/// Response from `GET products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

/// Response from `POST products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub product: CatalogProduct,
}

/// Request body for `POST products.json`.
#[derive(Debug, Serialize)]
pub struct ProductRequest<'a> {
    pub product: &'a NewCatalogProduct,
}

/// A product as stored in the destination catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    /// Shopify numeric product ID.
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub body_html: Option<String>,

    #[serde(default)]
    pub vendor: Option<String>,

    /// `"active"`, `"draft"`, or `"archived"`.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub variants: Vec<CatalogVariant>,

    #[serde(default)]
    pub images: Vec<CatalogImage>,
}

impl CatalogProduct {
    /// Non-blank variant SKUs, trimmed, in variant order.
    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.variants
            .iter()
            .filter_map(|v| v.sku.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `true` if any variant carries `sku`, ignoring case.
    #[must_use]
    pub fn has_sku(&self, sku: &str) -> bool {
        let wanted = sku.trim().to_lowercase();
        !wanted.is_empty() && self.skus().any(|s| s.to_lowercase() == wanted)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogVariant {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub sku: Option<String>,

    /// Decimal string, e.g. `"20.00"`.
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub inventory_quantity: Option<i64>,

    #[serde(default)]
    pub inventory_management: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogImage {
    #[serde(default)]
    pub id: Option<u64>,
    pub src: String,
}

/// Links a product to a custom collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub product_id: u64,
    pub collection_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectEnvelope {
    pub collect: Collect,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTags>::deserialize(deserializer)?;
    let tags = match raw {
        None => Vec::new(),
        Some(RawTags::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(RawTags::List(list)) => list
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    };
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(value: serde_json::Value) -> CatalogProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn tags_accept_comma_separated_string() {
        let p = product(json!({"id": 1, "tags": "Skincare, imported ,"}));
        assert_eq!(p.tags, vec!["Skincare", "imported"]);
    }

    #[test]
    fn tags_accept_array_and_null() {
        let p = product(json!({"id": 1, "tags": ["Skincare"]}));
        assert_eq!(p.tags, vec!["Skincare"]);
        let p = product(json!({"id": 2, "tags": null}));
        assert!(p.tags.is_empty());
    }

    #[test]
    fn has_sku_ignores_case_and_blank_variants() {
        let p = product(json!({
            "id": 9,
            "variants": [{"sku": null}, {"sku": ""}, {"sku": "HFS-1"}]
        }));
        assert!(p.has_sku("hfs-1"));
        assert!(!p.has_sku(""));
        assert_eq!(p.skus().collect::<Vec<_>>(), vec!["HFS-1"]);
    }

    #[test]
    fn collect_omits_missing_id_when_serialized() {
        let body = serde_json::to_value(CollectEnvelope {
            collect: Collect {
                id: None,
                product_id: 1,
                collection_id: 555,
            },
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"collect": {"product_id": 1, "collection_id": 555}})
        );
    }
}
