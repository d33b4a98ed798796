use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A supplier listing normalized from either supplier's wire shape.
///
/// Every field is optional because suppliers routinely omit them; the
/// bad-product predicate decides what is importable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierProduct {
    pub title: Option<String>,
    pub sku: Option<String>,
    /// Supplier sell price in store currency.
    pub price: Option<Decimal>,
    /// Units on hand. `None` means the supplier has no stock concept and the
    /// item is treated as in stock.
    pub stock: Option<u32>,
    /// Image URLs in supplier order.
    pub images: Vec<String>,
    pub vendor: Option<String>,
    /// Raw HTML description.
    pub description: Option<String>,
}

impl SupplierProduct {
    /// SKU with surrounding whitespace removed, `None` when blank.
    #[must_use]
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Title for log lines; never empty.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("<untitled>")
    }
}

/// Catalog listing status written on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStatus {
    Active,
    Draft,
}

impl std::fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogStatus::Active => write!(f, "active"),
            CatalogStatus::Draft => write!(f, "draft"),
        }
    }
}

/// Body of a catalog product creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCatalogProduct {
    pub title: String,
    pub body_html: String,
    pub vendor: String,
    pub status: CatalogStatus,
    pub tags: Vec<String>,
    pub variants: Vec<NewCatalogVariant>,
    pub images: Vec<NewCatalogImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCatalogVariant {
    /// Two-decimal price string, e.g. `"13.50"`.
    pub price: String,
    pub sku: String,
    pub inventory_quantity: u32,
    pub inventory_management: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCatalogImage {
    pub src: String,
}
