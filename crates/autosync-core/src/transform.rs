//! Supplier record → catalog creation payload. Pure; no I/O.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::products::{
    CatalogStatus, NewCatalogImage, NewCatalogProduct, NewCatalogVariant, SupplierProduct,
};

/// Longest title written to the catalog before the ellipsis.
pub const MAX_TITLE_CHARS: usize = 60;

const ELLIPSIS: &str = "...";

/// Shopify's own inventory tracking mode.
const INVENTORY_MANAGEMENT: &str = "shopify";

/// Run-wide knobs for [`to_create_payload`], taken from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOptions {
    /// When set, price = round(supplier price × margin, 2).
    pub margin_multiplier: Option<Decimal>,
    /// When set, replaces the classified tag.
    pub fixed_tags: Option<Vec<String>>,
    /// Inventory written when the supplier reports no stock figure.
    pub default_inventory: u32,
    /// Vendor written when the supplier record has none.
    pub default_vendor: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            margin_multiplier: None,
            fixed_tags: None,
            default_inventory: 100,
            default_vendor: "AutoDS Supplier".to_string(),
        }
    }
}

/// Collapses runs of whitespace, trims, and truncates to
/// [`MAX_TITLE_CHARS`] characters followed by `...`.
#[must_use]
pub fn shorten_title(title: &str) -> String {
    let clean = title.split_whitespace().collect::<Vec<_>>().join(" ");
    if clean.chars().count() > MAX_TITLE_CHARS {
        let mut short: String = clean.chars().take(MAX_TITLE_CHARS).collect();
        short.push_str(ELLIPSIS);
        short
    } else {
        clean
    }
}

/// Applies the optional margin and renders exactly two decimals.
///
/// Returns `None` when the marked-up price overflows `Decimal`.
#[must_use]
pub fn format_price(price: Decimal, margin_multiplier: Option<Decimal>) -> Option<String> {
    let marked_up = match margin_multiplier {
        Some(m) => price.checked_mul(m)?,
        None => price,
    };
    let rounded = marked_up.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Some(format!("{rounded:.2}"))
}

/// Builds the catalog creation payload for a product that passed the policy
/// checks and was classified as `tag`.
///
/// Returns `None` when the price cannot be represented after the margin is
/// applied.
#[must_use]
pub fn to_create_payload(
    product: &SupplierProduct,
    tag: &str,
    options: &TransformOptions,
) -> Option<NewCatalogProduct> {
    let raw_title = product.title.as_deref().unwrap_or_default();
    let title = shorten_title(raw_title);

    let body_html = product
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map_or_else(|| format!("<p>{raw_title}</p>"), str::to_string);

    let price = format_price(
        product.price.unwrap_or(Decimal::ZERO),
        options.margin_multiplier,
    )?;

    let status = if product.stock == Some(0) {
        CatalogStatus::Draft
    } else {
        CatalogStatus::Active
    };

    let tags = options
        .fixed_tags
        .clone()
        .unwrap_or_else(|| vec![tag.to_string()]);

    let vendor = product
        .vendor
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(&options.default_vendor)
        .to_string();

    let variant = NewCatalogVariant {
        price,
        sku: product.sku().unwrap_or_default().to_string(),
        inventory_quantity: product.stock.unwrap_or(options.default_inventory),
        inventory_management: INVENTORY_MANAGEMENT.to_string(),
    };

    let images = product
        .images
        .iter()
        .filter(|src| !src.trim().is_empty())
        .map(|src| NewCatalogImage { src: src.clone() })
        .collect();

    Some(NewCatalogProduct {
        title,
        body_html,
        vendor,
        status,
        tags,
        variants: vec![variant],
        images,
    })
}
