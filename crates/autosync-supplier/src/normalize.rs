//! Normalization of supplier API records into [`SupplierProduct`].

use std::str::FromStr;

use autosync_core::SupplierProduct;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::types::{AutodsProduct, CjProduct, ImageRef, RawSupplierProduct};

/// Converts either supplier shape into the shared product record.
#[must_use]
pub fn normalize_product(raw: RawSupplierProduct) -> SupplierProduct {
    match raw {
        RawSupplierProduct::AutoDs(p) => normalize_autods(p),
        RawSupplierProduct::Cj(p) => normalize_cj(p),
    }
}

fn normalize_autods(p: AutodsProduct) -> SupplierProduct {
    SupplierProduct {
        title: p.title,
        sku: p.sku.as_ref().and_then(parse_sku),
        price: p.price.as_ref().and_then(parse_price),
        stock: p.stock.as_ref().and_then(parse_stock),
        images: image_urls(p.images.unwrap_or_default()),
        vendor: non_blank(p.supplier_name),
        description: p.body_html,
    }
}

fn normalize_cj(p: CjProduct) -> SupplierProduct {
    let mut images = image_urls(p.image_urls.unwrap_or_default());
    if images.is_empty() {
        images = non_blank(p.product_image).into_iter().collect();
    }

    SupplierProduct {
        title: p.product_name_en,
        sku: p.product_sku.as_ref().and_then(parse_sku),
        price: p.sell_price.as_ref().and_then(parse_price),
        stock: None,
        images,
        vendor: non_blank(p.supplier_name),
        description: p.description,
    }
}

/// Parses a price from a JSON number or numeric string.
///
/// CJ quotes variant price ranges as `"2.15 -- 3.20"`; the low end is used.
#[must_use]
pub fn parse_price(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let low = s.split("--").next().unwrap_or(s);
            parse_decimal(low.trim().trim_start_matches('$'))
        }
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parses stock from a JSON number or numeric string. Negative counts are
/// clamped to zero; fractional counts are truncated.
#[must_use]
pub fn parse_stock(value: &Value) -> Option<u32> {
    let count = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(truncate_f64))?,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate_f64))?
        }
        _ => return None,
    };
    Some(u32::try_from(count.max(0)).unwrap_or(u32::MAX))
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_f64(f: f64) -> i64 {
    f.trunc() as i64
}

/// SKUs come as strings or bare integers.
fn parse_sku(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn image_urls(images: Vec<ImageRef>) -> Vec<String> {
    images
        .iter()
        .map(|image| image.url().trim())
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .collect()
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}
