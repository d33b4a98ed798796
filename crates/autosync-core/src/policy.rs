//! Import policy predicates and the per-run SKU set.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::products::SupplierProduct;

/// Marketplace resellers whose listings are plausibly re-sourced from
/// low-trust storefronts.
static SUSPICIOUS_VENDOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)temu|shein|wish|alibaba").expect("valid suspicious vendor regex")
});

/// `true` when the listing lacks a title, a positive price, or any image.
#[must_use]
pub fn is_bad_product(product: &SupplierProduct) -> bool {
    let has_title = product
        .title
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());
    let has_price = product.price.is_some_and(|p| p > Decimal::ZERO);
    let has_images = product.images.iter().any(|src| !src.trim().is_empty());

    !(has_title && has_price && has_images)
}

/// `true` when the vendor name matches the marketplace blocklist anywhere,
/// ignoring case. A missing vendor is not suspicious.
#[must_use]
pub fn is_suspicious_vendor(vendor: Option<&str>) -> bool {
    vendor.is_some_and(|v| SUSPICIOUS_VENDOR.is_match(v))
}

/// Case-insensitive set of SKUs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkuSet {
    inner: HashSet<String>,
}

impl SkuSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(sku: &str) -> String {
        sku.trim().to_lowercase()
    }

    /// Adds `sku`; returns `false` if an equal SKU (ignoring case) was
    /// already present. Blank SKUs are never stored.
    pub fn insert(&mut self, sku: &str) -> bool {
        let key = Self::key(sku);
        if key.is_empty() {
            return false;
        }
        self.inner.insert(key)
    }

    #[must_use]
    pub fn contains(&self, sku: &str) -> bool {
        self.inner.contains(&Self::key(sku))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for SkuSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = SkuSet::new();
        for sku in iter {
            set.insert(sku);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_product() -> SupplierProduct {
        SupplierProduct {
            title: Some("Hydrating Face Serum".to_string()),
            sku: Some("HFS-1".to_string()),
            price: Some(Decimal::new(20, 0)),
            stock: Some(5),
            images: vec!["img1".to_string()],
            vendor: Some("GlowCo".to_string()),
            description: None,
        }
    }

    #[test]
    fn complete_product_is_not_bad() {
        assert!(!is_bad_product(&good_product()));
    }

    #[test]
    fn missing_or_blank_title_is_bad() {
        let mut p = good_product();
        p.title = None;
        assert!(is_bad_product(&p));
        p.title = Some(String::new());
        assert!(is_bad_product(&p));
        p.title = Some("   ".to_string());
        assert!(is_bad_product(&p));
    }

    #[test]
    fn missing_zero_or_negative_price_is_bad() {
        for price in [None, Some(Decimal::ZERO), Some(Decimal::new(-150, 2))] {
            let mut p = good_product();
            p.price = price;
            assert!(is_bad_product(&p), "price {price:?} should be bad");
        }
    }

    #[test]
    fn missing_images_is_bad() {
        let mut p = good_product();
        p.images.clear();
        assert!(is_bad_product(&p));
        p.images = vec![" ".to_string()];
        assert!(is_bad_product(&p));
    }

    #[test]
    fn marketplace_vendors_are_suspicious() {
        for vendor in ["Temu", "SHEIN Official", "wish.com seller", "Alibaba Group", "xxTeMuxx"] {
            assert!(is_suspicious_vendor(Some(vendor)), "{vendor} should match");
        }
    }

    #[test]
    fn ordinary_vendor_is_not_suspicious() {
        assert!(!is_suspicious_vendor(Some("Acme Supplies")));
        assert!(!is_suspicious_vendor(Some("")));
        assert!(!is_suspicious_vendor(None));
    }

    #[test]
    fn sku_set_ignores_case_and_whitespace() {
        let mut seen = SkuSet::new();
        assert!(seen.insert("hfs-1"));
        assert!(!seen.insert(" HFS-1 "));
        assert!(seen.contains("Hfs-1"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn sku_set_never_stores_blank() {
        let mut seen = SkuSet::new();
        assert!(!seen.insert("  "));
        assert!(seen.is_empty());
        assert!(!seen.contains(""));
    }

    #[test]
    fn sku_set_collects_from_iterator() {
        let set: SkuSet = ["A", "b", "a"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("B"));
    }
}
