//! Retirement set: catalog listings whose SKU the supplier no longer offers.

use std::collections::HashSet;

use crate::policy::SkuSet;

/// A catalog SKU absent from the current supplier fetch and the product
/// that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retirement {
    pub sku: String,
    pub product_id: u64,
}

/// Computes `existing − supplier` over SKUs, ignoring case.
///
/// `existing` yields `(product_id, sku)` pairs in catalog order. Each orphan
/// SKU appears once, paired with the first product seen carrying it; a
/// product is listed at most once even if several of its SKUs are orphaned.
/// A product that still carries any supplier SKU is kept whole. Blank
/// catalog SKUs are never retired.
#[must_use]
pub fn plan_retirement<'a, I>(existing: I, supplier_skus: &SkuSet) -> Vec<Retirement>
where
    I: IntoIterator<Item = (u64, &'a str)>,
{
    let existing: Vec<(u64, &str)> = existing
        .into_iter()
        .map(|(product_id, sku)| (product_id, sku.trim()))
        .collect();
    let live_products: HashSet<u64> = existing
        .iter()
        .filter(|(_, sku)| supplier_skus.contains(sku))
        .map(|(product_id, _)| *product_id)
        .collect();

    let mut seen = SkuSet::new();
    let mut planned_products = HashSet::new();
    let mut plan = Vec::new();

    for (product_id, sku) in existing {
        if sku.is_empty() || live_products.contains(&product_id) || !seen.insert(sku) {
            continue;
        }
        if planned_products.insert(product_id) {
            plan.push(Retirement {
                sku: sku.to_string(),
                product_id,
            });
        }
    }

    plan
}
