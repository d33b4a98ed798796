//! The sync run: fetch supplier products, import the ones that pass policy,
//! and optionally retire catalog listings the supplier no longer offers.
//!
//! Every external failure is caught where it happens, logged with the SKU and
//! title, and turned into an [`ItemOutcome`]. Nothing here returns an error;
//! the run always reaches `Done` and hands back a [`RunReport`].

mod lookup;
mod report;

use autosync_core::{
    is_bad_product, is_suspicious_vendor, plan_retirement, to_create_payload, AppConfig,
    Classifier, LookupMode, SkuSet, SupplierProduct, TransformOptions,
};
use autosync_shopify::ShopifyAdminClient;
use autosync_supplier::SupplierClient;
use tracing::Instrument;

use lookup::CatalogLookup;
pub(crate) use report::RunReport;
use report::{CollectionOutcome, ItemOutcome, SkipReason};

/// Run-wide settings resolved from config and command-line flags.
#[derive(Debug, Clone)]
pub(crate) struct SyncOptions {
    pub transform: TransformOptions,
    pub lookup: LookupMode,
    pub page_size: u32,
    pub retire: bool,
    pub dry_run: bool,
}

impl SyncOptions {
    /// `force_retire` turns retirement on regardless of config.
    pub(crate) fn from_config(config: &AppConfig, dry_run: bool, force_retire: bool) -> Self {
        Self {
            transform: TransformOptions {
                margin_multiplier: config.margin_multiplier,
                fixed_tags: config.fixed_tags.clone(),
                default_inventory: config.default_inventory,
                default_vendor: config.default_vendor.clone(),
            },
            lookup: config.catalog_lookup,
            page_size: config.page_size,
            retire: config.retire_orphans || force_retire,
            dry_run,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncPhase {
    Idle,
    Fetching,
    PerItem,
    Retiring,
    Done,
}

/// State that lives for exactly one run.
struct RunState {
    /// SKUs created (or, in a dry run, approved) so far.
    seen_skus: SkuSet,
    catalog: CatalogLookup,
}

pub(crate) struct SyncRunner<'a> {
    supplier: &'a SupplierClient,
    shopify: &'a ShopifyAdminClient,
    classifier: &'a Classifier,
    options: SyncOptions,
    phase: SyncPhase,
}

impl<'a> SyncRunner<'a> {
    pub(crate) fn new(
        supplier: &'a SupplierClient,
        shopify: &'a ShopifyAdminClient,
        classifier: &'a Classifier,
        options: SyncOptions,
    ) -> Self {
        Self {
            supplier,
            shopify,
            classifier,
            options,
            phase: SyncPhase::Idle,
        }
    }

    fn enter(&mut self, phase: SyncPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "sync phase");
        self.phase = phase;
    }

    /// Executes one full run and returns its report. Never fails.
    pub(crate) async fn run(mut self) -> RunReport {
        let mut report = RunReport::new(self.options.dry_run);
        let span = tracing::info_span!(
            "sync_run",
            run_id = %report.run_id,
            supplier = %self.supplier.kind(),
            dry_run = self.options.dry_run,
        );

        async {
            tracing::info!("sync run starting");
            self.run_phases(&mut report).await;
            self.enter(SyncPhase::Done);
            report.finish();
            report.log_summary();
        }
        .instrument(span)
        .await;

        report
    }

    async fn run_phases(&mut self, report: &mut RunReport) {
        self.enter(SyncPhase::Fetching);
        let products = match self.supplier.fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(error = %e, "supplier fetch failed; nothing to sync");
                Vec::new()
            }
        };
        report.fetched = products.len();
        tracing::info!(count = products.len(), "fetched supplier products");

        if products.is_empty() {
            return;
        }

        self.enter(SyncPhase::PerItem);
        let mut state = RunState {
            seen_skus: SkuSet::new(),
            catalog: CatalogLookup::prepare(self.options.lookup, self.shopify, self.options.page_size)
                .await,
        };
        for product in &products {
            let outcome = self.sync_product(&mut state, product).await;
            report.record(&outcome);
        }

        if self.options.retire {
            self.enter(SyncPhase::Retiring);
            self.retire_orphans(&products, report).await;
        }
    }

    /// Runs the policy checks in order, then creates and assigns.
    async fn sync_product(&self, state: &mut RunState, product: &SupplierProduct) -> ItemOutcome {
        let title = product.display_title();

        if is_bad_product(product) {
            return skip(SkipReason::BadProduct, product.sku(), title);
        }
        if is_suspicious_vendor(product.vendor.as_deref()) {
            return skip(SkipReason::SuspiciousVendor, product.sku(), title);
        }
        let Some(sku) = product.sku() else {
            return skip(SkipReason::MissingSku, None, title);
        };
        if state.seen_skus.contains(sku) {
            return skip(SkipReason::DuplicateInRun, Some(sku), title);
        }
        let Some(classification) = self.classifier.classify(title) else {
            return skip(SkipReason::Unclassified, Some(sku), title);
        };
        if let Some(existing_id) = state
            .catalog
            .existing_product(self.shopify, sku, self.options.page_size)
            .await
        {
            tracing::debug!(sku, title, existing_id, "already in catalog");
            return ItemOutcome::Skipped(SkipReason::ExistsInCatalog);
        }

        let Some(payload) = to_create_payload(product, &classification.tag, &self.options.transform)
        else {
            return skip(SkipReason::PriceOutOfRange, Some(sku), title);
        };

        if self.options.dry_run {
            state.seen_skus.insert(sku);
            tracing::info!(
                sku,
                title = %payload.title,
                tag = %classification.tag,
                price = payload.variants.first().map_or("", |v| v.price.as_str()),
                status = %payload.status,
                collection_id = classification.collection_id,
                "dry run: would create product"
            );
            return ItemOutcome::WouldCreate;
        }

        let created = match self.shopify.create_product(&payload).await {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(sku, title, error = %e, "product creation failed");
                return ItemOutcome::Failed;
            }
        };
        state.seen_skus.insert(sku);
        state.catalog.record(sku, created.id);
        tracing::info!(
            sku,
            title = %payload.title,
            tag = %classification.tag,
            product_id = created.id,
            "created product"
        );

        let collection = match classification.collection_id {
            None => CollectionOutcome::NotConfigured,
            Some(collection_id) => {
                match self.shopify.add_to_collection(created.id, collection_id).await {
                    Ok(_) => {
                        tracing::debug!(sku, product_id = created.id, collection_id, "assigned to collection");
                        CollectionOutcome::Assigned
                    }
                    Err(e) => {
                        tracing::warn!(
                            sku,
                            title,
                            product_id = created.id,
                            collection_id,
                            error = %e,
                            "collection assignment failed; product left uncollected"
                        );
                        CollectionOutcome::Failed
                    }
                }
            }
        };

        ItemOutcome::Created { collection }
    }

    /// Deletes catalog products whose SKU is absent from this fetch.
    async fn retire_orphans(&self, products: &[SupplierProduct], report: &mut RunReport) {
        let supplier_skus: SkuSet = products.iter().filter_map(SupplierProduct::sku).collect();

        let catalog = match self.shopify.list_all(self.options.page_size).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, "catalog listing failed; skipping retirement");
                return;
            }
        };

        let plan = plan_retirement(
            catalog
                .iter()
                .flat_map(|p| p.skus().map(move |sku| (p.id, sku))),
            &supplier_skus,
        );
        tracing::info!(
            catalog_products = catalog.len(),
            orphans = plan.len(),
            "retirement planned"
        );

        for retirement in plan {
            let sku = retirement.sku.as_str();
            let product_id = retirement.product_id;

            if self.options.dry_run {
                tracing::info!(sku, product_id, "dry run: would delete product");
                report.retired += 1;
                continue;
            }

            match self.shopify.delete_product(product_id).await {
                Ok(()) => {
                    tracing::info!(sku, product_id, "deleted product");
                    report.retired += 1;
                }
                Err(e) => {
                    tracing::warn!(sku, product_id, error = %e, "product deletion failed");
                    report.retire_failures += 1;
                }
            }
        }
    }
}

fn skip(reason: SkipReason, sku: Option<&str>, title: &str) -> ItemOutcome {
    tracing::debug!(sku, title, reason = %reason, "skipped");
    ItemOutcome::Skipped(reason)
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
