//! Per-item outcomes and the run summary they roll up into.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Why a supplier product was not imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum SkipReason {
    BadProduct,
    SuspiciousVendor,
    MissingSku,
    DuplicateInRun,
    Unclassified,
    ExistsInCatalog,
    /// The margin pushed the price past what can be represented.
    PriceOutOfRange,
}

impl SkipReason {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SkipReason::BadProduct => "bad_product",
            SkipReason::SuspiciousVendor => "suspicious_vendor",
            SkipReason::MissingSku => "missing_sku",
            SkipReason::DuplicateInRun => "duplicate_in_run",
            SkipReason::Unclassified => "unclassified",
            SkipReason::ExistsInCatalog => "exists_in_catalog",
            SkipReason::PriceOutOfRange => "price_out_of_range",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to the collection assignment after a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CollectionOutcome {
    /// The tag has no configured collection.
    NotConfigured,
    Assigned,
    Failed,
}

/// Result of running one supplier product through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ItemOutcome {
    Created { collection: CollectionOutcome },
    /// Dry run: every check passed and a create would have been issued.
    WouldCreate,
    Skipped(SkipReason),
    /// The create call failed; the item is abandoned.
    Failed,
}

/// Summary of one sync run.
///
/// In a dry run `created` and `retired` count the writes that would have
/// been issued.
#[derive(Debug, Clone)]
pub(crate) struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub fetched: usize,
    pub created: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
    pub failed: usize,
    pub collections_assigned: usize,
    pub collection_failures: usize,
    pub retired: usize,
    pub retire_failures: usize,
    pub dry_run: bool,
}

impl RunReport {
    pub(crate) fn new(dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            fetched: 0,
            created: 0,
            skipped: BTreeMap::new(),
            failed: 0,
            collections_assigned: 0,
            collection_failures: 0,
            retired: 0,
            retire_failures: 0,
            dry_run,
        }
    }

    pub(crate) fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Created { collection } => {
                self.created += 1;
                match collection {
                    CollectionOutcome::Assigned => self.collections_assigned += 1,
                    CollectionOutcome::Failed => self.collection_failures += 1,
                    CollectionOutcome::NotConfigured => {}
                }
            }
            ItemOutcome::WouldCreate => self.created += 1,
            ItemOutcome::Skipped(reason) => *self.skipped.entry(*reason).or_insert(0) += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
    }

    #[cfg(test)]
    pub(crate) fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub(crate) fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Renders skip counts as `reason=n` pairs for the summary log line.
    fn skipped_summary(&self) -> String {
        self.skipped
            .iter()
            .map(|(reason, n)| format!("{reason}={n}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn log_summary(&self) {
        let elapsed_ms = self
            .finished_at
            .map(|end| (end - self.started_at).num_milliseconds());

        tracing::info!(
            run_id = %self.run_id,
            dry_run = self.dry_run,
            fetched = self.fetched,
            created = self.created,
            skipped = self.skipped_total(),
            skipped_by_reason = %self.skipped_summary(),
            failed = self.failed,
            collections_assigned = self.collections_assigned,
            collection_failures = self.collection_failures,
            retired = self.retired,
            retire_failures = self.retire_failures,
            elapsed_ms,
            "sync run complete"
        );
    }
}
