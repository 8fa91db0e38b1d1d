use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::model::{Branch, UpdateReservationSettings};
use crate::observability::{BULK_BATCH_SIZE, MUTATIONS_TOTAL, MUTATION_ERRORS_TOTAL};
use crate::report::ErrorReporter;
use crate::repository::BranchRepository;

use super::error::SyncError;
use super::fetch::FetchCoordinator;
use super::store::{BranchStore, OperationGuard};

/// Result of a bulk mutation. Both lists follow the caller's input order,
/// whatever order the individual calls completed in. Partial failure is
/// data, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded_ids: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    pub id: String,
    pub reason: String,
}

/// Orchestrates writes against the repository: optimistic per-item upserts
/// into the store, then a consistency refresh through the fetch coordinator.
pub struct MutationCoordinator {
    store: Arc<BranchStore>,
    repo: Arc<dyn BranchRepository>,
    fetch: Arc<FetchCoordinator>,
    reporter: Arc<dyn ErrorReporter>,
}

impl MutationCoordinator {
    pub fn new(
        store: Arc<BranchStore>,
        repo: Arc<dyn BranchRepository>,
        fetch: Arc<FetchCoordinator>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            store,
            repo,
            fetch,
            reporter,
        }
    }

    /// Turn reservations off for one branch. The returned entity is upserted
    /// as an interim view, then a full refresh re-establishes the source of
    /// truth. On failure the local state keeps its last consistent value.
    pub async fn disable_reservations(&self, branch_id: &str) -> Result<Branch, SyncError> {
        metrics::counter!(MUTATIONS_TOTAL).increment(1);
        match self.repo.disable_reservations(branch_id).await {
            Ok(branch) => {
                self.store.upsert(branch_id, branch.clone());
                self.fetch.refresh().await;
                Ok(branch)
            }
            Err(e) => Err(self.record_mutation_failure(branch_id, e.to_string())),
        }
    }

    /// Patch a branch's reservation settings, holding the operation-loading
    /// flag for the duration.
    pub async fn update_reservation_settings(
        &self,
        branch_id: &str,
        settings: UpdateReservationSettings,
    ) -> Result<Branch, SyncError> {
        let _op = OperationGuard::hold(&self.store);
        metrics::counter!(MUTATIONS_TOTAL).increment(1);
        match self.repo.update_reservation_settings(branch_id, settings).await {
            Ok(branch) => {
                self.store.upsert(branch_id, branch.clone());
                self.fetch.refresh().await;
                Ok(branch)
            }
            Err(e) => Err(self.record_mutation_failure(branch_id, e.to_string())),
        }
    }

    /// Enable reservations for many branches at once.
    ///
    /// All calls are dispatched in parallel and every one is allowed to
    /// settle — a failing id never cancels its siblings. Each success is
    /// upserted as it resolves, so the store may be transiently mixed until
    /// the single trailing refresh overwrites it. The refresh runs exactly
    /// once regardless of how many ids failed, and a refresh failure is
    /// recorded without discarding the outcome.
    pub async fn enable_reservations_bulk(&self, branch_ids: &[String]) -> BulkOutcome {
        let _op = OperationGuard::hold(&self.store);
        metrics::histogram!(BULK_BATCH_SIZE).record(branch_ids.len() as f64);

        let calls = branch_ids.iter().map(|branch_id| {
            let repo = Arc::clone(&self.repo);
            let store = Arc::clone(&self.store);
            let branch_id = branch_id.clone();
            async move {
                metrics::counter!(MUTATIONS_TOTAL).increment(1);
                match repo.enable_reservations(&branch_id).await {
                    Ok(branch) => {
                        store.upsert(&branch_id, branch);
                        Ok(())
                    }
                    Err(e) => Err(e.to_string()),
                }
            }
        });
        let results = join_all(calls).await;

        let mut outcome = BulkOutcome::default();
        for (branch_id, result) in branch_ids.iter().zip(results) {
            match result {
                Ok(()) => outcome.succeeded_ids.push(branch_id.clone()),
                Err(reason) => {
                    metrics::counter!(MUTATION_ERRORS_TOTAL).increment(1);
                    outcome.failed.push(BulkFailure {
                        id: branch_id.clone(),
                        reason,
                    });
                }
            }
        }

        if outcome.failed.is_empty() {
            info!(enabled = outcome.succeeded_ids.len(), "bulk enable complete");
        } else {
            warn!(
                enabled = outcome.succeeded_ids.len(),
                failed = outcome.failed.len(),
                "bulk enable partially failed"
            );
        }

        self.fetch.refresh().await;
        outcome
    }

    /// Disable every branch currently accepting reservations, snapshotting
    /// the enabled set at call time.
    ///
    /// Unlike bulk enable this path is fail-fast: disables run one at a
    /// time (each with its own internal refresh) and the first failure
    /// aborts the remainder and propagates.
    pub async fn disable_all_reservations(&self) -> Result<(), SyncError> {
        let ids: Vec<String> = self
            .store
            .reservation_enabled_branches()
            .into_iter()
            .map(|summary| summary.id)
            .collect();
        info!(count = ids.len(), "disabling reservations on all enabled branches");
        for id in &ids {
            self.disable_reservations(id).await?;
        }
        Ok(())
    }

    fn record_mutation_failure(&self, branch_id: &str, message: String) -> SyncError {
        metrics::counter!(MUTATION_ERRORS_TOTAL).increment(1);
        let error = SyncError::Mutation {
            id: branch_id.to_string(),
            message,
        };
        warn!("{error}");
        self.store.set_error(error.message());
        self.reporter.report(&error);
        error
    }
}
