use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, warn};

use crate::observability::{FETCHES_TOTAL, FETCH_ERRORS_TOTAL};
use crate::report::ErrorReporter;
use crate::repository::{coerce_branch_list, BranchRepository};

use super::error::SyncError;
use super::store::BranchStore;

type FetchHandle = Shared<BoxFuture<'static, ()>>;

/// Single-flight slot. `None` = idle, `Some` = a fetch is loading; loaded /
/// failed states live in the store itself. `seq` keeps a stale fetch from
/// clearing a newer handle installed by `refresh`.
#[derive(Default)]
struct InFlight {
    seq: u64,
    handle: Option<FetchHandle>,
}

/// Ensures at most one full-list fetch is outstanding. Concurrent callers
/// attach to the same in-flight future, so the repository sees one call per
/// request burst. A populated store makes `fetch_all` a no-op — the cache is
/// fetch-once by default and only `refresh` forces a reload.
pub struct FetchCoordinator {
    store: Arc<BranchStore>,
    repo: Arc<dyn BranchRepository>,
    reporter: Arc<dyn ErrorReporter>,
    in_flight: Arc<Mutex<InFlight>>,
}

impl FetchCoordinator {
    pub fn new(
        store: Arc<BranchStore>,
        repo: Arc<dyn BranchRepository>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            store,
            repo,
            reporter,
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        }
    }

    /// Populate the store, resolving once data is present or an error has
    /// been recorded. Joins an in-flight fetch when one exists; resolves
    /// immediately when the store already holds data.
    pub async fn fetch_all(&self) {
        self.run(false).await;
    }

    /// Unconditional reload: drops the cached list and any in-flight handle,
    /// then fetches. A failure is recorded in the store's error state.
    pub async fn refresh(&self) {
        self.store.clear_branches();
        self.in_flight.lock().expect("in-flight slot poisoned").handle = None;
        self.run(true).await;
    }

    async fn run(&self, is_refresh: bool) {
        let handle = {
            let mut slot = self.in_flight.lock().expect("in-flight slot poisoned");
            if let Some(handle) = &slot.handle {
                handle.clone()
            } else if !self.store.is_empty() {
                debug!("fetch skipped, store already populated");
                return;
            } else {
                self.start_fetch(&mut slot, is_refresh)
            }
        };
        handle.await;
    }

    fn start_fetch(&self, slot: &mut InFlight, is_refresh: bool) -> FetchHandle {
        slot.seq += 1;
        let seq = slot.seq;

        // Loading covers the whole in-flight window, starting now so callers
        // attaching before the first poll already observe it.
        self.store.set_loading(true);
        self.store.clear_error();

        let store = Arc::clone(&self.store);
        let repo = Arc::clone(&self.repo);
        let reporter = Arc::clone(&self.reporter);
        let in_flight = Arc::clone(&self.in_flight);

        let handle: FetchHandle = async move {
            metrics::counter!(FETCHES_TOTAL).increment(1);
            let outcome = match repo.get_all_branches().await {
                Ok(payload) => match coerce_branch_list(payload) {
                    Ok(list) => {
                        debug!(branches = list.len(), "branch list loaded");
                        store.replace_all(list);
                        Ok(())
                    }
                    Err(e) => Err(e.to_string()),
                },
                Err(e) => Err(e.to_string()),
            };
            if let Err(message) = outcome {
                metrics::counter!(FETCH_ERRORS_TOTAL).increment(1);
                let error = if is_refresh {
                    SyncError::Refresh(message)
                } else {
                    SyncError::Fetch(message)
                };
                warn!("{error}");
                store.set_error(error.message());
                reporter.report(&error);
            }
            store.set_loading(false);
            let mut slot = in_flight.lock().expect("in-flight slot poisoned");
            if slot.seq == seq {
                slot.handle = None;
            }
        }
        .boxed()
        .shared();

        slot.handle = Some(handle.clone());
        // Drive the fetch to completion even if every awaiting caller drops.
        tokio::spawn(handle.clone());
        handle
    }
}
