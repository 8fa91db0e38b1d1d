mod error;
mod fetch;
mod mutations;
mod queries;
mod store;

pub use error::SyncError;
pub use fetch::FetchCoordinator;
pub use mutations::{BulkFailure, BulkOutcome, MutationCoordinator};
pub use store::BranchStore;

use std::sync::Arc;

use crate::report::ErrorReporter;
use crate::repository::BranchRepository;

/// One shared cache plus the coordinators that drive it. Built once at
/// application bootstrap and handed to consumers by reference — there is no
/// hidden global; the single-shared-cache contract comes from sharing this
/// value.
pub struct BranchSync {
    pub store: Arc<BranchStore>,
    pub fetch: Arc<FetchCoordinator>,
    pub mutations: Arc<MutationCoordinator>,
}

impl BranchSync {
    pub fn new(repo: Arc<dyn BranchRepository>, reporter: Arc<dyn ErrorReporter>) -> Self {
        let store = Arc::new(BranchStore::new());
        let fetch = Arc::new(FetchCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&repo),
            Arc::clone(&reporter),
        ));
        let mutations = Arc::new(MutationCoordinator::new(
            Arc::clone(&store),
            repo,
            Arc::clone(&fetch),
            reporter,
        ));
        Self {
            store,
            fetch,
            mutations,
        }
    }
}
