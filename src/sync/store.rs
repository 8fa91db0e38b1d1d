use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use crate::model::Branch;

/// The canonical in-memory branch cache, one per process, shared by `Arc`.
///
/// Locks guard short synchronous sections and are never held across await
/// points; every reader works on a snapshot. `loading` tracks fetch-class
/// work, `operation_loading` only mutation-class work.
pub struct BranchStore {
    branches: RwLock<Vec<Branch>>,
    error: Mutex<Option<String>>,
    loading: AtomicBool,
    operation_loading: AtomicBool,
}

impl Default for BranchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchStore {
    pub fn new() -> Self {
        Self {
            branches: RwLock::new(Vec::new()),
            error: Mutex::new(None),
            loading: AtomicBool::new(false),
            operation_loading: AtomicBool::new(false),
        }
    }

    // ── Reads ────────────────────────────────────────────────

    /// Snapshot of the full entity list, in cache order.
    pub fn branches(&self) -> Vec<Branch> {
        self.branches.read().expect("branch list lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.branches.read().expect("branch list lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cloned lookup; callers get their own copy to edit freely.
    pub fn branch_by_id(&self, id: &str) -> Option<Branch> {
        self.branches
            .read()
            .expect("branch list lock poisoned")
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.error.lock().expect("error slot poisoned").clone()
    }

    pub fn loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn operation_loading(&self) -> bool {
        self.operation_loading.load(Ordering::SeqCst)
    }

    // ── Writes ───────────────────────────────────────────────

    /// Full replacement, not a merge. Used by refresh.
    pub fn replace_all(&self, list: Vec<Branch>) {
        *self.branches.write().expect("branch list lock poisoned") = list;
    }

    /// Replace the entity with this id in place, preserving its position.
    /// No-op when the id is absent.
    pub fn upsert(&self, id: &str, branch: Branch) {
        let mut list = self.branches.write().expect("branch list lock poisoned");
        if let Some(slot) = list.iter_mut().find(|b| b.id == id) {
            *slot = branch;
        }
    }

    pub fn clear_branches(&self) {
        self.branches.write().expect("branch list lock poisoned").clear();
    }

    /// Explicit full reset: entities, error and both flags.
    pub fn reset(&self) {
        self.clear_branches();
        self.clear_error();
        self.set_loading(false);
        self.set_operation_loading(false);
    }

    pub fn set_error(&self, message: impl Into<String>) {
        *self.error.lock().expect("error slot poisoned") = Some(message.into());
    }

    pub fn clear_error(&self) {
        *self.error.lock().expect("error slot poisoned") = None;
    }

    pub fn set_loading(&self, value: bool) {
        self.loading.store(value, Ordering::SeqCst);
    }

    pub fn set_operation_loading(&self, value: bool) {
        self.operation_loading.store(value, Ordering::SeqCst);
    }
}

/// Holds `operation_loading` high for a scope. Clearing happens in `Drop`,
/// so it runs on every exit path, panics included.
pub(super) struct OperationGuard<'a> {
    store: &'a BranchStore,
}

impl<'a> OperationGuard<'a> {
    pub(super) fn hold(store: &'a BranchStore) -> Self {
        store.set_operation_loading(true);
        Self { store }
    }
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.store.set_operation_loading(false);
    }
}
