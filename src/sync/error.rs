/// Sync failure taxonomy. Partial bulk failure is deliberately absent: it is
/// returned as data (`BulkOutcome`), never raised.
///
/// Whatever the variant, only the normalized message string lands in the
/// store; the typed value goes to the `ErrorReporter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Whole-list load failed. The store's entity list is left untouched.
    Fetch(String),
    /// Post-mutation consistency refresh failed. Never invalidates an
    /// already-computed mutation result.
    Refresh(String),
    /// Single-item write failed. The entity keeps its last known value.
    Mutation { id: String, message: String },
}

impl SyncError {
    /// The underlying failure message, stripped of context.
    pub fn message(&self) -> &str {
        match self {
            SyncError::Fetch(message) | SyncError::Refresh(message) => message,
            SyncError::Mutation { message, .. } => message,
        }
    }
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Fetch(message) => write!(f, "branch fetch failed: {message}"),
            SyncError::Refresh(message) => write!(f, "branch refresh failed: {message}"),
            SyncError::Mutation { id, message } => {
                write!(f, "mutation failed for branch {id}: {message}")
            }
        }
    }
}

impl std::error::Error for SyncError {}
