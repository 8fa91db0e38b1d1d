use crate::sync::SyncError;

/// Sink for sync failures headed for the user. The presentation layer plugs
/// in its own implementation (toasts, status bars); the core only pushes.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &SyncError);
}

/// Logs every reported error through `tracing`.
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &SyncError) {
        tracing::error!("{error}");
    }
}

/// Swallows reports. For embedders that read the store's error state
/// directly, and for tests.
pub struct NullReporter;

impl ErrorReporter for NullReporter {
    fn report(&self, _error: &SyncError) {}
}
