use async_trait::async_trait;
use serde_json::Value;

use crate::model::{Branch, UpdateReservationSettings};

/// Transport-level failure. The transport layer normalizes HTTP statuses
/// into a single-line message before the core ever sees one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoError {
    message: String,
}

impl RepoError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RepoError {}

/// Remote branch service. Implementations own wire format, auth and retry
/// policy; the core only sees decoded branches and normalized errors.
///
/// `get_all_branches` returns the raw JSON payload so the non-array guard
/// stays an explicit step in the core rather than transport behavior.
#[async_trait]
pub trait BranchRepository: Send + Sync {
    /// Fetch all branches, nested sections and tables included.
    async fn get_all_branches(&self) -> Result<Value, RepoError>;

    async fn enable_reservations(&self, branch_id: &str) -> Result<Branch, RepoError>;

    async fn disable_reservations(&self, branch_id: &str) -> Result<Branch, RepoError>;

    async fn update_reservation_settings(
        &self,
        branch_id: &str,
        settings: UpdateReservationSettings,
    ) -> Result<Branch, RepoError>;
}

/// Boundary validation for a full-fetch payload: a non-array response is
/// coerced to an empty list so derived views never see a non-sequence. An
/// array that fails to decode is a real error.
pub fn coerce_branch_list(payload: Value) -> Result<Vec<Branch>, serde_json::Error> {
    match payload {
        Value::Array(_) => serde_json::from_value(payload),
        _ => Ok(Vec::new()),
    }
}
