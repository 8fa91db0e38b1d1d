use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fallback reservation duration in minutes when the remote record omits one.
pub const DEFAULT_RESERVATION_DURATION: u32 = 90;

fn default_reservation_duration() -> u32 {
    DEFAULT_RESERVATION_DURATION
}

/// A `{start, end}` wall-clock interval within one calendar day.
/// Times are `HH:MM` strings — zero-padded, no date, no timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

impl TimeSlot {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A table inside a section. Its `accepts_reservations` flag is the unit of
/// reservation capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    #[serde(default)]
    pub section_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub seats: u32,
    #[serde(default)]
    pub accepts_reservations: bool,
}

/// A physical subdivision of a branch. Tables default to empty so partial
/// payloads never break the derived counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(default)]
    pub branch_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// A venue location with its own reservation configuration. Everything except
/// `id` is defaulted — the remote service includes nested sections and tables
/// only when asked to, and the cache must cope either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_localized: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, rename = "type")]
    pub branch_type: i64,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Opening hours as `HH:MM[:SS]` wall clock. `00:00`–`00:00` means 24h.
    #[serde(default)]
    pub opening_from: String,
    #[serde(default)]
    pub opening_to: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Soft-delete marker. A branch with this set never appears in active or
    /// reservation-filtered views.
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub receives_online_orders: bool,
    #[serde(default)]
    pub accepts_reservations: bool,
    /// Minimum reservation length in minutes.
    #[serde(default = "default_reservation_duration")]
    pub reservation_duration: u32,
    /// Bookable slots per weekday (`"monday"` → slot list).
    #[serde(default)]
    pub reservation_times: BTreeMap<String, Vec<TimeSlot>>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Default for Branch {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            name_localized: None,
            reference: None,
            branch_type: 0,
            phone: None,
            address: None,
            opening_from: String::new(),
            opening_to: String::new(),
            created_at: None,
            updated_at: None,
            deleted_at: None,
            receives_online_orders: false,
            accepts_reservations: false,
            reservation_duration: DEFAULT_RESERVATION_DURATION,
            reservation_times: BTreeMap::new(),
            sections: Vec::new(),
        }
    }
}

impl Branch {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Count tables accepting reservations across all sections. Absent or
    /// empty section/table lists contribute zero.
    pub fn reservation_table_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| {
                section
                    .tables
                    .iter()
                    .filter(|table| table.accepts_reservations)
                    .count()
            })
            .sum()
    }
}

/// Derived per-branch view. Built from a `&Branch` on demand, never stored —
/// the table count must always reflect current table state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSummary {
    pub id: String,
    pub name: String,
    pub reference: Option<String>,
    pub reservation_tables_count: usize,
    pub reservation_duration: u32,
}

impl From<&Branch> for BranchSummary {
    fn from(branch: &Branch) -> Self {
        Self {
            id: branch.id.clone(),
            name: branch.name.clone(),
            reference: branch.reference.clone(),
            reservation_tables_count: branch.reservation_table_count(),
            reservation_duration: branch.reservation_duration,
        }
    }
}

/// Patch payload for a branch's reservation settings. Absent fields are left
/// untouched by the remote service and skipped on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReservationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts_reservations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_times: Option<BTreeMap<String, Vec<TimeSlot>>>,
}
