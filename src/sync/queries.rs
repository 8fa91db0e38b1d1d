use crate::model::{Branch, BranchSummary};

use super::store::BranchStore;

/// Derived views. Plain derivations over the current snapshot, recomputed on
/// every read — cheap (O(entities × tables)) and therefore never memoized,
/// so a just-upserted branch is reflected immediately.
impl BranchStore {
    /// Branches without a soft-delete marker, in cache order.
    pub fn active_branches(&self) -> Vec<Branch> {
        self.branches().into_iter().filter(Branch::is_active).collect()
    }

    /// Active branches accepting reservations, as summaries with a freshly
    /// computed table count.
    pub fn reservation_enabled_branches(&self) -> Vec<BranchSummary> {
        self.branches()
            .iter()
            .filter(|b| b.is_active() && b.accepts_reservations)
            .map(BranchSummary::from)
            .collect()
    }

    /// Active branches not accepting reservations.
    pub fn reservation_disabled_branches(&self) -> Vec<Branch> {
        self.branches()
            .into_iter()
            .filter(|b| b.is_active() && !b.accepts_reservations)
            .collect()
    }

    pub fn total_reservation_tables(&self) -> usize {
        self.reservation_enabled_branches()
            .iter()
            .map(|b| b.reservation_tables_count)
            .sum()
    }

    /// Mean reservation duration over enabled branches, rounded to the
    /// nearest minute. Zero on an empty set.
    pub fn average_duration(&self) -> u32 {
        let enabled = self.reservation_enabled_branches();
        if enabled.is_empty() {
            return 0;
        }
        let total: u32 = enabled.iter().map(|b| b.reservation_duration).sum();
        (f64::from(total) / enabled.len() as f64).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, Table};

    fn branch(id: &str, accepts: bool, duration: u32, accepting_tables: usize) -> Branch {
        Branch {
            id: id.into(),
            name: format!("Branch {id}"),
            accepts_reservations: accepts,
            reservation_duration: duration,
            sections: vec![Section {
                id: format!("{id}-s1"),
                branch_id: id.into(),
                tables: (0..accepting_tables)
                    .map(|i| Table {
                        id: format!("{id}-t{i}"),
                        accepts_reservations: true,
                        ..Table::default()
                    })
                    .collect(),
                ..Section::default()
            }],
            ..Branch::default()
        }
    }

    fn deleted(mut b: Branch) -> Branch {
        b.deleted_at = Some("2026-01-01T00:00:00Z".into());
        b
    }

    #[test]
    fn deleted_branches_never_appear() {
        let store = BranchStore::new();
        store.replace_all(vec![
            branch("1", true, 60, 2),
            deleted(branch("2", true, 60, 5)),
            deleted(branch("3", false, 60, 1)),
            branch("4", false, 60, 1),
        ]);
        let active: Vec<String> = store.active_branches().into_iter().map(|b| b.id).collect();
        assert_eq!(active, vec!["1", "4"]);
        assert_eq!(store.reservation_enabled_branches().len(), 1);
        assert_eq!(store.reservation_disabled_branches().len(), 1);
    }

    #[test]
    fn totals_and_average_for_mixed_branches() {
        let store = BranchStore::new();
        store.replace_all(vec![branch("1", true, 60, 2), branch("3", true, 90, 1)]);
        assert_eq!(store.total_reservation_tables(), 3);
        assert_eq!(store.average_duration(), 75);
    }

    #[test]
    fn average_duration_zero_on_empty_set() {
        let store = BranchStore::new();
        assert_eq!(store.average_duration(), 0);

        // Present but disabled branches still yield zero.
        store.replace_all(vec![branch("1", false, 60, 2)]);
        assert_eq!(store.average_duration(), 0);
    }

    #[test]
    fn average_duration_rounds_to_nearest() {
        let store = BranchStore::new();
        store.replace_all(vec![
            branch("1", true, 60, 0),
            branch("2", true, 60, 0),
            branch("3", true, 65, 0),
        ]);
        // 185 / 3 = 61.67 → 62
        assert_eq!(store.average_duration(), 62);
    }

    #[test]
    fn summaries_track_upserts() {
        let store = BranchStore::new();
        store.replace_all(vec![branch("1", true, 60, 2)]);
        assert_eq!(store.total_reservation_tables(), 2);

        // Same branch, one more accepting table.
        store.upsert("1", branch("1", true, 60, 3));
        assert_eq!(store.total_reservation_tables(), 3);
    }
}
