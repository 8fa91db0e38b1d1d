use crate::model::{Branch, TimeSlot, DEFAULT_RESERVATION_DURATION};

// ── Time-slot validation ──────────────────────────────────────────
//
// Pure functions over `HH:MM` wall-clock strings and a branch's opening
// hours. Zero-padded `HH:MM` strings sort exactly like the times they
// represent, so lexicographic comparison is used for range checks.

/// Truncate an `HH:MM:SS` string to `HH:MM`. Shorter input passes through;
/// empty input yields empty output.
pub fn format_time(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

/// A branch whose bounds both format to `00:00` is open around the clock.
pub fn is_open_24_hours(branch: &Branch) -> bool {
    format_time(&branch.opening_from) == "00:00" && format_time(&branch.opening_to) == "00:00"
}

/// Whether a time lies within the branch's opening hours. No branch or a
/// 24-hour branch means no restriction.
pub fn is_time_in_range(time: &str, branch: Option<&Branch>) -> bool {
    let Some(branch) = branch else { return true };
    if is_open_24_hours(branch) {
        return true;
    }
    let from = format_time(&branch.opening_from);
    let to = format_time(&branch.opening_to);
    time >= from && time <= to
}

/// Minutes since midnight for an `HH:MM` string. Unparseable components
/// count as zero.
pub fn time_to_minutes(time: &str) -> u32 {
    let mut parts = time.splitn(2, ':');
    let hours: u32 = parts.next().and_then(|h| h.parse().ok()).unwrap_or(0);
    let minutes: u32 = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
    hours * 60 + minutes
}

/// Validate a candidate slot against a branch's opening hours and minimum
/// reservation duration. Returns `None` on success or a human-readable
/// reason for the first failing check:
///
/// 1. start must precede end
/// 2. the slot must be at least the effective reservation duration
///    (`current_duration` if given, else the branch's, else 90 minutes)
/// 3. a 24-hour branch skips the bounds checks
/// 4. start and end must both lie within the opening hours
pub fn validate_time_slot(
    start: &str,
    end: &str,
    branch: Option<&Branch>,
    current_duration: Option<u32>,
) -> Option<String> {
    let Some(branch) = branch else { return None };

    if start >= end {
        return Some("Start time must be before end time".to_string());
    }

    let slot_minutes = time_to_minutes(end).saturating_sub(time_to_minutes(start));
    let required = current_duration.unwrap_or(branch.reservation_duration);
    if slot_minutes < required {
        return Some(format!(
            "Time slot must be longer than reservation duration ({required} minutes)"
        ));
    }

    if is_open_24_hours(branch) {
        return None;
    }

    let from = format_time(&branch.opening_from);
    let to = format_time(&branch.opening_to);
    if start < from || start > to {
        return Some(format!("Start time must be between {from} and {to}"));
    }
    if end < from || end > to {
        return Some(format!("End time must be between {from} and {to}"));
    }

    None
}

/// Half-open overlap test: slots that merely touch at an endpoint do not
/// overlap.
pub fn do_slots_overlap(a: &TimeSlot, b: &TimeSlot) -> bool {
    let (a_start, a_end) = (time_to_minutes(&a.start), time_to_minutes(&a.end));
    let (b_start, b_end) = (time_to_minutes(&b.start), time_to_minutes(&b.end));
    a_start < b_end && a_end > b_start
}

/// Whether two slots are exactly equal.
pub fn are_slots_equal(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.start == b.start && a.end == b.end
}

/// Indices of slots participating in at least one overlapping pair.
/// Ascending pairwise scan; each qualifying index appears once.
pub fn find_overlapping_slots(slots: &[TimeSlot]) -> Vec<usize> {
    find_pairwise(slots, do_slots_overlap)
}

/// Indices of slots participating in at least one exactly-equal pair.
pub fn find_duplicate_slots(slots: &[TimeSlot]) -> Vec<usize> {
    find_pairwise(slots, are_slots_equal)
}

fn find_pairwise(slots: &[TimeSlot], matches: impl Fn(&TimeSlot, &TimeSlot) -> bool) -> Vec<usize> {
    let mut indices: Vec<usize> = Vec::new();
    for i in 0..slots.len() {
        for j in (i + 1)..slots.len() {
            if matches(&slots[i], &slots[j]) {
                if !indices.contains(&i) {
                    indices.push(i);
                }
                if !indices.contains(&j) {
                    indices.push(j);
                }
            }
        }
    }
    indices
}

/// Slot length in minutes. Negative when end precedes start.
pub fn slot_duration(start: &str, end: &str) -> i64 {
    i64::from(time_to_minutes(end)) - i64::from(time_to_minutes(start))
}

/// Render minutes as a human-readable duration: `"45 minutes"`,
/// `"1 hour 30 minutes"`, `"2 hours"`.
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} minutes");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    let plural = if hours == 1 { "" } else { "s" };
    if rest == 0 {
        format!("{hours} hour{plural}")
    } else {
        format!("{hours} hour{plural} {rest} minutes")
    }
}
