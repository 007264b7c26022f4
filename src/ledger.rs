use crate::models::{Activity, LedgerEntry};

/// Builds the display ledger: newest first, each row carrying the running
/// total accumulated in chronological order.
///
/// Same-date activities keep their relative input order while accumulating.
pub fn build_ledger(activities: &[Activity]) -> Vec<LedgerEntry> {
    let mut chronological: Vec<&Activity> = activities.iter().collect();
    chronological.sort_by_key(|activity| activity.date);

    let mut running_total = 0i64;
    let mut ledger: Vec<LedgerEntry> = chronological
        .into_iter()
        .map(|activity| {
            running_total = running_total.saturating_add(activity.points);
            LedgerEntry {
                activity: activity.clone(),
                total_after: running_total,
            }
        })
        .collect();

    ledger.reverse();
    ledger
}

pub fn total_points(activities: &[Activity]) -> i64 {
    activities
        .iter()
        .fold(0i64, |sum, activity| sum.saturating_add(activity.points))
}
