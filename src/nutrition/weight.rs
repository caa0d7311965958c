use serde::Serialize;

use crate::models::WeightEntry;

/// First entry flagged as the starting weight. With several flagged, the
/// earliest in collection order wins.
pub fn starting_entry(entries: &[WeightEntry]) -> Option<&WeightEntry> {
    entries.iter().find(|entry| entry.is_starting)
}

/// Entries newest date first; entries sharing a date keep collection order.
pub fn sorted_newest_first(entries: &[WeightEntry]) -> Vec<&WeightEntry> {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

pub fn latest_entry(entries: &[WeightEntry]) -> Option<&WeightEntry> {
    sorted_newest_first(entries).into_iter().next()
}

/// Latest weight minus starting weight, when both exist.
pub fn weight_change(entries: &[WeightEntry]) -> Option<f64> {
    let start = starting_entry(entries)?;
    let latest = latest_entry(entries)?;
    Some(latest.weight - start.weight)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightHistoryRow<'a> {
    pub entry: &'a WeightEntry,
    /// Difference to the next-older entry; 0 for the oldest.
    pub change: f64,
}

pub fn weight_history(entries: &[WeightEntry]) -> Vec<WeightHistoryRow<'_>> {
    let sorted = sorted_newest_first(entries);
    sorted
        .iter()
        .enumerate()
        .map(|(index, &entry)| WeightHistoryRow {
            entry,
            change: sorted
                .get(index + 1)
                .map(|older| entry.weight - older.weight)
                .unwrap_or(0.0),
        })
        .collect()
}
