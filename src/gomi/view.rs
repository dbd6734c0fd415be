//! # Presentation View-Models
//!
//! Pure functions from the current state to what a UI should show. Nothing here writes
//! anywhere; a client (the CLI, or anything else) turns these values into output.
//!
//! Every refresh rebuilds the whole [`Dashboard`] from scratch, there is no incremental
//! update.

use crate::catalog::Catalog;
use crate::model::{CollectionState, CompletionRecord, Stop};
use serde::Serialize;
use std::fmt;

/// Number of history entries shown unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.done, self.total)
    }
}

/// The pending list, or the single "all collected" affordance when nothing is left.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "stops", rename_all = "snake_case")]
pub enum PendingList {
    AllCollected,
    Pending(Vec<Stop>),
}

impl PendingList {
    pub fn stops(&self) -> &[Stop] {
        match self {
            PendingList::AllCollected => &[],
            PendingList::Pending(stops) => stops,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum HistoryView {
    NoHistory,
    Recent(Vec<CompletionRecord>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopStatus {
    pub stop: Stop,
    pub collected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub progress: Progress,
    pub pending: PendingList,
    /// The completion shown in the banner; `None` hides the banner.
    pub banner: Option<CompletionRecord>,
    pub history: HistoryView,
}

pub fn progress(catalog: &Catalog, state: &CollectionState) -> Progress {
    Progress {
        done: state.done.len(),
        total: catalog.len(),
    }
}

/// Catalog stops not yet collected, in catalog order.
pub fn pending_stops(catalog: &Catalog, state: &CollectionState) -> Vec<Stop> {
    catalog
        .stops()
        .iter()
        .filter(|stop| !state.is_done(&stop.id))
        .cloned()
        .collect()
}

pub fn pending_list(catalog: &Catalog, state: &CollectionState) -> PendingList {
    let pending = pending_stops(catalog, state);
    if pending.is_empty() {
        PendingList::AllCollected
    } else {
        PendingList::Pending(pending)
    }
}

pub fn banner(state: &CollectionState) -> Option<CompletionRecord> {
    state.last_completion.clone()
}

/// Up to `limit` entries, newest date first. `Recent` is never empty.
pub fn recent_history(state: &CollectionState, limit: usize) -> HistoryView {
    let mut entries = state.history.clone();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries.truncate(limit);
    if entries.is_empty() {
        HistoryView::NoHistory
    } else {
        HistoryView::Recent(entries)
    }
}

pub fn stop_statuses(catalog: &Catalog, state: &CollectionState) -> Vec<StopStatus> {
    catalog
        .stops()
        .iter()
        .map(|stop| StopStatus {
            stop: stop.clone(),
            collected: state.is_done(&stop.id),
        })
        .collect()
}

pub fn dashboard(catalog: &Catalog, state: &CollectionState, history_limit: usize) -> Dashboard {
    Dashboard {
        progress: progress(catalog, state),
        pending: pending_list(catalog, state),
        banner: banner(state),
        history: recent_history(state, history_limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{abcd_catalog, date};
    use std::collections::HashSet;

    fn state_with(done: &[&str]) -> CollectionState {
        CollectionState {
            done: done.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn progress_reads_done_over_total() {
        let catalog = abcd_catalog();
        assert_eq!(progress(&catalog, &state_with(&[])).to_string(), "0/4");
        assert_eq!(
            progress(&catalog, &state_with(&["a", "b", "c"])).to_string(),
            "3/4"
        );
    }

    #[test]
    fn pending_keeps_catalog_order() {
        let catalog = abcd_catalog();
        let pending = pending_stops(&catalog, &state_with(&["b"]));
        let ids: Vec<&str> = pending.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn pending_and_done_partition_the_catalog() {
        let catalog = abcd_catalog();
        let all: HashSet<String> = catalog.stops().iter().map(|s| s.id.clone()).collect();
        let subsets: [&[&str]; 5] = [
            &[],
            &["a"],
            &["b", "d"],
            &["a", "b", "c"],
            &["a", "b", "c", "d"],
        ];

        for done in subsets {
            let state = state_with(done);
            let done: HashSet<String> = state.done.iter().cloned().collect();
            let pending: HashSet<String> = pending_stops(&catalog, &state)
                .into_iter()
                .map(|s| s.id)
                .collect();

            assert!(pending.is_disjoint(&done));
            let union: HashSet<String> = pending.union(&done).cloned().collect();
            assert_eq!(union, all);
        }
    }

    #[test]
    fn empty_pending_becomes_all_collected() {
        let catalog = abcd_catalog();
        assert_eq!(
            pending_list(&catalog, &state_with(&["a", "b", "c", "d"])),
            PendingList::AllCollected
        );
        assert!(PendingList::AllCollected.stops().is_empty());
    }

    #[test]
    fn banner_follows_last_completion() {
        let mut state = state_with(&["a"]);
        assert_eq!(banner(&state), None);

        let record = CompletionRecord::new(date(2024, 1, 1), 4);
        state.last_completion = Some(record.clone());
        assert_eq!(banner(&state), Some(record));
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let mut state = CollectionState::default();
        assert_eq!(recent_history(&state, 5), HistoryView::NoHistory);

        for day in [3, 1, 7, 2, 6, 5, 4] {
            state.history.push(CompletionRecord::new(date(2024, 1, day), 4));
        }

        let HistoryView::Recent(entries) = recent_history(&state, 5) else {
            panic!("expected recent history");
        };
        let days: Vec<u32> = entries.iter().map(|e| chrono::Datelike::day(&e.date)).collect();
        assert_eq!(days, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn zero_limit_shows_no_history() {
        let mut state = CollectionState::default();
        state.history.push(CompletionRecord::new(date(2024, 1, 1), 4));
        assert_eq!(recent_history(&state, 0), HistoryView::NoHistory);
    }

    #[test]
    fn stop_statuses_mark_collected_stops() {
        let catalog = abcd_catalog();
        let statuses = stop_statuses(&catalog, &state_with(&["c"]));
        let collected: Vec<bool> = statuses.iter().map(|s| s.collected).collect();
        assert_eq!(collected, vec![false, false, true, false]);
    }
}
