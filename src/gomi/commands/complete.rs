//! Completion detection.
//!
//! A cycle completes when every catalog stop is in the done set. The last completion
//! record doubles as the "already finished" flag, so reloading with a full done set does
//! not fire again until a reset clears it. It is not cleared on a new calendar day.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{CollectionState, CompletionRecord};
use crate::state::CollectionStore;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use tracing::info;

/// Returns the record to store if the state has just become complete.
pub fn evaluate(
    catalog_len: usize,
    state: &CollectionState,
    today: NaiveDate,
) -> Option<CompletionRecord> {
    let all_done = state.done.len() == catalog_len;
    let already_finished = state.last_completion.is_some();
    if all_done && !already_finished {
        Some(CompletionRecord::new(today, catalog_len))
    } else {
        None
    }
}

/// Sets the last completion and upserts the history entry for the record's date.
pub fn apply(state: &mut CollectionState, record: CompletionRecord) {
    state.last_completion = Some(record.clone());
    match state.history.iter_mut().find(|h| h.date == record.date) {
        Some(existing) => *existing = record,
        None => state.history.push(record),
    }
}

/// Runs the check against the store and persists a new record if one fires.
pub fn run<K: KeyValueStore>(
    store: &mut CollectionStore<K>,
    catalog: &Catalog,
    today: NaiveDate,
) -> Result<Option<CompletionRecord>> {
    let Some(record) = evaluate(catalog.len(), store.state(), today) else {
        return Ok(None);
    };
    store.record_completion(record.clone())?;
    info!(date = %record.date, count = record.count, "all stops collected");
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryKvStore;
    use crate::test_utils::{abcd_catalog, date};

    fn state_with(done: &[&str]) -> CollectionState {
        CollectionState {
            done: done.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn does_not_fire_while_stops_are_pending() {
        let state = state_with(&["a", "b", "c"]);
        assert_eq!(evaluate(4, &state, date(2024, 5, 1)), None);
    }

    #[test]
    fn fires_when_the_last_stop_is_collected() {
        let state = state_with(&["a", "b", "c", "d"]);
        let record = evaluate(4, &state, date(2024, 5, 1)).unwrap();
        assert_eq!(record, CompletionRecord::new(date(2024, 5, 1), 4));
    }

    #[test]
    fn does_not_fire_when_already_finished() {
        let mut state = state_with(&["a", "b", "c", "d"]);
        apply(&mut state, CompletionRecord::new(date(2024, 5, 1), 4));

        assert_eq!(evaluate(4, &state, date(2024, 5, 1)), None);
        // A new day does not re-arm the check either.
        assert_eq!(evaluate(4, &state, date(2024, 5, 2)), None);
    }

    #[test]
    fn same_date_overwrites_instead_of_appending() {
        let mut state = CollectionState::default();
        apply(&mut state, CompletionRecord::new(date(2024, 5, 1), 3));
        apply(&mut state, CompletionRecord::new(date(2024, 5, 1), 4));

        assert_eq!(state.history, vec![CompletionRecord::new(date(2024, 5, 1), 4)]);
        assert_eq!(
            state.last_completion,
            Some(CompletionRecord::new(date(2024, 5, 1), 4))
        );
    }

    #[test]
    fn new_date_appends() {
        let mut state = CollectionState::default();
        apply(&mut state, CompletionRecord::new(date(2024, 5, 1), 4));
        apply(&mut state, CompletionRecord::new(date(2024, 5, 2), 4));
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.last_completion.unwrap().date, date(2024, 5, 2));
    }

    #[test]
    fn run_persists_once_per_transition() {
        let catalog = abcd_catalog();
        let mut store = CollectionStore::load(InMemoryKvStore::new()).unwrap();
        for id in ["a", "b", "c", "d"] {
            store.mark_collected(id).unwrap();
        }

        let fired = run(&mut store, &catalog, date(2024, 5, 1)).unwrap();
        assert!(fired.is_some());
        let writes = store.kv().writes();

        // Collecting again while full is a no-op and the check stays quiet.
        store.mark_collected("d").unwrap();
        assert_eq!(run(&mut store, &catalog, date(2024, 5, 1)).unwrap(), None);
        assert_eq!(store.kv().writes(), writes);
        assert_eq!(store.state().history.len(), 1);
    }

    #[test]
    fn completing_on_a_date_already_in_history_does_not_duplicate() {
        let mut state = state_with(&["a", "b", "c", "d"]);
        state.history = vec![
            CompletionRecord::new(date(2024, 4, 30), 4),
            CompletionRecord::new(date(2024, 5, 1), 4),
        ];

        let record = evaluate(4, &state, date(2024, 5, 1)).unwrap();
        apply(&mut state, record);

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].date, date(2024, 4, 30));
    }
}
