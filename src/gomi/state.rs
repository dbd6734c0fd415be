//! # Collection State Store
//!
//! [`CollectionStore`] owns the single [`CollectionState`] of the process and is the only
//! code allowed to mutate it. Every mutation is followed by a full write of the state
//! document through the [`KeyValueStore`].
//!
//! ## Stored Document
//!
//! The document keeps the field names of the earliest saved format, so files written by
//! older versions stay readable:
//!
//! ```json
//! {
//!   "done": ["a", "b"],
//!   "history": {"date": "2024-01-01", "count": 4},
//!   "historyList": [{"date": "2024-01-01", "count": 4}]
//! }
//! ```
//!
//! `history` is the last completion record (or `null`), `historyList` is the completion
//! history. Documents written before the history list existed lack `historyList`; they
//! are migrated on load and written back immediately.
//!
//! ## Corruption
//!
//! A document that fails to parse is treated as absent: the store starts empty and logs a
//! warning. It is not rewritten until the next mutation.

use crate::commands::complete;
use crate::error::{GomiError, Result};
use crate::model::{CollectionState, CompletionRecord};
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Key the state document is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "gomi-collection-state";

#[derive(Debug, Serialize, Deserialize)]
struct StoredState {
    #[serde(default)]
    done: Vec<String>,
    #[serde(rename = "history", default)]
    last_completion: Option<CompletionRecord>,
    #[serde(rename = "historyList", default, skip_serializing_if = "Option::is_none")]
    history: Option<Vec<CompletionRecord>>,
}

impl From<&CollectionState> for StoredState {
    fn from(state: &CollectionState) -> Self {
        Self {
            done: state.done.iter().cloned().collect(),
            last_completion: state.last_completion.clone(),
            history: Some(state.history.clone()),
        }
    }
}

pub struct CollectionStore<K: KeyValueStore> {
    kv: K,
    key: String,
    state: CollectionState,
}

impl<K: KeyValueStore> CollectionStore<K> {
    /// Loads the state document stored under [`DEFAULT_STORAGE_KEY`].
    pub fn load(kv: K) -> Result<Self> {
        Self::load_with_key(kv, DEFAULT_STORAGE_KEY)
    }

    /// Loads the state document stored under `key`, migrating legacy documents.
    ///
    /// Only read errors of the underlying store propagate; unparsable documents fall back
    /// to the empty state.
    pub fn load_with_key(kv: K, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let raw = kv.get(&key)?;
        let mut store = Self {
            kv,
            key,
            state: CollectionState::default(),
        };

        let Some(raw) = raw else {
            debug!(key = %store.key, "no saved state, starting empty");
            return Ok(store);
        };

        let stored = match serde_json::from_str::<StoredState>(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(key = %store.key, error = %e, "failed to parse saved state, starting empty");
                return Ok(store);
            }
        };

        let needs_migration = stored.history.is_none();
        store.state = CollectionState {
            done: stored.done.into_iter().collect::<BTreeSet<_>>(),
            history: stored
                .history
                .unwrap_or_else(|| stored.last_completion.iter().cloned().collect()),
            last_completion: stored.last_completion,
        };

        if needs_migration {
            store.save()?;
            info!(
                key = %store.key,
                entries = store.state.history.len(),
                "migrated saved state to include the completion history"
            );
        }

        Ok(store)
    }

    /// Writes the full state document. Failures are returned as-is; there is no retry.
    pub fn save(&mut self) -> Result<()> {
        let doc = serde_json::to_string(&StoredState::from(&self.state))
            .map_err(GomiError::Serialization)?;
        self.kv.set(&self.key, &doc)
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    /// Marks a stop collected. Returns `false` without writing if it already was.
    ///
    /// Catalog membership is not checked here; callers pass known stop ids.
    pub fn mark_collected(&mut self, stop_id: &str) -> Result<bool> {
        if self.state.is_done(stop_id) {
            return Ok(false);
        }
        self.state.done.insert(stop_id.to_string());
        self.save()?;
        debug!(stop = stop_id, "stop marked collected");
        Ok(true)
    }

    /// Wipes done set, last completion and history together.
    pub fn reset(&mut self) -> Result<()> {
        self.state = CollectionState::default();
        self.save()?;
        info!("collection state reset");
        Ok(())
    }

    /// Applies a completion record produced by the completion engine and persists it.
    pub fn record_completion(&mut self, record: CompletionRecord) -> Result<()> {
        complete::apply(&mut self.state, record);
        self.save()
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut K {
        &mut self.kv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryKvStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stored_json(store: &CollectionStore<InMemoryKvStore>) -> serde_json::Value {
        serde_json::from_str(store.kv().raw(DEFAULT_STORAGE_KEY).unwrap()).unwrap()
    }

    #[test]
    fn first_run_starts_empty_without_writing() {
        let store = CollectionStore::load(InMemoryKvStore::new()).unwrap();
        assert_eq!(store.state(), &CollectionState::default());
        assert_eq!(store.kv().writes(), 0);
    }

    #[test]
    fn corrupt_document_falls_back_to_empty() {
        let kv = InMemoryKvStore::with_value(DEFAULT_STORAGE_KEY, "{not json");
        let store = CollectionStore::load(kv).unwrap();

        assert_eq!(store.state(), &CollectionState::default());
        assert_eq!(store.kv().writes(), 0);
        assert_eq!(store.kv().raw(DEFAULT_STORAGE_KEY), Some("{not json"));
    }

    #[test]
    fn document_with_invalid_date_is_treated_as_corrupt() {
        let kv = InMemoryKvStore::with_value(
            DEFAULT_STORAGE_KEY,
            r#"{"done":["a"],"history":{"date":"someday","count":4},"historyList":[]}"#,
        );
        let store = CollectionStore::load(kv).unwrap();
        assert!(store.state().done.is_empty());
    }

    #[test]
    fn legacy_document_is_migrated_and_persisted() {
        let kv = InMemoryKvStore::with_value(
            DEFAULT_STORAGE_KEY,
            r#"{"done":["a"],"history":{"date":"2024-01-01","count":4}}"#,
        );
        let store = CollectionStore::load(kv).unwrap();

        let expected = CompletionRecord::new(date(2024, 1, 1), 4);
        assert_eq!(store.state().history, vec![expected.clone()]);
        assert_eq!(store.state().last_completion, Some(expected));
        assert!(store.state().is_done("a"));

        assert_eq!(store.kv().writes(), 1);
        let json = stored_json(&store);
        assert_eq!(
            json["historyList"],
            serde_json::json!([{"date": "2024-01-01", "count": 4}])
        );
        assert_eq!(json["done"], serde_json::json!(["a"]));
    }

    #[test]
    fn legacy_document_without_completion_migrates_to_empty_history() {
        let kv = InMemoryKvStore::with_value(DEFAULT_STORAGE_KEY, r#"{"done":[],"history":null}"#);
        let store = CollectionStore::load(kv).unwrap();

        assert!(store.state().history.is_empty());
        assert!(store.state().last_completion.is_none());
        assert_eq!(store.kv().writes(), 1);
        assert_eq!(stored_json(&store)["historyList"], serde_json::json!([]));
    }

    #[test]
    fn current_document_is_not_rewritten_on_load() {
        let kv = InMemoryKvStore::with_value(
            DEFAULT_STORAGE_KEY,
            r#"{"done":["b","a"],"history":null,"historyList":[{"date":"2024-02-03","count":4}]}"#,
        );
        let store = CollectionStore::load(kv).unwrap();

        assert_eq!(store.kv().writes(), 0);
        assert_eq!(store.state().done.len(), 2);
        assert!(store.state().last_completion.is_none());
        assert_eq!(store.state().history.len(), 1);
    }

    #[test]
    fn duplicate_ids_in_a_document_collapse() {
        let kv = InMemoryKvStore::with_value(
            DEFAULT_STORAGE_KEY,
            r#"{"done":["a","a"],"history":null,"historyList":[]}"#,
        );
        let store = CollectionStore::load(kv).unwrap();
        assert_eq!(store.state().done.len(), 1);
    }

    #[test]
    fn mark_collected_is_idempotent() {
        let mut store = CollectionStore::load(InMemoryKvStore::new()).unwrap();

        assert!(store.mark_collected("a").unwrap());
        let after_once = store.state().clone();
        assert!(!store.mark_collected("a").unwrap());

        assert_eq!(store.state(), &after_once);
        assert_eq!(store.kv().writes(), 1);
    }

    #[test]
    fn saved_state_survives_reload() {
        let mut store = CollectionStore::load(InMemoryKvStore::new()).unwrap();
        store.mark_collected("a").unwrap();
        store.mark_collected("c").unwrap();
        store
            .record_completion(CompletionRecord::new(date(2024, 3, 1), 4))
            .unwrap();
        let before = store.state().clone();

        let raw = store.kv().raw(DEFAULT_STORAGE_KEY).unwrap().to_string();
        let reloaded =
            CollectionStore::load(InMemoryKvStore::with_value(DEFAULT_STORAGE_KEY, &raw)).unwrap();
        assert_eq!(reloaded.state(), &before);
    }

    #[test]
    fn reset_is_total() {
        let mut store = CollectionStore::load(InMemoryKvStore::new()).unwrap();
        store.mark_collected("a").unwrap();
        store
            .record_completion(CompletionRecord::new(date(2024, 3, 1), 1))
            .unwrap();

        store.reset().unwrap();

        assert!(store.state().done.is_empty());
        assert!(store.state().last_completion.is_none());
        assert!(store.state().history.is_empty());
        assert_eq!(
            stored_json(&store),
            serde_json::json!({"done": [], "history": null, "historyList": []})
        );
    }

    #[test]
    fn write_failure_propagates() {
        let mut store = CollectionStore::load(InMemoryKvStore::new()).unwrap();
        store.kv_mut().set_simulate_write_error(true);

        let err = store.mark_collected("a").unwrap_err();
        assert!(matches!(err, GomiError::Store(_)));
    }

    #[test]
    fn custom_storage_key() {
        let mut store = CollectionStore::load_with_key(InMemoryKvStore::new(), "route-7").unwrap();
        store.mark_collected("a").unwrap();
        assert!(store.kv().raw("route-7").is_some());
        assert!(store.kv().raw(DEFAULT_STORAGE_KEY).is_none());
    }
}
