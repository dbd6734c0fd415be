use super::KeyValueStore;
use crate::error::{GomiError, Result};
use std::collections::HashMap;

/// In-memory key-value store for testing.
#[derive(Default)]
pub struct InMemoryKvStore {
    values: HashMap<String, String>,
    writes: usize,
    simulate_write_error: bool,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already persisted document, e.g. one written by an older version.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(GomiError::Store("Simulated write error".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
