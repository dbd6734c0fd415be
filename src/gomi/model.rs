use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One fixed collection point. Stops are compiled into the binary and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub position: LatLng,
}

impl Stop {
    pub fn new(id: &str, name: &str, address: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            position: LatLng::new(lat, lng),
        }
    }
}

/// One full-cycle completion. The date is the natural key inside the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub date: NaiveDate,
    pub count: usize,
}

impl CompletionRecord {
    pub fn new(date: NaiveDate, count: usize) -> Self {
        Self { date, count }
    }
}

/// The mutable collection state. Only [`crate::state::CollectionStore`] writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionState {
    pub done: BTreeSet<String>,
    /// Set once a cycle completes; cleared only by a reset.
    pub last_completion: Option<CompletionRecord>,
    /// At most one entry per date.
    pub history: Vec<CompletionRecord>,
}

impl CollectionState {
    pub fn is_done(&self, stop_id: &str) -> bool {
        self.done.contains(stop_id)
    }
}
