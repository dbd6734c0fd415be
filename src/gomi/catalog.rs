//! # Stop Catalog
//!
//! The fixed, ordered list of collection points. The catalog is data compiled into the
//! binary: changing it means shipping a new build. Order matters, since both the pending
//! list and the route overlay follow it.

use crate::model::{LatLng, Stop};
use once_cell::sync::Lazy;

/// Where the map opens when no other center is configured.
pub const DEFAULT_CENTER: LatLng = LatLng::new(33.5904, 130.4017);

static STOPS: Lazy<Vec<Stop>> = Lazy::new(|| {
    vec![
        Stop::new(
            "a",
            "Collection Point A",
            "Fukuoka-shi Chuo-ku 1-2-3",
            33.5904,
            130.4017,
        ),
        Stop::new(
            "b",
            "Collection Point B",
            "Fukuoka-shi Chuo-ku 4-5-6",
            33.5920,
            130.3990,
        ),
        Stop::new(
            "c",
            "Collection Point C",
            "Fukuoka-shi Chuo-ku 7-8-9",
            33.5885,
            130.4040,
        ),
        Stop::new(
            "d",
            "Collection Point D",
            "Fukuoka-shi Chuo-ku 10-11-12",
            33.5900,
            130.4070,
        ),
    ]
});

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    stops: Vec<Stop>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The stops shipped with this build.
    pub fn builtin() -> Self {
        Self {
            stops: STOPS.clone(),
        }
    }

    pub fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
