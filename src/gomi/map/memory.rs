use super::{LayerId, MapSurface, Marker, Polyline};
use crate::error::{GomiError, Result};
use crate::model::LatLng;
use std::collections::BTreeMap;

/// Map surface that only records what is on it, for testing.
#[derive(Default)]
pub struct InMemoryMap {
    view: Option<(LatLng, u8)>,
    markers: BTreeMap<LayerId, Marker>,
    polylines: BTreeMap<LayerId, Polyline>,
    next_id: u64,
    commits: usize,
    simulate_commit_error: bool,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<(LatLng, u8)> {
        self.view
    }

    /// Markers currently on the map, in the order they were added.
    pub fn markers(&self) -> Vec<&Marker> {
        self.markers.values().collect()
    }

    pub fn polylines(&self) -> Vec<&Polyline> {
        self.polylines.values().collect()
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn set_simulate_commit_error(&mut self, simulate: bool) {
        self.simulate_commit_error = simulate;
    }

    fn allocate(&mut self) -> LayerId {
        self.next_id += 1;
        LayerId(self.next_id)
    }
}

impl MapSurface for InMemoryMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<()> {
        self.view = Some((center, zoom));
        Ok(())
    }

    fn add_marker(&mut self, marker: &Marker) -> Result<LayerId> {
        let id = self.allocate();
        self.markers.insert(id, marker.clone());
        Ok(id)
    }

    fn add_polyline(&mut self, line: &Polyline) -> Result<LayerId> {
        let id = self.allocate();
        self.polylines.insert(id, line.clone());
        Ok(id)
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<()> {
        self.markers.remove(&id);
        self.polylines.remove(&id);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.simulate_commit_error {
            return Err(GomiError::Store("Simulated map write error".into()));
        }
        self.commits += 1;
        Ok(())
    }
}
