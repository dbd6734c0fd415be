//! # Map Rendering
//!
//! The map widget itself is an external collaborator behind the [`MapSurface`] trait. This
//! module decides *what* goes on the map; the surface decides how it is drawn.
//!
//! ## Scene
//!
//! [`scene`] turns the current state into a [`MapScene`]:
//!
//! - One marker per catalog stop, colored by whether it was collected. There are only two
//!   colors, no intermediate states.
//! - Pending markers carry a popup action to mark the stop collected.
//! - A dashed route line through the pending stops, in catalog order, when at least two
//!   stops are pending. The route is a drawing aid and is never optimized.
//!
//! ## Redraw
//!
//! [`MapLayer`] remembers what it last added and removes all of it before drawing the next
//! scene, so the surface always shows exactly one scene.
//!
//! ## Implementations
//!
//! - [`geojson::GeoJsonMap`]: writes the scene as a GeoJSON `FeatureCollection`
//! - [`memory::InMemoryMap`]: records calls for testing

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{CollectionState, LatLng, Stop};
use serde::Serialize;
use tracing::debug;

pub mod geojson;
pub mod memory;

pub const DEFAULT_ZOOM: u8 = 15;
const ROUTE_COLOR: &str = "#3b82f6";
const ROUTE_WEIGHT: u8 = 3;
const ROUTE_OPACITY: f32 = 0.7;
const ROUTE_DASH: &str = "10, 10";

/// Identifies something previously added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Pending,
    Collected,
}

impl MarkerColor {
    pub fn hex(self) -> &'static str {
        match self {
            MarkerColor::Pending => "#ef4444",
            MarkerColor::Collected => "#10b981",
        }
    }

    pub fn status_label(self) -> &'static str {
        match self {
            MarkerColor::Pending => "Pending",
            MarkerColor::Collected => "Collected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "stop_id", rename_all = "snake_case")]
pub enum PopupAction {
    MarkCollected(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub address: String,
    pub status: &'static str,
    pub action: Option<PopupAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub stop_id: String,
    pub position: LatLng,
    pub color: MarkerColor,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<LatLng>,
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f32,
    pub dash: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapScene {
    pub markers: Vec<Marker>,
    pub route: Option<Polyline>,
}

/// The external map widget.
pub trait MapSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<()>;

    fn add_marker(&mut self, marker: &Marker) -> Result<LayerId>;

    fn add_polyline(&mut self, line: &Polyline) -> Result<LayerId>;

    /// Removes a marker or polyline. Unknown ids are ignored.
    fn remove_layer(&mut self, id: LayerId) -> Result<()>;

    /// Called once a redraw is complete. Surfaces that buffer output flush here.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

pub fn marker_for(stop: &Stop, collected: bool) -> Marker {
    let color = if collected {
        MarkerColor::Collected
    } else {
        MarkerColor::Pending
    };
    Marker {
        stop_id: stop.id.clone(),
        position: stop.position,
        color,
        popup: Popup {
            title: stop.name.clone(),
            address: stop.address.clone(),
            status: color.status_label(),
            action: (!collected).then(|| PopupAction::MarkCollected(stop.id.clone())),
        },
    }
}

/// Polyline through pending stops in catalog order; `None` under two points.
pub fn route(catalog: &Catalog, state: &CollectionState) -> Option<Polyline> {
    let points: Vec<LatLng> = catalog
        .stops()
        .iter()
        .filter(|stop| !state.is_done(&stop.id))
        .map(|stop| stop.position)
        .collect();
    if points.len() < 2 {
        return None;
    }
    Some(Polyline {
        points,
        color: ROUTE_COLOR,
        weight: ROUTE_WEIGHT,
        opacity: ROUTE_OPACITY,
        dash: ROUTE_DASH,
    })
}

pub fn scene(catalog: &Catalog, state: &CollectionState) -> MapScene {
    MapScene {
        markers: catalog
            .stops()
            .iter()
            .map(|stop| marker_for(stop, state.is_done(&stop.id)))
            .collect(),
        route: route(catalog, state),
    }
}

/// Owns the surface and the layers of the scene currently shown on it.
pub struct MapLayer<M: MapSurface> {
    surface: M,
    markers: Vec<LayerId>,
    route: Option<LayerId>,
}

impl<M: MapSurface> MapLayer<M> {
    /// Centers the surface and returns a layer with nothing drawn yet.
    pub fn init(mut surface: M, center: LatLng, zoom: u8) -> Result<Self> {
        surface.set_view(center, zoom)?;
        Ok(Self {
            surface,
            markers: Vec::new(),
            route: None,
        })
    }

    /// Replaces whatever is on the surface with `scene`.
    pub fn redraw(&mut self, scene: &MapScene) -> Result<()> {
        for id in self.markers.drain(..) {
            self.surface.remove_layer(id)?;
        }
        if let Some(id) = self.route.take() {
            self.surface.remove_layer(id)?;
        }

        for marker in &scene.markers {
            let id = self.surface.add_marker(marker)?;
            self.markers.push(id);
        }
        if let Some(line) = &scene.route {
            self.route = Some(self.surface.add_polyline(line)?);
        }
        debug!(
            markers = self.markers.len(),
            route_points = scene.route.as_ref().map_or(0, |r| r.points.len()),
            "map redrawn"
        );
        self.surface.commit()
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }
}
