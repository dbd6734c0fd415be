use super::{LayerId, MapSurface, Marker, PopupAction, Polyline};
use crate::error::{GomiError, Result};
use crate::model::LatLng;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Map surface that renders to a GeoJSON file.
///
/// Features use the simplestyle property names (`marker-color`, `stroke`, ...) so the file
/// displays with colors in common viewers. The file is rewritten on every commit.
pub struct GeoJsonMap {
    path: PathBuf,
    view: Option<(LatLng, u8)>,
    features: BTreeMap<LayerId, Value>,
    next_id: u64,
}

impl GeoJsonMap {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            view: None,
            features: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn allocate(&mut self) -> LayerId {
        self.next_id += 1;
        LayerId(self.next_id)
    }

    /// The document as it would be written by the next commit.
    pub fn document(&self) -> Value {
        let mut doc = json!({
            "type": "FeatureCollection",
            "features": self.features.values().cloned().collect::<Vec<_>>(),
        });
        if let Some((center, zoom)) = self.view {
            doc["view"] = json!({ "center": position(center), "zoom": zoom });
        }
        doc
    }
}

// GeoJSON positions are longitude first.
fn position(p: LatLng) -> Value {
    json!([p.lng, p.lat])
}

fn marker_feature(marker: &Marker) -> Value {
    let action = marker.popup.action.as_ref().map(|action| match action {
        PopupAction::MarkCollected(id) => format!("gomi collect {}", id),
    });
    json!({
        "type": "Feature",
        "id": marker.stop_id,
        "geometry": { "type": "Point", "coordinates": position(marker.position) },
        "properties": {
            "marker-color": marker.color.hex(),
            "title": marker.popup.title,
            "description": marker.popup.address,
            "status": marker.popup.status,
            "action": action,
        }
    })
}

fn polyline_feature(line: &Polyline) -> Value {
    let coordinates: Vec<Value> = line.points.iter().copied().map(position).collect();
    json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": coordinates },
        "properties": {
            "stroke": line.color,
            "stroke-width": line.weight,
            "stroke-opacity": line.opacity,
            "stroke-dasharray": line.dash,
        }
    })
}

impl MapSurface for GeoJsonMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<()> {
        self.view = Some((center, zoom));
        Ok(())
    }

    fn add_marker(&mut self, marker: &Marker) -> Result<LayerId> {
        let id = self.allocate();
        self.features.insert(id, marker_feature(marker));
        Ok(id)
    }

    fn add_polyline(&mut self, line: &Polyline) -> Result<LayerId> {
        let id = self.allocate();
        self.features.insert(id, polyline_feature(line));
        Ok(id)
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<()> {
        self.features.remove(&id);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(GomiError::Io)?;
        }

        let content =
            serde_json::to_string_pretty(&self.document()).map_err(GomiError::Serialization)?;
        let tmp = dir.join(format!(".map-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(GomiError::Io)?;
        fs::rename(&tmp, &self.path).map_err(GomiError::Io)?;
        Ok(())
    }
}
