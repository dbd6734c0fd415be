use crate::api::GomiApi;
use crate::catalog::{Catalog, DEFAULT_CENTER};
use crate::config::GomiConfig;
use crate::error::{GomiError, Result};
use crate::map::geojson::GeoJsonMap;
use crate::map::MapLayer;
use crate::state::CollectionStore;
use crate::store::fs::FileKvStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const HOME_ENV: &str = "GOMI_HOME";

pub struct GomiContext {
    pub api: GomiApi<FileKvStore, GeoJsonMap>,
    pub config: GomiConfig,
    pub data_dir: PathBuf,
}

/// Picks the data directory: an explicit `home`, then `$GOMI_HOME`, then the OS data
/// directory.
pub fn resolve_data_dir(home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(home) = home {
        return Ok(home);
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "gomi", "gomi")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| GomiError::Config("Could not determine data directory".into()))
}

/// Loads config and state from the data directory and wires the production collaborators.
pub fn initialize(home: Option<PathBuf>) -> Result<GomiContext> {
    let data_dir = resolve_data_dir(home)?;
    let config = GomiConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), "initializing");

    let store = CollectionStore::load_with_key(FileKvStore::new(&data_dir), &config.storage_key)?;
    let surface = GeoJsonMap::new(config.map_output_path(&data_dir));
    let map = MapLayer::init(surface, DEFAULT_CENTER, config.map_zoom)?;

    let api = GomiApi::new(store, Catalog::builtin(), map, &data_dir)
        .with_history_limit(config.history_limit);

    Ok(GomiContext {
        api,
        config,
        data_dir,
    })
}
