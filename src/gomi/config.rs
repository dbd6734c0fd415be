//! # Configuration
//!
//! Gomi reads `config.json` from its data directory. Missing keys fall back to compiled
//! defaults, and a missing file means all defaults.
//!
//! ## Data Directory
//!
//! Resolved in priority order (see [`crate::init`]):
//! 1. `--home <DIR>` on the command line
//! 2. The `GOMI_HOME` environment variable
//! 3. The OS data directory (via the `directories` crate)
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage-key` | `gomi-collection-state` | Key of the state document |
//! | `alert-delay-ms` | `500` | Delay before the startup alert |
//! | `history-limit` | `5` | Entries shown in the history view |
//! | `map-zoom` | `15` | Initial zoom of the map |
//! | `map-output` | `<data dir>/map.geojson` | Where the map is written |

use crate::error::{GomiError, Result};
use crate::map::DEFAULT_ZOOM;
use crate::notify::DEFAULT_ALERT_DELAY;
use crate::state::DEFAULT_STORAGE_KEY;
use crate::store::validate_key;
use crate::view::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const MAP_FILENAME: &str = "map.geojson";

/// Keys accepted by [`GomiConfig::get`] and [`GomiConfig::set`], in display order.
pub const KEYS: [&str; 5] = [
    "storage-key",
    "alert-delay-ms",
    "history-limit",
    "map-zoom",
    "map-output",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GomiConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_alert_delay_ms")]
    pub alert_delay_ms: u64,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_map_zoom")]
    pub map_zoom: u8,

    /// Where the GeoJSON map goes. Defaults to `map.geojson` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_output: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_alert_delay_ms() -> u64 {
    DEFAULT_ALERT_DELAY.as_millis() as u64
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_map_zoom() -> u8 {
    DEFAULT_ZOOM
}

impl Default for GomiConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            alert_delay_ms: default_alert_delay_ms(),
            history_limit: default_history_limit(),
            map_zoom: default_map_zoom(),
            map_output: None,
        }
    }
}

impl GomiConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GomiError::Io)?;
        let config: GomiConfig =
            serde_json::from_str(&content).map_err(GomiError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(GomiError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(GomiError::Serialization)?;
        fs::write(config_path, content).map_err(GomiError::Io)?;
        Ok(())
    }

    pub fn alert_delay(&self) -> Duration {
        Duration::from_millis(self.alert_delay_ms)
    }

    pub fn map_output_path(&self, data_dir: &Path) -> PathBuf {
        self.map_output
            .clone()
            .unwrap_or_else(|| data_dir.join(MAP_FILENAME))
    }

    /// Value of `key` formatted for display, or `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage-key" => Some(self.storage_key.clone()),
            "alert-delay-ms" => Some(self.alert_delay_ms.to_string()),
            "history-limit" => Some(self.history_limit.to_string()),
            "map-zoom" => Some(self.map_zoom.to_string()),
            "map-output" => Some(
                self.map_output
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| format!("(default) {}", MAP_FILENAME)),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage-key" => {
                if validate_key(value).is_err() {
                    return Err(GomiError::Config(format!(
                        "storage-key may only contain letters, digits, '-' and '_', got {:?}",
                        value
                    )));
                }
                self.storage_key = value.to_string();
            }
            "alert-delay-ms" => self.alert_delay_ms = parse_number(key, value)?,
            "history-limit" => {
                let limit: usize = parse_number(key, value)?;
                if limit == 0 {
                    return Err(GomiError::Config("history-limit must be at least 1".into()));
                }
                self.history_limit = limit;
            }
            "map-zoom" => {
                let zoom: u8 = parse_number(key, value)?;
                if zoom > 19 {
                    return Err(GomiError::Config("map-zoom must be between 0 and 19".into()));
                }
                self.map_zoom = zoom;
            }
            "map-output" => {
                self.map_output = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => return Err(GomiError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GomiError::Config(format!("{} expects a number, got {:?}", key, value)))
}
