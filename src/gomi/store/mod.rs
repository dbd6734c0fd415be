//! # Storage Layer
//!
//! Gomi persists exactly one document: the collection state. The storage layer therefore
//! only needs a string-valued key-value interface, defined by [`KeyValueStore`]. What the
//! document looks like is the state store's business (see [`crate::state`]); this layer
//! only moves opaque strings in and out.
//!
//! ## Implementations
//!
//! - [`fs::FileKvStore`]: Production storage
//!   - One `<key>.json` file per key inside the data directory
//!   - Writes go to a temporary file first and are renamed into place, so a crash
//!     never leaves a half-written document behind
//!
//! - [`memory::InMemoryKvStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures to exercise error propagation
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── gomi-collection-state.json   # The collection state document
//! ├── config.json                  # Configuration (see crate::config)
//! └── map.geojson                  # Last rendered map
//! ```

use crate::error::{GomiError, Result};

pub mod fs;
pub mod memory;

/// Abstract interface for the persistent key-value store.
///
/// Both operations are synchronous and blocking. There is no partial write: `set`
/// either replaces the whole value or fails.
pub trait KeyValueStore {
    /// Read the value stored under `key`. Returns `Ok(None)` if nothing was stored yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keys are non-empty and limited to ASCII letters, digits, `-` and `_`, so every key maps
/// to a plain file name inside the data directory.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GomiError::Store(format!("Invalid storage key: {:?}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(validate_key("gomi-collection-state").is_ok());
        assert!(validate_key("route_2").is_ok());
    }

    #[test]
    fn rejects_separators_dots_and_empty() {
        for key in ["", "a/b", "../x", "a.b", "a b", "a\\b"] {
            assert!(validate_key(key).is_err(), "accepted {:?}", key);
        }
    }
}
