use super::{validate_key, KeyValueStore};
use crate::error::{GomiError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(GomiError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(GomiError::Io)?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.ensure_dir()?;

        let target = self.path_for(key);
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(GomiError::Io)?;
        fs::rename(&tmp, target).map_err(GomiError::Io)?;
        Ok(())
    }
}
