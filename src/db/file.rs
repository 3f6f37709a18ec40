use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use super::{KeyValueStore, StoreError};

/// Keeps each key in `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens the store, creating `dir` if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            slot: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                slot: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let io_err = |source| StoreError::Io {
            slot: key.to_string(),
            source,
        };

        fs::write(&tmp, value.as_bytes()).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        debug!(slot = key, bytes = value.len(), "slot written");
        Ok(())
    }
}
