//! Disk-backed store keeping one JSON file per storage key.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::{FinanceError, Result};

use super::{StorageBackend, StorageKey};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const HOME_ENV: &str = "FINTRACK_HOME";
const APP_DIR: &str = "fintrack";

/// Stores each keyed collection as `<root>/<key>.json`, written atomically
/// by staging to a temporary file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Opens the store at the default data directory, honouring the
    /// `FINTRACK_HOME` override.
    pub fn open_default() -> Result<Self> {
        Self::new(default_base_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: StorageKey) -> PathBuf {
        self.root
            .join(format!("{}.{}", key.as_str(), FILE_EXTENSION))
    }
}

impl StorageBackend for JsonStore {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: StorageKey, payload: &str) -> Result<()> {
        ensure_dir(&self.root)?;
        write_atomic(&self.key_path(key), payload)
    }
}

/// Resolves the data directory: env override, then the platform data dir,
/// then the current directory.
pub fn default_base_dir() -> PathBuf {
    if let Ok(home) = env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return PathBuf::from(home);
        }
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|err| FinanceError::Storage(format!("{}: {}", path.display(), err)))?;
    }
    Ok(())
}

/// Writes `payload` through a sibling tmp file and renames it into place.
pub(crate) fn write_atomic(path: &Path, payload: &str) -> Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, payload)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
