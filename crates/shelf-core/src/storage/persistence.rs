//! Catalog document persistence
//!
//! Saves and loads the catalog as a single JSON document at
//! `<data_dir>/catalog.json`. The document is rewritten in full on every
//! save, using an atomic write (write to temp file, then rename) so the
//! file is never left half-written.
//!
//! A missing document means an empty catalog. A document that cannot be
//! parsed is moved aside to a `.corrupt.backup` path and likewise treated
//! as empty, so a damaged file never blocks startup and the bad bytes
//! stay recoverable.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the catalog document
pub struct CatalogPersistence {
    config: Config,
}

impl CatalogPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a catalog document exists on disk
    pub fn exists(&self) -> bool {
        self.config.catalog_path().exists()
    }

    /// Serialize the catalog and atomically replace the document on disk
    pub fn save(&self, catalog: &Catalog) -> StorageResult<()> {
        let path = self.config.catalog_path();
        let bytes = serde_json::to_vec_pretty(catalog)?;

        atomic_write(&path, &bytes)?;
        debug!(books = catalog.len(), path = %path.display(), "catalog saved");
        Ok(())
    }

    /// Load the catalog document
    ///
    /// Returns `None` when no document exists yet. An unparseable
    /// document is renamed to a backup path and reported as absent.
    pub fn load(&self) -> StorageResult<Option<Catalog>> {
        let path = self.config.catalog_path();
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        match serde_json::from_slice::<Catalog>(&bytes) {
            Ok(catalog) => {
                debug!(books = catalog.len(), "catalog loaded");
                Ok(Some(catalog))
            }
            Err(err) => {
                let backup = backup_path(&path);
                fs::rename(&path, &backup)
                    .map_err(|source| StorageError::from_io(source, path.clone()))?;
                warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    error = %err,
                    "catalog document is corrupt; moved aside, starting empty"
                );
                Ok(None)
            }
        }
    }

    /// Load the existing catalog, or start a new empty one
    pub fn load_or_default(&self) -> StorageResult<Catalog> {
        Ok(self.load()?.unwrap_or_default())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog.json".to_string());
    name.push_str(".corrupt.backup");
    path.with_file_name(name)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|source| StorageError::from_io(source, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|source| StorageError::from_io(source, temp_path.clone()))?;
    file.sync_all()
        .map_err(|source| StorageError::from_io(source, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::from_io(source, path.to_path_buf()))?;

    Ok(())
}
