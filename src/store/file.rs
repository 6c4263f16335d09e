//! Parquet-backed dataset store
//!
//! Datasets live as parquet files in a data directory described by a
//! `manifest.json` mapping dataset names to files, their CRS, and their
//! geometry column. Loaded tables are cached so repeated requests for the
//! same reference geography are served from memory.

use super::DataStore;
use crate::config::StoreConfig;
use crate::error::{CommunityError, Result};
use crate::geotable::{Crs, GeoTable, DEFAULT_GEOMETRY_COLUMN};
use polars::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// One dataset entry in `manifest.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    /// Parquet file, relative to the data directory
    pub file: PathBuf,
    /// EPSG code of the stored geometries
    pub crs: u32,
    /// Geometry column name
    #[serde(default = "default_geometry_column")]
    pub geometry: String,
}

fn default_geometry_column() -> String {
    DEFAULT_GEOMETRY_COLUMN.to_string()
}

/// Table cache shared across requests
type TableCache = Arc<Mutex<HashMap<String, GeoTable>>>;

/// Dataset store reading parquet files from a data directory
pub struct FileStore {
    data_dir: PathBuf,
    manifest: HashMap<String, ManifestEntry>,
    cache: TableCache,
}

impl FileStore {
    /// Open a store over a data directory containing `manifest.json`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let manifest_path = data_dir.join("manifest.json");
        let reader = File::open(&manifest_path)?;
        let manifest: HashMap<String, ManifestEntry> = serde_json::from_reader(reader)
            .map_err(|e| {
                CommunityError::Store(format!(
                    "invalid manifest {}: {e}",
                    manifest_path.display()
                ))
            })?;
        Ok(FileStore {
            data_dir,
            manifest,
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Open the store described by a `StoreConfig`.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Self::open(&config.data_dir)
    }

    /// Names of the datasets this store can serve.
    pub fn dataset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.manifest.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn load(&self, entry: &ManifestEntry) -> Result<GeoTable> {
        let path = self.data_dir.join(&entry.file);
        let file = File::open(&path)?;
        let df = ParquetReader::new(file).finish()?;
        GeoTable::with_geometry_column(df, Crs(entry.crs), entry.geometry.clone())
    }
}

impl DataStore for FileStore {
    fn dataset(&self, name: &str) -> Result<GeoTable> {
        {
            let guard = self.cache.lock().unwrap();
            if let Some(table) = guard.get(name) {
                debug!(dataset = name, "table cache hit");
                return Ok(table.clone());
            }
        }
        debug!(dataset = name, "table cache miss");

        let entry = self
            .manifest
            .get(name)
            .ok_or_else(|| CommunityError::Store(format!("unknown dataset '{name}'")))?;
        let table = self.load(entry)?;

        let mut guard = self.cache.lock().unwrap();
        guard.insert(name.to_string(), table.clone());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &Path) {
        let mut df = df! {
            "geoid" => ["11001", "11002"],
            "geometry" => ["POINT(0 0)", "POINT(1 1)"],
            "pop" => [100i64, 200],
        }
        .unwrap();
        let file = File::create(dir.join("tracts_2010.parquet")).unwrap();
        ParquetWriter::new(file).finish(&mut df).unwrap();

        let manifest = r#"{
            "tracts_2010": { "file": "tracts_2010.parquet", "crs": 4326 }
        }"#;
        let mut f = File::create(dir.join("manifest.json")).unwrap();
        f.write_all(manifest.as_bytes()).unwrap();
    }

    #[test]
    fn test_open_and_fetch_dataset() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.dataset_names(), vec!["tracts_2010"]);

        let tracts = store.tracts_2010().unwrap();
        assert_eq!(tracts.shape(), (2, 3));
        assert_eq!(tracts.crs(), Crs(4326));
        assert_eq!(tracts.geometry_column(), "geometry");
    }

    #[test]
    fn test_repeated_fetch_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let store = FileStore::open(dir.path()).unwrap();
        let first = store.tracts_2010().unwrap();
        // delete the backing file; the second fetch must come from cache
        std::fs::remove_file(dir.path().join("tracts_2010.parquet")).unwrap();
        let second = store.tracts_2010().unwrap();
        assert!(first.df().equals_missing(second.df()));
    }

    #[test]
    fn test_unknown_dataset() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.dataset("tracts_1870"),
            Err(CommunityError::Store(_))
        ));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileStore::open(dir.path()),
            Err(CommunityError::Io(_))
        ));
    }
}
