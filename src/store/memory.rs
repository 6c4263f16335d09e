//! In-memory dataset store for tests and fixtures

use super::DataStore;
use crate::error::{CommunityError, Result};
use crate::geotable::GeoTable;
use std::collections::HashMap;

/// Dataset store backed by a plain map of pre-built tables
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: HashMap<String, GeoTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset under a name, replacing any existing entry.
    pub fn insert(&mut self, name: impl Into<String>, table: GeoTable) -> &mut Self {
        self.tables.insert(name.into(), table);
        self
    }
}

impl DataStore for MemoryStore {
    fn dataset(&self, name: &str) -> Result<GeoTable> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| CommunityError::Store(format!("unknown dataset '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geotable::Crs;
    use polars::prelude::*;

    #[test]
    fn test_insert_and_fetch() {
        let df = df! {
            "geoid" => ["11001"],
            "geometry" => ["POINT(0 0)"],
        }
        .unwrap();
        let mut store = MemoryStore::new();
        store.insert("tracts_1990", GeoTable::new(df, Crs(4326)).unwrap());

        assert_eq!(store.tracts_1990().unwrap().shape(), (1, 2));
        assert!(matches!(
            store.tracts_2000(),
            Err(CommunityError::Store(_))
        ));
    }
}
