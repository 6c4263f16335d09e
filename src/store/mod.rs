//! Dataset stores providing pre-fetched reference geographies
//!
//! A store is an explicitly-constructed, injectable service object rather
//! than ambient global state: production code opens a `FileStore` over a
//! data directory, while tests substitute a `MemoryStore` fixture without
//! touching process-wide singletons.

mod file;
mod memory;

pub use file::{FileStore, ManifestEntry};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::geotable::GeoTable;

/// Provider of pre-fetched reference geographies.
///
/// The named accessors cover the datasets community construction needs;
/// `dataset` is the single point implementations supply.
pub trait DataStore {
    /// Fetch a named dataset from the store.
    fn dataset(&self, name: &str) -> Result<GeoTable>;

    /// 1990 census tract boundaries with demographic attributes
    fn tracts_1990(&self) -> Result<GeoTable> {
        self.dataset("tracts_1990")
    }

    /// 2000 census tract boundaries with demographic attributes
    fn tracts_2000(&self) -> Result<GeoTable> {
        self.dataset("tracts_2000")
    }

    /// 2010 census tract boundaries with demographic attributes
    fn tracts_2010(&self) -> Result<GeoTable> {
        self.dataset("tracts_2010")
    }

    /// Metro-area boundaries keyed by MSA FIPS code
    fn msas(&self) -> Result<GeoTable> {
        self.dataset("msas")
    }

    /// County boundaries keyed by county FIPS code
    fn counties(&self) -> Result<GeoTable> {
        self.dataset("counties")
    }
}
