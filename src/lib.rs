//! Geographic community construction
//!
//! This library builds analysis-ready geographic datasets ("communities") by
//! merging heterogeneous geotables: reference tract boundaries from a dataset
//! store, harmonized longitudinal tract data, and LODES employment data.
//!
//! Module organization:
//! - `geotable`: the GeoTable type (dataframe + geometry + CRS)
//! - `merge`: CRS validation and the stack/join merge operations
//! - `filter`: geographic restriction of reference tables
//! - `store`: injectable dataset stores (file-backed and in-memory)
//! - `sources`: contracts for externally-fetched attribute data
//! - `community`: the Community type and its constructors

pub mod community;
pub mod config;
pub mod error;
pub mod filter;
pub mod geotable;
pub mod merge;
pub mod sources;
pub mod store;

pub use community::Community;
pub use error::{CommunityError, Result};
pub use filter::GeoFilter;
pub use geotable::{Crs, GeoTable};
pub use store::{DataStore, FileStore, MemoryStore};
