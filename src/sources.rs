//! Contracts for externally-fetched attribute data
//!
//! These collaborators own network/disk I/O, caching, and schema
//! normalization; the merger only sees their output. The contract is the
//! same for all of them: return a table of geographic records keyed by
//! `geoid`. Geometry is attached from the dataset store's boundaries, so
//! source tables are plain dataframes.

use crate::error::Result;
use polars::prelude::DataFrame;

/// Harmonized longitudinal tract data (LTDB, NCDB).
pub trait LongitudinalSource {
    /// Fetch harmonized historical rows for the given geographic units.
    fn fetch(&self, geoids: &[String]) -> Result<DataFrame>;
}

/// LODES workplace-area-characteristics employment data.
pub trait LodesSource {
    /// Fetch WAC records for one state, one row per unit per year.
    fn fetch(&self, state_fips: &str, years: &[u16]) -> Result<DataFrame>;
}
