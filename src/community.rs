//! Community construction from heterogeneous sources
//!
//! A `Community` wraps one merged geotable representing a geographic area
//! across sources and time periods. Every constructor validates CRS
//! consistency before any merge work and returns a fresh table; nothing is
//! mutated in place.

use crate::error::Result;
use crate::filter::{self, GeoFilter};
use crate::geotable::GeoTable;
use crate::merge;
use crate::sources::{LodesSource, LongitudinalSource};
use crate::store::DataStore;

/// An analysis-ready geographic dataset across sources/time periods
#[derive(Debug, Clone)]
pub struct Community {
    /// The merged geotable
    pub gdf: GeoTable,
}

impl Community {
    /// Build a community by stacking already-materialized geotables,
    /// typically one per time period.
    ///
    /// All tables must share one CRS; a mismatch is a hard error raised
    /// before any rows are merged.
    pub fn from_geodataframes(tables: &[GeoTable]) -> Result<Self> {
        let gdf = merge::stack(tables)?;
        Ok(Community { gdf })
    }

    /// Build a community from the store's 2010 tract boundaries restricted
    /// by a geographic filter.
    pub fn from_census(store: &dyn DataStore, filter: &GeoFilter) -> Result<Self> {
        let tracts = store.tracts_2010()?;
        let gdf = filter::apply(&tracts, filter, store)?;
        Ok(Community { gdf })
    }

    /// Build a community from harmonized longitudinal data for the given
    /// units, joined onto the store's tract boundaries.
    pub fn from_ltdb(
        store: &dyn DataStore,
        source: &dyn LongitudinalSource,
        geoids: &[String],
    ) -> Result<Self> {
        let boundaries = filter::by_geoid(&store.tracts_2010()?, geoids)?;
        let attrs = source.fetch(geoids)?;
        let gdf = merge::join_attributes(&boundaries, &attrs)?;
        Ok(Community { gdf })
    }

    /// Build a community from LODES workplace-area-characteristics data for
    /// one state, joined onto the state's tract boundaries. The result has
    /// one row per unit per requested year.
    pub fn from_lodes(
        store: &dyn DataStore,
        source: &dyn LodesSource,
        state_fips: &str,
        years: &[u16],
    ) -> Result<Self> {
        let boundaries =
            filter::by_fips_prefix(&store.tracts_2010()?, &[state_fips.to_string()])?;
        let attrs = source.fetch(state_fips, years)?;
        let gdf = merge::join_attributes(&boundaries, &attrs)?;
        Ok(Community { gdf })
    }

    /// (rows, columns) of the merged table
    pub fn shape(&self) -> (usize, usize) {
        self.gdf.shape()
    }
}
