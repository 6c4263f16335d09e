//! Geographic restriction of reference tables
//!
//! Filters select the subset of a reference table (usually tract boundaries
//! from the dataset store) covered by a community: whole states or counties
//! by FIPS prefix, a metro area looked up in the store's `msas` table, or an
//! arbitrary boundary table whose geometries are intersected against the
//! target.

use crate::error::{CommunityError, Result};
use crate::geotable::{GeoTable, GEOID_COLUMN};
use crate::store::DataStore;
use geo::Intersects;
use polars::prelude::*;
use std::collections::HashSet;

/// Geographic restriction applied to a reference table
#[derive(Debug, Clone)]
pub enum GeoFilter {
    /// Keep units whose geoid starts with the given state FIPS code
    StateFips(String),
    /// Keep units whose geoid starts with any of the given county FIPS codes
    CountyFips(Vec<String>),
    /// Keep units intersecting the boundary of the given metro area,
    /// looked up by FIPS code in the store's `msas` table
    MsaFips(String),
    /// Keep units intersecting any geometry of the given boundary table
    Boundary(GeoTable),
}

/// Apply a filter to a reference table.
///
/// The store is consulted only for `MsaFips`, which needs the metro-area
/// boundary geometries.
pub fn apply(table: &GeoTable, filter: &GeoFilter, store: &dyn DataStore) -> Result<GeoTable> {
    match filter {
        GeoFilter::StateFips(fips) => by_fips_prefix(table, std::slice::from_ref(fips)),
        GeoFilter::CountyFips(fips) => by_fips_prefix(table, fips),
        GeoFilter::MsaFips(code) => {
            let msas = store.msas()?;
            let boundary = by_geoid(&msas, std::slice::from_ref(code))?;
            if boundary.df().height() == 0 {
                return Err(CommunityError::Store(format!("unknown msa fips '{code}'")));
            }
            by_boundary(table, &boundary)
        }
        GeoFilter::Boundary(boundary) => by_boundary(table, boundary),
    }
}

/// Keep rows whose geoid starts with any of the given FIPS prefixes.
pub fn by_fips_prefix(table: &GeoTable, prefixes: &[String]) -> Result<GeoTable> {
    let geoid = table
        .df()
        .column(GEOID_COLUMN)?
        .as_materialized_series()
        .str()?;
    let mask: BooleanChunked = geoid
        .into_iter()
        .map(|value| {
            Some(
                value
                    .map(|g| prefixes.iter().any(|p| g.starts_with(p.as_str())))
                    .unwrap_or(false),
            )
        })
        .collect();
    Ok(table.with_df(table.df().filter(&mask)?))
}

/// Keep rows whose geoid exactly matches one of the given identifiers.
pub fn by_geoid(table: &GeoTable, geoids: &[String]) -> Result<GeoTable> {
    let wanted: HashSet<&str> = geoids.iter().map(String::as_str).collect();
    let geoid = table
        .df()
        .column(GEOID_COLUMN)?
        .as_materialized_series()
        .str()?;
    let mask: BooleanChunked = geoid
        .into_iter()
        .map(|value| Some(value.map(|g| wanted.contains(g)).unwrap_or(false)))
        .collect();
    Ok(table.with_df(table.df().filter(&mask)?))
}

/// Keep rows whose geometry intersects any geometry of the boundary table.
///
/// The boundary must be expressed in the same CRS as the target table;
/// intersecting across coordinate systems is meaningless, so a mismatch is
/// a hard error before any geometry is decoded.
pub fn by_boundary(table: &GeoTable, boundary: &GeoTable) -> Result<GeoTable> {
    if table.crs() != boundary.crs() {
        return Err(CommunityError::CrsMismatch {
            left: table.crs(),
            right: boundary.crs(),
        });
    }
    let boundary_geoms = boundary.geometries()?;
    let geoms = table.geometries()?;
    let mask: BooleanChunked = geoms
        .iter()
        .map(|g| Some(boundary_geoms.iter().any(|b| g.intersects(b))))
        .collect();
    Ok(table.with_df(table.df().filter(&mask)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geotable::Crs;
    use crate::store::MemoryStore;

    // Three unit squares in a row: [0,1]x[0,1], [2,3]x[0,1], [4,5]x[0,1]
    fn tracts() -> GeoTable {
        let df = df! {
            "geoid" => ["11001", "11002", "24001"],
            "geometry" => [
                "POLYGON((0 0,1 0,1 1,0 1,0 0))",
                "POLYGON((2 0,3 0,3 1,2 1,2 0))",
                "POLYGON((4 0,5 0,5 1,4 1,4 0))",
            ],
            "pop" => [100i64, 200, 300],
        }
        .unwrap();
        GeoTable::new(df, Crs(4326)).unwrap()
    }

    fn boundary_over_first_two() -> GeoTable {
        let df = df! {
            "geoid" => ["39900"],
            "geometry" => ["POLYGON((0 0,3 0,3 1,0 1,0 0))"],
        }
        .unwrap();
        GeoTable::new(df, Crs(4326)).unwrap()
    }

    #[test]
    fn test_state_fips_prefix_filter() {
        let filtered = by_fips_prefix(&tracts(), &["11".to_string()]).unwrap();
        assert_eq!(filtered.geoids().unwrap(), vec!["11001", "11002"]);
    }

    #[test]
    fn test_county_fips_prefix_filter() {
        let filtered = by_fips_prefix(&tracts(), &["11002".to_string(), "24001".to_string()]).unwrap();
        assert_eq!(filtered.geoids().unwrap(), vec!["11002", "24001"]);
    }

    #[test]
    fn test_exact_geoid_filter() {
        let filtered = by_geoid(&tracts(), &["24001".to_string()]).unwrap();
        assert_eq!(filtered.geoids().unwrap(), vec!["24001"]);
    }

    #[test]
    fn test_boundary_filter_keeps_intersecting_units() {
        let filtered = by_boundary(&tracts(), &boundary_over_first_two()).unwrap();
        assert_eq!(filtered.geoids().unwrap(), vec!["11001", "11002"]);
    }

    #[test]
    fn test_boundary_filter_rejects_crs_mismatch() {
        let boundary = GeoTable::new(boundary_over_first_two().df().clone(), Crs(3857)).unwrap();
        let err = by_boundary(&tracts(), &boundary).unwrap_err();
        assert!(matches!(err, CommunityError::CrsMismatch { .. }));
    }

    #[test]
    fn test_msa_filter_looks_up_store() {
        let mut store = MemoryStore::new();
        store.insert("msas", boundary_over_first_two());
        let filtered = apply(&tracts(), &GeoFilter::MsaFips("39900".to_string()), &store).unwrap();
        assert_eq!(filtered.geoids().unwrap(), vec!["11001", "11002"]);
    }

    #[test]
    fn test_msa_filter_unknown_code() {
        let mut store = MemoryStore::new();
        store.insert("msas", boundary_over_first_two());
        let err = apply(&tracts(), &GeoFilter::MsaFips("00000".to_string()), &store).unwrap_err();
        assert!(matches!(err, CommunityError::Store(_)));
    }
}
