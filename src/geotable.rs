//! GeoTable: a dataframe with geometry and a coordinate reference system
//!
//! Geometries are carried as WKT strings in a regular dataframe column and
//! decoded to `geo` types only where a spatial predicate needs them. This
//! keeps the merge path purely tabular.

use crate::error::{CommunityError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use wkt::TryFromWkt;

/// Column uniquely identifying a geographic unit within a table
pub const GEOID_COLUMN: &str = "geoid";

/// Default name of the geometry column
pub const DEFAULT_GEOMETRY_COLUMN: &str = "geometry";

/// EPSG coordinate reference system code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs(pub u32);

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// A table of geographic records: one row per unit, a `geoid` column, a WKT
/// geometry column, and an attached CRS.
///
/// GeoTables are created by data-fetch collaborators and passed read-only
/// into the merger; no operation mutates one in place.
#[derive(Debug, Clone)]
pub struct GeoTable {
    df: DataFrame,
    crs: Crs,
    geometry_column: String,
}

impl GeoTable {
    /// Wrap a dataframe whose geometry lives in the default `geometry` column.
    pub fn new(df: DataFrame, crs: Crs) -> Result<Self> {
        Self::with_geometry_column(df, crs, DEFAULT_GEOMETRY_COLUMN)
    }

    /// Wrap a dataframe with a named geometry column.
    ///
    /// Fails with `MissingColumn` if the `geoid` or geometry column is absent.
    pub fn with_geometry_column(
        df: DataFrame,
        crs: Crs,
        geometry_column: impl Into<String>,
    ) -> Result<Self> {
        let geometry_column = geometry_column.into();
        for required in [GEOID_COLUMN, geometry_column.as_str()] {
            let present = df
                .get_column_names()
                .iter()
                .any(|name| name.as_str() == required);
            if !present {
                return Err(CommunityError::MissingColumn(required.to_string()));
            }
        }
        Ok(GeoTable {
            df,
            crs,
            geometry_column,
        })
    }

    pub fn df(&self) -> &DataFrame {
        &self.df
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn geometry_column(&self) -> &str {
        &self.geometry_column
    }

    /// (rows, columns) of the underlying dataframe
    pub fn shape(&self) -> (usize, usize) {
        (self.df.height(), self.df.width())
    }

    /// Geoid of every row, in row order.
    pub fn geoids(&self) -> Result<Vec<String>> {
        let geoid = self
            .df
            .column(GEOID_COLUMN)?
            .as_materialized_series()
            .str()?;
        let mut out = Vec::with_capacity(geoid.len());
        for (row, value) in geoid.into_iter().enumerate() {
            let value = value
                .ok_or_else(|| CommunityError::InvalidGeoid(format!("null geoid at row {row}")))?;
            out.push(value.to_string());
        }
        Ok(out)
    }

    /// Decode every row's WKT geometry, in row order.
    pub fn geometries(&self) -> Result<Vec<geo::Geometry<f64>>> {
        let wkt_col = self
            .df
            .column(&self.geometry_column)?
            .as_materialized_series()
            .str()?;
        let mut out = Vec::with_capacity(wkt_col.len());
        for (row, text) in wkt_col.into_iter().enumerate() {
            let text = text
                .ok_or_else(|| CommunityError::Geometry(format!("null geometry at row {row}")))?;
            let geom = geo::Geometry::try_from_wkt_str(text)
                .map_err(|e| CommunityError::Geometry(format!("row {row}: {e}")))?;
            out.push(geom);
        }
        Ok(out)
    }

    /// Rewrap a dataframe derived from this table (filtered or merged rows),
    /// keeping the CRS and geometry column.
    pub(crate) fn with_df(&self, df: DataFrame) -> GeoTable {
        GeoTable {
            df,
            crs: self.crs,
            geometry_column: self.geometry_column.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df! {
            "geoid" => ["11001", "11002"],
            "geometry" => ["POINT(0 0)", "POINT(1 1)"],
            "pop" => [100i64, 200],
        }
        .unwrap()
    }

    #[test]
    fn test_crs_display() {
        assert_eq!(Crs(4326).to_string(), "EPSG:4326");
    }

    #[test]
    fn test_new_validates_required_columns() {
        let table = GeoTable::new(sample_df(), Crs(4326)).unwrap();
        assert_eq!(table.shape(), (2, 3));

        let no_geoid = df! { "geometry" => ["POINT(0 0)"] }.unwrap();
        let err = GeoTable::new(no_geoid, Crs(4326)).unwrap_err();
        assert!(matches!(err, CommunityError::MissingColumn(c) if c == "geoid"));

        let no_geometry = df! { "geoid" => ["11001"] }.unwrap();
        let err = GeoTable::new(no_geometry, Crs(4326)).unwrap_err();
        assert!(matches!(err, CommunityError::MissingColumn(c) if c == "geometry"));
    }

    #[test]
    fn test_geoids_in_row_order() {
        let table = GeoTable::new(sample_df(), Crs(4326)).unwrap();
        assert_eq!(table.geoids().unwrap(), vec!["11001", "11002"]);
    }

    #[test]
    fn test_geometries_decode_wkt() {
        let table = GeoTable::new(sample_df(), Crs(4326)).unwrap();
        let geoms = table.geometries().unwrap();
        assert_eq!(geoms.len(), 2);
        assert!(matches!(geoms[0], geo::Geometry::Point(_)));
    }

    #[test]
    fn test_geometries_reject_invalid_wkt() {
        let df = df! {
            "geoid" => ["11001"],
            "geometry" => ["not a geometry"],
        }
        .unwrap();
        let table = GeoTable::new(df, Crs(4326)).unwrap();
        assert!(matches!(
            table.geometries(),
            Err(CommunityError::Geometry(_))
        ));
    }
}
