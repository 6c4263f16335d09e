//! GeoTable merging and CRS validation
//!
//! The merger is a pure function of its inputs: validate that every table
//! carries the same CRS, then combine. Two policies exist and are chosen
//! explicitly by the caller rather than inferred from input shape:
//!
//! - `stack`: row-concatenation across time periods, union of columns
//! - `join_on_geoid` / `join_attributes`: column-join on the `geoid` key
//!
//! Mismatched CRS values are a hard error raised before any merge work.
//! Merging geometries expressed in different coordinate systems silently
//! produces spatially meaningless results, so there is no fallback
//! reprojection.

use crate::error::{CommunityError, Result};
use crate::geotable::{Crs, GeoTable, GEOID_COLUMN};
use polars::prelude::*;

/// Period column used as a secondary sort key when present
pub const YEAR_COLUMN: &str = "year";

/// Verify that every input table carries the identical CRS.
///
/// Errors with `EmptyInput` on zero tables and with `CrsMismatch` (naming
/// both systems) as soon as any table disagrees with the first.
pub fn check_crs(tables: &[GeoTable]) -> Result<Crs> {
    let first = tables.first().ok_or(CommunityError::EmptyInput)?;
    for table in &tables[1..] {
        if table.crs() != first.crs() {
            return Err(CommunityError::CrsMismatch {
                left: first.crs(),
                right: table.crs(),
            });
        }
    }
    Ok(first.crs())
}

/// Stack tables row-wise, taking the union of their columns.
///
/// Cells absent from a given source become nulls. The output row count is
/// the sum of the input row counts; the column count is the size of the
/// union of the input column sets. Rows are sorted by `geoid` (then `year`
/// when present) so identical inputs always give identical output.
pub fn stack(tables: &[GeoTable]) -> Result<GeoTable> {
    check_crs(tables)?;
    let first = &tables[0];
    for table in &tables[1..] {
        if table.geometry_column() != first.geometry_column() {
            return Err(CommunityError::GeometryColumnMismatch(
                first.geometry_column().to_string(),
                table.geometry_column().to_string(),
            ));
        }
    }

    let frames: Vec<LazyFrame> = tables.iter().map(|t| t.df().clone().lazy()).collect();
    let df = concat_lf_diagonal(frames, UnionArgs::default())?.collect()?;
    Ok(first.with_df(sort_canonical(df)?))
}

/// Inner-join two geotables on `geoid`.
///
/// The left table's geometry wins; the right table's geometry column is
/// dropped before the join so the result carries exactly one geometry.
pub fn join_on_geoid(left: &GeoTable, right: &GeoTable) -> Result<GeoTable> {
    if left.crs() != right.crs() {
        return Err(CommunityError::CrsMismatch {
            left: left.crs(),
            right: right.crs(),
        });
    }
    let attrs = right.df().drop(right.geometry_column())?;
    join_attributes(left, &attrs)
}

/// Inner-join a plain attribute table (keyed by `geoid`, no geometry) onto
/// a boundary table. Attribute tables with several rows per geoid (one per
/// period) produce one output row per (unit, period) pair.
pub fn join_attributes(boundaries: &GeoTable, attrs: &DataFrame) -> Result<GeoTable> {
    let has_geoid = attrs
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == GEOID_COLUMN);
    if !has_geoid {
        return Err(CommunityError::MissingColumn(GEOID_COLUMN.to_string()));
    }

    let df = boundaries
        .df()
        .clone()
        .lazy()
        .join(
            attrs.clone().lazy(),
            [col(GEOID_COLUMN)],
            [col(GEOID_COLUMN)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;
    Ok(boundaries.with_df(sort_canonical(df)?))
}

/// Sort by geoid (and year when present) for deterministic output.
fn sort_canonical(df: DataFrame) -> Result<DataFrame> {
    let mut keys: Vec<PlSmallStr> = vec![GEOID_COLUMN.into()];
    let has_year = df
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == YEAR_COLUMN);
    if has_year {
        keys.push(YEAR_COLUMN.into());
    }
    Ok(df.sort(keys, SortMultipleOptions::default().with_maintain_order(true))?)
}
