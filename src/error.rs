use crate::geotable::Crs;
use thiserror::Error;

/// Errors that can occur while constructing a community
#[derive(Debug, Error)]
pub enum CommunityError {
    /// Inputs to a merge carry different coordinate reference systems
    #[error("inconsistent CRS across input tables: {left} vs {right}")]
    CrsMismatch { left: Crs, right: Crs },

    /// Input tables disagree on their geometry column name
    #[error("inconsistent geometry columns: '{0}' vs '{1}'")]
    GeometryColumnMismatch(String, String),

    /// A merge was requested with zero input tables
    #[error("no input tables supplied")]
    EmptyInput,

    /// A required column is missing from a table
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// A geoid value is null or malformed
    #[error("invalid geoid: {0}")]
    InvalidGeoid(String),

    /// A geometry value could not be decoded
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Dataset store error (unknown dataset, bad manifest, ...)
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error (missing env vars, invalid paths, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying dataframe error
    #[error("dataframe error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using CommunityError
pub type Result<T> = std::result::Result<T, CommunityError>;
