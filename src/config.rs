//! Environment-driven configuration
//!
//! The library itself takes the dataset store as an explicit argument; this
//! module only serves the binary, which locates the on-disk store through
//! the environment.

use crate::error::{CommunityError, Result};
use std::path::PathBuf;

/// Environment variable naming the dataset store directory
pub const DATA_DIR_ENV: &str = "COMMUNITY_DATA_DIR";

/// Location of the on-disk dataset store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding `manifest.json` and the parquet datasets
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .map_err(|_| CommunityError::Config(format!("{DATA_DIR_ENV} is not set")))?;
        if !data_dir.is_dir() {
            return Err(CommunityError::Config(format!(
                "{} is not a directory",
                data_dir.display()
            )));
        }
        Ok(StoreConfig { data_dir })
    }
}
