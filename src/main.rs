//! geocommunity - inspect a dataset store and build a community
//!
//! Opens the parquet-backed dataset store named by COMMUNITY_DATA_DIR,
//! constructs a community (state-restricted census tracts when a state is
//! given, otherwise 1990+2000 tracts stacked), and prints its shape.

use geocommunity::config::{StoreConfig, DATA_DIR_ENV};
use geocommunity::{Community, DataStore, FileStore, GeoFilter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("geocommunity v{}", env!("CARGO_PKG_VERSION"));

    // Parse command-line arguments
    // --dataDir and --state mirror the environment variables
    let args: Vec<String> = std::env::args().collect();
    parse_args(&args);

    match run() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("✗ {e}");
            eprintln!("\nNote: point the tool at a dataset store:");
            eprintln!("  export {DATA_DIR_ENV}=/path/to/data");
            eprintln!("  geocommunity --state 24");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = StoreConfig::from_env()?;
    let store = FileStore::from_config(&config)?;
    println!("datasets: {}", store.dataset_names().join(", "));

    let community = match std::env::var("COMMUNITY_STATE_FIPS") {
        Ok(fips) => {
            println!("building community for state {fips}");
            Community::from_census(&store, &GeoFilter::StateFips(fips))?
        }
        Err(_) => {
            println!("no state given, stacking 1990 and 2000 tracts");
            Community::from_geodataframes(&[store.tracts_1990()?, store.tracts_2000()?])?
        }
    };

    let (rows, cols) = community.shape();
    println!("community: {rows} rows x {cols} columns ({})", community.gdf.crs());
    Ok(())
}

/// Parse command-line arguments and set environment variables
fn parse_args(args: &[String]) {
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dataDir" if i + 1 < args.len() => {
                std::env::set_var(DATA_DIR_ENV, &args[i + 1]);
                i += 2;
            }
            "--state" if i + 1 < args.len() => {
                std::env::set_var("COMMUNITY_STATE_FIPS", &args[i + 1]);
                i += 2;
            }
            _ => i += 1,
        }
    }
}
