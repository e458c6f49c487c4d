//! Nearest-point matching between two sets of geographic coordinates.
//!
//! For each point of a source set, [`find_nearest`] scans the whole target set
//! and keeps the closest point by great-circle ([`haversine_km`]) distance.
//! Input helpers build [`CoordinateSet`]s from `lat,lon` tokens or CSV files;
//! [`report`] turns results into text or CSV.

pub mod error;
pub mod geo;
pub mod input;
pub mod matcher;
pub mod prompt;
pub mod report;

pub use error::{GeoError, Result};
pub use geo::{dms_to_decimal, haversine_km, Coordinate, CoordinateSet, EARTH_RADIUS_KM};
pub use input::{
    parse_coordinate, read_csv_coordinates, read_csv_file, ColumnSelector, CsvColumns, LoadReport,
    SkippedRow,
};
pub use matcher::{find_nearest, nearest_to, MatchResult};

/// Install the stderr `tracing` subscriber used by the binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
