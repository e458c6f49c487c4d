//! Building `CoordinateSet`s from user input.
//!
//! Manual entry and CSV files go through the same component parser, so a
//! value accepted in one place is accepted in the other. Accepted forms for a
//! single component are plain decimal degrees (`-74.006`) and
//! degrees/minutes/seconds with a hemisphere letter (`74°0'21.6"W`, `74 0 21.6 W`).

use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use csv::{ByteRecord, ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::error::{GeoError, Result};
use crate::geo::{dms_to_decimal, Coordinate, CoordinateSet};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn accepts(self, direction: char) -> bool {
        match self {
            Axis::Latitude => matches!(direction, 'N' | 'S'),
            Axis::Longitude => matches!(direction, 'E' | 'W'),
        }
    }
}

const DMS_SEPARATORS: &[char] = &['°', '\'', '"', '′', '″', ':', ' '];

fn parse_component(token: &str, axis: Axis) -> Result<f64> {
    let token = token.trim();
    if token.is_empty() {
        return Err(GeoError::malformed(token, "empty value"));
    }

    let last = token.chars().next_back().map(|c| c.to_ascii_uppercase());
    let direction = match last {
        Some(c @ ('N' | 'S' | 'E' | 'W')) => c,
        _ => {
            return token
                .parse::<f64>()
                .map_err(|e| GeoError::malformed(token, e.to_string()));
        }
    };
    if !axis.accepts(direction) {
        return Err(GeoError::malformed(
            token,
            format!("hemisphere {} is not valid for {:?}", direction, axis),
        ));
    }

    let body = &token[..token.len() - 1];
    let parts = body
        .split(DMS_SEPARATORS)
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().map_err(|e| GeoError::malformed(token, e.to_string())))
        .collect::<Result<Vec<f64>>>()?;

    let (degrees, minutes, seconds) = match parts.as_slice() {
        [d] => (*d, 0.0, 0.0),
        [d, m] => (*d, *m, 0.0),
        [d, m, s] => (*d, *m, *s),
        _ => {
            return Err(GeoError::malformed(
                token,
                "expected degrees, minutes and seconds",
            ))
        }
    };
    if degrees < 0.0 || !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return Err(GeoError::malformed(token, "degree/minute/second out of range"));
    }
    Ok(dms_to_decimal(degrees, minutes, seconds, direction))
}

/// Parse a manual-entry token `"lat,lon"`.
pub fn parse_coordinate(input: &str) -> Result<Coordinate> {
    let mut fields = input.split(',');
    let (lat, lon) = match (fields.next(), fields.next(), fields.next()) {
        (Some(lat), Some(lon), None) => (lat, lon),
        _ => {
            return Err(GeoError::malformed(
                input,
                "expected exactly two comma-separated values",
            ))
        }
    };
    Coordinate::new(
        parse_component(lat, Axis::Latitude)?,
        parse_component(lon, Axis::Longitude)?,
    )
}

/// Picks a CSV column either by zero-based position or by header name.
///
/// Parsing from a string treats any all-digit value as an index, so a header
/// literally named `"2"` can only be reached as `ColumnSelector::Name` built
/// directly, not through `FromStr`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

impl FromStr for ColumnSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(idx) => ColumnSelector::Index(idx),
            Err(_) => ColumnSelector::Name(s.to_string()),
        })
    }
}

impl ColumnSelector {
    fn resolve(&self, headers: Option<&ByteRecord>) -> Result<usize> {
        match self {
            ColumnSelector::Index(idx) => Ok(*idx),
            ColumnSelector::Name(name) => headers
                .and_then(|h| h.iter().position(|field| field == name.as_bytes()))
                .ok_or_else(|| GeoError::MissingColumn(name.clone())),
        }
    }
}

/// Which columns hold latitude and longitude, and whether row 1 is a header.
#[derive(Clone, Debug)]
pub struct CsvColumns {
    pub lat: ColumnSelector,
    pub lon: ColumnSelector,
    pub has_headers: bool,
}

#[derive(Debug)]
pub struct SkippedRow {
    /// 1-based line number in the input.
    pub line: u64,
    pub error: GeoError,
}

/// What happened while loading a CSV: how many rows made it, and which didn't.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

fn row_text(record: &ByteRecord) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}

// Only the selected fields are decoded; other columns may hold any bytes.
fn selected_field(record: &ByteRecord, idx: usize) -> Result<&str> {
    let bytes = record.get(idx).ok_or_else(|| {
        GeoError::malformed(row_text(record), format!("row has no column {}", idx))
    })?;
    std::str::from_utf8(bytes).map_err(|e| {
        GeoError::malformed(String::from_utf8_lossy(bytes), format!("column {}: {}", idx, e))
    })
}

fn row_coordinate(record: &ByteRecord, lat_idx: usize, lon_idx: usize) -> Result<Coordinate> {
    Coordinate::new(
        parse_component(selected_field(record, lat_idx)?, Axis::Latitude)?,
        parse_component(selected_field(record, lon_idx)?, Axis::Longitude)?,
    )
}

/// Read coordinates out of CSV data. Bad rows are skipped and reported; only
/// I/O failures, malformed CSV structure and unknown column names are fatal.
pub fn read_csv_coordinates<R: io::Read>(
    reader: R,
    columns: &CsvColumns,
) -> Result<(CoordinateSet, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(columns.has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = if columns.has_headers {
        Some(rdr.byte_headers()?.clone())
    } else {
        None
    };
    let lat_idx = columns.lat.resolve(headers.as_ref())?;
    let lon_idx = columns.lon.resolve(headers.as_ref())?;

    let mut points = Vec::new();
    let mut report = LoadReport::default();
    for result in rdr.byte_records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match row_coordinate(&record, lat_idx, lon_idx) {
            Ok(coord) => points.push(coord),
            Err(error) => {
                warn!(line, %error, "skipping row");
                report.skipped.push(SkippedRow { line, error });
            }
        }
    }
    report.loaded = points.len();
    debug!(loaded = report.loaded, skipped = report.skipped.len(), "csv loaded");
    Ok((CoordinateSet::from(points), report))
}

pub fn read_csv_file<P: AsRef<Path>>(
    path: P,
    columns: &CsvColumns,
) -> Result<(CoordinateSet, LoadReport)> {
    let file = File::open(path)?;
    read_csv_coordinates(io::BufReader::new(file), columns)
}
