use crate::error::{GeoError, Result};

/// Mean Earth radius in kilometers (spherical model).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface, latitude/longitude in degrees.
///
/// Built through [`Coordinate::new`], which rejects anything outside
/// [-90, 90] x [-180, 180], so a `Coordinate` in hand is always in range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(GeoError::malformed(
                format!("{},{}", lat, lon),
                "latitude and longitude must be finite numbers",
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::InvalidCoordinate {
                lat,
                lon,
                reason: String::from("latitude must be between -90 and 90 degrees"),
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::InvalidCoordinate {
                lat,
                lon,
                reason: String::from("longitude must be between -180 and 180 degrees"),
            });
        }
        Ok(Self { lat, lon })
    }

    /// Skips range validation. Meant for compile-time constants.
    pub const fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Ordered, read-only collection of coordinates handed to the matcher.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateSet {
    points: Vec<Coordinate>,
}

impl CoordinateSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.points
    }
}

impl From<Vec<Coordinate>> for CoordinateSet {
    fn from(points: Vec<Coordinate>) -> Self {
        Self { points }
    }
}

impl FromIterator<Coordinate> for CoordinateSet {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CoordinateSet {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Great-circle distance using the haversine formula.
/// Input lat/lon in degrees. Output in kilometers.
///
/// Non-finite inputs (only reachable through `new_unchecked`) yield NaN.
pub fn haversine_km(p1: Coordinate, p2: Coordinate) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        p1.lat.to_radians(),
        p1.lon.to_radians(),
        p2.lat.to_radians(),
        p2.lon.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can leave `a` a hair outside [0, 1]; clamp keeps NaN as NaN.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Degrees/minutes/seconds to signed decimal degrees. `S` and `W` are negative.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, direction: char) -> f64 {
    let dec = degrees + minutes / 60.0 + seconds / 3600.0;
    match direction.to_ascii_uppercase() {
        'S' | 'W' => -dec,
        _ => dec,
    }
}
