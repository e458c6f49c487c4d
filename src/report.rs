use std::io;

use csv::Writer;
use ordered_float::OrderedFloat;

use crate::error::Result;
use crate::geo::Coordinate;
use crate::matcher::MatchResult;

fn fmt_point(c: &Coordinate) -> String {
    format!("{},{}", c.lat(), c.lon())
}

/// One human-readable line per match.
pub fn format_match(m: &MatchResult) -> String {
    format!(
        "Point {} is closest to {} ({:.2} km)",
        fmt_point(&m.source),
        fmt_point(&m.target),
        m.distance_km
    )
}

/// Write matches as CSV with columns
/// `source_lat,source_lon,target_lat,target_lon,target_index,distance_km`.
pub fn write_matches_csv<W: io::Write>(out: W, matches: &[MatchResult]) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record([
        "source_lat",
        "source_lon",
        "target_lat",
        "target_lon",
        "target_index",
        "distance_km",
    ])?;
    for m in matches {
        wtr.write_record(&[
            m.source.lat().to_string(),
            m.source.lon().to_string(),
            m.target.lat().to_string(),
            m.target.lon().to_string(),
            m.target_index.to_string(),
            format!("{:.6}", m.distance_km),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Largest match distance, ignoring non-finite values.
pub fn max_distance_km(matches: &[MatchResult]) -> Option<f64> {
    matches
        .iter()
        .map(|m| m.distance_km)
        .filter(|d| d.is_finite())
        .map(OrderedFloat)
        .max()
        .map(|d| d.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchResult {
        MatchResult {
            source: Coordinate::new(40.7128, -74.006).unwrap(),
            target: Coordinate::new(51.5074, -0.1278).unwrap(),
            target_index: 3,
            distance_km: 5570.2219,
        }
    }

    #[test]
    fn formats_a_line() {
        assert_eq!(
            format_match(&sample()),
            "Point 40.7128,-74.006 is closest to 51.5074,-0.1278 (5570.22 km)"
        );
    }

    #[test]
    fn writes_csv() {
        let mut buf = Vec::new();
        write_matches_csv(&mut buf, &[sample()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("source_lat,source_lon,target_lat,target_lon,target_index,distance_km")
        );
        assert_eq!(lines.next(), Some("40.7128,-74.006,51.5074,-0.1278,3,5570.221900"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn max_distance() {
        assert_eq!(max_distance_km(&[]), None);
        let mut far = sample();
        far.distance_km = 9000.0;
        assert_eq!(max_distance_km(&[sample(), far]), Some(9000.0));
        let mut broken = sample();
        broken.distance_km = f64::NAN;
        assert_eq!(max_distance_km(&[broken, sample()]), Some(5570.2219));
        assert_eq!(max_distance_km(&[broken]), None);
    }
}
