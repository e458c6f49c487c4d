// Integration tests for nearpoint

use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

use nearpoint::{
    find_nearest, haversine_km, parse_coordinate, read_csv_coordinates, read_csv_file,
    ColumnSelector, Coordinate, CoordinateSet, CsvColumns, GeoError, EARTH_RADIUS_KM,
};

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

fn grid() -> Vec<Coordinate> {
    let mut points = Vec::new();
    for lat in (-90..=90).step_by(30) {
        for lon in (-180..=180).step_by(45) {
            points.push(coord(lat as f64, lon as f64));
        }
    }
    points
}

fn temp_csv(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("nearpoint-{}-{}.csv", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_distance_properties_over_grid() {
    let points = grid();
    for &p in &points {
        assert!(haversine_km(p, p).abs() < 1e-9);
        for &q in &points {
            let d = haversine_km(p, q);
            assert!(d >= 0.0);
            assert!(d <= PI * EARTH_RADIUS_KM + 1e-6, "{:?} {:?} -> {}", p, q, d);
            assert!((d - haversine_km(q, p)).abs() < 1e-6);
        }
    }
}

#[test]
fn test_new_york_to_london() {
    let d = haversine_km(coord(40.7128, -74.0060), coord(51.5074, -0.1278));
    assert!((d - 5570.0).abs() < 5.0, "got {}", d);
}

#[test]
fn test_find_nearest_self_match() {
    let source = CoordinateSet::from(vec![coord(0.0, 0.0)]);
    let target = CoordinateSet::from(vec![coord(0.0, 0.0), coord(10.0, 10.0)]);
    let matches = find_nearest(&source, &target).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].target, coord(0.0, 0.0));
    assert_eq!(matches[0].distance_km, 0.0);
}

#[test]
fn test_find_nearest_tie_break() {
    let source = CoordinateSet::from(vec![coord(0.0, 0.0)]);
    let target = CoordinateSet::from(vec![coord(1.0, 0.0), coord(-1.0, 0.0)]);
    let matches = find_nearest(&source, &target).unwrap();
    assert_eq!(matches[0].target, coord(1.0, 0.0));
}

#[test]
fn test_find_nearest_empty_target() {
    let source: CoordinateSet = grid().into_iter().collect();
    let err = find_nearest(&source, &CoordinateSet::default()).unwrap_err();
    assert!(matches!(err, GeoError::EmptyTargetSet));
}

#[test]
fn test_find_nearest_matches_exhaustive_minimum() {
    let source: CoordinateSet = grid()
        .into_iter()
        .map(|c| coord(c.lat() * 0.9, c.lon() * 0.9))
        .collect();
    let target: CoordinateSet = grid().into_iter().collect();
    let matches = find_nearest(&source, &target).unwrap();
    assert_eq!(matches.len(), source.len());
    for m in &matches {
        let best = target
            .iter()
            .map(|&t| haversine_km(m.source, t))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(m.distance_km, best);
        assert_eq!(target.as_slice()[m.target_index], m.target);
    }
}

#[test]
fn test_manual_and_csv_paths_agree() {
    let manual = parse_coordinate("52.52,13.405").unwrap();
    let columns = CsvColumns {
        lat: ColumnSelector::Index(0),
        lon: ColumnSelector::Index(1),
        has_headers: false,
    };
    let (set, _) = read_csv_coordinates("52.52,13.405\n".as_bytes(), &columns).unwrap();
    assert_eq!(set.as_slice(), &[manual]);
}

#[test]
fn test_csv_files_end_to_end() {
    let source = temp_csv(
        "source",
        "name,lat,lon\nberlin,52.52,13.405\nbroken,x,1\nnyc,40.7128,-74.006\n",
    );
    let target = temp_csv("target", "lon,lat\n2.3522,48.8566\n-0.1278,51.5074\n");
    let columns = CsvColumns {
        lat: "lat".parse().unwrap(),
        lon: "lon".parse().unwrap(),
        has_headers: true,
    };

    let (source_set, report) = read_csv_file(&source, &columns).unwrap();
    let (target_set, _) = read_csv_file(&target, &columns).unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped.len(), 1);

    let matches = find_nearest(&source_set, &target_set).unwrap();
    // Berlin is closer to Paris, New York is closer to London.
    assert_eq!(matches[0].target_index, 0);
    assert_eq!(matches[1].target_index, 1);

    fs::remove_file(source).ok();
    fs::remove_file(target).ok();
}

#[test]
fn test_missing_file_is_an_error() {
    let columns = CsvColumns {
        lat: ColumnSelector::Index(0),
        lon: ColumnSelector::Index(1),
        has_headers: false,
    };
    let err = read_csv_file("no_such_file.csv", &columns).unwrap_err();
    assert!(matches!(err, GeoError::Io(_)));
}
