use std::fs;

use shiprouter_lib::export::render;
use shiprouter_lib::{export_to_csv, to_gpx, to_kml, ExportFormat, GeoCoordinate};
use tempfile::TempDir;

fn panama_to_gibraltar() -> Vec<GeoCoordinate> {
    vec![GeoCoordinate::new(9.5, -79.5), GeoCoordinate::new(36.0, -6.0)]
}

#[test]
fn csv_export_writes_header_and_rows() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("test_route.csv");

    let status = export_to_csv(&panama_to_gibraltar(), &path);
    assert!(status.starts_with("Successfully saved"), "status: {status}");

    let contents = fs::read_to_string(&path).expect("csv written");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "latitude,longitude");
    assert_eq!(&lines[1..], &["9.5,-79.5", "36.0,-6.0"]);
}

#[test]
fn csv_export_reports_failure_in_status() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("missing").join("route.csv");

    let status = export_to_csv(&panama_to_gibraltar(), &path);
    assert!(status.starts_with("Error saving file"), "status: {status}");
    assert!(!path.exists());
}

#[test]
fn gpx_document_has_expected_structure() {
    let gpx = to_gpx(&panama_to_gibraltar());
    for tag in ["<gpx", "</gpx>", "<metadata>", "<trk>", "<trkseg>"] {
        assert!(gpx.contains(tag), "missing {tag}");
    }
    assert!(gpx.contains(r#"<trkpt lat="9.5" lon="-79.5"></trkpt>"#));
    assert!(gpx.contains(r#"<trkpt lat="36.0" lon="-6.0"></trkpt>"#));
}

#[test]
fn kml_document_has_expected_structure() {
    let kml = to_kml(&panama_to_gibraltar());
    for tag in ["<kml", "</kml>", "<Document>", "<Placemark>", "<LineString>", "<coordinates>"] {
        assert!(kml.contains(tag), "missing {tag}");
    }
    assert!(kml.contains("-79.5,9.5,0 -6.0,36.0,0"));
}

#[test]
fn empty_route_still_produces_documents() {
    let gpx = to_gpx(&[]);
    assert!(gpx.contains("<trkseg>"));
    assert!(!gpx.contains("<trkpt"));

    let csv = render(&[], ExportFormat::Csv).unwrap();
    assert_eq!(csv.trim_end(), "latitude,longitude");
}
