//! Route serialisation to GPX, KML and CSV.
//!
//! Every exporter writes the points exactly as given: no reordering,
//! deduplication or simplification.

use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coords::GeoCoordinate;
use crate::error::{Error, Result};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Gpx,
    Kml,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Gpx => "gpx",
            ExportFormat::Kml => "kml",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Gpx => "application/gpx+xml",
            ExportFormat::Kml => "application/vnd.google-earth.kml+xml",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpx" => Ok(ExportFormat::Gpx),
            "kml" => Ok(ExportFormat::Kml),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

const GPX_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="ShipRouter" xmlns="http://www.topografix.com/GPX/1/1">
  <metadata>
    <name>Ship Route</name>
  </metadata>
  <trk>
    <name>Calculated Ship Route</name>
    <trkseg>
"#;

const GPX_FOOTER: &str = "    </trkseg>
  </trk>
</gpx>
";

const KML_HEADER: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Ship Route</name>
    <Style id="routeStyle">
      <LineStyle>
        <color>ff0078f0</color>
        <width>4</width>
      </LineStyle>
    </Style>
    <Placemark>
      <name>Calculated Route</name>
      <styleUrl>#routeStyle</styleUrl>
      <LineString>
        <tessellate>1</tessellate>
        <coordinates>
"##;

const KML_FOOTER: &str = "
        </coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>
";

/// Render a GPX 1.1 document with one track segment.
pub fn to_gpx(route: &[GeoCoordinate]) -> String {
    let mut buffer = String::from(GPX_HEADER);
    for point in route {
        let _ = writeln!(
            buffer,
            r#"      <trkpt lat="{}" lon="{}"></trkpt>"#,
            degrees(point.lat),
            degrees(point.lon)
        );
    }
    buffer.push_str(GPX_FOOTER);
    buffer
}

/// Render a KML 2.2 document with a single line string of `lon,lat,0` triples.
pub fn to_kml(route: &[GeoCoordinate]) -> String {
    let coordinates = route
        .iter()
        .map(|point| format!("{},{},0", degrees(point.lon), degrees(point.lat)))
        .collect::<Vec<_>>()
        .join(" ");

    let mut buffer = String::from(KML_HEADER);
    buffer.push_str(&coordinates);
    buffer.push_str(KML_FOOTER);
    buffer
}

/// Write `latitude,longitude` rows to any writer.
pub fn write_csv<W: std::io::Write>(route: &[GeoCoordinate], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["latitude", "longitude"])?;
    for point in route {
        csv.write_record([degrees(point.lat), degrees(point.lon)])?;
    }
    csv.flush().map_err(Error::from)
}

/// Render the CSV body as a string.
pub fn to_csv(route: &[GeoCoordinate]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(route, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| Error::Io(std::io::Error::other(err)))
}

/// Leading text of the status line when [`export_to_csv`] fails.
pub const EXPORT_FAILED_PREFIX: &str = "Error saving file";

/// Write the route as CSV to `path`, returning a status line.
///
/// Failures are reported in the returned message rather than as an error.
pub fn export_to_csv(route: &[GeoCoordinate], path: &Path) -> String {
    let result = File::create(path)
        .map_err(Error::from)
        .and_then(|file| write_csv(route, BufWriter::new(file)));

    match result {
        Ok(()) => {
            info!(path = %path.display(), points = route.len(), "route exported to CSV");
            format!("Successfully saved route to {}", path.display())
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "CSV export failed");
            format!("{EXPORT_FAILED_PREFIX}: {err}")
        }
    }
}

/// Render `route` in the requested text format.
pub fn render(route: &[GeoCoordinate], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Gpx => Ok(to_gpx(route)),
        ExportFormat::Kml => Ok(to_kml(route)),
        ExportFormat::Csv => to_csv(route),
    }
}

/// Shortest plain decimal form, keeping a trailing `.0` on whole degrees.
///
/// `Debug` switches to exponent notation below `1e-5`, which `xsd:decimal`
/// does not allow, so only `Display` is used here.
fn degrees(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<GeoCoordinate> {
        vec![GeoCoordinate::new(9.5, -79.5), GeoCoordinate::new(36.0, -6.0)]
    }

    #[test]
    fn gpx_contains_track_points_in_order() {
        let gpx = to_gpx(&sample());
        assert!(gpx.contains(r#"<gpx version="1.1""#));
        assert!(gpx.contains("<metadata>"));
        let first = gpx
            .find(r#"<trkpt lat="9.5" lon="-79.5"></trkpt>"#)
            .expect("first point");
        let second = gpx
            .find(r#"<trkpt lat="36.0" lon="-6.0"></trkpt>"#)
            .expect("second point");
        assert!(first < second);
        assert_eq!(gpx.matches("<trkseg>").count(), 1);
    }

    #[test]
    fn kml_lists_lon_lat_triples() {
        let kml = to_kml(&sample());
        assert!(kml.contains("<Placemark>"));
        assert!(kml.contains("<LineString>"));
        assert!(kml.contains("-79.5,9.5,0 -6.0,36.0,0"));
    }

    #[test]
    fn csv_has_header_and_one_row_per_point() {
        let csv = to_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["latitude,longitude", "9.5,-79.5", "36.0,-6.0"]);
    }

    #[test]
    fn exporters_keep_duplicate_points() {
        let point = GeoCoordinate::new(1.0, 2.0);
        let route = vec![point, point];
        assert_eq!(to_gpx(&route).matches("<trkpt").count(), 2);
        assert_eq!(to_csv(&route).unwrap().lines().count(), 3);
    }

    #[test]
    fn tiny_coordinates_are_written_without_exponent() {
        let route = vec![GeoCoordinate::new(0.000001, -0.00005)];

        assert!(to_gpx(&route).contains(r#"<trkpt lat="0.000001" lon="-0.00005"></trkpt>"#));
        assert!(to_kml(&route).contains("-0.00005,0.000001,0"));
        assert_eq!(to_csv(&route).unwrap().lines().nth(1), Some("0.000001,-0.00005"));
    }

    #[test]
    fn whole_degrees_keep_trailing_zero() {
        assert_eq!(degrees(0.0), "0.0");
        assert_eq!(degrees(-180.0), "-180.0");
        assert_eq!(degrees(-152.307692), "-152.307692");
    }

    #[test]
    fn format_parses_from_str() {
        assert_eq!("GPX".parse::<ExportFormat>().unwrap(), ExportFormat::Gpx);
        assert!("shp".parse::<ExportFormat>().is_err());
    }
}
