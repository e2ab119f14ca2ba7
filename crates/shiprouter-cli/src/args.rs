//! Value parsers for command-line arguments.

use shiprouter_lib::GeoCoordinate;

/// Parse a `LAT,LON` pair in decimal degrees.
///
/// Whitespace around either number is ignored. The pair is range-checked so
/// clap can report bad input before any grid is loaded.
pub fn parse_geo(value: &str) -> Result<GeoCoordinate, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{value}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;

    GeoCoordinate::new(lat, lon)
        .validate()
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_pairs() {
        let geo = parse_geo("-33.86, 151.21").unwrap();
        assert_eq!(geo, GeoCoordinate::new(-33.86, 151.21));
    }

    #[test]
    fn rejects_missing_separator() {
        let err = parse_geo("35.68").unwrap_err();
        assert!(err.contains("LAT,LON"));
    }

    #[test]
    fn rejects_garbage_and_out_of_range() {
        assert!(parse_geo("north,139").unwrap_err().contains("latitude"));
        assert!(parse_geo("10,east").unwrap_err().contains("longitude"));
        assert!(parse_geo("91,0").is_err());
    }
}
