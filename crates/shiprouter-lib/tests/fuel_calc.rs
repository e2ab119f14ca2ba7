use shiprouter_lib::{haversine_nm, predict, total_distance_nm, GeoCoordinate, ShipSpecs};

fn route(points: &[[f64; 2]]) -> Vec<GeoCoordinate> {
    points.iter().copied().map(GeoCoordinate::from).collect()
}

#[test]
fn panama_to_gibraltar_sample_route() {
    let sample = route(&[
        [9.5, -79.5],
        [15.0, -75.0],
        [25.0, -65.0],
        [35.0, -45.0],
        [36.0, -25.0],
        [36.0, -6.0],
    ]);
    let specs = ShipSpecs::preset("panamax").expect("preset exists");
    let estimate = predict(&sample, &specs);

    assert!((estimate.distance_nm - 4342.39).abs() < 0.01, "{estimate:?}");
    assert!((estimate.time_hours - 310.17).abs() < 0.01, "{estimate:?}");
    assert!((estimate.fuel_tonnes - 0.6514).abs() < 0.0001, "{estimate:?}");
}

#[test]
fn distance_is_sum_of_legs() {
    let a = GeoCoordinate::new(9.5, -79.5);
    let b = GeoCoordinate::new(36.0, -6.0);
    let direct = haversine_nm(a, b);

    assert!((direct - 4269.91).abs() < 0.01);
    assert!((total_distance_nm(&[a, b, a]) - 2.0 * direct).abs() < 1e-9);
}

#[test]
fn antimeridian_crossing_uses_short_arc() {
    let west = GeoCoordinate::new(0.0, 179.5);
    let east = GeoCoordinate::new(0.0, -179.5);
    let nm = haversine_nm(west, east);
    assert!(nm < 61.0, "expected about 60 nm, got {nm}");
}

#[test]
fn estimate_serialises_infinite_time_as_null() {
    let estimate = predict(&route(&[[0.0, 0.0], [1.0, 0.0]]), &ShipSpecs::new(0.0, 1.0));
    let json = serde_json::to_value(estimate).unwrap();
    assert!(json["time_hours"].is_null());
    assert!(json["distance_nm"].as_f64().unwrap() > 60.0);
}
