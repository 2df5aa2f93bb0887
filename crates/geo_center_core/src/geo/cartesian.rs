use geo_center_derive::CliValue;

use crate::point::Point;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
const METER_TO_KM: f64 = 1e-3;
const METER_TO_MI: f64 = 6.213_711_922_373_3e-4;

/// Unit for great-circle distances.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "unit")]
pub enum DistanceUnit {
    #[default]
    #[cli(name = "km", alias = "kilometers")]
    Kilometers,
    #[cli(name = "mi", alias = "miles")]
    Miles,
}

impl DistanceUnit {
    fn convert_meters(self, meters: f64) -> f64 {
        match self {
            Self::Kilometers => meters * METER_TO_KM,
            Self::Miles => meters * METER_TO_MI,
        }
    }
}

/// Great-circle distance between two geographic points given in degrees.
///
/// a = sin²(Δφ/2) + cos φ1 ⋅ cos φ2 ⋅ sin²(Δλ/2), d = R ⋅ 2 ⋅ atan2(√a, √(1−a))
pub fn haversine_distance(start: Point, end: Point, unit: DistanceUnit) -> f64 {
    let (lat1, lat2) = (start.lat().to_radians(), end.lat().to_radians());
    let dlat = lat2 - lat1;
    let dlng = end.lng().to_radians() - start.lng().to_radians();

    let s1 = (dlat / 2.0).sin();
    let s2 = (dlng / 2.0).sin();
    let a = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    unit.convert_meters(c * EARTH_RADIUS_METERS)
}

/// Distance from `destination` to each origin, in origin order.
pub fn distances_to(origins: &[Point], destination: Point, unit: DistanceUnit) -> Vec<f64> {
    origins
        .iter()
        .map(|&origin| haversine_distance(destination, origin, unit))
        .collect()
}
