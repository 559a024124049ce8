//! Great-circle distance on a spherical Earth.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Maximum distance between a device and a gate for a check to be accepted.
///
/// A device exactly on the boundary is accepted; only `distance > radius`
/// rejects.
pub const GEOFENCE_RADIUS_METERS: f64 = 5.0;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build a point, rejecting non-finite or out-of-range degrees.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if latitude is outside [-90, 90] or
    /// longitude is outside [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::Validation(format!(
                "latitude out of range: {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::Validation(format!(
                "longitude out of range: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_meters(*self, *other)
    }
}

/// Haversine distance in meters between two points.
#[must_use]
pub fn haversine_meters(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let sin_phi = (delta_phi / 2.0).sin();
    let sin_lambda = (delta_lambda / 2.0).sin();
    let h = sin_phi.mul_add(sin_phi, phi1.cos() * phi2.cos() * sin_lambda * sin_lambda);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Whether `distance_meters` falls outside the gate geofence.
#[must_use]
pub fn exceeds_geofence(distance_meters: f64) -> bool {
    distance_meters > GEOFENCE_RADIUS_METERS
}

/// Round to two decimals for user feedback.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude).unwrap()
    }

    #[rstest]
    #[case(point(28.7041, 77.1025), point(28.7050, 77.1025))]
    #[case(point(-33.8688, 151.2093), point(51.5074, -0.1278))]
    #[case(point(0.0, 179.9999), point(0.0, -179.9999))]
    #[case(point(89.9, 0.0), point(-89.9, 180.0))]
    fn distance_is_symmetric(#[case] a: Coordinates, #[case] b: Coordinates) {
        let ab = haversine_meters(a, b);
        let ba = haversine_meters(b, a);
        assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
    }

    #[rstest]
    #[case(point(28.7041, 77.1025))]
    #[case(point(0.0, 0.0))]
    #[case(point(-90.0, 180.0))]
    fn distance_to_self_is_zero(#[case] a: Coordinates) {
        assert!(haversine_meters(a, a).abs() < f64::EPSILON);
    }

    #[test]
    fn hundred_meters_north() {
        let gate = point(28.7041, 77.1025);
        let student = point(28.7050, 77.1025);
        let d = gate.distance_to(&student);
        assert!((d - 100.07).abs() < 0.05, "distance was {d}");
        assert!((round_to_cents(d) - 100.08).abs() < 0.011);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = haversine_meters(point(0.0, 0.0), point(0.0, 1.0));
        assert!((d - 111_194.93).abs() < 0.01, "distance was {d}");
    }

    #[rstest]
    #[case(0.0, false)]
    #[case(4.99, false)]
    #[case(5.0, false)]
    #[case(5.01, true)]
    #[case(100.08, true)]
    fn geofence_boundary(#[case] distance: f64, #[case] exceeds: bool) {
        assert_eq!(exceeds_geofence(distance), exceeds);
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(90.5, 0.0)]
    #[case(0.0, -180.5)]
    #[case(0.0, f64::INFINITY)]
    fn invalid_coordinates_rejected(#[case] latitude: f64, #[case] longitude: f64) {
        assert!(Coordinates::new(latitude, longitude).is_err());
    }

    #[test]
    fn rounding_to_two_decimals() {
        assert!((round_to_cents(4.996) - 5.0).abs() < f64::EPSILON);
        assert!((round_to_cents(0.004) - 0.0).abs() < f64::EPSILON);
    }
}
