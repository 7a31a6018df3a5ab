//! Great-circle distance via the haversine formula.

use crate::{EARTH_RADIUS_KM, METERS_PER_KM};

/// Great-circle distance between two points in meters.
///
/// Haversine on a sphere of radius [`EARTH_RADIUS_KM`]:
///
/// ```text
/// a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
/// c = 2·atan2(√a, √(1−a))
/// d = R·c
/// ```
///
/// Inputs are decimal degrees and are not range-checked; out-of-range values
/// yield a nonsensical but finite result (the trig domain is closed under
/// any real input). Pure and side-effect free.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_delta = (lat2 - lat1).to_radians();
    let lon_delta = (lon2 - lon1).to_radians();

    let a = (lat_delta / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (lon_delta / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * METERS_PER_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// One degree of latitude on the 6371 km sphere, in meters.
    const DEGREE_OF_LATITUDE_M: f64 = 111_194.92664455874;

    #[test]
    fn identity_is_zero() {
        assert_eq!(haversine_meters(40.0, -75.0, 40.0, -75.0), 0.0);
        assert_eq!(haversine_meters(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(haversine_meters(-90.0, 180.0, -90.0, 180.0), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_meters(0.0, 0.0, 1.0, 0.0);
        assert!((d - DEGREE_OF_LATITUDE_M).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        // At the equator a degree of longitude equals a degree of latitude.
        let d = haversine_meters(0.0, 0.0, 0.0, 1.0);
        assert!((d - DEGREE_OF_LATITUDE_M).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let equator = haversine_meters(0.0, 0.0, 0.0, 1.0);
        let mid = haversine_meters(60.0, 0.0, 60.0, 1.0);
        // cos(60°) = 0.5
        assert!((mid / equator - 0.5).abs() < 0.001);
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let d = haversine_meters(0.0, 0.0, 0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM * METERS_PER_KM;
        assert!((d - half_circumference).abs() < 1.0);
    }

    #[test]
    fn symmetry_spot_check() {
        let ab = haversine_meters(48.8566, 2.3522, 51.5074, -0.1278);
        let ba = haversine_meters(51.5074, -0.1278, 48.8566, 2.3522);
        assert_eq!(ab, ba);
        // Paris to London is roughly 344 km.
        assert!(ab > 330_000.0 && ab < 350_000.0, "got {}", ab);
    }

    #[test]
    fn out_of_range_inputs_stay_finite() {
        // Garbage in, garbage out - but never NaN or a panic.
        let d = haversine_meters(500.0, -1000.0, -273.0, 9999.0);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    proptest! {
        #[test]
        fn distance_symmetric(
            lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
        ) {
            let ab = haversine_meters(lat1, lon1, lat2, lon2);
            let ba = haversine_meters(lat2, lon2, lat1, lon1);
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn distance_nonnegative_and_bounded(
            lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
        ) {
            let d = haversine_meters(lat1, lon1, lat2, lon2);
            prop_assert!(d >= 0.0);
            // Nothing on the sphere is farther than half the circumference.
            let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM * METERS_PER_KM;
            prop_assert!(d <= half_circumference + 1e-6);
        }

        #[test]
        fn identity_for_any_point(lat in -90.0f64..90.0, lon in -180.0f64..180.0) {
            prop_assert_eq!(haversine_meters(lat, lon, lat, lon), 0.0);
        }
    }
}
