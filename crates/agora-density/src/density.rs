//! Windowed neighbor counting.

use crate::config::DensityConfig;
use agora_geo::GeoPoint;
use agora_journal::LocationReport;

/// Count reports within `config.radius_m` of `origin` (inclusive boundary).
///
/// Naive O(n) scan - one haversine evaluation per report. Acceptable because
/// n is bounded by "currently active subjects", not total history; callers
/// pass an already-windowed active set.
pub fn density_at(origin: GeoPoint, reports: &[LocationReport], config: &DensityConfig) -> u32 {
    reports
        .iter()
        .filter(|r| origin.distance_m(&r.position) <= config.radius_m)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_journal::SubjectId;

    // Roughly 0.00045 degrees of latitude is 50 m on the 6371 km sphere.
    const NEAR_LAT_STEP: f64 = 0.00008; // ~9 m
    const FAR_LAT_STEP: f64 = 0.0009; // ~100 m

    fn report_at(subject: &str, lat: f64, lon: f64) -> LocationReport {
        LocationReport::with_timestamp(SubjectId::new(subject), GeoPoint::from_lat_lon(lat, lon), 0)
    }

    #[test]
    fn empty_set_is_zero() {
        let config = DensityConfig::default();
        assert_eq!(
            density_at(GeoPoint::from_lat_lon(40.0, -75.0), &[], &config),
            0
        );
    }

    #[test]
    fn counts_reports_inside_radius() {
        let config = DensityConfig::default();
        let origin = GeoPoint::from_lat_lon(40.0, -75.0);
        let reports = vec![
            report_at("a", 40.0, -75.0),
            report_at("b", 40.0 + NEAR_LAT_STEP, -75.0),
            report_at("c", 40.0 - NEAR_LAT_STEP, -75.0),
        ];

        assert_eq!(density_at(origin, &reports, &config), 3);
    }

    #[test]
    fn excludes_reports_outside_radius() {
        // Two positions 100 m apart contribute nothing to each other.
        let config = DensityConfig::default();
        let here = GeoPoint::from_lat_lon(40.0, -75.0);
        let there = GeoPoint::from_lat_lon(40.0 + FAR_LAT_STEP, -75.0);
        assert!(here.distance_m(&there) > config.radius_m);

        let reports = vec![report_at("far", there.lat, there.lon)];
        assert_eq!(density_at(here, &reports, &config), 0);

        let reports = vec![report_at("near", here.lat, here.lon)];
        assert_eq!(density_at(there, &reports, &config), 0);
    }

    #[test]
    fn boundary_is_inclusive() {
        let origin = GeoPoint::from_lat_lon(40.0, -75.0);
        let candidate = GeoPoint::from_lat_lon(40.0 + FAR_LAT_STEP, -75.0);
        let d = origin.distance_m(&candidate);
        assert!(d > 50.0 && d < 150.0, "got {}", d);

        // A radius of exactly the measured distance still counts the report.
        let exact = DensityConfig {
            radius_m: d,
            ..DensityConfig::default()
        };
        let reports = vec![report_at("edge", candidate.lat, candidate.lon)];
        assert_eq!(density_at(origin, &reports, &exact), 1);

        // Any radius below the measured distance excludes it.
        let below = DensityConfig {
            radius_m: d - 0.001,
            ..DensityConfig::default()
        };
        assert_eq!(density_at(origin, &reports, &below), 0);
    }

    #[test]
    fn one_record_per_report_not_per_subject() {
        let config = DensityConfig::default();
        let origin = GeoPoint::from_lat_lon(40.0, -75.0);
        let reports = vec![
            report_at("same", 40.0, -75.0),
            report_at("same", 40.0, -75.0),
            report_at("same", 40.0 + NEAR_LAT_STEP, -75.0),
        ];

        assert_eq!(density_at(origin, &reports, &config), 3);
    }
}
