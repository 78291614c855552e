//! Great-circle distance model.
//!
//! Straight-line distance over a spherical Earth. Ignores roads, so it
//! underestimates real walking distance, but needs no network access.

use crate::model::Coordinate;
use crate::traits::DistanceMetric;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

/// Calculate haversine distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Clamp guards asin against rounding just above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Convert a distance in km to travel minutes at the given speed.
pub fn km_to_minutes(km: f64, speed_kmh: f64) -> f64 {
    km / speed_kmh * 60.0
}

impl DistanceMetric for Haversine {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
        haversine_km(from, to)
    }
}
