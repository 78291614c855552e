//! Core seams of the trip planner.
//!
//! The optimizer only needs a way to measure distance between two points.
//! Alternative metrics (a fixed table, a planar approximation) plug in here.

use crate::model::Coordinate;

/// Measures the distance between two coordinates, in kilometers.
///
/// Implementations must be symmetric and return 0 for coincident points.
pub trait DistanceMetric {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64;
}
