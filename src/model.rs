//! Domain records shared by the optimizer and its callers.
//!
//! Field names serialize in camelCase to match the JSON the host app stores.

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Coordinate from degrees; range is checked by [`Coordinate::is_valid`].
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite, |latitude| <= 90 and |longitude| <= 180.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    /// `(latitude, longitude)`, the point order polylines use.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A single planned stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub coordinates: Coordinate,
    /// Expected dwell time at the stop, in minutes.
    pub estimated_duration: u32,
    /// Position in the list; rewritten with the visiting order on output.
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub completed: bool,
}

impl Milestone {
    /// Incomplete milestone with no address, no dwell time and order 0.
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            coordinates,
            estimated_duration: 0,
            order: 0,
            completed: false,
        }
    }

    /// Set the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the dwell time in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = minutes;
        self
    }

    /// Set the list position.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }
}

/// One leg of an optimized route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub from: Milestone,
    pub to: Milestone,
    /// Great-circle distance in kilometers.
    pub distance: f64,
    /// Travel time in minutes at the configured walking speed.
    pub estimated_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Leg geometry, serialized as an encoded polyline string.
    pub polyline: Option<Polyline>,
}

/// The result of one optimization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedRoute {
    /// Milestones in visiting order, each stamped with its 0-based `order`.
    pub milestones: Vec<Milestone>,
    /// Kilometers, rounded to two decimals.
    pub total_distance: f64,
    /// Travel plus dwell time in whole minutes.
    pub estimated_total_time: u32,
    pub starting_point: Milestone,
    pub route_segments: Vec<RouteSegment>,
}

impl OptimizedRoute {
    /// Milestone ids in visiting order.
    pub fn visit_ids(&self) -> Vec<&str> {
        self.milestones.iter().map(|m| m.id.as_str()).collect()
    }
}
