//! Feasibility checks for optimized routes.

use serde::{Deserialize, Serialize};

use crate::model::OptimizedRoute;

/// Thresholds a route must stay within to be presented as walkable.
#[derive(Debug, Clone)]
pub struct RouteLimits {
    pub max_total_distance_km: f64,
    pub max_total_minutes: u32,
    pub max_segment_distance_km: f64,
}

impl Default for RouteLimits {
    fn default() -> Self {
        Self {
            max_total_distance_km: 20.0,
            max_total_minutes: 480,
            max_segment_distance_km: 5.0,
        }
    }
}

/// A single limit a route exceeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RouteViolation {
    ExceedsTotalDistance { distance_km: f64, limit_km: f64 },
    ExceedsTotalTime { minutes: u32, limit_minutes: u32 },
    /// `index` is the position of the segment in the route.
    ExceedsSegmentDistance {
        index: usize,
        distance_km: f64,
        limit_km: f64,
    },
}

/// Every violation found on a route; empty means feasible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteVerdict {
    pub violations: Vec<RouteViolation>,
}

impl RouteVerdict {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check `route` against `limits`. Limits are inclusive.
pub fn check_route(route: &OptimizedRoute, limits: &RouteLimits) -> RouteVerdict {
    let mut violations = Vec::new();

    if route.total_distance > limits.max_total_distance_km {
        violations.push(RouteViolation::ExceedsTotalDistance {
            distance_km: route.total_distance,
            limit_km: limits.max_total_distance_km,
        });
    }

    if route.estimated_total_time > limits.max_total_minutes {
        violations.push(RouteViolation::ExceedsTotalTime {
            minutes: route.estimated_total_time,
            limit_minutes: limits.max_total_minutes,
        });
    }

    for (index, segment) in route.route_segments.iter().enumerate() {
        if segment.distance > limits.max_segment_distance_km {
            violations.push(RouteViolation::ExceedsSegmentDistance {
                index,
                distance_km: segment.distance,
                limit_km: limits.max_segment_distance_km,
            });
        }
    }

    RouteVerdict { violations }
}

/// True when `route` is within the default walking limits.
pub fn validate(route: &OptimizedRoute) -> bool {
    check_route(route, &RouteLimits::default()).is_valid()
}
