//! trip-planner route optimization core
//!
//! Orders 2–10 stops into a short walking circuit (nearest-neighbor plus
//! 2-opt over great-circle distances), times each leg, and checks the result
//! against walkability limits.

pub mod error;
pub mod haversine;
pub mod matrix;
pub mod model;
pub mod polyline;
pub mod progress;
pub mod route;
pub mod solver;
pub mod traits;
pub mod validate;

pub use error::{InputError, PolylineError, ProgressError};
pub use model::{Coordinate, Milestone, OptimizedRoute, RouteSegment};
pub use solver::{optimize, optimize_with, OptimizeOptions};
pub use validate::{check_route, validate, RouteLimits, RouteVerdict, RouteViolation};
