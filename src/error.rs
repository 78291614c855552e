//! Error types returned by the planner.

use thiserror::Error;

use crate::solver::{MAX_MILESTONES, MIN_MILESTONES};

/// Input rejected by [`crate::solver::optimize`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("at least {} milestones are required for route optimization, got {count}", MIN_MILESTONES)]
    TooFewMilestones { count: usize },

    #[error("at most {} milestones are allowed per route, got {count}", MAX_MILESTONES)]
    TooManyMilestones { count: usize },

    #[error("milestone {id} has invalid coordinates ({latitude}, {longitude})")]
    InvalidMilestoneCoordinate {
        id: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("current location has invalid coordinates ({latitude}, {longitude})")]
    InvalidCurrentLocation { latitude: f64, longitude: f64 },

    #[error("walking speed must be a positive, finite number of km/h, got {speed_kmh}")]
    InvalidWalkingSpeed { speed_kmh: f64 },
}

/// Failure while updating an active route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("milestone {id} is not part of the active route")]
    UnknownMilestone { id: String },

    #[error("milestone index {index} is out of range for a route of {len} milestones")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Malformed encoded polyline string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("invalid polyline character {byte:#04x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    #[error("polyline ends in the middle of a value at offset {offset}")]
    Truncated { offset: usize },

    #[error("polyline value starting at offset {offset} does not fit in 64 bits")]
    Overflow { offset: usize },
}
