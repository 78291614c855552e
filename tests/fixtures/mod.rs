//! Test fixtures for trip-planner.
//!
//! Provides realistic test data including:
//! - Real central Paris landmarks (walking distance of each other)
//! - A few far-away destinations for infeasible routes
//! - Builders turning locations into milestones

pub mod paris_locations;

pub use paris_locations::*;
