//! Bookkeeping for a route the user is currently walking.
//!
//! Tracks which milestone is next and which ones are done. Deciding when a
//! milestone is reached (GPS, geofences) is the caller's job; this type only
//! records the outcome.

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;
use crate::model::{Milestone, OptimizedRoute};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRoute {
    pub name: String,
    pub route: OptimizedRoute,
    current_milestone_index: usize,
    completed_milestones: Vec<String>,
}

impl ActiveRoute {
    /// Begin tracking `route` from its first milestone.
    pub fn start(name: impl Into<String>, route: OptimizedRoute) -> Self {
        Self {
            name: name.into(),
            route,
            current_milestone_index: 0,
            completed_milestones: Vec::new(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_milestone_index
    }

    pub fn current_milestone(&self) -> Option<&Milestone> {
        self.route.milestones.get(self.current_milestone_index)
    }

    /// Ids of completed milestones, in completion order.
    pub fn completed(&self) -> &[String] {
        &self.completed_milestones
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_milestones.iter().any(|done| done == id)
    }

    /// Record `id` as visited and move on to the next milestone.
    ///
    /// The current index stays on the last milestone once it gets there.
    /// Completing the same milestone twice is a no-op.
    pub fn mark_completed(&mut self, id: &str) -> Result<(), ProgressError> {
        if !self.route.milestones.iter().any(|m| m.id == id) {
            return Err(ProgressError::UnknownMilestone { id: id.to_owned() });
        }
        if self.is_completed(id) {
            return Ok(());
        }

        self.completed_milestones.push(id.to_owned());
        if self.current_milestone_index + 1 < self.route.milestones.len() {
            self.current_milestone_index += 1;
        }
        Ok(())
    }

    /// Jump to the milestone at `index` in visiting order.
    pub fn set_current(&mut self, index: usize) -> Result<(), ProgressError> {
        let len = self.route.milestones.len();
        if index >= len {
            return Err(ProgressError::IndexOutOfRange { index, len });
        }
        self.current_milestone_index = index;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.route
            .milestones
            .iter()
            .all(|m| self.is_completed(&m.id))
    }

    /// Fraction of milestones completed, in `0.0..=1.0`.
    pub fn completion_ratio(&self) -> f64 {
        let total = self.route.milestones.len();
        if total == 0 {
            return 1.0;
        }
        self.completed_milestones.len() as f64 / total as f64
    }

    /// Kilometers left from the current milestone to the end of the route.
    pub fn remaining_distance_km(&self) -> f64 {
        self.route
            .route_segments
            .iter()
            .skip(self.current_milestone_index)
            .map(|segment| segment.distance)
            .sum()
    }
}
