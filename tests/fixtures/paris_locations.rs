//! Real Paris landmarks for realistic test fixtures.
//!
//! Coordinates are approximate entrance positions from OpenStreetMap.

use trip_planner::{Coordinate, Milestone};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Milestone with an id derived from the name.
    pub fn milestone(&self, dwell_minutes: u32) -> Milestone {
        let id = self.name.to_lowercase().replace(' ', "-");
        Milestone::new(id, self.name, self.coords()).with_duration(dwell_minutes)
    }
}

// ============================================================================
// Central Paris (all within ~3 km of each other)
// ============================================================================

pub const CENTRAL_PARIS: &[Location] = &[
    Location::new("Louvre Museum", 48.8606, 2.3376),
    Location::new("Notre-Dame", 48.8530, 2.3499),
    Location::new("Sainte-Chapelle", 48.8554, 2.3450),
    Location::new("Pont Neuf", 48.8566, 2.3413),
    Location::new("Centre Pompidou", 48.8607, 2.3522),
    Location::new("Jardin des Tuileries", 48.8635, 2.3275),
    Location::new("Place de la Concorde", 48.8656, 2.3212),
    Location::new("Musee d'Orsay", 48.8600, 2.3266),
    Location::new("Pantheon", 48.8462, 2.3464),
    Location::new("Jardin du Luxembourg", 48.8462, 2.3372),
];

// ============================================================================
// Further out, still in the city
// ============================================================================

pub const OUTER_PARIS: &[Location] = &[
    Location::new("Eiffel Tower", 48.8584, 2.2945),
    Location::new("Arc de Triomphe", 48.8738, 2.2950),
    Location::new("Sacre-Coeur", 48.8867, 2.3431),
    Location::new("Palais Garnier", 48.8720, 2.3316),
    Location::new("Place des Vosges", 48.8556, 2.3655),
];

// ============================================================================
// Day trips (too far to walk between)
// ============================================================================

pub const DAY_TRIPS: &[Location] = &[
    Location::new("Chateau de Versailles", 48.8049, 2.1204),
    Location::new("Disneyland Paris", 48.8722, 2.7758),
];

/// Milestones for every location in `locations`, each with the same dwell.
pub fn milestones(locations: &[Location], dwell_minutes: u32) -> Vec<Milestone> {
    locations.iter().map(|l| l.milestone(dwell_minutes)).collect()
}
