//! Route optimizer: starting point, nearest-neighbor construction, 2-opt.
//!
//! The pipeline is strictly linear and deterministic. Identical inputs give
//! identical routes; ties always resolve to the lowest index.

use tracing::{debug, warn};

use crate::error::InputError;
use crate::haversine::Haversine;
use crate::matrix::DistanceMatrix;
use crate::model::{Coordinate, Milestone, OptimizedRoute};
use crate::route::assemble_route;
use crate::traits::DistanceMetric;

/// Fewest milestones an optimization call accepts.
pub const MIN_MILESTONES: usize = 2;

/// Most milestones an optimization call accepts.
pub const MAX_MILESTONES: usize = 10;

/// Visiting order as indices into the milestone slice.
pub type Tour = Vec<usize>;

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Assumed walking speed used for segment travel times.
    pub walking_speed_kmh: f64,
    /// Upper bound on full 2-opt sweeps before giving up on convergence.
    pub max_two_opt_sweeps: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            walking_speed_kmh: 5.0,
            max_two_opt_sweeps: 1000,
        }
    }
}

/// Optimize the visiting order of `milestones` with default options and the
/// haversine metric.
///
/// `current_location`, when given, only biases which milestone starts the
/// route. The input slice is never modified.
pub fn optimize(
    milestones: &[Milestone],
    current_location: Option<Coordinate>,
) -> Result<OptimizedRoute, InputError> {
    optimize_with(milestones, current_location, &OptimizeOptions::default(), &Haversine)
}

pub fn optimize_with<M>(
    milestones: &[Milestone],
    current_location: Option<Coordinate>,
    options: &OptimizeOptions,
    metric: &M,
) -> Result<OptimizedRoute, InputError>
where
    M: DistanceMetric,
{
    check_input(milestones, current_location, options)?;

    let matrix = DistanceMatrix::build(milestones, metric);

    let start = select_start(milestones, current_location, metric);
    debug!(
        start,
        milestones = milestones.len(),
        biased = current_location.is_some(),
        "selected starting milestone"
    );

    let initial = nearest_neighbor_tour(&matrix, start);
    let initial_km = matrix.path_length(&initial);

    let refined = two_opt_refine(initial, &matrix, options.max_two_opt_sweeps);
    debug!(
        initial_km,
        refined_km = matrix.path_length(&refined),
        "refined tour"
    );

    Ok(assemble_route(milestones, &refined, &matrix, options.walking_speed_kmh))
}

fn check_input(
    milestones: &[Milestone],
    current_location: Option<Coordinate>,
    options: &OptimizeOptions,
) -> Result<(), InputError> {
    let count = milestones.len();
    if count < MIN_MILESTONES {
        return Err(InputError::TooFewMilestones { count });
    }
    if count > MAX_MILESTONES {
        return Err(InputError::TooManyMilestones { count });
    }

    if let Some(invalid) = milestones.iter().find(|m| !m.coordinates.is_valid()) {
        return Err(InputError::InvalidMilestoneCoordinate {
            id: invalid.id.clone(),
            latitude: invalid.coordinates.latitude,
            longitude: invalid.coordinates.longitude,
        });
    }

    if let Some(location) = current_location {
        if !location.is_valid() {
            return Err(InputError::InvalidCurrentLocation {
                latitude: location.latitude,
                longitude: location.longitude,
            });
        }
    }

    let speed_kmh = options.walking_speed_kmh;
    if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
        return Err(InputError::InvalidWalkingSpeed { speed_kmh });
    }

    Ok(())
}

/// Index of the milestone closest to `current_location`, or 0 without one.
///
/// Ties keep the first (lowest-index) candidate.
pub fn select_start<M>(
    milestones: &[Milestone],
    current_location: Option<Coordinate>,
    metric: &M,
) -> usize
where
    M: DistanceMetric,
{
    let Some(current) = current_location else {
        return 0;
    };

    let mut nearest_index = 0;
    let mut nearest_distance = f64::INFINITY;
    for (index, milestone) in milestones.iter().enumerate() {
        let distance = metric.distance_km(current, milestone.coordinates);
        if distance < nearest_distance {
            nearest_distance = distance;
            nearest_index = index;
        }
    }

    nearest_index
}

// ============================================================================
// Tour Construction
// ============================================================================

/// Greedy tour: from `start`, always step to the nearest unvisited index.
///
/// Ties go to the lowest index. Always returns a permutation of `0..n`.
///
/// # Panics
///
/// Panics if `start` is not an index of `matrix`.
pub fn nearest_neighbor_tour(matrix: &DistanceMatrix, start: usize) -> Tour {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);

    visited[start] = true;
    tour.push(start);
    let mut current = start;

    while tour.len() < n {
        let mut nearest: Option<(usize, f64)> = None;
        for candidate in (0..n).filter(|&c| !visited[c]) {
            let distance = matrix.get(current, candidate);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((candidate, distance));
            }
        }

        let Some((next, _)) = nearest else {
            break;
        };
        visited[next] = true;
        tour.push(next);
        current = next;
    }

    tour
}

// ============================================================================
// Local Search
// ============================================================================

/// 2-opt: reverse sub-segments `tour[i..=j]` while that shortens the path.
///
/// The first stop stays fixed and adjacent pairs (`j == i + 1`) are never
/// tried. An improving candidate replaces the current best immediately, so
/// later candidates in the same sweep compare against it. Sweeps repeat until
/// one makes no change or `max_sweeps` is reached.
pub fn two_opt_refine(tour: Tour, matrix: &DistanceMatrix, max_sweeps: usize) -> Tour {
    let len = tour.len();
    let mut best = tour;
    if len < 4 {
        return best;
    }

    let mut best_length = matrix.path_length(&best);

    for sweep in 1..=max_sweeps {
        let mut improved = false;

        for i in 1..len - 2 {
            for j in i + 2..len {
                let mut candidate = best.clone();
                candidate[i..=j].reverse();

                let candidate_length = matrix.path_length(&candidate);
                if candidate_length < best_length {
                    best = candidate;
                    best_length = candidate_length;
                    improved = true;
                }
            }
        }

        if !improved {
            debug!(sweeps = sweep, length_km = best_length, "2-opt converged");
            return best;
        }
    }

    warn!(
        max_sweeps,
        length_km = best_length,
        "2-opt sweep limit reached before convergence"
    );
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f64]]) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows.iter().map(|row| row.to_vec()).collect())
    }

    /// Points on a line: distance is the absolute difference of positions.
    fn line_matrix(positions: &[f64]) -> DistanceMatrix {
        DistanceMatrix::from_rows(
            positions
                .iter()
                .map(|a| positions.iter().map(|b| (a - b).abs()).collect())
                .collect(),
        )
    }

    fn stop(id: &str, lat: f64, lng: f64) -> Milestone {
        Milestone::new(id, id, Coordinate::new(lat, lng))
    }

    #[test]
    fn test_start_defaults_to_first() {
        let stops = vec![stop("a", 0.0, 0.0), stop("b", 1.0, 1.0)];
        assert_eq!(select_start(&stops, None, &Haversine), 0);
    }

    #[test]
    fn test_start_nearest_to_current_location() {
        let stops = vec![stop("a", 0.0, 0.0), stop("b", 1.0, 1.0), stop("c", 2.0, 2.0)];
        let current = Some(Coordinate::new(1.9, 1.9));
        assert_eq!(select_start(&stops, current, &Haversine), 2);
    }

    #[test]
    fn test_start_tie_keeps_lowest_index() {
        let stops = vec![stop("a", 0.0, 1.0), stop("b", 0.0, 2.0), stop("c", 0.0, 1.0)];
        let current = Some(Coordinate::new(0.0, 0.0));
        assert_eq!(select_start(&stops, current, &Haversine), 0);
    }

    #[test]
    fn test_nearest_neighbor_follows_closest() {
        let m = line_matrix(&[0.0, 10.0, 1.0, 5.0]);
        assert_eq!(nearest_neighbor_tour(&m, 0), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_nearest_neighbor_from_other_start() {
        let m = line_matrix(&[0.0, 10.0, 1.0, 5.0]);
        assert_eq!(nearest_neighbor_tour(&m, 3), vec![3, 2, 0, 1]);
    }

    #[test]
    fn test_nearest_neighbor_tie_takes_lowest_index() {
        let m = matrix(&[
            &[0.0, 2.0, 2.0],
            &[2.0, 0.0, 3.0],
            &[2.0, 3.0, 0.0],
        ]);
        assert_eq!(nearest_neighbor_tour(&m, 0), vec![0, 1, 2]);
    }

    #[test]
    fn test_nearest_neighbor_all_coincident() {
        let m = line_matrix(&[4.0, 4.0, 4.0, 4.0]);
        assert_eq!(nearest_neighbor_tour(&m, 2), vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_two_opt_leaves_short_tours_alone() {
        let m = line_matrix(&[0.0, 10.0, 1.0]);
        assert_eq!(two_opt_refine(vec![0, 1, 2], &m, 10), vec![0, 1, 2]);
    }

    #[test]
    fn test_two_opt_untangles_crossing() {
        // Walking the line backwards after the first stop; one reversal of
        // the whole tail straightens it.
        let m = line_matrix(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let refined = two_opt_refine(vec![0, 4, 3, 2, 1], &m, 10);
        assert_eq!(refined, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_two_opt_keeps_first_stop() {
        let m = line_matrix(&[5.0, 0.0, 1.0, 2.0, 3.0]);
        let refined = two_opt_refine(vec![0, 1, 3, 2, 4], &m, 10);
        assert_eq!(refined[0], 0);
        assert!(m.path_length(&refined) <= m.path_length(&[0, 1, 3, 2, 4]));
    }

    #[test]
    fn test_two_opt_skips_adjacent_swaps() {
        // Only improvement available is swapping neighbours 1 and 2, which
        // is outside the searched neighbourhood.
        let m = line_matrix(&[0.0, 2.0, 1.0, 3.0]);
        assert_eq!(two_opt_refine(vec![0, 1, 2, 3], &m, 10), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_two_opt_accepts_improvements_mid_sweep() {
        // From 0,1,2,3,4,5 this table has three different 2-opt local optima:
        // taking each improvement and scanning on (0,5,3,2,1,4 = 18), applying
        // the best move of a sweep only at its end (0,5,4,3,2,1 = 19), and
        // restarting the sweep after the first improvement (0,4,2,1,5,3 = 14).
        let m = matrix(&[
            &[0.0, 8.0, 6.0, 8.0, 5.0, 2.0],
            &[8.0, 0.0, 2.0, 9.0, 7.0, 3.0],
            &[6.0, 2.0, 0.0, 6.0, 3.0, 8.0],
            &[8.0, 9.0, 6.0, 0.0, 7.0, 1.0],
            &[5.0, 7.0, 3.0, 7.0, 0.0, 2.0],
            &[2.0, 3.0, 8.0, 1.0, 2.0, 0.0],
        ]);
        let refined = two_opt_refine(vec![0, 1, 2, 3, 4, 5], &m, 100);
        assert_eq!(refined, vec![0, 5, 3, 2, 1, 4]);
        assert_eq!(m.path_length(&refined), 18.0);
    }

    #[test]
    fn test_two_opt_zero_sweeps_returns_input() {
        let m = line_matrix(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(two_opt_refine(vec![0, 4, 3, 2, 1], &m, 0), vec![0, 4, 3, 2, 1]);
    }

    #[test]
    fn test_check_input_counts() {
        let one = vec![stop("a", 0.0, 0.0)];
        assert_eq!(check_input(&one, None, &OptimizeOptions::default()), Err(InputError::TooFewMilestones { count: 1 }));

        let eleven: Vec<_> = (0..11).map(|i| stop(&format!("s{i}"), 0.0, i as f64 * 0.001)).collect();
        assert_eq!(check_input(&eleven, None, &OptimizeOptions::default()), Err(InputError::TooManyMilestones { count: 11 }));
    }

    #[test]
    fn test_check_input_rejects_bad_speed() {
        let stops = vec![stop("a", 0.0, 0.0), stop("b", 0.0, 0.0)];
        for speed_kmh in [0.0, -5.0, f64::INFINITY] {
            let options = OptimizeOptions {
                walking_speed_kmh: speed_kmh,
                ..OptimizeOptions::default()
            };
            assert_eq!(
                check_input(&stops, None, &options),
                Err(InputError::InvalidWalkingSpeed { speed_kmh })
            );
        }
    }

    #[test]
    fn test_check_input_rejects_bad_coordinates() {
        let stops = vec![stop("a", 0.0, 0.0), stop("b", 91.0, 0.0)];
        assert!(matches!(
            check_input(&stops, None, &OptimizeOptions::default()),
            Err(InputError::InvalidMilestoneCoordinate { ref id, .. }) if id == "b"
        ));

        let stops = vec![stop("a", 0.0, 0.0), stop("b", 1.0, 0.0)];
        assert!(matches!(
            check_input(&stops, Some(Coordinate::new(0.0, -181.0)), &OptimizeOptions::default()),
            Err(InputError::InvalidCurrentLocation { .. })
        ));
    }
}
