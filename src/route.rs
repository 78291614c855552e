//! Turns an index tour into a timed, annotated route.

use crate::haversine::km_to_minutes;
use crate::matrix::DistanceMatrix;
use crate::model::{Milestone, OptimizedRoute, RouteSegment};
use crate::polyline::Polyline;

/// Build the [`OptimizedRoute`] for `tour` over `milestones`.
///
/// Total time counts every segment's travel time plus the dwell time of its
/// destination, plus the dwell time of the first milestone once. Dwell is
/// summed exactly; a total above `u32::MAX` minutes is reported as
/// `u32::MAX`, which every time limit rejects.
///
/// # Panics
///
/// Panics if `tour` is empty or holds an index outside `milestones`.
pub fn assemble_route(
    milestones: &[Milestone],
    tour: &[usize],
    matrix: &DistanceMatrix,
    speed_kmh: f64,
) -> OptimizedRoute {
    let ordered: Vec<Milestone> = tour
        .iter()
        .enumerate()
        .map(|(order, &index)| Milestone {
            order,
            ..milestones[index].clone()
        })
        .collect();

    let mut route_segments = Vec::with_capacity(ordered.len().saturating_sub(1));
    let mut total_distance = 0.0;
    let mut travel_minutes = 0.0;
    let mut dwell_minutes = u64::from(ordered[0].estimated_duration);

    for (pair, legs) in tour.windows(2).zip(ordered.windows(2)) {
        let (from, to) = (&legs[0], &legs[1]);
        let distance = matrix.get(pair[0], pair[1]);
        let estimated_time = km_to_minutes(distance, speed_kmh);

        total_distance += distance;
        travel_minutes += estimated_time;
        dwell_minutes += u64::from(to.estimated_duration);

        route_segments.push(RouteSegment {
            from: from.clone(),
            to: to.clone(),
            distance,
            estimated_time,
            polyline: Some(Polyline::straight(from.coordinates, to.coordinates)),
        });
    }

    OptimizedRoute {
        starting_point: ordered[0].clone(),
        milestones: ordered,
        total_distance: round_to_hundredths(total_distance),
        estimated_total_time: whole_minutes(travel_minutes + dwell_minutes as f64),
        route_segments,
    }
}

/// Round to whole minutes, saturating at `u32::MAX`.
fn whole_minutes(minutes: f64) -> u32 {
    let rounded = minutes.round();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
