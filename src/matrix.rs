//! Pairwise distance matrix over a fixed milestone set.

use crate::model::Milestone;
use crate::traits::DistanceMetric;

/// Square, symmetric, zero-diagonal table of distances in kilometers.
///
/// Indexed by position in the milestone slice it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build the matrix for `milestones` using `metric`.
    ///
    /// Only the upper triangle is measured; the lower one is mirrored from it.
    pub fn build<M: DistanceMetric>(milestones: &[Milestone], metric: &M) -> Self {
        let n = milestones.len();
        let mut rows = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in i + 1..n {
                let km = metric.distance_km(milestones[i].coordinates, milestones[j].coordinates);
                rows[i][j] = km;
                rows[j][i] = km;
            }
        }

        Self { rows }
    }

    /// Wrap precomputed rows; the caller keeps them square and symmetric.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of milestones (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distance in km from milestone `from` to milestone `to`.
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    /// The raw table, row-major.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Sum of consecutive-pair distances along `order` (open path, no return leg).
    pub fn path_length(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|pair| self.get(pair[0], pair[1])).sum()
    }
}
