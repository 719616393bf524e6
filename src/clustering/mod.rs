pub mod config;
pub mod sequential;

pub use config::Config;
pub use sequential::SequentialKmeans;

use crate::core::accumulator::ClusterAccumulator;
use crate::core::element::ClusterElement;
use crate::distances::DistanceMetric;
use crate::error::{Error, Result};
use rand::rngs::SmallRng;
use rand::{rng, Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;

/// Parameters shared by the sequential loop and the parallel protocol.
pub struct KmeansParams<E: ClusterElement> {
    /// Metric used to rank candidate centroids.
    pub metric: Arc<dyn DistanceMetric<E>>,
    /// Number of clusters.
    pub k: usize,
    /// Iteration cap. The loop runs at most `max_iter - 1` rounds and
    /// always at least one.
    pub max_iter: usize,
    /// Seed for centroid initialization; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl<E: ClusterElement> Clone for KmeansParams<E> {
    fn clone(&self) -> Self {
        Self {
            metric: Arc::clone(&self.metric),
            k: self.k,
            max_iter: self.max_iter,
            rng_seed: self.rng_seed,
        }
    }
}

impl<E: ClusterElement> KmeansParams<E> {
    /// Fail-fast checks shared by both execution modes, run before any
    /// round begins.
    pub fn validate(&self, n_items: usize) -> Result<()> {
        if n_items == 0 {
            return Err(Error::EmptyDataset);
        }
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1".into(),
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Number of assign/recompute rounds the run may execute.
    pub(crate) fn rounds(&self) -> usize {
        self.max_iter.saturating_sub(1).max(1)
    }

    /// Returns a random number generator based on the seed (or entropy).
    pub(crate) fn rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rng()),
        }
    }
}

/// Choose k distinct elements of the dataset as initial centroids,
/// uniformly at random without replacement; duplicate draws are
/// rejected and redrawn.
pub fn choose_initial_centroids<E: ClusterElement>(
    data: &[E],
    k: usize,
    rng: &mut SmallRng,
) -> Result<Vec<E>> {
    if k > data.len() {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: data.len(),
        });
    }
    let mut chosen = HashSet::new();
    let mut centroids = Vec::with_capacity(k);
    while centroids.len() < k {
        let index = rng.random_range(0..data.len());
        if chosen.insert(index) {
            centroids.push(data[index].clone());
        }
    }
    Ok(centroids)
}

/// Result of a clustering run: the final accumulators (membership plus
/// aggregates), the centroid array broadcast in the terminating round,
/// and how the run ended.
#[derive(Debug, Clone)]
pub struct KmeansOutcome<E: ClusterElement> {
    /// One accumulator per cluster index, holding the final members.
    pub clusters: Vec<E::Accumulator>,
    /// Final centroid array. Not recomputed after the last assignment.
    pub centroids: Vec<E>,
    /// Rounds actually executed.
    pub rounds: usize,
    /// Whether the run stopped because no assignment changed (as
    /// opposed to exhausting the iteration cap).
    pub converged: bool,
}

impl<E: ClusterElement> KmeansOutcome<E> {
    /// Cluster membership as plain element lists, index-aligned with
    /// the centroid array.
    pub fn membership(&self) -> Vec<Vec<E>> {
        self.clusters
            .iter()
            .map(|c| c.members().to_vec())
            .collect()
    }

    /// Total number of elements across all clusters.
    pub fn total_members(&self) -> usize {
        self.clusters.iter().map(|c| c.count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::element::Point2;
    use crate::distances::SquaredEuclidean;

    fn params(k: usize, max_iter: usize) -> KmeansParams<Point2> {
        KmeansParams {
            metric: Arc::new(SquaredEuclidean),
            k,
            max_iter,
            rng_seed: Some(42),
        }
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(matches!(
            params(2, 5).validate(0),
            Err(Error::EmptyDataset)
        ));
        assert!(matches!(
            params(0, 5).validate(4),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
        assert!(matches!(
            params(2, 0).validate(4),
            Err(Error::InvalidParameter {
                name: "max_iter",
                ..
            })
        ));
        assert!(params(2, 5).validate(4).is_ok());
    }

    #[test]
    fn test_rounds_accounting() {
        assert_eq!(params(2, 10).rounds(), 9);
        assert_eq!(params(2, 2).rounds(), 1);
        // A cap of one still gets a single full round.
        assert_eq!(params(2, 1).rounds(), 1);
    }

    #[test]
    fn test_initial_centroids_are_distinct_dataset_elements() {
        let data: Vec<Point2> = (0..10).map(|i| Point2::new(i as f64, 0.0)).collect();
        let mut rng = SmallRng::seed_from_u64(7);
        let centroids = choose_initial_centroids(&data, 4, &mut rng).unwrap();

        assert_eq!(centroids.len(), 4);
        for c in &centroids {
            assert!(data.contains(c));
        }
        for (i, a) in centroids.iter().enumerate() {
            for b in &centroids[i + 1..] {
                assert_ne!(a, b, "duplicate initial centroid");
            }
        }
    }

    #[test]
    fn test_initial_centroids_deterministic_under_seed() {
        let data: Vec<Point2> = (0..20).map(|i| Point2::new(i as f64, -(i as f64))).collect();
        let a = choose_initial_centroids(&data, 5, &mut SmallRng::seed_from_u64(9)).unwrap();
        let b = choose_initial_centroids(&data, 5, &mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_initial_centroids_reject_oversized_k() {
        let data = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        let result = choose_initial_centroids(&data, 3, &mut SmallRng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(Error::InvalidClusterCount {
                requested: 3,
                n_items: 2
            })
        ));
    }
}
