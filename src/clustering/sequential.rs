use crate::clustering::{choose_initial_centroids, KmeansOutcome, KmeansParams};
use crate::core::accumulator::ClusterAccumulator;
use crate::core::element::ClusterElement;
use crate::distances::nearest_centroid;
use crate::error::{Error, Result};
use log::debug;

/// Single-process K-means. One round assigns every element to its
/// nearest centroid into fresh accumulators; the loop stops when a
/// round changes nothing or the round cap is hit, and the stopping
/// round's accumulators are the result.
///
/// The assignment logic is byte-for-byte the one the workers run over
/// their partitions, so given the same initial centroids and element
/// order this produces the same final membership as the parallel mode.
pub struct SequentialKmeans<E: ClusterElement> {
    params: KmeansParams<E>,
}

impl<E: ClusterElement> SequentialKmeans<E> {
    pub fn new(params: KmeansParams<E>) -> Self {
        Self { params }
    }

    /// Run with randomly chosen initial centroids (k distinct dataset
    /// elements, drawn from the params' seed).
    pub fn run(&self, data: &[E]) -> Result<KmeansOutcome<E>> {
        self.params.validate(data.len())?;
        let mut rng = self.params.rng();
        let centroids = choose_initial_centroids(data, self.params.k, &mut rng)?;
        self.run_from(data, centroids)
    }

    /// Run with caller-supplied initial centroids. This is the
    /// determinism hook, and the only entry point where k may exceed
    /// the dataset size (clusters may simply end up empty).
    pub fn run_from(&self, data: &[E], mut centroids: Vec<E>) -> Result<KmeansOutcome<E>> {
        self.params.validate(data.len())?;
        if centroids.len() != self.params.k {
            return Err(Error::InvalidParameter {
                name: "initial_centroids",
                message: format!("expected {} centroids, got {}", self.params.k, centroids.len()),
            });
        }

        let rounds = self.params.rounds();
        let mut assignments: Vec<Option<usize>> = vec![None; data.len()];
        let mut round = 1;
        loop {
            let mut accumulators: Vec<E::Accumulator> =
                (0..self.params.k).map(|_| Default::default()).collect();
            let mut changed = false;

            for (element, slot) in data.iter().zip(assignments.iter_mut()) {
                let cluster = nearest_centroid(self.params.metric.as_ref(), element, &centroids);
                // An unassigned element always counts as changed.
                if *slot != Some(cluster) {
                    changed = true;
                }
                accumulators[cluster].assign(element);
                *slot = Some(cluster);
            }

            if !changed || round == rounds {
                debug!(
                    "sequential run stopped at round {} (converged: {})",
                    round, !changed
                );
                return Ok(KmeansOutcome {
                    clusters: accumulators,
                    centroids,
                    rounds: round,
                    converged: !changed,
                });
            }

            centroids = accumulators.iter().map(|a| a.centroid()).collect();
            round += 1;
        }
    }
}
