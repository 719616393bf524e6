use crate::clustering::{choose_initial_centroids, KmeansOutcome, KmeansParams};
use crate::core::element::ClusterElement;
use crate::error::{Error, Result};
use crate::protocol::channel::link_pair;
use crate::protocol::coordinator::Coordinator;
use crate::protocol::partition::partition_for;
use crate::protocol::worker::Worker;
use crate::protocol::COORDINATOR_RANK;
use log::info;
use std::sync::Arc;
use std::thread;

/// Parallel K-means over a process group of `workers + 1` participants:
/// rank 0 coordinates on the calling thread, ranks `1..=workers` each
/// compute a fixed contiguous partition on their own thread. All
/// interaction goes through the per-pair links; the dataset is shared
/// read-only.
pub struct ParallelKmeans<E: ClusterElement> {
    params: KmeansParams<E>,
    workers: usize,
}

impl<E: ClusterElement> ParallelKmeans<E> {
    pub fn new(params: KmeansParams<E>, workers: usize) -> Self {
        Self { params, workers }
    }

    /// Run with randomly chosen initial centroids (same draw as the
    /// sequential mode under the same seed).
    pub fn run(&self, data: &[E]) -> Result<KmeansOutcome<E>> {
        self.params.validate(data.len())?;
        let mut rng = self.params.rng();
        let centroids = choose_initial_centroids(data, self.params.k, &mut rng)?;
        self.run_from(data, centroids)
    }

    /// Run with caller-supplied initial centroids.
    pub fn run_from(&self, data: &[E], centroids: Vec<E>) -> Result<KmeansOutcome<E>> {
        self.params.validate(data.len())?;
        let size = self.workers + 1;
        if size < 2 {
            return Err(Error::GroupTooSmall { size });
        }
        if centroids.len() != self.params.k {
            return Err(Error::InvalidParameter {
                name: "initial_centroids",
                message: format!("expected {} centroids, got {}", self.params.k, centroids.len()),
            });
        }

        let data = Arc::new(data.to_vec());
        info!(
            "spawning {} workers over {} elements (k: {}, rounds at most: {})",
            self.workers,
            data.len(),
            self.params.k,
            self.params.rounds()
        );

        let mut coordinator_links = Vec::with_capacity(self.workers);
        let mut handles = Vec::with_capacity(self.workers);
        for rank in 1..size {
            let (coordinator_side, worker_side) = link_pair(COORDINATOR_RANK, rank);
            coordinator_links.push(coordinator_side);

            let worker = Worker::new(
                rank,
                partition_for(rank, size, data.len()),
                Arc::clone(&data),
                Arc::clone(&self.params.metric),
                self.params.k,
                worker_side,
            );
            handles.push(thread::spawn(move || worker.run()));
        }

        let coordinator = Coordinator::new(
            self.params.k,
            self.params.rounds(),
            centroids,
            coordinator_links,
        );
        // On error the coordinator's links are dropped here, which
        // unblocks any worker still waiting on a receive.
        let outcome = coordinator.run();

        let mut first_worker_error = None;
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => first_worker_error = first_worker_error.or(Some(e)),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }

        match outcome {
            Ok(outcome) => match first_worker_error {
                None => Ok(outcome),
                Some(e) => Err(e),
            },
            Err(e) => Err(e),
        }
    }
}
