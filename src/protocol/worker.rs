use crate::core::accumulator::ClusterAccumulator;
use crate::core::element::ClusterElement;
use crate::distances::{nearest_centroid, DistanceMetric};
use crate::error::Result;
use crate::protocol::channel::Link;
use crate::protocol::message::Payload;
use crate::protocol::partition::Partition;
use log::debug;
use std::sync::Arc;

/// One worker participant. Owns a contiguous partition of the dataset
/// index space and the assignment state for exactly those elements;
/// it never reads or writes any other worker's slice. The dataset
/// itself is shared read-only.
pub struct Worker<E: ClusterElement> {
    rank: usize,
    partition: Partition,
    data: Arc<Vec<E>>,
    metric: Arc<dyn DistanceMetric<E>>,
    k: usize,
    link: Link<E>,
    /// Previous cluster index per local element; `None` means the
    /// element has never been assigned and always counts as changed.
    assignments: Vec<Option<usize>>,
}

impl<E: ClusterElement> Worker<E> {
    pub fn new(
        rank: usize,
        partition: Partition,
        data: Arc<Vec<E>>,
        metric: Arc<dyn DistanceMetric<E>>,
        k: usize,
        link: Link<E>,
    ) -> Self {
        let assignments = vec![None; partition.len()];
        Self {
            rank,
            partition,
            data,
            metric,
            k,
            link,
            assignments,
        }
    }

    /// Run rounds until the coordinator says stop. Every round:
    /// block for the centroid broadcast, assign the local partition,
    /// vote whether anything moved, block for the stop directive, and
    /// report the local accumulators: the final report when stopping,
    /// the recompute input when continuing.
    pub fn run(mut self) -> Result<()> {
        let mut round = 1u32;
        loop {
            let centroids = self.link.recv_centroids()?;
            let (accumulators, changed) = self.compute(&centroids);
            self.link.send(Payload::Vote(changed))?;

            let stop = self.link.recv_stop()?;
            self.link.send(Payload::Report(accumulators))?;
            if stop {
                debug!("rank {} done after round {}", self.rank, round);
                return Ok(());
            }
            round += 1;
        }
    }

    /// Assign every element of the local partition to its nearest
    /// centroid, filling fresh accumulators and tracking whether any
    /// assignment differs from the previous round.
    fn compute(&mut self, centroids: &[E]) -> (Vec<E::Accumulator>, bool) {
        let mut accumulators: Vec<E::Accumulator> =
            (0..self.k).map(|_| Default::default()).collect();
        let mut changed = false;

        for (slot, index) in self.partition.indices().enumerate() {
            let element = &self.data[index];
            let cluster = nearest_centroid(self.metric.as_ref(), element, centroids);
            if self.assignments[slot] != Some(cluster) {
                changed = true;
            }
            accumulators[cluster].assign(element);
            self.assignments[slot] = Some(cluster);
        }

        (accumulators, changed)
    }
}
