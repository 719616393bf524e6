use crate::clustering::KmeansOutcome;
use crate::core::accumulator::ClusterAccumulator;
use crate::core::element::ClusterElement;
use crate::error::{Error, Result};
use crate::protocol::channel::Link;
use crate::protocol::message::Payload;
use log::{debug, info};

/// The coordinator participant. Holds the centroid array and one link
/// per worker (index-aligned with ranks `1..size`); it never touches
/// raw elements after initialization, only the aggregated statistics
/// the workers report.
pub struct Coordinator<E: ClusterElement> {
    k: usize,
    rounds: usize,
    centroids: Vec<E>,
    links: Vec<Link<E>>,
}

impl<E: ClusterElement> Coordinator<E> {
    pub fn new(k: usize, rounds: usize, centroids: Vec<E>, links: Vec<Link<E>>) -> Self {
        debug_assert_eq!(centroids.len(), k);
        debug_assert!(!links.is_empty());
        Self {
            k,
            rounds,
            centroids,
            links,
        }
    }

    /// Drive rounds until every worker reports an unchanged round or
    /// the round cap is hit. The terminal stop is delivered inside the
    /// round's directive phase, so workers are always blocked on the
    /// right receive and cap exhaustion cannot deadlock the group.
    /// Aggregation into the authoritative result happens exactly once,
    /// in the terminating round.
    pub fn run(mut self) -> Result<KmeansOutcome<E>> {
        let mut round = 1;
        loop {
            self.broadcast_centroids()?;
            let changed = self.collect_votes()?;
            let converged = !changed;
            let stop = converged || round == self.rounds;
            self.send_directive(stop)?;
            let clusters = self.collect_partials()?;

            if stop {
                info!(
                    "run finished after round {} (converged: {})",
                    round, converged
                );
                return Ok(KmeansOutcome {
                    clusters,
                    centroids: self.centroids,
                    rounds: round,
                    converged,
                });
            }

            self.centroids = clusters.iter().map(|c| c.centroid()).collect();
            debug!("round {} aggregated, centroids replaced", round);
            round += 1;
        }
    }

    /// Send the current centroid array to every worker.
    fn broadcast_centroids(&self) -> Result<()> {
        for link in &self.links {
            link.send(Payload::Broadcast(self.centroids.clone()))?;
        }
        Ok(())
    }

    /// Receive one vote per worker, rank by rank, and OR them. Rank
    /// order makes the collection insensitive to inter-worker arrival
    /// order; per-peer FIFO is all the protocol needs.
    fn collect_votes(&self) -> Result<bool> {
        let mut changed = false;
        for link in &self.links {
            let vote = link.recv_vote()?;
            debug!("rank {} voted changed={}", link.peer(), vote);
            changed |= vote;
        }
        Ok(changed)
    }

    /// Tell every worker whether to stop after reporting.
    fn send_directive(&self, stop: bool) -> Result<()> {
        for link in &self.links {
            link.send(Payload::Stop(stop))?;
        }
        Ok(())
    }

    /// Receive each worker's partial accumulator array and merge them
    /// elementwise into one aggregate per cluster index.
    fn collect_partials(&self) -> Result<Vec<E::Accumulator>> {
        let mut merged: Vec<E::Accumulator> = (0..self.k).map(|_| Default::default()).collect();
        for link in &self.links {
            let partials = link.recv_report()?;
            if partials.len() != self.k {
                return Err(Error::MalformedReport {
                    peer: link.peer(),
                    expected: self.k,
                    got: partials.len(),
                });
            }
            for (aggregate, partial) in merged.iter_mut().zip(partials) {
                aggregate.merge(partial);
            }
        }
        Ok(merged)
    }
}
