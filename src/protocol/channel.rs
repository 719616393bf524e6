use crate::core::element::ClusterElement;
use crate::error::{Error, Result};
use crate::protocol::message::{Payload, Phase};
use std::sync::mpsc::{channel, Receiver, Sender};

/// One side of a duplex coordinator/worker connection. Messages to one
/// peer are delivered in send order (the mpsc FIFO guarantee stands in
/// for same-tag MPI ordering); nothing is guaranteed across different
/// peers. Receives block indefinitely; a vanished peer surfaces as
/// `Disconnected`, never as a timeout.
pub struct Link<E: ClusterElement> {
    peer: usize,
    tx: Sender<Payload<E>>,
    rx: Receiver<Payload<E>>,
}

/// Wire up both ends of a coordinator/worker connection. The first
/// link is the coordinator's side (its peer is `worker_rank`), the
/// second the worker's side (its peer is the coordinator).
pub fn link_pair<E: ClusterElement>(
    coordinator_rank: usize,
    worker_rank: usize,
) -> (Link<E>, Link<E>) {
    let (to_worker, from_coordinator) = channel();
    let (to_coordinator, from_worker) = channel();
    (
        Link {
            peer: worker_rank,
            tx: to_worker,
            rx: from_worker,
        },
        Link {
            peer: coordinator_rank,
            tx: to_coordinator,
            rx: from_coordinator,
        },
    )
}

impl<E: ClusterElement> Link<E> {
    /// Rank of the participant on the other end.
    pub fn peer(&self) -> usize {
        self.peer
    }

    pub fn send(&self, payload: Payload<E>) -> Result<()> {
        self.tx
            .send(payload)
            .map_err(|_| Error::Disconnected { peer: self.peer })
    }

    /// Block for the next message and check it carries the expected
    /// phase.
    fn recv(&self, expected: Phase) -> Result<Payload<E>> {
        let payload = self
            .rx
            .recv()
            .map_err(|_| Error::Disconnected { peer: self.peer })?;
        if payload.phase() != expected {
            return Err(Error::UnexpectedPhase {
                peer: self.peer,
                expected,
                got: payload.phase(),
            });
        }
        Ok(payload)
    }

    pub fn recv_centroids(&self) -> Result<Vec<E>> {
        match self.recv(Phase::Broadcast)? {
            Payload::Broadcast(centroids) => Ok(centroids),
            _ => unreachable!("recv checked the phase"),
        }
    }

    pub fn recv_vote(&self) -> Result<bool> {
        match self.recv(Phase::Vote)? {
            Payload::Vote(changed) => Ok(changed),
            _ => unreachable!("recv checked the phase"),
        }
    }

    pub fn recv_stop(&self) -> Result<bool> {
        match self.recv(Phase::Stop)? {
            Payload::Stop(stop) => Ok(stop),
            _ => unreachable!("recv checked the phase"),
        }
    }

    pub fn recv_report(&self) -> Result<Vec<E::Accumulator>> {
        match self.recv(Phase::Report)? {
            Payload::Report(partials) => Ok(partials),
            _ => unreachable!("recv checked the phase"),
        }
    }
}
