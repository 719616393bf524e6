use crate::core::element::ClusterElement;

/// The four phases of one protocol round, in handshake order. Carried
/// by every message so that a mispaired send/receive is caught as a
/// shape error instead of silently matching the wrong tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Coordinator to worker: the round's centroid array.
    Broadcast,
    /// Worker to coordinator: did any local assignment change.
    Vote,
    /// Coordinator to worker: stop or continue.
    Stop,
    /// Worker to coordinator: partial accumulators for this round.
    Report,
}

/// A protocol message. The variant is the phase; the payload travels
/// with it.
#[derive(Debug)]
pub enum Payload<E: ClusterElement> {
    Broadcast(Vec<E>),
    Vote(bool),
    Stop(bool),
    Report(Vec<E::Accumulator>),
}

impl<E: ClusterElement> Payload<E> {
    pub fn phase(&self) -> Phase {
        match self {
            Payload::Broadcast(_) => Phase::Broadcast,
            Payload::Vote(_) => Phase::Vote,
            Payload::Stop(_) => Phase::Stop,
            Payload::Report(_) => Phase::Report,
        }
    }
}
