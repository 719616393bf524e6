//! Coordinator/worker K-means protocol.
//!
//! One coordinator (rank 0) and `size - 1` workers run concurrently,
//! connected pairwise by FIFO channels, and repeat a fixed four-phase
//! handshake per round: the coordinator broadcasts the centroid array,
//! each worker assigns its partition and votes whether anything moved,
//! the coordinator ORs the votes into a stop/continue directive, and
//! each worker reports its partial accumulators: the recompute input
//! when continuing, the authoritative final state when stopping.
//!
//! There is no shared mutable state, no timeout and no retry: a
//! participant that stalls or vanishes aborts the whole run.

mod channel;
mod coordinator;
mod group;
mod message;
mod partition;
mod worker;

pub use channel::{link_pair, Link};
pub use coordinator::Coordinator;
pub use group::ParallelKmeans;
pub use message::{Payload, Phase};
pub use partition::{partition_for, worker_partitions, Partition};
pub use worker::Worker;

/// Rank of the coordinator within the process group.
pub const COORDINATOR_RANK: usize = 0;
