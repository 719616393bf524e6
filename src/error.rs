use crate::protocol::Phase;
use thiserror::Error;

/// Result alias used throughout `parlloyd`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by clustering runs, configuration loading and the
/// coordinator/worker protocol.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset is empty.
    #[error("empty dataset")]
    EmptyDataset,

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} elements")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of elements in the dataset.
        n_items: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// The process group needs a coordinator and at least one worker.
    #[error("process group too small: size {size}, need at least 2 participants")]
    GroupTooSmall {
        /// Total participant count (coordinator included).
        size: usize,
    },

    /// A peer dropped its end of the channel mid-protocol. There is no
    /// retry or timeout; participant failure aborts the whole run.
    #[error("rank {peer} hung up mid-protocol")]
    Disconnected {
        /// Rank of the vanished peer.
        peer: usize,
    },

    /// A message arrived carrying the wrong phase for the current state
    /// of the handshake.
    #[error("protocol violation: expected {expected:?} from rank {peer}, got {got:?}")]
    UnexpectedPhase {
        /// Rank of the sending peer.
        peer: usize,
        /// Phase the receiver was blocked on.
        expected: Phase,
        /// Phase that actually arrived.
        got: Phase,
    },

    /// A partial report did not carry one accumulator per cluster.
    #[error("malformed report from rank {peer}: {got} accumulators for {expected} clusters")]
    MalformedReport {
        /// Rank of the sending peer.
        peer: usize,
        /// Expected accumulator count (k).
        expected: usize,
        /// Received accumulator count.
        got: usize,
    },

    /// An input record could not be parsed.
    #[error("malformed record at line {line}: {message}")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// Human-readable explanation.
        message: String,
    },

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration file could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}
