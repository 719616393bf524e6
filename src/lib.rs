/// parlloyd: K-means clustering over 2D points and DNA strands, either
/// in a single process or across a coordinator/worker process group
/// that talks exclusively through point-to-point FIFO channels.
///
/// # Modules
/// - `core`: element and accumulator contracts plus the two concrete kinds.
/// - `distances`: distance metrics and nearest-centroid selection.
/// - `clustering`: parameters, configuration and the sequential loop.
/// - `protocol`: the coordinator/worker round protocol.
/// - `dataset`: loaders, the synthetic strand generator and the report writer.
pub mod clustering;
pub mod core;
pub mod dataset;
pub mod distances;
pub mod error;
pub mod protocol;

pub use clustering::{
    choose_initial_centroids, Config, KmeansOutcome, KmeansParams, SequentialKmeans,
};
pub use crate::core::{
    ClusterAccumulator, ClusterElement, DnaAccumulator, DnaStrand, Point2, PointAccumulator,
};
pub use distances::{nearest_centroid, DistanceMetric, Hamming, SquaredEuclidean};
pub use error::{Error, Result};
pub use protocol::ParallelKmeans;
