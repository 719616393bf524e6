pub mod distance;

pub use distance::{nearest_centroid, DistanceMetric, Hamming, SquaredEuclidean};
