pub mod accumulator;
pub mod element;

pub use accumulator::{ClusterAccumulator, DnaAccumulator, PointAccumulator};
pub use element::{ClusterElement, DnaStrand, Point2};
