use crate::core::accumulator::{ClusterAccumulator, DnaAccumulator, PointAccumulator};
use std::fmt::{self, Debug, Display};

/// Contract every clusterable value satisfies. The associated
/// accumulator ties an element type to the statistics needed to derive
/// a new centroid for it, which is what lets the sequential loop and
/// the coordinator/worker protocol stay generic over unrelated element
/// kinds.
pub trait ClusterElement: Clone + Debug + Display + PartialEq + Send + Sync + 'static {
    /// Per-cluster running statistics for this element type.
    type Accumulator: ClusterAccumulator<Element = Self>;
}

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Fallback centroid for a cluster that ended a round with no
    /// members.
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl ClusterElement for Point2 {
    type Accumulator = PointAccumulator;
}

/// A fixed-length string of symbol characters. One run clusters strands
/// of a single uniform length; the empty strand is reserved for the
/// empty-cluster centroid fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DnaStrand {
    bases: String,
}

impl DnaStrand {
    pub fn new<S: Into<String>>(bases: S) -> Self {
        Self {
            bases: bases.into(),
        }
    }

    /// Number of symbol positions.
    pub fn len(&self) -> usize {
        self.bases.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &str {
        &self.bases
    }

    /// Iterate the symbols in position order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.bases.chars()
    }
}

impl Display for DnaStrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bases)
    }
}

impl ClusterElement for DnaStrand {
    type Accumulator = DnaAccumulator;
}
