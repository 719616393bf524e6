use crate::core::element::{DnaStrand, Point2};

/// Trait defining the interface for distance metrics. The result is
/// only ever compared against other distances from the same metric, so
/// any monotonic surrogate of the true distance is acceptable.
pub trait DistanceMetric<E>: Send + Sync {
    /// Computes the dissimilarity between an element and a candidate
    /// centroid. Panics if the operands violate the metric's shape
    /// contract.
    fn compute(&self, element: &E, centroid: &E) -> f64;
}

/// [Squared Euclidean Distance](https://en.wikipedia.org/wiki/Euclidean_distance)
/// over plane points. No square root: ranking-only use keeps the
/// ordering identical and the computation cheaper.
#[derive(Debug, Clone, Copy)]
pub struct SquaredEuclidean;

impl DistanceMetric<Point2> for SquaredEuclidean {
    #[inline]
    fn compute(&self, element: &Point2, centroid: &Point2) -> f64 {
        let dx = element.x - centroid.x;
        let dy = element.y - centroid.y;
        dx * dx + dy * dy
    }
}

/// [Hamming distance](https://en.wikipedia.org/wiki/Hamming_distance)
/// over equal-length strands: the count of mismatched positions. The
/// empty strand is the empty-cluster centroid fallback and counts every
/// position as mismatched. Panics when two non-empty strands differ in
/// length.
#[derive(Debug, Clone, Copy)]
pub struct Hamming;

impl DistanceMetric<DnaStrand> for Hamming {
    #[inline]
    fn compute(&self, element: &DnaStrand, centroid: &DnaStrand) -> f64 {
        if centroid.is_empty() {
            return element.len() as f64;
        }
        assert_eq!(
            element.len(),
            centroid.len(),
            "hamming distance requires strands of equal length"
        );
        element
            .symbols()
            .zip(centroid.symbols())
            .filter(|(a, b)| a != b)
            .count() as f64
    }
}

/// Index of the centroid nearest to `element`. Ties go to the lowest
/// cluster index (strict `<` scan), which keeps assignment reproducible
/// across runs and across the sequential/parallel split.
pub fn nearest_centroid<E>(metric: &dyn DistanceMetric<E>, element: &E, centroids: &[E]) -> usize {
    debug_assert!(!centroids.is_empty());
    let mut min_index = 0;
    let mut min_distance = f64::MAX;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = metric.compute(element, centroid);
        if distance < min_distance {
            min_distance = distance;
            min_index = index;
        }
    }
    min_index
}
