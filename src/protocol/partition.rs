/// A contiguous half-open slice of the dataset index space, owned by
/// exactly one worker for the lifetime of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Indices covered by this partition.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Range for worker `rank` (1-based; rank 0 is the coordinator and
/// computes nothing) in a group of `size` participants over `n`
/// elements. Every worker gets `n / (size - 1)` elements; the last
/// worker's range runs to `n` and absorbs the remainder, however large
/// that leaves it.
pub fn partition_for(rank: usize, size: usize, n: usize) -> Partition {
    debug_assert!(size >= 2, "need a coordinator and at least one worker");
    debug_assert!((1..size).contains(&rank), "not a worker rank: {}", rank);
    let len = n / (size - 1);
    let start = len * (rank - 1);
    let end = if rank == size - 1 { n } else { start + len };
    Partition { start, end }
}

/// Partitions for every worker rank, in rank order.
pub fn worker_partitions(size: usize, n: usize) -> Vec<Partition> {
    (1..size).map(|rank| partition_for(rank, size, n)).collect()
}
