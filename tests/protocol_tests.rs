#[cfg(test)]
mod tests {
    use parlloyd::clustering::{KmeansParams, SequentialKmeans};
    use parlloyd::core::{ClusterAccumulator, DnaStrand, Point2};
    use parlloyd::dataset;
    use parlloyd::distances::{Hamming, SquaredEuclidean};
    use parlloyd::protocol::ParallelKmeans;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn point_params(k: usize, max_iter: usize, seed: u64) -> KmeansParams<Point2> {
        KmeansParams {
            metric: Arc::new(SquaredEuclidean),
            k,
            max_iter,
            rng_seed: Some(seed),
        }
    }

    fn strand_params(k: usize, max_iter: usize, seed: u64) -> KmeansParams<DnaStrand> {
        KmeansParams {
            metric: Arc::new(Hamming),
            k,
            max_iter,
            rng_seed: Some(seed),
        }
    }

    /// Deterministic but unevenly spread point cloud. Whole-number
    /// coordinates keep every partial sum exact, so the two execution
    /// modes cannot drift apart through summation order.
    fn scattered_points(n: usize) -> Vec<Point2> {
        (0..n)
            .map(|i| {
                let x = ((i * 7919) % 101) as f64;
                let y = ((i * 104729) % 97) as f64;
                Point2::new(x, y)
            })
            .collect()
    }

    #[test]
    fn test_sequential_and_parallel_agree_on_points() {
        let data = scattered_points(60);
        for workers in [1, 2, 3, 5] {
            let sequential = SequentialKmeans::new(point_params(4, 30, 42))
                .run(&data)
                .unwrap();
            let parallel = ParallelKmeans::new(point_params(4, 30, 42), workers)
                .run(&data)
                .unwrap();

            assert_eq!(
                sequential.membership(),
                parallel.membership(),
                "membership diverged with {} workers",
                workers
            );
            assert_eq!(sequential.rounds, parallel.rounds);
            assert_eq!(sequential.converged, parallel.converged);
        }
    }

    #[test]
    fn test_sequential_and_parallel_agree_on_strands() {
        let mut rng = SmallRng::seed_from_u64(5);
        let data = dataset::generate_strands(3, 10, 16, &mut rng);
        for workers in [1, 2, 4] {
            let sequential = SequentialKmeans::new(strand_params(3, 20, 7))
                .run(&data)
                .unwrap();
            let parallel = ParallelKmeans::new(strand_params(3, 20, 7), workers)
                .run(&data)
                .unwrap();

            assert_eq!(sequential.membership(), parallel.membership());
            assert_eq!(sequential.centroids, parallel.centroids);
        }
    }

    #[test]
    fn test_parallel_point_scenario() {
        let data = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 11.0),
        ];
        let outcome = ParallelKmeans::new(point_params(2, 10, 0), 3)
            .run_from(&data, vec![Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)])
            .unwrap();

        assert!(outcome.converged);
        assert_eq!(
            outcome.membership(),
            vec![
                vec![Point2::new(0.0, 0.0), Point2::new(0.0, 1.0)],
                vec![Point2::new(10.0, 10.0), Point2::new(10.0, 11.0)],
            ]
        );
        assert_eq!(outcome.centroids[0], Point2::new(0.0, 0.5));
        assert_eq!(outcome.centroids[1], Point2::new(10.0, 10.5));
    }

    #[test]
    fn test_parallel_dna_scenario() {
        let data: Vec<DnaStrand> = ["AAAA", "AAAC", "TTTT", "TTTA"]
            .into_iter()
            .map(DnaStrand::new)
            .collect();
        let outcome = ParallelKmeans::new(strand_params(2, 10, 0), 2)
            .run_from(&data, vec![DnaStrand::new("AAAA"), DnaStrand::new("TTTT")])
            .unwrap();

        assert!(outcome.converged);
        assert_eq!(
            outcome.membership(),
            vec![
                vec![DnaStrand::new("AAAA"), DnaStrand::new("AAAC")],
                vec![DnaStrand::new("TTTT"), DnaStrand::new("TTTA")],
            ]
        );
        assert_eq!(outcome.centroids[0], DnaStrand::new("AAAA"));
    }

    #[test]
    fn test_final_clusters_partition_the_dataset() {
        let data = scattered_points(53);
        let outcome = ParallelKmeans::new(point_params(5, 40, 3), 4)
            .run(&data)
            .unwrap();

        assert_eq!(outcome.total_members(), data.len());
        let mut remaining: Vec<Point2> = outcome.membership().into_iter().flatten().collect();
        for p in &data {
            let at = remaining
                .iter()
                .position(|q| q == p)
                .expect("element missing from final clusters");
            remaining.swap_remove(at);
        }
        assert!(remaining.is_empty(), "extra elements: {:?}", remaining);
    }

    #[test]
    fn test_rerun_from_converged_centroids_stops_immediately() {
        let data = scattered_points(40);
        let first = SequentialKmeans::new(point_params(3, 50, 9))
            .run(&data)
            .unwrap();
        assert!(first.converged);

        // Fresh run seeded with the converged centroids: round one
        // re-derives the same assignment (every element counts as
        // changed once, off the unassigned sentinel), round two is
        // silent, and the centroids never move.
        let second = SequentialKmeans::new(point_params(3, 50, 9))
            .run_from(&data, first.centroids.clone())
            .unwrap();
        assert!(second.converged);
        assert_eq!(second.rounds, 2);
        assert_eq!(second.membership(), first.membership());
        assert_eq!(second.centroids, first.centroids);

        let parallel = ParallelKmeans::new(point_params(3, 50, 9), 3)
            .run_from(&data, first.centroids.clone())
            .unwrap();
        assert!(parallel.converged);
        assert_eq!(parallel.rounds, 2);
        assert_eq!(parallel.membership(), first.membership());
    }

    #[test]
    fn test_parallel_empty_cluster_gets_origin_centroid() {
        let data = vec![Point2::new(0.0, 0.0), Point2::new(0.0, 2.0)];
        let outcome = ParallelKmeans::new(point_params(3, 10, 0), 2)
            .run_from(
                &data,
                vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(0.0, 2.0),
                    Point2::new(50.0, 50.0),
                ],
            )
            .unwrap();

        assert!(outcome.converged);
        assert!(outcome.clusters[2].is_empty());
        assert_eq!(outcome.clusters[2].centroid(), Point2::ORIGIN);
    }

    #[test]
    fn test_seeded_parallel_runs_are_reproducible() {
        let data = scattered_points(48);
        let a = ParallelKmeans::new(point_params(4, 25, 17), 3)
            .run(&data)
            .unwrap();
        let b = ParallelKmeans::new(point_params(4, 25, 17), 3)
            .run(&data)
            .unwrap();
        assert_eq!(a.membership(), b.membership());
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.rounds, b.rounds);
    }

    #[test]
    fn test_worker_count_does_not_change_generated_dna_clusters() {
        let mut rng = SmallRng::seed_from_u64(23);
        let data = dataset::generate_strands(4, 8, 20, &mut rng);
        let baseline = ParallelKmeans::new(strand_params(4, 30, 1), 1)
            .run(&data)
            .unwrap();
        for workers in [2, 3, 7] {
            let outcome = ParallelKmeans::new(strand_params(4, 30, 1), workers)
                .run(&data)
                .unwrap();
            assert_eq!(outcome.membership(), baseline.membership());
        }
    }
}
