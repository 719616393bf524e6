use log::info;
use parlloyd::clustering::{Config, KmeansOutcome, KmeansParams, SequentialKmeans};
use parlloyd::core::{ClusterAccumulator, ClusterElement};
use parlloyd::dataset;
use parlloyd::protocol::ParallelKmeans;

fn run_kmeans<E: ClusterElement>(
    config: &Config,
    params: KmeansParams<E>,
    data: &[E],
) -> parlloyd::Result<KmeansOutcome<E>> {
    match config.run.mode.as_str() {
        "parallel" => ParallelKmeans::new(params, config.run.workers).run(data),
        _ => SequentialKmeans::new(params).run(data),
    }
}

fn report<E: ClusterElement>(config: &Config, outcome: &KmeansOutcome<E>) {
    info!(
        "{} clusters after {} rounds (converged: {})",
        outcome.clusters.len(),
        outcome.rounds,
        outcome.converged
    );
    for (index, centroid) in outcome.centroids.iter().enumerate() {
        info!(
            "cluster {}: {} members, centroid {}",
            index,
            outcome.clusters[index].count(),
            centroid
        );
    }
    if let Some(output_path) = &config.output_path {
        dataset::write_report(output_path, &outcome.clusters).expect("Failed to write report");
        info!("report written to {}", output_path);
    }
}

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "parlloyd.yaml".to_string());
    let config = Config::from_file(&config_path).expect("Failed to load configuration");
    config.setup_logging();
    info!("{}", config);

    match config.dataset.kind.as_str() {
        "dna" => {
            let data =
                dataset::load_strands(&config.dataset.path).expect("Failed to load dataset");
            let outcome = run_kmeans(&config, config.strand_params(), &data)
                .expect("Clustering failed");
            report(&config, &outcome);
        }
        _ => {
            let data = dataset::load_points(&config.dataset.path).expect("Failed to load dataset");
            let outcome =
                run_kmeans(&config, config.point_params(), &data).expect("Clustering failed");
            report(&config, &outcome);
        }
    }
}
