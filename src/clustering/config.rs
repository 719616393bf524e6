use crate::clustering::KmeansParams;
use crate::core::element::{DnaStrand, Point2};
use crate::distances::{Hamming, SquaredEuclidean};
use crate::error::{Error, Result};
use log::{error, LevelFilter};
use serde::Deserialize;
use std::{fmt, sync::Arc};

#[derive(Debug, Deserialize)]
pub struct KmeansSection {
    pub k: usize,
    pub max_iter: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DatasetSection {
    pub kind: String, // "points" or "dna"
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct RunSection {
    pub mode: String, // "sequential" or "parallel"
    pub workers: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String, // Log level, e.g., "info", "debug", "warn", "error"
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub kmeans: KmeansSection,
    pub dataset: DatasetSection,
    pub run: RunSection,
    pub logging: LoggingSection,
    pub output_path: Option<String>, // Path to write the cluster report
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Kmeans:")?;
        writeln!(f, "    K: {}", self.kmeans.k)?;
        writeln!(f, "    Max Iterations: {}", self.kmeans.max_iter)?;
        if let Some(seed) = self.kmeans.seed {
            writeln!(f, "    Seed: {}", seed)?;
        } else {
            writeln!(f, "    Seed: None")?;
        }
        writeln!(f, "  Dataset:")?;
        writeln!(f, "    Kind: {}", self.dataset.kind)?;
        writeln!(f, "    Path: {}", self.dataset.path)?;
        writeln!(f, "  Run:")?;
        writeln!(f, "    Mode: {}", self.run.mode)?;
        writeln!(f, "    Workers: {}", self.run.workers)?;
        writeln!(f, "  Logging:")?;
        writeln!(f, "    Level: {}", self.logging.level)?;
        if let Some(output_path) = &self.output_path {
            writeln!(f, "  Output Path: {}", output_path)?;
        } else {
            writeln!(f, "  Output Path: None")?;
        }
        Ok(())
    }
}

impl Config {
    /// Reads the YAML configuration file and returns a `Config` instance.
    pub fn from_file(file_path: &str) -> Result<Self> {
        let file_content = std::fs::read_to_string(file_path)?;
        let config: Config = serde_yaml::from_str(&file_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.dataset.kind.as_str() {
            "points" | "dna" => (),
            other => {
                return Err(Error::InvalidParameter {
                    name: "dataset.kind",
                    message: format!("unsupported dataset kind: {}", other),
                })
            }
        }

        match self.run.mode.as_str() {
            "sequential" | "parallel" => (),
            other => {
                return Err(Error::InvalidParameter {
                    name: "run.mode",
                    message: format!("unsupported run mode: {}", other),
                })
            }
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => (),
            other => {
                return Err(Error::InvalidParameter {
                    name: "logging.level",
                    message: format!("unsupported log level: {}", other),
                })
            }
        }

        if self.kmeans.k == 0 {
            return Err(Error::InvalidParameter {
                name: "kmeans.k",
                message: "must be at least 1".into(),
            });
        }
        if self.kmeans.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "kmeans.max_iter",
                message: "must be at least 1".into(),
            });
        }
        if self.run.mode == "parallel" && self.run.workers == 0 {
            return Err(Error::InvalidParameter {
                name: "run.workers",
                message: "parallel mode needs at least one worker".into(),
            });
        }

        Ok(())
    }

    /// Parameters for a coordinate-pair run.
    pub fn point_params(&self) -> KmeansParams<Point2> {
        KmeansParams {
            metric: Arc::new(SquaredEuclidean),
            k: self.kmeans.k,
            max_iter: self.kmeans.max_iter,
            rng_seed: self.kmeans.seed,
        }
    }

    /// Parameters for a strand run.
    pub fn strand_params(&self) -> KmeansParams<DnaStrand> {
        KmeansParams {
            metric: Arc::new(Hamming),
            k: self.kmeans.k,
            max_iter: self.kmeans.max_iter,
            rng_seed: self.kmeans.seed,
        }
    }

    /// Sets up logging based on the logging level in the configuration.
    pub fn setup_logging(&self) {
        let level_filter = match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            _ => LevelFilter::Error,
        };

        if let Err(e) = env_logger::Builder::new()
            .filter_level(level_filter)
            .try_init()
        {
            error!("Failed to initialize logger: {}", e);
        }
    }
}
