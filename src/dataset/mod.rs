//! Dataset collaborators: line-oriented loaders for the two element
//! kinds, a synthetic strand generator, and the cluster report writer.
//! The clustering core only ever sees the in-memory element lists
//! these produce.

use crate::core::accumulator::ClusterAccumulator;
use crate::core::element::{DnaStrand, Point2};
use crate::error::{Error, Result};
use log::info;
use rand::rngs::SmallRng;
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Symbols a generated strand draws from.
const ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];

/// Load coordinate pairs from a CSV file, one `x,y` record per line.
/// Blank lines are skipped; anything else that is not two numeric
/// fields is reported with its line number.
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point2>> {
    let reader = BufReader::new(File::open(path)?);
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut fields = trimmed.split(',');
        let (x, y) = match (fields.next(), fields.next(), fields.next()) {
            (Some(x), Some(y), None) => (x.trim(), y.trim()),
            _ => {
                return Err(Error::MalformedRecord {
                    line: index + 1,
                    message: format!("expected two comma-separated fields, got '{}'", trimmed),
                })
            }
        };
        let x: f64 = x.parse().map_err(|_| Error::MalformedRecord {
            line: index + 1,
            message: format!("not a number: '{}'", x),
        })?;
        let y: f64 = y.parse().map_err(|_| Error::MalformedRecord {
            line: index + 1,
            message: format!("not a number: '{}'", y),
        })?;
        points.push(Point2::new(x, y));
    }
    info!("loaded {} points", points.len());
    Ok(points)
}

/// Load strands from a file, one per line. All strands must share one
/// length; Hamming distance has no meaning otherwise, so a mismatch is
/// rejected here rather than somewhere in the middle of a run.
pub fn load_strands<P: AsRef<Path>>(path: P) -> Result<Vec<DnaStrand>> {
    let reader = BufReader::new(File::open(path)?);
    let mut strands: Vec<DnaStrand> = Vec::new();
    let mut expected_len = None;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let strand = DnaStrand::new(trimmed);
        match expected_len {
            None => expected_len = Some(strand.len()),
            Some(len) if len != strand.len() => {
                return Err(Error::MalformedRecord {
                    line: index + 1,
                    message: format!("strand length {} differs from {}", strand.len(), len),
                })
            }
            Some(_) => {}
        }
        strands.push(strand);
    }
    info!("loaded {} strands", strands.len());
    Ok(strands)
}

/// Generate a synthetic strand dataset: `clusters` well-separated
/// random center strands (pairwise Hamming distance at least
/// `length - 3`, redrawn otherwise), each followed by `per_cluster - 1`
/// mutated copies with one to four positions substituted.
pub fn generate_strands(
    clusters: usize,
    per_cluster: usize,
    length: usize,
    rng: &mut SmallRng,
) -> Vec<DnaStrand> {
    let mut centers: Vec<DnaStrand> = Vec::with_capacity(clusters);
    while centers.len() < clusters {
        let candidate = random_strand(length, rng);
        let separated = centers.iter().all(|center| {
            hamming_positions(center, &candidate) >= length.saturating_sub(3)
        });
        if separated {
            centers.push(candidate);
        }
    }

    let mut strands = Vec::with_capacity(clusters * per_cluster);
    for center in &centers {
        strands.push(center.clone());
        for _ in 1..per_cluster {
            strands.push(mutate_strand(center, rng));
        }
    }
    strands
}

fn random_strand(length: usize, rng: &mut SmallRng) -> DnaStrand {
    let bases: String = (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
        .collect();
    DnaStrand::new(bases)
}

/// Copy of `center` with one to four distinct random positions
/// replaced by a different symbol.
fn mutate_strand(center: &DnaStrand, rng: &mut SmallRng) -> DnaStrand {
    let mut bases: Vec<char> = center.symbols().collect();
    let mutations = rng.random_range(1..=4.min(bases.len()));
    let mut positions = std::collections::HashSet::new();
    while positions.len() < mutations {
        positions.insert(rng.random_range(0..bases.len()));
    }
    for position in positions {
        let current = bases[position];
        loop {
            let replacement = ALPHABET[rng.random_range(0..ALPHABET.len())];
            if replacement != current {
                bases[position] = replacement;
                break;
            }
        }
    }
    DnaStrand::new(bases.into_iter().collect::<String>())
}

fn hamming_positions(a: &DnaStrand, b: &DnaStrand) -> usize {
    a.symbols().zip(b.symbols()).filter(|(x, y)| x != y).count()
}

/// Write the final clusters as a text report: a `Cluster i:` header
/// followed by one tab-indented member per line.
pub fn write_report<P, A>(path: P, clusters: &[A]) -> Result<()>
where
    P: AsRef<Path>,
    A: ClusterAccumulator,
{
    let mut writer = BufWriter::new(File::create(path)?);
    for (index, cluster) in clusters.iter().enumerate() {
        writeln!(writer, "Cluster {}:", index)?;
        for member in cluster.members() {
            writeln!(writer, "\t{}", member)?;
        }
    }
    writer.flush()?;
    Ok(())
}
