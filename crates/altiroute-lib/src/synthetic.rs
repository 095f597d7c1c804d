//! Random demo graphs.
//!
//! Only the public [`GraphBuilder`] API is used here; generated graphs are
//! ordinary snapshots and go through the same build and relax path as loaded
//! datasets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::Result;
use crate::graph::{Elevation, Graph, GraphBuilder, Weight};

/// Highest elevation assigned to a generated location.
pub const MAX_SYNTHETIC_ELEVATION: Elevation = 4000;

/// Options for [`generate_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticOptions {
    pub nodes: usize,
    /// Fixed seed for reproducible graphs; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl SyntheticOptions {
    pub fn new(nodes: usize) -> Self {
        Self { nodes, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Probability that a given ordered pair is joined by an edge.
///
/// Starts at 25% and is divided by three for every factor-five step of
/// `nodes / 10` above one, so larger graphs stay sparse.
pub fn edge_density(nodes: usize) -> f64 {
    let mut rate = 25.0;
    let mut scale = nodes / 10;
    while scale > 1 {
        scale /= 5;
        rate /= 3.0;
    }
    rate / 100.0
}

/// Generate a random directed graph.
///
/// Each ordered pair of distinct locations draws `v` uniformly from `[0, 1)`
/// and gets an edge of weight `⌊v × 1000⌋` when `v` falls under the density.
/// Zero-weight draws are treated as "no edge".
pub fn generate_graph(options: SyntheticOptions) -> Result<Graph> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let density = edge_density(options.nodes);

    let mut builder = GraphBuilder::new();
    for i in 0..options.nodes {
        let elevation = rng.gen_range(0..=MAX_SYNTHETIC_ELEVATION);
        builder.add_location(format!("N{i:03}"), elevation)?;
    }

    let mut edges = 0usize;
    for from in 0..options.nodes {
        for to in 0..options.nodes {
            let draw: f64 = rng.gen();
            if from == to || draw >= density {
                continue;
            }
            let weight = (draw * 1000.0) as Weight;
            if weight > 0 {
                builder.add_edge(from, to, weight)?;
                edges += 1;
            }
        }
    }

    debug!(
        nodes = options.nodes,
        edges, density, "generated synthetic graph"
    );
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_shrinks_with_size() {
        assert_eq!(edge_density(10), 0.25);
        assert_eq!(edge_density(19), 0.25);
        assert!((edge_density(20) - 0.25 / 3.0).abs() < 1e-12);
        assert!((edge_density(100) - 0.25 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let options = SyntheticOptions::new(12).with_seed(7);
        let a = generate_graph(options).unwrap();
        let b = generate_graph(options).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.len(), 12);
        assert_eq!(a.name(3), Some("N003"));
    }

    #[test]
    fn generated_edges_respect_bounds() {
        let graph = generate_graph(SyntheticOptions::new(30).with_seed(42)).unwrap();
        for location in graph.locations() {
            assert!((0..=MAX_SYNTHETIC_ELEVATION).contains(&location.elevation));
            for edge in graph.neighbours(location.id) {
                assert_ne!(edge.target, location.id);
                assert!(edge.weight > 0 && edge.weight < 1000);
            }
        }
    }
}
