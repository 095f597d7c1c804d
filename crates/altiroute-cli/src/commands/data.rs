//! Dataset resolution and engine limits shared by every subcommand.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::debug;

use altiroute_lib::{load_dataset, Dataset, DatasetPaths, EngineConfig, ShortestPaths};

/// Environment variable naming the default data directory.
pub const DATA_DIR_ENV: &str = "ALTIROUTE_DATA_DIR";

/// Global dataset and limit options from the command line.
#[derive(Debug, Clone, Default)]
pub struct DataOptions {
    pub data_dir: Option<PathBuf>,
    pub locations: Vec<PathBuf>,
    pub edges: Option<PathBuf>,
    pub max_nodes: Option<usize>,
    pub budget: Option<u64>,
}

impl DataOptions {
    /// Engine limits with any command-line overrides applied.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        if let Some(max_nodes) = self.max_nodes {
            config = config.with_max_nodes(max_nodes);
        }
        if let Some(budget) = self.budget {
            config = config.with_relaxation_budget(budget);
        }
        config
    }

    /// Work out which files to load.
    ///
    /// Searched in the following order:
    /// 1. Explicit `--locations` files (plus `--edges` when given)
    /// 2. `--data-dir`
    /// 3. The `ALTIROUTE_DATA_DIR` environment variable
    /// 4. The bundled fixtures (debug builds only)
    pub fn resolve_paths(&self) -> Result<DatasetPaths> {
        if !self.locations.is_empty() {
            return Ok(DatasetPaths::new(
                self.locations.clone(),
                self.edges.clone(),
            ));
        }

        let dir = self
            .data_dir
            .clone()
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .or_else(fixture_dir)
            .with_context(|| {
                format!("no dataset given; pass --data-dir, --locations or set {DATA_DIR_ENV}")
            })?;
        if !dir.is_dir() {
            bail!("data directory {} does not exist", dir.display());
        }

        let mut paths = DatasetPaths::in_dir(&dir);
        if let Some(edges) = &self.edges {
            paths.edges = Some(edges.clone());
        }
        debug!(dir = %dir.display(), files = paths.locations.len(), "resolved dataset directory");
        Ok(paths)
    }

    /// Resolve and load the dataset.
    pub fn load(&self) -> Result<Dataset> {
        let paths = self.resolve_paths()?;
        load_dataset(&paths).with_context(|| {
            format!("failed to load dataset from {}", describe(&paths.locations))
        })
    }

    /// Load the dataset and compute its route tables.
    pub fn solve(&self) -> Result<ShortestPaths> {
        let dataset = self.load()?;
        ShortestPaths::compute(&dataset.graph, &self.engine_config())
            .context("failed to compute shortest paths")
    }
}

#[cfg(debug_assertions)]
fn fixture_dir() -> Option<PathBuf> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures");
    dir.is_dir().then_some(dir)
}

#[cfg(not(debug_assertions))]
fn fixture_dir() -> Option<PathBuf> {
    None
}

fn describe(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
