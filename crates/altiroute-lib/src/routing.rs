//! All-pairs route queries.
//!
//! This module provides:
//! - [`ShortestPaths`] - immutable read model over converged matrices
//! - [`RoutePlan`] - a reconstructed route with its distance and climb
//! - [`RouteTable`] - staged build → relax → query lifecycle
//!
//! # Example
//!
//! ```ignore
//! use altiroute_lib::{load_dataset, DatasetPaths, EngineConfig, ShortestPaths};
//!
//! let dataset = load_dataset(&DatasetPaths::new(locations, edges))?;
//! let paths = ShortestPaths::compute(&dataset.graph, &EngineConfig::default())?;
//! let plan = paths.route_by_name("Briancon", "Col du Galibier")?;
//! println!("{} hops, {} m climbed", plan.hop_count(), plan.elevation_gain);
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::elevation::elevation_gain;
use crate::error::{Error, Result};
use crate::floyd_warshall::{build_matrices, relax, Matrices, RelaxStats};
use crate::graph::{Graph, LocationId, SnapshotId, Weight};
use crate::path::{reconstruct_path, Path};

/// Reconstructed route between two locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub start: LocationId,
    pub goal: LocationId,
    pub steps: Path,
    /// Sum of edge weights along `steps`.
    pub distance: Weight,
    /// Cumulative positive elevation change along `steps`, in meters.
    pub elevation_gain: u64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.hop_count()
    }
}

/// Converged all-pairs tables bound to the graph snapshot they describe.
///
/// Cloning is cheap and clones share the tables, so any number of readers
/// may query concurrently.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    graph: Graph,
    matrices: Arc<Matrices>,
    stats: RelaxStats,
}

impl ShortestPaths {
    /// Build and relax the matrices for `graph` in one step.
    pub fn compute(graph: &Graph, config: &EngineConfig) -> Result<Self> {
        let mut matrices = build_matrices(graph, config)?;
        let stats = relax(&mut matrices);
        info!(
            locations = graph.len(),
            edges = graph.edge_count(),
            updates = stats.updates,
            "computed all-pairs shortest paths"
        );
        Ok(Self {
            graph: graph.clone(),
            matrices: Arc::new(matrices),
            stats,
        })
    }

    /// Wrap matrices that were built and relaxed separately.
    ///
    /// Matrices that were never relaxed, or that were built from another
    /// snapshot, are refused with `NotConverged`.
    pub fn from_matrices(graph: &Graph, matrices: Matrices, stats: RelaxStats) -> Result<Self> {
        matrices.ensure_converged()?;
        ensure_snapshot(matrices.snapshot(), graph.snapshot())?;
        Ok(Self {
            graph: graph.clone(),
            matrices: Arc::new(matrices),
            stats,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn matrices(&self) -> &Matrices {
        &self.matrices
    }

    /// Counters from the relaxation that produced these tables.
    pub fn stats(&self) -> RelaxStats {
        self.stats
    }

    pub fn snapshot(&self) -> SnapshotId {
        self.matrices.snapshot()
    }

    /// Fail with `NotConverged` if `graph` is not the snapshot these tables
    /// were computed for.
    pub fn ensure_current(&self, graph: &Graph) -> Result<()> {
        ensure_snapshot(self.snapshot(), graph.snapshot())
    }

    /// Shortest distance from `start` to `goal`; `None` when unreachable.
    pub fn distance(&self, start: LocationId, goal: LocationId) -> Result<Option<Weight>> {
        self.matrices.distance(start, goal)
    }

    pub fn predecessor(&self, start: LocationId, goal: LocationId) -> Result<Option<LocationId>> {
        self.matrices.predecessor(start, goal)
    }

    pub fn reconstruct_path(&self, start: LocationId, goal: LocationId) -> Result<Path> {
        reconstruct_path(&self.matrices, start, goal)
    }

    /// Cumulative climb along `path` using this graph's elevations.
    pub fn elevation_gain(&self, path: &Path) -> Result<u64> {
        elevation_gain(path, &self.graph)
    }

    /// Reconstruct the best route together with its distance and climb.
    pub fn route(&self, start: LocationId, goal: LocationId) -> Result<RoutePlan> {
        let steps = self.reconstruct_path(start, goal)?;
        let distance = self
            .distance(start, goal)?
            .ok_or(Error::NoPathExists { start, goal })?;
        let elevation_gain = self.elevation_gain(&steps)?;
        debug!(start, goal, distance, elevation_gain, "route reconstructed");
        Ok(RoutePlan {
            start,
            goal,
            steps,
            distance,
            elevation_gain,
        })
    }

    /// Resolve both names and plan the route between them.
    pub fn route_by_name(&self, start: &str, goal: &str) -> Result<RoutePlan> {
        let start = self.graph.resolve(start)?;
        let goal = self.graph.resolve(goal)?;
        self.route(start, goal)
    }

    /// Every other location reachable from `start`, with its distance.
    pub fn reachable_from(&self, start: LocationId) -> Result<Vec<(LocationId, Weight)>> {
        self.matrices.ensure_converged()?;
        self.matrices.ensure_in_range(start)?;
        Ok(self
            .matrices
            .distances()
            .row(start)
            .iter()
            .enumerate()
            .filter(|(goal, _)| *goal != start)
            .filter_map(|(goal, distance)| distance.map(|d| (goal, d)))
            .collect())
    }

    /// Routes for every reachable ordered pair of distinct locations.
    pub fn all_routes(&self) -> Result<Vec<RoutePlan>> {
        let mut plans = Vec::new();
        for start in 0..self.matrices.dimension() {
            for (goal, _) in self.reachable_from(start)? {
                plans.push(self.route(start, goal)?);
            }
        }
        Ok(plans)
    }
}

fn ensure_snapshot(computed: SnapshotId, requested: SnapshotId) -> Result<()> {
    if computed == requested {
        Ok(())
    } else {
        Err(Error::not_converged(format!(
            "matrices describe snapshot {computed} but the graph is snapshot {requested}"
        )))
    }
}

/// Observable stage of a [`RouteTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStage {
    /// No graph has been loaded.
    Empty,
    /// Matrices initialised but not relaxed.
    Built,
    /// Ready for queries.
    Converged,
    /// A build failed or the graph changed; a full rebuild is required.
    Invalidated,
}

#[derive(Debug)]
enum Stage {
    Empty,
    Built { graph: Graph, matrices: Matrices },
    Converged(ShortestPaths),
    Invalidated { reason: String },
}

/// Build → relax → query lifecycle around a single graph snapshot.
///
/// Queries are refused with `InvalidArgument` before a graph is loaded and
/// with `NotConverged` until the matrices have been relaxed.
#[derive(Debug)]
pub struct RouteTable {
    config: EngineConfig,
    stage: Stage,
}

impl RouteTable {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            stage: Stage::Empty,
        }
    }

    pub fn stage(&self) -> TableStage {
        match self.stage {
            Stage::Empty => TableStage::Empty,
            Stage::Built { .. } => TableStage::Built,
            Stage::Converged(_) => TableStage::Converged,
            Stage::Invalidated { .. } => TableStage::Invalidated,
        }
    }

    /// Initialise matrices for `graph`, discarding any previous state.
    ///
    /// A failed build leaves the table invalidated so that no stale answers
    /// can be served.
    pub fn load(&mut self, graph: Option<&Graph>) -> Result<()> {
        let Some(graph) = graph else {
            self.stage = Stage::Empty;
            return Err(Error::invalid("no graph snapshot supplied"));
        };
        match build_matrices(graph, &self.config) {
            Ok(matrices) => {
                self.stage = Stage::Built {
                    graph: graph.clone(),
                    matrices,
                };
                Ok(())
            }
            Err(err) => {
                self.stage = Stage::Invalidated {
                    reason: format!("last build failed: {err}"),
                };
                Err(err)
            }
        }
    }

    /// Relax the loaded matrices. Relaxing a converged table is a no-op.
    pub fn relax(&mut self) -> Result<RelaxStats> {
        match std::mem::replace(&mut self.stage, Stage::Empty) {
            Stage::Empty => Err(Error::invalid("no graph snapshot loaded")),
            Stage::Built {
                graph,
                mut matrices,
            } => {
                let stats = relax(&mut matrices);
                self.stage = Stage::Converged(ShortestPaths::from_matrices(
                    &graph, matrices, stats,
                )?);
                Ok(stats)
            }
            Stage::Converged(paths) => {
                self.stage = Stage::Converged(paths);
                Ok(RelaxStats::default())
            }
            Stage::Invalidated { reason } => {
                let err = Error::not_converged(reason.clone());
                self.stage = Stage::Invalidated { reason };
                Err(err)
            }
        }
    }

    /// Mark the current matrices stale, e.g. after the graph was edited.
    pub fn invalidate(&mut self) {
        if !matches!(self.stage, Stage::Empty) {
            self.stage = Stage::Invalidated {
                reason: "graph changed since the matrices were computed".to_string(),
            };
        }
    }

    /// Read model for queries, once converged.
    pub fn paths(&self) -> Result<&ShortestPaths> {
        match &self.stage {
            Stage::Empty => Err(Error::invalid("no graph snapshot loaded")),
            Stage::Built { .. } => Err(Error::not_converged(
                "matrices were built but never relaxed",
            )),
            Stage::Converged(paths) => Ok(paths),
            Stage::Invalidated { reason } => Err(Error::not_converged(reason.clone())),
        }
    }

    pub fn distance(&self, start: LocationId, goal: LocationId) -> Result<Option<Weight>> {
        self.paths()?.distance(start, goal)
    }

    pub fn route(&self, start: LocationId, goal: LocationId) -> Result<RoutePlan> {
        self.paths()?.route(start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn alpine() -> Graph {
        let mut builder = GraphBuilder::new();
        builder.add_location("Briancon", 1326).unwrap();
        builder.add_location("Col d'Izoard", 2360).unwrap();
        builder.add_location("Guillestre", 1000).unwrap();
        builder.add_location("Col du Lautaret", 2058).unwrap();
        builder.add_edge_by_name("Briancon", "Col d'Izoard", 20).unwrap();
        builder.add_edge_by_name("Col d'Izoard", "Guillestre", 31).unwrap();
        builder.add_edge_by_name("Briancon", "Guillestre", 60).unwrap();
        builder.build()
    }

    #[test]
    fn route_combines_path_distance_and_gain() {
        let graph = alpine();
        let paths = ShortestPaths::compute(&graph, &EngineConfig::default()).unwrap();
        let plan = paths.route_by_name("Briancon", "Guillestre").unwrap();

        assert_eq!(plan.steps.steps(), &[0, 1, 2]);
        assert_eq!(plan.distance, 51);
        assert_eq!(plan.elevation_gain, 1034);
        assert_eq!(plan.hop_count(), 2);
    }

    #[test]
    fn isolated_location_has_no_route() {
        let paths = ShortestPaths::compute(&alpine(), &EngineConfig::default()).unwrap();
        assert!(matches!(
            paths.route(0, 3),
            Err(Error::NoPathExists { start: 0, goal: 3 })
        ));
        assert_eq!(paths.distance(0, 3).unwrap(), None);
    }

    #[test]
    fn reachable_from_lists_finite_destinations() {
        let paths = ShortestPaths::compute(&alpine(), &EngineConfig::default()).unwrap();
        assert_eq!(paths.reachable_from(0).unwrap(), vec![(1, 20), (2, 51)]);
        assert!(paths.reachable_from(3).unwrap().is_empty());
        assert_eq!(paths.all_routes().unwrap().len(), 3);
    }

    #[test]
    fn stale_snapshots_are_refused() {
        let paths = ShortestPaths::compute(&alpine(), &EngineConfig::default()).unwrap();
        let mut builder = GraphBuilder::new();
        builder.add_location("Briancon", 1326).unwrap();
        let other = builder.build();

        paths.ensure_current(&alpine()).unwrap();
        assert!(matches!(
            paths.ensure_current(&other),
            Err(Error::NotConverged { .. })
        ));
    }

    #[test]
    fn unrelaxed_matrices_cannot_become_a_read_model() {
        let graph = alpine();
        let matrices = build_matrices(&graph, &EngineConfig::default()).unwrap();
        assert!(matches!(
            ShortestPaths::from_matrices(&graph, matrices, RelaxStats::default()),
            Err(Error::NotConverged { .. })
        ));
    }

    #[test]
    fn table_walks_through_its_stages() {
        let graph = alpine();
        let mut table = RouteTable::new(EngineConfig::default());
        assert_eq!(table.stage(), TableStage::Empty);
        assert!(matches!(
            table.distance(0, 1),
            Err(Error::InvalidArgument { .. })
        ));

        table.load(Some(&graph)).unwrap();
        assert_eq!(table.stage(), TableStage::Built);
        assert!(matches!(
            table.distance(0, 1),
            Err(Error::NotConverged { .. })
        ));

        let stats = table.relax().unwrap();
        assert_eq!(stats.intermediates, 4);
        assert_eq!(table.stage(), TableStage::Converged);
        assert_eq!(table.distance(0, 2).unwrap(), Some(51));
        assert_eq!(table.relax().unwrap().updates, 0);

        table.invalidate();
        assert_eq!(table.stage(), TableStage::Invalidated);
        assert!(matches!(
            table.route(0, 2),
            Err(Error::NotConverged { .. })
        ));
        assert!(matches!(table.relax(), Err(Error::NotConverged { .. })));
    }

    #[test]
    fn absent_graph_is_invalid() {
        let mut table = RouteTable::new(EngineConfig::default());
        assert!(matches!(
            table.load(None),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(table.relax(), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn failed_build_invalidates_the_table() {
        let mut table = RouteTable::new(EngineConfig::default().with_max_nodes(2));
        assert!(matches!(
            table.load(Some(&alpine())),
            Err(Error::CapacityExceeded { .. })
        ));
        assert_eq!(table.stage(), TableStage::Invalidated);
        assert!(matches!(table.paths(), Err(Error::NotConverged { .. })));
    }

    #[test]
    fn read_model_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShortestPaths>();

        let paths = ShortestPaths::compute(&alpine(), &EngineConfig::default()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let paths = paths.clone();
                std::thread::spawn(move || paths.route(0, 2).unwrap().distance)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 51);
        }
    }
}
