//! Matrix initialisation and the Floyd-Warshall relaxation.
//!
//! [`build_matrices`] turns a [`Graph`] snapshot into the initial distance and
//! predecessor tables; [`relax`] then improves them in place until every entry
//! is the true shortest directed distance. Negative edges are fine as long as
//! they do not form a cycle; negative cycles are not detected.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::graph::{Graph, LocationId, SnapshotId, Weight};
use crate::matrix::{DistanceMatrix, PredecessorMatrix, SquareMatrix};

/// Lifecycle stage of a [`Matrices`] pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixState {
    /// Direct edges only; intermediate results are not meaningful.
    Initialized,
    /// All-pairs optimal.
    Converged,
}

/// Distance and predecessor tables for one graph snapshot.
///
/// The two tables are only ever mutated together by [`relax`].
#[derive(Debug, Clone)]
pub struct Matrices {
    distances: DistanceMatrix,
    predecessors: PredecessorMatrix,
    snapshot: SnapshotId,
    state: MatrixState,
}

impl Matrices {
    pub fn dimension(&self) -> usize {
        self.distances.dimension()
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn predecessors(&self) -> &PredecessorMatrix {
        &self.predecessors
    }

    #[cfg(test)]
    pub(crate) fn predecessors_mut(&mut self) -> &mut PredecessorMatrix {
        &mut self.predecessors
    }

    /// Snapshot of the graph these tables were built from.
    pub fn snapshot(&self) -> SnapshotId {
        self.snapshot
    }

    pub fn state(&self) -> MatrixState {
        self.state
    }

    pub fn is_converged(&self) -> bool {
        self.state == MatrixState::Converged
    }

    /// Fail with `NotConverged` unless [`relax`] has run.
    pub fn ensure_converged(&self) -> Result<()> {
        if self.is_converged() {
            Ok(())
        } else {
            Err(Error::not_converged(
                "matrices were built but never relaxed",
            ))
        }
    }

    /// Fail with `InvalidArgument` unless `id` addresses a row of the tables.
    pub fn ensure_in_range(&self, id: LocationId) -> Result<()> {
        if id < self.dimension() {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "location {id} is outside 0..{}",
                self.dimension()
            )))
        }
    }

    /// Converged shortest distance between two locations; `None` when
    /// `goal` is unreachable from `start`.
    pub fn distance(&self, start: LocationId, goal: LocationId) -> Result<Option<Weight>> {
        self.ensure_converged()?;
        self.ensure_in_range(start)?;
        self.ensure_in_range(goal)?;
        Ok(self.distances[(start, goal)])
    }

    /// Converged predecessor of `goal` on the best path from `start`.
    pub fn predecessor(&self, start: LocationId, goal: LocationId) -> Result<Option<LocationId>> {
        self.ensure_converged()?;
        self.ensure_in_range(start)?;
        self.ensure_in_range(goal)?;
        Ok(self.predecessors[(start, goal)])
    }
}

/// Counters reported by a relaxation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelaxStats {
    /// Intermediate locations processed (the outer loop count).
    pub intermediates: usize,
    /// Cells whose distance improved.
    pub updates: u64,
}

/// Build the initial distance and predecessor matrices for `graph`.
///
/// Diagonal cells hold `0`/self, direct edges hold their weight and the
/// source as predecessor, every other cell is unset. When several edges join
/// the same ordered pair the lightest one wins.
pub fn build_matrices(graph: &Graph, config: &EngineConfig) -> Result<Matrices> {
    config.validate()?;
    let n = graph.len();
    if let Err(err) = config.admit(n) {
        warn!(nodes = n, capacity = config.max_nodes, "rejecting graph: {err}");
        return Err(err);
    }

    let mut distances: DistanceMatrix = SquareMatrix::filled(n, None);
    let mut predecessors: PredecessorMatrix = SquareMatrix::filled(n, None);

    for i in 0..n {
        distances[(i, i)] = Some(0);
        predecessors[(i, i)] = Some(i);
    }

    for source in 0..n {
        for edge in graph.neighbours(source) {
            if edge.weight.unsigned_abs() > config.max_edge_weight.unsigned_abs() {
                return Err(Error::invalid(format!(
                    "edge {source} -> {} has weight {} beyond the limit of {}",
                    edge.target, edge.weight, config.max_edge_weight
                )));
            }
            if edge.target == source {
                continue;
            }
            let cell = (source, edge.target);
            if improves(distances[cell], edge.weight) {
                distances[cell] = Some(edge.weight);
                predecessors[cell] = Some(source);
            }
        }
    }

    debug!(
        nodes = n,
        edges = graph.edge_count(),
        snapshot = %graph.snapshot(),
        "initialised all-pairs matrices"
    );

    Ok(Matrices {
        distances,
        predecessors,
        snapshot: graph.snapshot(),
        state: MatrixState::Initialized,
    })
}

/// Relax the matrices in place to all-pairs optimality.
///
/// After intermediate `k` has been processed every distance is optimal among
/// paths whose interior locations are drawn from `0..=k`. Running this on
/// converged matrices is a no-op that reports zero updates.
pub fn relax(matrices: &mut Matrices) -> RelaxStats {
    let n = matrices.dimension();
    let Matrices {
        distances,
        predecessors,
        state,
        ..
    } = matrices;

    let mut stats = RelaxStats::default();
    for k in 0..n {
        let mut updates = 0u64;
        for i in 0..n {
            let Some(through_k) = distances[(i, k)] else {
                continue;
            };
            for j in 0..n {
                let Some(from_k) = distances[(k, j)] else {
                    continue;
                };
                let Some(candidate) = through_k.checked_add(from_k) else {
                    continue;
                };
                if improves(distances[(i, j)], candidate) {
                    distances[(i, j)] = Some(candidate);
                    predecessors[(i, j)] = predecessors[(k, j)];
                    updates += 1;
                }
            }
        }
        trace!(intermediate = k, updates, "relaxed through intermediate");
        stats.updates += updates;
        stats.intermediates += 1;
    }

    *state = MatrixState::Converged;
    debug!(
        nodes = n,
        updates = stats.updates,
        "all-pairs relaxation converged"
    );
    stats
}

/// Whether `candidate` is strictly shorter than the current entry, treating
/// an unset entry as unreachable.
#[inline]
fn improves(current: Option<Weight>, candidate: Weight) -> bool {
    match current {
        Some(current) => candidate < current,
        None => true,
    }
}
