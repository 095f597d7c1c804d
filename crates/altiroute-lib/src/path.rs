//! Routes as location sequences, and their recovery from the predecessor
//! table.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::floyd_warshall::Matrices;
use crate::graph::LocationId;

/// Ordered sequence of locations from a start to a goal, both inclusive.
///
/// A path owns its steps; it never borrows from the matrices it was
/// reconstructed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<LocationId>);

impl Path {
    /// Wrap a sequence of steps. Empty sequences are rejected.
    pub fn new(steps: Vec<LocationId>) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::invalid("a path needs at least one location"));
        }
        Ok(Self(steps))
    }

    pub fn steps(&self) -> &[LocationId] {
        &self.0
    }

    pub fn start(&self) -> LocationId {
        self.0[0]
    }

    pub fn goal(&self) -> LocationId {
        self.0[self.0.len() - 1]
    }

    /// Number of locations on the path (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `false` for every constructed path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Consecutive `(from, to)` pairs along the path.
    pub fn hops(&self) -> impl Iterator<Item = (LocationId, LocationId)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn into_inner(self) -> Vec<LocationId> {
        self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        f.write_str(&joined)
    }
}

/// Walk the converged predecessor table backward from `goal` to `start`.
///
/// The walk is bounded by the matrix dimension: an unset predecessor, or a
/// chain that would take more than N steps, yields `NoPathExists` instead of
/// looping.
pub fn reconstruct_path(matrices: &Matrices, start: LocationId, goal: LocationId) -> Result<Path> {
    if matrices.distance(start, goal)?.is_none() {
        return Err(Error::NoPathExists { start, goal });
    }
    if start == goal {
        return Ok(Path(vec![start]));
    }

    let predecessors = matrices.predecessors();
    let limit = matrices.dimension();
    let mut reversed = Vec::with_capacity(limit);
    let mut current = goal;

    while current != start {
        if reversed.len() >= limit {
            return Err(Error::NoPathExists { start, goal });
        }
        reversed.push(current);
        current = match predecessors[(start, current)] {
            Some(previous) => previous,
            None => return Err(Error::NoPathExists { start, goal }),
        };
    }
    reversed.push(start);
    reversed.reverse();

    Ok(Path(reversed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::floyd_warshall::{build_matrices, relax};
    use crate::graph::{Graph, GraphBuilder};

    fn converged(graph: &Graph) -> Matrices {
        let mut matrices = build_matrices(graph, &EngineConfig::default()).unwrap();
        relax(&mut matrices);
        matrices
    }

    fn chain() -> Graph {
        let mut builder = GraphBuilder::new();
        for name in ["A", "B", "C", "D"] {
            builder.add_location(name, 0).unwrap();
        }
        builder.add_edge(0, 1, 10).unwrap();
        builder.add_edge(1, 2, 5).unwrap();
        builder.add_edge(0, 2, 20).unwrap();
        builder.build()
    }

    #[test]
    fn reconstructs_via_intermediate() {
        let matrices = converged(&chain());
        let path = reconstruct_path(&matrices, 0, 2).unwrap();
        assert_eq!(path.steps(), &[0, 1, 2]);
        assert_eq!(path.start(), 0);
        assert_eq!(path.goal(), 2);
        assert_eq!(path.hop_count(), 2);
        assert_eq!(path.to_string(), "0 -> 1 -> 2");
    }

    #[test]
    fn trivial_path_is_single_location() {
        let matrices = converged(&chain());
        let path = reconstruct_path(&matrices, 3, 3).unwrap();
        assert_eq!(path.steps(), &[3]);
        assert_eq!(path.hops().count(), 0);
    }

    #[test]
    fn unreachable_goal_fails_without_looping() {
        let matrices = converged(&chain());
        assert!(matches!(
            reconstruct_path(&matrices, 2, 0),
            Err(Error::NoPathExists { start: 2, goal: 0 })
        ));
        assert!(matches!(
            reconstruct_path(&matrices, 0, 3),
            Err(Error::NoPathExists { .. })
        ));
    }

    #[test]
    fn negative_cycle_walk_stops_at_dimension() {
        let mut builder = GraphBuilder::new();
        for name in ["A", "B", "C"] {
            builder.add_location(name, 0).unwrap();
        }
        builder.add_edge(0, 1, 1).unwrap();
        builder.add_edge(1, 2, -3).unwrap();
        builder.add_edge(2, 1, 1).unwrap();
        let matrices = converged(&builder.build());

        // Predecessors of 1 and 2 point at each other from row 0.
        assert_eq!(matrices.predecessor(0, 1).unwrap(), Some(2));
        assert_eq!(matrices.predecessor(0, 2).unwrap(), Some(1));
        for goal in [1, 2] {
            assert!(matches!(
                reconstruct_path(&matrices, 0, goal),
                Err(Error::NoPathExists { start: 0, goal: g }) if g == goal
            ));
        }
    }

    #[test]
    fn broken_predecessor_chain_is_no_path() {
        let mut matrices = converged(&chain());
        matrices.predecessors_mut()[(0, 1)] = None;
        assert_eq!(matrices.distance(0, 2).unwrap(), Some(15));
        assert!(matches!(
            reconstruct_path(&matrices, 0, 2),
            Err(Error::NoPathExists { start: 0, goal: 2 })
        ));
    }

    #[test]
    fn unrelaxed_matrices_are_refused() {
        let matrices = build_matrices(&chain(), &EngineConfig::default()).unwrap();
        assert!(matches!(
            reconstruct_path(&matrices, 0, 1),
            Err(Error::NotConverged { .. })
        ));
    }

    #[test]
    fn out_of_range_endpoints_are_invalid() {
        let matrices = converged(&chain());
        assert!(matches!(
            reconstruct_path(&matrices, 0, 9),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn empty_paths_cannot_be_constructed() {
        assert!(Path::new(Vec::new()).is_err());
        assert_eq!(Path::new(vec![4]).unwrap().len(), 1);
    }
}
