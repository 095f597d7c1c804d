//! Engine limits used for admission control before the O(N³) relaxation.

use crate::error::{Error, Result};
use crate::graph::Weight;

/// Default matrix capacity, in locations.
pub const DEFAULT_MAX_NODES: usize = 256;

/// Default largest accepted edge weight magnitude.
pub const DEFAULT_MAX_EDGE_WEIGHT: Weight = i32::MAX as Weight;

/// Limits applied when building and relaxing the all-pairs matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest supported location count. Larger graphs are rejected.
    pub max_nodes: usize,
    /// Largest accepted absolute edge weight.
    pub max_edge_weight: Weight,
    /// Optional ceiling on the N³ relaxation steps.
    pub relaxation_budget: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            max_edge_weight: DEFAULT_MAX_EDGE_WEIGHT,
            relaxation_budget: None,
        }
    }
}

impl EngineConfig {
    /// Override the matrix capacity.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Cap the relaxation work at `budget` inner-loop steps.
    pub fn with_relaxation_budget(mut self, budget: u64) -> Self {
        self.relaxation_budget = Some(budget);
        self
    }

    /// Validate the configuration.
    ///
    /// The longest simple path visits at most `max_nodes - 1` edges, so
    /// `max_nodes * max_edge_weight` must be representable for every finite
    /// distance to stay distinguishable from "unreachable".
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == 0 {
            return Err(Error::invalid("max_nodes must be at least 1"));
        }
        if self.max_edge_weight <= 0 {
            return Err(Error::invalid(format!(
                "max_edge_weight must be positive, got {}",
                self.max_edge_weight
            )));
        }
        let nodes = Weight::try_from(self.max_nodes)
            .map_err(|_| Error::invalid("max_nodes does not fit the weight domain"))?;
        if nodes.checked_mul(self.max_edge_weight).is_none() {
            return Err(Error::invalid(format!(
                "max_nodes ({}) x max_edge_weight ({}) overflows the distance domain",
                self.max_nodes, self.max_edge_weight
            )));
        }
        Ok(())
    }

    /// Number of relaxation steps for a graph of `nodes` locations.
    pub fn relaxation_cost(nodes: usize) -> u64 {
        (nodes as u64).saturating_pow(3)
    }

    /// Reject graphs that would exceed the capacity or the work budget.
    pub fn admit(&self, nodes: usize) -> Result<()> {
        if nodes > self.max_nodes {
            return Err(Error::CapacityExceeded {
                requested: nodes as u64,
                capacity: self.max_nodes as u64,
            });
        }
        if let Some(budget) = self.relaxation_budget {
            let cost = Self::relaxation_cost(nodes);
            if cost > budget {
                return Err(Error::CapacityExceeded {
                    requested: cost,
                    capacity: budget,
                });
            }
        }
        Ok(())
    }
}
