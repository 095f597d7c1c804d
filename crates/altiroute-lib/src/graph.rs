use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};

/// Dense index of a location inside a [`Graph`] snapshot.
pub type LocationId = usize;

/// Elevation above sea level, in meters.
pub type Elevation = i32;

/// Relaxation cost carried by an edge and accumulated along routes.
pub type Weight = i64;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A named location with its elevation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub elevation: Elevation,
}

/// Directed edge leaving a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub target: LocationId,
    pub weight: Weight,
}

/// Content fingerprint of a graph snapshot.
///
/// Matrices remember the snapshot they were computed for so that queries
/// against a different graph can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SnapshotId(u64);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Immutable snapshot of locations and the directed edges between them.
#[derive(Debug, Clone)]
pub struct Graph {
    locations: Arc<Vec<Location>>,
    adjacency: Arc<Vec<Vec<Edge>>>,
    name_to_id: Arc<HashMap<String, LocationId>>,
    snapshot: SnapshotId,
}

impl Graph {
    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Return the outgoing edges for a given location.
    pub fn neighbours(&self, id: LocationId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fingerprint identifying this snapshot's content.
    pub fn snapshot(&self) -> SnapshotId {
        self.snapshot
    }

    /// Lookup a location identifier by its case-sensitive name.
    pub fn id_by_name(&self, name: &str) -> Option<LocationId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a location name by identifier.
    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.locations.get(id).map(|loc| loc.name.as_str())
    }

    /// Resolve a name to an identifier, suggesting close matches on failure.
    pub fn resolve(&self, name: &str) -> Result<LocationId> {
        self.id_by_name(name).ok_or_else(|| Error::UnknownLocation {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    /// Names most similar to `name`, best first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        similar_names(self.locations.iter().map(|loc| loc.name.as_str()), name, limit)
    }
}

/// Incrementally assemble a [`Graph`] snapshot.
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    locations: Vec<Location>,
    adjacency: Vec<Vec<Edge>>,
    name_to_id: HashMap<String, LocationId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location and return its identifier.
    pub fn add_location(
        &mut self,
        name: impl Into<String>,
        elevation: Elevation,
    ) -> Result<LocationId> {
        let name = name.into();
        if self.name_to_id.contains_key(&name) {
            return Err(Error::DuplicateLocation { name });
        }
        let id = self.locations.len();
        self.name_to_id.insert(name.clone(), id);
        self.locations.push(Location {
            id,
            name,
            elevation,
        });
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Add a directed edge between two registered locations.
    pub fn add_edge(&mut self, from: LocationId, to: LocationId, weight: Weight) -> Result<()> {
        let count = self.locations.len();
        if from >= count || to >= count {
            return Err(Error::invalid(format!(
                "edge {from} -> {to} references a location outside 0..{count}"
            )));
        }
        self.adjacency[from].push(Edge { target: to, weight });
        Ok(())
    }

    /// Add a directed edge between two locations referenced by name.
    pub fn add_edge_by_name(&mut self, from: &str, to: &str, weight: Weight) -> Result<()> {
        let source = self.lookup(from)?;
        let target = self.lookup(to)?;
        self.add_edge(source, target, weight)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Freeze the builder into an immutable snapshot.
    pub fn build(self) -> Graph {
        let snapshot = fingerprint(&self.locations, &self.adjacency);
        Graph {
            locations: Arc::new(self.locations),
            adjacency: Arc::new(self.adjacency),
            name_to_id: Arc::new(self.name_to_id),
            snapshot,
        }
    }

    fn lookup(&self, name: &str) -> Result<LocationId> {
        if let Some(id) = self.name_to_id.get(name) {
            return Ok(*id);
        }
        Err(Error::UnknownLocation {
            name: name.to_string(),
            suggestions: similar_names(
                self.locations.iter().map(|loc| loc.name.as_str()),
                name,
                3,
            ),
        })
    }
}

fn similar_names<'a>(
    candidates: impl Iterator<Item = &'a str>,
    name: &str,
    limit: usize,
) -> Vec<String> {
    let needle = name.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .map(|candidate| {
            let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
            (score, candidate)
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn fingerprint(locations: &[Location], adjacency: &[Vec<Edge>]) -> SnapshotId {
    let mut hasher = DefaultHasher::new();
    locations.hash(&mut hasher);
    adjacency.hash(&mut hasher);
    SnapshotId(hasher.finish())
}
