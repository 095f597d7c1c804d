//! altiroute library entry points.
//!
//! This crate loads a snapshot of named locations (mountain passes, towns)
//! and the directed roads between them, computes every pairwise shortest
//! route with Floyd-Warshall, and derives the cumulative elevation gain along
//! any reconstructed route. Higher-level consumers (the CLI) should only
//! depend on the functions exported here instead of touching matrix cells.

#![deny(warnings)]

pub mod config;
pub mod dataset;
pub mod elevation;
pub mod error;
pub mod floyd_warshall;
pub mod graph;
pub mod matrix;
pub mod output;
pub mod path;
pub mod routing;
pub mod synthetic;

pub use config::{EngineConfig, DEFAULT_MAX_EDGE_WEIGHT, DEFAULT_MAX_NODES};
pub use dataset::{load_dataset, Dataset, DatasetPaths};
pub use elevation::{elevation_gain, ElevationLookup};
pub use error::{Error, Result};
pub use floyd_warshall::{build_matrices, relax, MatrixState, Matrices, RelaxStats};
pub use graph::{Edge, Elevation, Graph, GraphBuilder, Location, LocationId, SnapshotId, Weight};
pub use matrix::{DistanceMatrix, PredecessorMatrix, SquareMatrix};
pub use output::{MatrixKind, MatrixView, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{reconstruct_path, Path};
pub use routing::{RoutePlan, RouteTable, ShortestPaths, TableStage};
pub use synthetic::{generate_graph, SyntheticOptions};
