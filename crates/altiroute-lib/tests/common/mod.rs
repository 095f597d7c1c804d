#![allow(dead_code)]

use std::path::PathBuf;

use altiroute_lib::{load_dataset, Dataset, DatasetPaths, Graph, GraphBuilder, Weight};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Alpine passes, towns and roads shipped in `docs/fixtures`.
pub fn alpine_dataset() -> Dataset {
    load_dataset(&DatasetPaths::in_dir(&fixtures_dir())).expect("fixture dataset loads")
}

/// Build a graph from `(name, elevation)` locations and `(from, to, weight)` edges.
pub fn graph_from(locations: &[(&str, i32)], edges: &[(usize, usize, Weight)]) -> Graph {
    let mut builder = GraphBuilder::new();
    for (name, elevation) in locations {
        builder.add_location(*name, *elevation).expect("unique names");
    }
    for &(from, to, weight) in edges {
        builder.add_edge(from, to, weight).expect("edge in range");
    }
    builder.build()
}
