mod common;

use std::fs;
use std::path::Path;

use altiroute_lib::dataset::read_edges;
use altiroute_lib::{build_matrices, load_dataset, DatasetPaths, EngineConfig, Error, GraphBuilder};
use tempfile::TempDir;

use common::{alpine_dataset, fixtures_dir};

#[test]
fn fixture_loads_passes_before_towns() {
    let dataset = alpine_dataset();
    let graph = &dataset.graph;

    assert_eq!(graph.len(), 23);
    assert_eq!(graph.edge_count(), 45);
    assert_eq!(graph.id_by_name("Col du Galibier"), Some(0));
    assert_eq!(graph.id_by_name("Briancon"), Some(10));
    assert_eq!(graph.location(22).map(|l| l.name.as_str()), Some("Isola"));
    assert_eq!(dataset.sources.len(), 3);
}

#[test]
fn in_dir_skips_missing_files() {
    let temp = TempDir::new().expect("temp dir");
    fs::copy(fixtures_dir().join("towns.csv"), temp.path().join("towns.csv")).expect("copy");

    let paths = DatasetPaths::in_dir(temp.path());
    assert_eq!(paths.locations, vec![temp.path().join("towns.csv")]);
    assert_eq!(paths.edges, None);

    let dataset = load_dataset(&paths).expect("towns only");
    assert_eq!(dataset.graph.len(), 13);
    assert_eq!(dataset.graph.edge_count(), 0);
}

#[test]
fn duplicate_locations_across_files_are_rejected() {
    let temp = TempDir::new().expect("temp dir");
    let first = temp.path().join("cols.csv");
    let second = temp.path().join("towns.csv");
    fs::write(&first, "Col de Vars;2108\n").expect("write");
    fs::write(&second, "Col de Vars;2111\n").expect("write");

    let error = load_dataset(&DatasetPaths::new(vec![first, second], None)).unwrap_err();
    assert!(matches!(error, Error::DuplicateLocation { name } if name == "Col de Vars"));
}

#[test]
fn missing_file_surfaces_io_error() {
    let paths = DatasetPaths::new(vec![fixtures_dir().join("absent.csv")], None);
    assert!(matches!(load_dataset(&paths), Err(Error::Io(_))));
}

#[test]
fn most_negative_weight_is_rejected_not_wrapped() {
    let mut builder = GraphBuilder::new();
    builder.add_location("A", 0).expect("add A");
    builder.add_location("B", 0).expect("add B");
    let added = read_edges(
        &mut builder,
        "A;B;-9223372036854775808\n".as_bytes(),
        Path::new("roads.csv"),
    )
    .expect("weight parses as i64");
    assert_eq!(added, 1);

    let error = build_matrices(&builder.build(), &EngineConfig::default()).unwrap_err();
    assert!(matches!(error, Error::InvalidArgument { .. }));
    assert!(error.to_string().contains("beyond the limit"));
}
