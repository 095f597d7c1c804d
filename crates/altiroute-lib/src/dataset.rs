//! Dataset loading from `;`-delimited CSV files.
//!
//! Locations come from one or more headerless `name;elevation` files, read
//! in order so that identifiers are stable (passes first, then towns in the
//! bundled fixtures). Edges come from a `from;to;weight` file that refers to
//! locations by name.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Elevation, Graph, GraphBuilder, Weight};

/// File names looked up by [`DatasetPaths::in_dir`], in load order.
pub const LOCATION_FILES: [&str; 2] = ["cols.csv", "towns.csv"];

/// Edge file name looked up by [`DatasetPaths::in_dir`].
pub const EDGE_FILE: &str = "roads.csv";

const DELIMITER: u8 = b';';

/// Files making up a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub locations: Vec<PathBuf>,
    pub edges: Option<PathBuf>,
}

impl DatasetPaths {
    pub fn new(locations: Vec<PathBuf>, edges: Option<PathBuf>) -> Self {
        Self { locations, edges }
    }

    /// Resolve the conventional file names inside `dir`, keeping only the
    /// files that exist.
    pub fn in_dir(dir: &Path) -> Self {
        let locations = LOCATION_FILES
            .iter()
            .map(|name| dir.join(name))
            .filter(|path| path.exists())
            .collect();
        let edges = Some(dir.join(EDGE_FILE)).filter(|path| path.exists());
        Self { locations, edges }
    }
}

/// A loaded graph together with the files it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub graph: Graph,
    pub sources: Vec<PathBuf>,
}

/// Load every location file, then the edge file, into a graph snapshot.
pub fn load_dataset(paths: &DatasetPaths) -> Result<Dataset> {
    if paths.locations.is_empty() {
        return Err(Error::invalid("no location files supplied"));
    }

    let mut builder = GraphBuilder::new();
    let mut sources = Vec::new();

    for path in &paths.locations {
        let file = fs::File::open(path)?;
        let added = read_locations(&mut builder, file, path)?;
        debug!(path = %path.display(), added, "loaded locations");
        sources.push(path.clone());
    }

    if let Some(path) = &paths.edges {
        let file = fs::File::open(path)?;
        let added = read_edges(&mut builder, file, path)?;
        debug!(path = %path.display(), added, "loaded edges");
        sources.push(path.clone());
    }

    let graph = builder.build();
    info!(
        locations = graph.len(),
        edges = graph.edge_count(),
        "dataset loaded"
    );
    Ok(Dataset { graph, sources })
}

/// Append `name;elevation` rows from `reader`. `origin` is only used in
/// error messages. Returns the number of locations added.
pub fn read_locations<R: Read>(
    builder: &mut GraphBuilder,
    reader: R,
    origin: &Path,
) -> Result<usize> {
    let mut added = 0;
    for row in records(reader) {
        let (line, record) = row?;
        let name = required_field(&record, 0, "name", origin, line)?;
        let elevation: Elevation = parse_field(&record, 1, "elevation", origin, line)?;
        builder.add_location(name, elevation)?;
        added += 1;
    }
    Ok(added)
}

/// Append `from;to;weight` rows from `reader`. Returns the number of edges
/// added.
pub fn read_edges<R: Read>(builder: &mut GraphBuilder, reader: R, origin: &Path) -> Result<usize> {
    let mut added = 0;
    for row in records(reader) {
        let (line, record) = row?;
        let from = required_field(&record, 0, "from", origin, line)?;
        let to = required_field(&record, 1, "to", origin, line)?;
        let weight: Weight = parse_field(&record, 2, "weight", origin, line)?;
        builder.add_edge_by_name(from, to, weight)?;
        added += 1;
    }
    Ok(added)
}

fn records<R: Read>(reader: R) -> impl Iterator<Item = Result<(u64, StringRecord)>> {
    ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader)
        .into_records()
        .filter_map(|row| match row {
            Ok(record) if record.iter().all(str::is_empty) => None,
            Ok(record) => {
                let line = record.position().map(|pos| pos.line()).unwrap_or(0);
                Some(Ok((line, record)))
            }
            Err(err) => Some(Err(Error::from(err))),
        })
}

fn required_field<'r>(
    record: &'r StringRecord,
    index: usize,
    field: &str,
    origin: &Path,
    line: u64,
) -> Result<&'r str> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::InvalidRecord {
            path: origin.to_path_buf(),
            line,
            message: format!("missing {field} column"),
        }),
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &StringRecord,
    index: usize,
    field: &str,
    origin: &Path,
    line: u64,
) -> Result<T> {
    let raw = required_field(record, index, field, origin, line)?;
    raw.parse().map_err(|_| Error::InvalidRecord {
        path: origin.to_path_buf(),
        line,
        message: format!("{field} '{raw}' is not an integer"),
    })
}
