//! Demo command handler: solve a generated graph end to end.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use altiroute_cli::output::{
    render_adjacency, render_matrix, render_reachable, write_json, OutputFormat,
};
use altiroute_cli::terminal::{format_with_separators, BoxChars, ColorPalette};
use altiroute_lib::{
    generate_graph, MatrixKind, MatrixView, RelaxStats, RouteSummary, RouteTable, SyntheticOptions,
};

use crate::commands::data::DataOptions;

#[derive(Debug, Serialize)]
struct DemoReport {
    seed: Option<u64>,
    locations: usize,
    edges: usize,
    stats: RelaxStats,
    distances: MatrixView,
    predecessors: MatrixView,
}

/// Generate a random graph, run it through the route table lifecycle and
/// print the results.
pub fn handle_demo(
    data: &DataOptions,
    format: OutputFormat,
    nodes: usize,
    seed: Option<u64>,
) -> Result<()> {
    let mut options = SyntheticOptions::new(nodes);
    if let Some(seed) = seed {
        options = options.with_seed(seed);
    }
    let graph = generate_graph(options).context("failed to generate demo graph")?;

    let mut table = RouteTable::new(data.engine_config());
    table
        .load(Some(&graph))
        .context("demo graph does not fit the configured limits")?;
    let stats = table.relax()?;
    let paths = table.paths()?;
    info!(
        nodes,
        edges = graph.edge_count(),
        updates = stats.updates,
        "solved demo graph"
    );

    let distances = MatrixView::from_paths(paths, MatrixKind::Distance);
    let predecessors = MatrixView::from_paths(paths, MatrixKind::Predecessor);

    if format == OutputFormat::Json {
        return Ok(write_json(&DemoReport {
            seed,
            locations: graph.len(),
            edges: graph.edge_count(),
            stats,
            distances,
            predecessors,
        })?);
    }

    let palette = ColorPalette::detect();
    let chars = BoxChars::detect();
    println!("{}", render_adjacency(&graph));
    println!("{}", render_matrix(&distances, &chars, &palette));
    println!("{}", render_matrix(&predecessors, &chars, &palette));

    if let Some(first) = graph.locations().first() {
        let mut routes = Vec::new();
        for (goal, _) in paths.reachable_from(first.id)? {
            let plan = paths.route(first.id, goal)?;
            routes.push(RouteSummary::from_plan(paths, &plan)?);
        }
        print!("{}", render_reachable(&first.name, &routes, &palette));
    }

    println!(
        "\n{} locations, {} edges, {} relaxation updates",
        graph.len(),
        graph.edge_count(),
        format_with_separators(stats.updates)
    );
    Ok(())
}
