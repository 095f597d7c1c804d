//! Paths command handler: every reachable destination per source.

use anyhow::Result;
use serde::Serialize;

use altiroute_cli::output::{render_reachable, write_json, OutputFormat};
use altiroute_cli::terminal::ColorPalette;
use altiroute_lib::{LocationId, RoutePlan, RouteSummary, ShortestPaths};

use crate::commands::data::DataOptions;

#[derive(Debug, Serialize)]
struct ReachableRoutes {
    source: String,
    routes: Vec<RouteSummary>,
}

/// List reachable destinations from one location, or from all of them.
pub fn handle_paths(data: &DataOptions, format: OutputFormat, from: Option<&str>) -> Result<()> {
    let paths = data.solve()?;
    let (sources, plans) = match from {
        Some(name) => {
            let start = paths.graph().resolve(name)?;
            let plans = paths
                .reachable_from(start)?
                .into_iter()
                .map(|(goal, _)| paths.route(start, goal))
                .collect::<Result<Vec<_>, _>>()?;
            (vec![start], plans)
        }
        None => ((0..paths.graph().len()).collect(), paths.all_routes()?),
    };

    let mut listing = Vec::with_capacity(sources.len());
    for start in sources {
        listing.push(group_routes(&paths, start, &plans)?);
    }

    match format {
        OutputFormat::Json => write_json(&listing)?,
        _ => {
            let palette = ColorPalette::detect();
            for (i, entry) in listing.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", render_reachable(&entry.source, &entry.routes, &palette));
            }
        }
    }
    Ok(())
}

fn group_routes(
    paths: &ShortestPaths,
    start: LocationId,
    plans: &[RoutePlan],
) -> Result<ReachableRoutes> {
    let source = paths.graph().name(start).unwrap_or("<unknown>").to_string();
    let routes = plans
        .iter()
        .filter(|plan| plan.start == start)
        .map(|plan| RouteSummary::from_plan(paths, plan))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ReachableRoutes { source, routes })
}
