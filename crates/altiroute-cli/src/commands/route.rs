//! Route command handler: one itinerary with its distance and elevation gain.

use std::time::Instant;

use anyhow::{bail, Result};

use altiroute_cli::output::{print_footer, render_route, write_json, OutputFormat};
use altiroute_cli::terminal::ColorPalette;
use altiroute_lib::{Error as LibError, RouteSummary};

use crate::commands::data::DataOptions;

/// Plan the shortest route between two named locations.
pub fn handle_route(
    data: &DataOptions,
    format: OutputFormat,
    from: &str,
    to: &str,
    started: Instant,
) -> Result<()> {
    let paths = data.solve()?;
    let plan = match paths.route_by_name(from, to) {
        Ok(plan) => plan,
        Err(LibError::NoPathExists { .. }) => {
            bail!("no route exists between {from} and {to}")
        }
        Err(err) => return Err(err.into()),
    };
    let summary = RouteSummary::from_plan(&paths, &plan)?;

    if format == OutputFormat::Json {
        write_json(&summary)?;
        return Ok(());
    }

    let palette = ColorPalette::detect();
    print!("{}", render_route(&summary, format, &palette));
    if format == OutputFormat::Text {
        print_footer(started.elapsed(), &palette);
    }
    Ok(())
}
