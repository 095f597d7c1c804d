//! Locations command handler.

use anyhow::Result;

use altiroute_cli::output::{render_locations, write_json, OutputFormat};
use altiroute_cli::terminal::ColorPalette;

use crate::commands::data::DataOptions;

/// List every loaded location with its index and elevation.
pub fn handle_locations(data: &DataOptions, format: OutputFormat) -> Result<()> {
    let dataset = data.load()?;
    match format {
        OutputFormat::Json => write_json(&dataset.graph.locations())?,
        _ => print!(
            "{}",
            render_locations(&dataset.graph, &ColorPalette::detect())
        ),
    }
    Ok(())
}
