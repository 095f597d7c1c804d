//! Matrix command handler.

use anyhow::Result;

use altiroute_cli::output::{render_matrix, write_json, OutputFormat};
use altiroute_cli::terminal::{BoxChars, ColorPalette};
use altiroute_lib::{MatrixKind, MatrixView};

use crate::commands::data::DataOptions;

/// Print the converged distance table, or the predecessor table.
pub fn handle_matrix(data: &DataOptions, format: OutputFormat, predecessors: bool) -> Result<()> {
    let paths = data.solve()?;
    let kind = if predecessors {
        MatrixKind::Predecessor
    } else {
        MatrixKind::Distance
    };
    let view = MatrixView::from_paths(&paths, kind);

    match format {
        OutputFormat::Json => write_json(&view)?,
        _ => print!(
            "{}",
            render_matrix(&view, &BoxChars::detect(), &ColorPalette::detect())
        ),
    }
    Ok(())
}
