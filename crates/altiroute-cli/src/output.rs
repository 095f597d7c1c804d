//! Output formatting for itineraries and route tables.
//!
//! Every renderer works from the library's query surface (route summaries,
//! matrix views, the graph's location list) and returns a `String`, so the
//! command handlers only decide where it is printed.

use std::fmt::Write as _;
use std::io::{self, Write};

use altiroute_lib::{Graph, MatrixKind, MatrixView, RouteRenderMode, RouteSummary};
use clap::ValueEnum;
use serde::Serialize;

use crate::terminal::{BoxChars, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored itinerary with elevations.
    #[default]
    Text,
    /// `+`/`|`/`-` route listing.
    Basic,
    /// Markdown-flavoured listing.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: std::time::Duration, palette: &ColorPalette) {
    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };
    println!("\n{}Completed in {}{}", palette.gray, time_str, palette.reset);
}

/// Serialize `value` as pretty JSON on stdout.
pub fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Render a route summary in one of the textual formats.
pub fn render_route(summary: &RouteSummary, format: OutputFormat, palette: &ColorPalette) -> String {
    match format {
        OutputFormat::Basic => summary.render(RouteRenderMode::Basic),
        OutputFormat::Rich => summary.render(RouteRenderMode::RichText),
        OutputFormat::Text | OutputFormat::Json => render_itinerary(summary, palette),
    }
}

/// Itinerary view: one line per step with its elevation, then totals.
pub fn render_itinerary(summary: &RouteSummary, p: &ColorPalette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Route from {}{}{} to {}{}{} ({} hops):",
        p.tag_start,
        summary.start.name,
        p.reset,
        p.tag_goal,
        summary.goal.name,
        p.reset,
        summary.hops
    );
    for step in &summary.steps {
        let _ = writeln!(
            out,
            " -> {}{}{} - {}{} m{}",
            p.white_bold, step.name, p.reset, p.cyan, step.elevation, p.reset
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total distance: {}", summary.total_distance);
    let _ = writeln!(
        out,
        "Elevation gain: {}{} m{}",
        p.green, summary.elevation_gain, p.reset
    );
    out
}

/// Box-drawn square table of a converged matrix.
///
/// Unreachable distances are shown as `*`, unset predecessors as `-`. Row
/// and column headers are location indices; a legend maps them to names.
pub fn render_matrix(view: &MatrixView, chars: &BoxChars, p: &ColorPalette) -> String {
    let n = view.dimension();
    let width = view.cell_width();
    let missing = match view.kind {
        MatrixKind::Distance => "*",
        MatrixKind::Predecessor => "-",
    };
    let title = match view.kind {
        MatrixKind::Distance => "Shortest distances",
        MatrixKind::Predecessor => "Predecessors",
    };

    let mut out = String::new();
    let _ = writeln!(out, "{title} ({n} x {n})");
    if n == 0 {
        return out;
    }

    let label_width = (n - 1).to_string().len();
    let segment: String = std::iter::repeat(chars.horizontal)
        .take(width + 2)
        .collect();
    let border = |left: char, mid: char, right: char| {
        let inner = vec![segment.as_str(); n].join(mid.to_string().as_str());
        format!(
            "{:label_width$} {}{left}{inner}{right}{}",
            "", p.gray, p.reset
        )
    };

    let mut header = format!("{:label_width$} ", "");
    for col in 0..n {
        let _ = write!(header, "  {col:>width$} ");
    }
    let _ = writeln!(out, "{}", header.trim_end());

    let _ = writeln!(out, "{}", border(chars.top_left, chars.top_mid, chars.top_right));
    for (row, cells) in view.rows.iter().enumerate() {
        if row > 0 {
            let _ = writeln!(out, "{}", border(chars.mid_left, chars.cross, chars.mid_right));
        }
        let mut line = format!("{row:>label_width$} {}{}{}", p.gray, chars.vertical, p.reset);
        for cell in cells {
            match cell {
                Some(value) => {
                    let _ = write!(line, " {value:>width$} ");
                }
                None => {
                    let _ = write!(line, " {}{missing:>width$}{} ", p.red, p.reset);
                }
            }
            let _ = write!(line, "{}{}{}", p.gray, chars.vertical, p.reset);
        }
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(
        out,
        "{}",
        border(chars.bottom_left, chars.bottom_mid, chars.bottom_right)
    );

    let _ = writeln!(out);
    for (index, label) in view.labels.iter().enumerate() {
        let _ = writeln!(out, "{index:>label_width$} = {label}");
    }
    out
}

/// Every reachable destination from one source with its cost and route.
pub fn render_reachable(source: &str, routes: &[RouteSummary], p: &ColorPalette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "From {}{}{} to:", p.white_bold, source, p.reset);
    if routes.is_empty() {
        let _ = writeln!(out, "  {}(no reachable locations){}", p.gray, p.reset);
    }
    for summary in routes {
        let joined = summary
            .steps
            .iter()
            .map(|step| step.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "  {} (cost = {}, climb = {} m): {}",
            summary.goal.name, summary.total_distance, summary.elevation_gain, joined
        );
    }
    out
}

/// Indexed listing of every location with its elevation.
pub fn render_locations(graph: &Graph, p: &ColorPalette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Locations ({}):", graph.len());
    for location in graph.locations() {
        let _ = writeln!(
            out,
            "{:>3}  {:<30}  {}{:>6} m{}",
            location.id, location.name, p.cyan, location.elevation, p.reset
        );
    }
    out
}

/// Occupancy grid of direct edges: `1` where row → column has an edge.
pub fn render_adjacency(graph: &Graph) -> String {
    let n = graph.len();
    let mut out = String::new();
    let _ = writeln!(out, "Graph");
    for row in 0..n {
        let mut line = String::with_capacity(n * 2);
        for col in 0..n {
            let linked = graph.neighbours(row).iter().any(|edge| edge.target == col);
            line.push(if linked { '1' } else { ' ' });
            line.push(' ');
        }
        let _ = writeln!(out, "{line}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use altiroute_lib::{EngineConfig, GraphBuilder, ShortestPaths};

    fn paths() -> ShortestPaths {
        let mut builder = GraphBuilder::new();
        builder.add_location("Briancon", 1326).unwrap();
        builder.add_location("Col du Lautaret", 2058).unwrap();
        builder.add_location("La Grave", 1480).unwrap();
        builder.add_edge(0, 1, 28).unwrap();
        builder.add_edge(1, 2, 10).unwrap();
        ShortestPaths::compute(&builder.build(), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn itinerary_lists_each_step_with_elevation() {
        let paths = paths();
        let plan = paths.route(0, 2).unwrap();
        let summary = RouteSummary::from_plan(&paths, &plan).unwrap();
        let text = render_route(&summary, OutputFormat::Text, &ColorPalette::plain());

        assert!(text.starts_with("Route from Briancon to La Grave (2 hops):"));
        assert!(text.contains(" -> Col du Lautaret - 2058 m"));
        assert!(text.contains("Total distance: 38"));
        assert!(text.contains("Elevation gain: 732 m"));
    }

    #[test]
    fn ascii_distance_table_marks_unreachable_cells() {
        let view = MatrixView::from_paths(&paths(), MatrixKind::Distance);
        let text = render_matrix(&view, &BoxChars::ascii(), &ColorPalette::plain());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Shortest distances (3 x 3)");
        assert_eq!(lines[1], "     0    1    2");
        assert_eq!(lines[2], "  +----+----+----+");
        assert_eq!(lines[3], "0 |  0 | 28 | 38 |");
        assert_eq!(lines[5], "1 |  * |  0 | 10 |");
        assert!(text.contains("2 = La Grave"));
    }

    #[test]
    fn unicode_predecessor_table_uses_box_drawing() {
        let view = MatrixView::from_paths(&paths(), MatrixKind::Predecessor);
        let text = render_matrix(&view, &BoxChars::unicode(), &ColorPalette::plain());
        assert!(text.starts_with("Predecessors (3 x 3)"));
        assert!(text.contains("┌───┬───┬───┐"));
        assert!(text.contains("│ - │"));
        assert!(text.contains("└───┴───┴───┘"));
    }

    #[test]
    fn reachable_listing_shows_cost_and_route() {
        let paths = paths();
        let plan = paths.route(0, 2).unwrap();
        let summary = RouteSummary::from_plan(&paths, &plan).unwrap();
        let text = render_reachable("Briancon", &[summary], &ColorPalette::plain());
        assert!(text.contains("La Grave (cost = 38, climb = 732 m): Briancon, Col du Lautaret, La Grave"));

        let empty = render_reachable("La Grave", &[], &ColorPalette::plain());
        assert!(empty.contains("(no reachable locations)"));
    }

    #[test]
    fn adjacency_grid_marks_direct_edges() {
        let grid = render_adjacency(paths().graph());
        let lines: Vec<_> = grid.lines().collect();
        assert_eq!(lines[1], "  1   ");
        assert_eq!(lines[2], "    1 ");
        assert_eq!(lines[3], "      ");
    }
}
