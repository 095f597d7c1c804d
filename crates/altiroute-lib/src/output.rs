use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Elevation, LocationId, Weight};
use crate::routing::{RoutePlan, ShortestPaths};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// `+`/`|`/`-` prefixes for first/middle/last steps.
    Basic,
    /// Markdown-flavoured listing.
    RichText,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub id: LocationId,
    pub name: String,
    pub elevation: Elevation,
    /// Cost of the hop that reached this step; absent for the start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg: Option<Weight>,
}

/// Structured representation of a planned route that higher-level consumers
/// can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub hops: usize,
    pub start: RouteStep,
    pub goal: RouteStep,
    pub steps: Vec<RouteStep>,
    pub total_distance: Weight,
    pub elevation_gain: u64,
}

impl RouteSummary {
    /// Resolve names, elevations and per-hop costs for `plan`.
    pub fn from_plan(paths: &ShortestPaths, plan: &RoutePlan) -> Result<Self> {
        let graph = paths.graph();
        let mut steps = Vec::with_capacity(plan.steps.len());
        let mut previous: Option<LocationId> = None;
        for (index, &id) in plan.steps.steps().iter().enumerate() {
            let location = graph
                .location(id)
                .ok_or_else(|| Error::invalid(format!("route visits unknown location {id}")))?;
            let leg = match previous {
                Some(prev) => paths.distance(prev, id)?,
                None => None,
            };
            steps.push(RouteStep {
                index,
                id,
                name: location.name.clone(),
                elevation: location.elevation,
                leg,
            });
            previous = Some(id);
        }

        let (Some(start), Some(goal)) = (steps.first().cloned(), steps.last().cloned()) else {
            return Err(Error::invalid("route plan was empty"));
        };

        Ok(Self {
            hops: plan.hop_count(),
            start,
            goal,
            steps,
            total_distance: plan.distance,
            elevation_gain: plan.elevation_gain,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::Basic => self.render_basic(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_basic(&self) -> String {
        let mut buffer = String::new();
        let len = self.steps.len();
        for (i, step) in self.steps.iter().enumerate() {
            let prefix = if i == 0 {
                '+'
            } else if i + 1 == len {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(buffer, "{} {}", prefix, step.name);
        }
        let _ = writeln!(
            buffer,
            "distance {} / climb {} m",
            self.total_distance, self.elevation_gain
        );
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} hops, distance {}, climb {} m)",
            self.start.name, self.goal.name, self.hops, self.total_distance, self.elevation_gain
        );
        for step in &self.steps {
            match step.leg {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. **{}** ({} m, +{})",
                        step.index, step.name, step.elevation, leg
                    );
                }
                None => {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. **{}** ({} m)",
                        step.index, step.name, step.elevation
                    );
                }
            }
        }
        buffer
    }
}

/// Which converged table a [`MatrixView`] shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    Distance,
    Predecessor,
}

/// Serializable copy of one converged table for rendering.
///
/// Cells are `None` where the distance is unreachable or the predecessor is
/// unset.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatrixView {
    pub kind: MatrixKind,
    pub labels: Vec<String>,
    pub rows: Vec<Vec<Option<i64>>>,
}

impl MatrixView {
    pub fn from_paths(paths: &ShortestPaths, kind: MatrixKind) -> Self {
        let matrices = paths.matrices();
        let labels = paths
            .graph()
            .locations()
            .iter()
            .map(|loc| loc.name.clone())
            .collect();
        let rows = match kind {
            MatrixKind::Distance => matrices
                .distances()
                .rows()
                .map(|row| row.to_vec())
                .collect(),
            MatrixKind::Predecessor => matrices
                .predecessors()
                .rows()
                .map(|row| row.iter().map(|cell| cell.map(|id| id as i64)).collect())
                .collect(),
        };
        Self { kind, labels, rows }
    }

    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    /// Widest rendered cell, used to size table columns.
    pub fn cell_width(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .map(|cell| cell.map(|v| v.to_string().len()).unwrap_or(1))
            .chain(std::iter::once(self.dimension().saturating_sub(1).to_string().len()))
            .max()
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::graph::GraphBuilder;

    fn paths() -> ShortestPaths {
        let mut builder = GraphBuilder::new();
        builder.add_location("Bourg d'Oisans", 720).unwrap();
        builder.add_location("Alpe d'Huez", 1850).unwrap();
        builder.add_location("Col de Sarenne", 1999).unwrap();
        builder.add_edge(0, 1, 14).unwrap();
        builder.add_edge(1, 2, 9).unwrap();
        ShortestPaths::compute(&builder.build(), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn summary_resolves_names_and_legs() {
        let paths = paths();
        let plan = paths.route(0, 2).unwrap();
        let summary = RouteSummary::from_plan(&paths, &plan).unwrap();

        assert_eq!(summary.hops, 2);
        assert_eq!(summary.start.name, "Bourg d'Oisans");
        assert_eq!(summary.goal.name, "Col de Sarenne");
        assert_eq!(summary.steps[0].leg, None);
        assert_eq!(summary.steps[2].leg, Some(9));
        assert_eq!(summary.total_distance, 23);
        assert_eq!(summary.elevation_gain, 1279);
    }

    #[test]
    fn basic_rendering_marks_endpoints() {
        let paths = paths();
        let plan = paths.route(0, 2).unwrap();
        let text = RouteSummary::from_plan(&paths, &plan)
            .unwrap()
            .render(RouteRenderMode::Basic);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "+ Bourg d'Oisans");
        assert_eq!(lines[1], "| Alpe d'Huez");
        assert_eq!(lines[2], "- Col de Sarenne");
    }

    #[test]
    fn matrix_view_copies_tables() {
        let paths = paths();
        let distances = MatrixView::from_paths(&paths, MatrixKind::Distance);
        assert_eq!(distances.rows[0], vec![Some(0), Some(14), Some(23)]);
        assert_eq!(distances.rows[2], vec![None, None, Some(0)]);
        assert_eq!(distances.cell_width(), 2);

        let predecessors = MatrixView::from_paths(&paths, MatrixKind::Predecessor);
        assert_eq!(predecessors.rows[0], vec![Some(0), Some(0), Some(1)]);
    }
}
